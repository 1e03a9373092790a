//! `Stub`: an untouched starter file. Nothing is implemented.

use coursegrade_kernel::carrier::table::Table;

use crate::contract::{EntryPoint, Record, SubmissionError, SubmissionV1};

/// Every entry point returns [`SubmissionError::NotImplemented`].
pub struct Stub;

fn missing(entry_point: EntryPoint) -> Result<Table, SubmissionError> {
    Err(SubmissionError::NotImplemented { entry_point })
}

impl SubmissionV1 for Stub {
    #[allow(clippy::unnecessary_literal_bound)]
    fn submission_id(&self) -> &str {
        "stub"
    }

    fn create_purchase_df(&self, _records: &[Record]) -> Result<Table, SubmissionError> {
        missing(EntryPoint::CreatePurchaseDf)
    }

    fn create_customer_df(&self, _records: &[Record]) -> Result<Table, SubmissionError> {
        missing(EntryPoint::CreateCustomerDf)
    }

    fn merge_customer_info(
        &self,
        _purchases: &Table,
        _customers: &Table,
    ) -> Result<Table, SubmissionError> {
        missing(EntryPoint::MergeCustomerInfo)
    }

    fn get_repeat_customers(&self, _purchases: &Table) -> Result<Table, SubmissionError> {
        missing(EntryPoint::GetRepeatCustomers)
    }

    fn calculate_total_spend(&self, _purchases: &Table) -> Result<Table, SubmissionError> {
        missing(EntryPoint::CalculateTotalSpend)
    }
}
