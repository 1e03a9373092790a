//! `Reference`: a correct solution built on the kernel operators.

use coursegrade_kernel::carrier::table::Table;
use coursegrade_kernel::operators::group::{group_count, group_sum};
use coursegrade_kernel::operators::join::inner_join;
use coursegrade_kernel::operators::select::filter_column;

use crate::contract::{
    EntryPoint, Record, SubmissionError, SubmissionV1, CUSTOMER_COLUMNS, CUSTOMER_ID,
    PURCHASE_COLUMNS, PURCHASE_COUNT, TOTAL_AMOUNT, TOTAL_SPENT,
};

/// Correct implementation of all five entry points.
pub struct Reference;

pub(crate) fn failed(entry_point: EntryPoint, e: impl std::fmt::Display) -> SubmissionError {
    SubmissionError::Failed {
        entry_point,
        detail: e.to_string(),
    }
}

impl SubmissionV1 for Reference {
    #[allow(clippy::unnecessary_literal_bound)]
    fn submission_id(&self) -> &str {
        "reference"
    }

    fn create_purchase_df(&self, records: &[Record]) -> Result<Table, SubmissionError> {
        Table::from_records(&PURCHASE_COLUMNS, records)
            .map_err(|e| failed(EntryPoint::CreatePurchaseDf, e))
    }

    fn create_customer_df(&self, records: &[Record]) -> Result<Table, SubmissionError> {
        Table::from_records(&CUSTOMER_COLUMNS, records)
            .map_err(|e| failed(EntryPoint::CreateCustomerDf, e))
    }

    fn merge_customer_info(
        &self,
        purchases: &Table,
        customers: &Table,
    ) -> Result<Table, SubmissionError> {
        inner_join(purchases, customers, CUSTOMER_ID)
            .map_err(|e| failed(EntryPoint::MergeCustomerInfo, e))
    }

    fn get_repeat_customers(&self, purchases: &Table) -> Result<Table, SubmissionError> {
        let entry = EntryPoint::GetRepeatCustomers;
        let counts =
            group_count(purchases, CUSTOMER_ID, PURCHASE_COUNT).map_err(|e| failed(entry, e))?;
        filter_column(&counts, PURCHASE_COUNT, |v| {
            v.as_i64().is_some_and(|n| n >= 2)
        })
        .map_err(|e| failed(entry, e))
    }

    fn calculate_total_spend(&self, purchases: &Table) -> Result<Table, SubmissionError> {
        group_sum(purchases, CUSTOMER_ID, TOTAL_AMOUNT, TOTAL_SPENT)
            .map_err(|e| failed(EntryPoint::CalculateTotalSpend, e))
    }
}
