//! `Hardcoded`: memorized answers for the repeat-buyer and spend cases.
//!
//! The constructors and the merge are genuine; the two aggregations ignore
//! their input and return the fixed-case answers. The anti-cheat probes must
//! catch it.

use coursegrade_kernel::carrier::table::Table;

use crate::contract::{
    EntryPoint, Record, SubmissionError, SubmissionV1, CUSTOMER_ID, PURCHASE_COUNT, TOTAL_SPENT,
};
use crate::submissions::reference::{failed, Reference};

/// Passes the fixed cases by returning their literal answers.
pub struct Hardcoded;

impl SubmissionV1 for Hardcoded {
    #[allow(clippy::unnecessary_literal_bound)]
    fn submission_id(&self) -> &str {
        "hardcoded"
    }

    fn create_purchase_df(&self, records: &[Record]) -> Result<Table, SubmissionError> {
        Reference.create_purchase_df(records)
    }

    fn create_customer_df(&self, records: &[Record]) -> Result<Table, SubmissionError> {
        Reference.create_customer_df(records)
    }

    fn merge_customer_info(
        &self,
        purchases: &Table,
        customers: &Table,
    ) -> Result<Table, SubmissionError> {
        Reference.merge_customer_info(purchases, customers)
    }

    fn get_repeat_customers(&self, _purchases: &Table) -> Result<Table, SubmissionError> {
        Table::from_records(&[CUSTOMER_ID, PURCHASE_COUNT], &[vec![401.into(), 2.into()]])
            .map_err(|e| failed(EntryPoint::GetRepeatCustomers, e))
    }

    fn calculate_total_spend(&self, _purchases: &Table) -> Result<Table, SubmissionError> {
        Table::from_records(
            &[CUSTOMER_ID, TOTAL_SPENT],
            &[
                vec![401.into(), 6000.0.into()],
                vec![402.into(), 1200.0.into()],
            ],
        )
        .map_err(|e| failed(EntryPoint::CalculateTotalSpend, e))
    }
}
