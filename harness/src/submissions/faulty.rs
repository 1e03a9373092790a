//! `Faulty`: the right shapes, the wrong logic.
//!
//! - `get_repeat_customers` keeps every customer, including single buyers.
//! - `calculate_total_spend` sums `Quantity` instead of `TotalAmount`.
//! - `merge_customer_info` panics on any input.

use coursegrade_kernel::carrier::table::Table;
use coursegrade_kernel::operators::group::{group_count, group_sum};

use crate::contract::{
    EntryPoint, Record, SubmissionError, SubmissionV1, CUSTOMER_ID, PURCHASE_COUNT, TOTAL_SPENT,
};
use crate::submissions::reference::{failed, Reference};

/// Structurally plausible, logically wrong.
pub struct Faulty;

impl SubmissionV1 for Faulty {
    #[allow(clippy::unnecessary_literal_bound)]
    fn submission_id(&self) -> &str {
        "faulty"
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
        _customers: &Table,
    ) -> Result<Table, SubmissionError> {
        panic!(
            "customer lookup ran past row {} of the purchase table",
            purchases.row_count()
        );
    }

    fn get_repeat_customers(&self, purchases: &Table) -> Result<Table, SubmissionError> {
        group_count(purchases, CUSTOMER_ID, PURCHASE_COUNT)
            .map_err(|e| failed(EntryPoint::GetRepeatCustomers, e))
    }

    fn calculate_total_spend(&self, purchases: &Table) -> Result<Table, SubmissionError> {
        group_sum(purchases, CUSTOMER_ID, "Quantity", TOTAL_SPENT)
            .map_err(|e| failed(EntryPoint::CalculateTotalSpend, e))
    }
}
