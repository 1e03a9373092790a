//! Submission contract: the five entry points a learner implements.
//!
//! A submission provides the data transformations of the exercise. It may NOT
//! see which probe is calling it, the failure set, or the ledger (those are
//! runner concerns); every call receives plain inputs and returns a table.
//!
//! Submissions arrive either in-process (a type implementing [`SubmissionV1`],
//! see [`crate::submissions`]) or out-of-process through
//! [`crate::loader::ProcessSubmission`], which implements the same trait.

use coursegrade_kernel::carrier::table::Table;
use coursegrade_kernel::carrier::value::Value;
use coursegrade_kernel::proof::hash::ContentHash;

/// Key column shared by every table in the exercise.
pub const CUSTOMER_ID: &str = "CustomerID";
/// Purchase table columns, in required order.
pub const PURCHASE_COLUMNS: [&str; 4] = [CUSTOMER_ID, "Product", "Quantity", "TotalAmount"];
/// Customer table columns, in required order.
pub const CUSTOMER_COLUMNS: [&str; 3] = [CUSTOMER_ID, "CustomerName", "Location"];
/// Derived column of the repeat-customer table.
pub const PURCHASE_COUNT: &str = "PurchaseCount";
/// Derived column of the spend table.
pub const TOTAL_SPENT: &str = "TotalSpent";
/// Purchase amount column summed into [`TOTAL_SPENT`].
pub const TOTAL_AMOUNT: &str = "TotalAmount";
/// Customer name column checked by the customer-table case.
pub const CUSTOMER_NAME: &str = "CustomerName";

/// One input row handed to a constructor entry point.
pub type Record = Vec<Value>;

/// The five entry points, by their fixed names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryPoint {
    CreatePurchaseDf,
    CreateCustomerDf,
    MergeCustomerInfo,
    GetRepeatCustomers,
    CalculateTotalSpend,
}

impl EntryPoint {
    /// Every entry point, in exercise order.
    pub const ALL: [EntryPoint; 5] = [
        Self::CreatePurchaseDf,
        Self::CreateCustomerDf,
        Self::MergeCustomerInfo,
        Self::GetRepeatCustomers,
        Self::CalculateTotalSpend,
    ];

    /// The fixed name a submission exposes this entry point under.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatePurchaseDf => "create_purchase_df",
            Self::CreateCustomerDf => "create_customer_df",
            Self::MergeCustomerInfo => "merge_customer_info",
            Self::GetRepeatCustomers => "get_repeat_customers",
            Self::CalculateTotalSpend => "calculate_total_spend",
        }
    }

    /// Resolve an entry point from its fixed name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == name)
    }
}

impl std::fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed failure returned by a submission's entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The submission does not provide this entry point.
    NotImplemented { entry_point: EntryPoint },
    /// The entry point returned something that is not a table.
    WrongType { entry_point: EntryPoint, detail: String },
    /// The entry point raised an error of its own.
    Failed { entry_point: EntryPoint, detail: String },
    /// The submission process could not be run or exited abnormally.
    Crashed { entry_point: EntryPoint, detail: String },
}

impl SubmissionError {
    /// The entry point that failed.
    #[must_use]
    pub fn entry_point(&self) -> EntryPoint {
        match self {
            Self::NotImplemented { entry_point }
            | Self::WrongType { entry_point, .. }
            | Self::Failed { entry_point, .. }
            | Self::Crashed { entry_point, .. } => *entry_point,
        }
    }
}

impl std::fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotImplemented { entry_point } => write!(f, "{entry_point} is not implemented"),
            Self::WrongType {
                entry_point,
                detail,
            } => write!(f, "{entry_point} returned a non-table: {detail}"),
            Self::Failed {
                entry_point,
                detail,
            } => write!(f, "{entry_point} failed: {detail}"),
            Self::Crashed {
                entry_point,
                detail,
            } => write!(f, "{entry_point} crashed: {detail}"),
        }
    }
}

impl std::error::Error for SubmissionError {}

/// The contract a submission must implement to be graded.
///
/// A submission provides:
/// - A human-readable identifier
/// - The five entry points of the exercise
///
/// A submission does NOT provide:
/// - Any check of its own outputs (runner's job)
/// - Isolation from its own panics (the probe guard's job)
pub trait SubmissionV1 {
    /// Identifier used in reports and logs (e.g., `"reference"`).
    fn submission_id(&self) -> &str;

    /// Digest of the submission's source, when it was loaded from disk.
    fn source_digest(&self) -> Option<&ContentHash> {
        None
    }

    /// Build a purchase table from `[CustomerID, Product, Quantity, TotalAmount]` records.
    ///
    /// # Errors
    ///
    /// Any [`SubmissionError`]; the harness treats all of them as a failed probe.
    fn create_purchase_df(&self, records: &[Record]) -> Result<Table, SubmissionError>;

    /// Build a customer table from `[CustomerID, CustomerName, Location]` records.
    ///
    /// # Errors
    ///
    /// Any [`SubmissionError`].
    fn create_customer_df(&self, records: &[Record]) -> Result<Table, SubmissionError>;

    /// Join customer details onto purchases by `CustomerID`.
    ///
    /// # Errors
    ///
    /// Any [`SubmissionError`].
    fn merge_customer_info(
        &self,
        purchases: &Table,
        customers: &Table,
    ) -> Result<Table, SubmissionError>;

    /// Customers with two or more purchases, with a `PurchaseCount` column.
    ///
    /// # Errors
    ///
    /// Any [`SubmissionError`].
    fn get_repeat_customers(&self, purchases: &Table) -> Result<Table, SubmissionError>;

    /// One row per customer with the sum of `TotalAmount` as `TotalSpent`.
    ///
    /// # Errors
    ///
    /// Any [`SubmissionError`].
    fn calculate_total_spend(&self, purchases: &Table) -> Result<Table, SubmissionError>;
}
