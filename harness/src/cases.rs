//! Fixed test cases: phase 2 of a grading run.
//!
//! Five cases, one per entry point, each inside its own isolation boundary and
//! each producing exactly one [`LedgerLine`]. The repeat-buyer and spend cases
//! call the submission first and only then consult the [`FailureSet`]: a
//! vetoed entry point still runs, but cannot pass.

use tracing::debug;

use coursegrade_kernel::carrier::table::Table;
use coursegrade_kernel::carrier::value::Value;
use coursegrade_kernel::proof::hash::table_digest;

use crate::contract::{
    EntryPoint, Record, SubmissionV1, CUSTOMER_COLUMNS, CUSTOMER_ID, CUSTOMER_NAME,
    PURCHASE_COLUMNS, TOTAL_SPENT,
};
use crate::isolate::{ensure, guarded, ProbeFailure};
use crate::probes::FailureSet;
use crate::report::{LedgerLine, Verdict};

/// Identifier of a fixed case, in ledger order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CaseId {
    Tc1,
    Tc2,
    Tc3,
    Tc4,
    Tc5,
}

impl CaseId {
    pub const ALL: [CaseId; 5] = [Self::Tc1, Self::Tc2, Self::Tc3, Self::Tc4, Self::Tc5];

    /// Ledger label (`"TC1"` .. `"TC5"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tc1 => "TC1",
            Self::Tc2 => "TC2",
            Self::Tc3 => "TC3",
            Self::Tc4 => "TC4",
            Self::Tc5 => "TC5",
        }
    }

    /// Ledger description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Tc1 => "Creating structured purchase DataFrame",
            Self::Tc2 => "Creating customer profile DataFrame",
            Self::Tc3 => "Merging customer info into purchase data",
            Self::Tc4 => "Identifying repeat buyers",
            Self::Tc5 => "Calculating total spend per customer",
        }
    }

    /// The entry point this case exercises.
    #[must_use]
    pub const fn entry_point(self) -> EntryPoint {
        match self {
            Self::Tc1 => EntryPoint::CreatePurchaseDf,
            Self::Tc2 => EntryPoint::CreateCustomerDf,
            Self::Tc3 => EntryPoint::MergeCustomerInfo,
            Self::Tc4 => EntryPoint::GetRepeatCustomers,
            Self::Tc5 => EntryPoint::CalculateTotalSpend,
        }
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Purchase records of the first case: 401 buys twice, 402 once.
#[must_use]
pub fn purchase_records() -> Vec<Record> {
    vec![
        vec![401.into(), "Shoes".into(), 1.into(), 2500.0.into()],
        vec![402.into(), "T-Shirt".into(), 2.into(), 1200.0.into()],
        vec![401.into(), "Watch".into(), 1.into(), 3500.0.into()],
    ]
}

/// Customer records of the second case.
#[must_use]
pub fn customer_records() -> Vec<Record> {
    vec![
        vec![401.into(), "Alice".into(), "Mumbai".into()],
        vec![402.into(), "Bob".into(), "Delhi".into()],
    ]
}

/// The first case's purchases as a table, as handed to TC4 and TC5.
///
/// # Panics
///
/// Never in practice: the literal rows match the purchase schema.
#[must_use]
pub fn purchase_table() -> Table {
    Table::from_records(&PURCHASE_COLUMNS, &purchase_records())
        .expect("fixed purchase records match the purchase schema; this is a bug if it fails")
}

/// The two purchases (one per customer) merged in TC3.
///
/// # Panics
///
/// Never in practice.
#[must_use]
pub fn merge_purchases() -> Table {
    Table::from_records(
        &PURCHASE_COLUMNS,
        &[
            vec![401.into(), "Shoes".into(), 1.into(), 2500.0.into()],
            vec![402.into(), "T-Shirt".into(), 2.into(), 1200.0.into()],
        ],
    )
    .expect("fixed merge purchases match the purchase schema; this is a bug if it fails")
}

/// The customers merged in TC3.
///
/// # Panics
///
/// Never in practice.
#[must_use]
pub fn merge_customers() -> Table {
    Table::from_records(&CUSTOMER_COLUMNS, &customer_records())
        .expect("fixed customer records match the customer schema; this is a bug if it fails")
}

fn check_purchase_table(submission: &dyn SubmissionV1) -> Result<Table, ProbeFailure> {
    let entry = EntryPoint::CreatePurchaseDf;
    let records = purchase_records();
    let table = guarded(entry, || submission.create_purchase_df(&records))?;
    ensure(table.shape() == (3, 4), entry, || {
        format!("expected shape (3, 4), got {:?}", table.shape())
    })?;
    ensure(table.columns() == PURCHASE_COLUMNS, entry, || {
        format!("unexpected columns {:?}", table.columns())
    })?;
    Ok(table)
}

fn check_customer_table(submission: &dyn SubmissionV1) -> Result<Table, ProbeFailure> {
    let entry = EntryPoint::CreateCustomerDf;
    let records = customer_records();
    let table = guarded(entry, || submission.create_customer_df(&records))?;
    ensure(table.shape() == (2, 3), entry, || {
        format!("expected shape (2, 3), got {:?}", table.shape())
    })?;
    ensure(table.has_column(CUSTOMER_NAME), entry, || {
        format!("missing {CUSTOMER_NAME} column")
    })?;
    Ok(table)
}

fn check_merge(submission: &dyn SubmissionV1) -> Result<Table, ProbeFailure> {
    let entry = EntryPoint::MergeCustomerInfo;
    let (purchases, customers) = (merge_purchases(), merge_customers());
    let table = guarded(entry, || submission.merge_customer_info(&purchases, &customers))?;
    ensure(table.shape() == (2, 6), entry, || {
        format!("expected shape (2, 6), got {:?}", table.shape())
    })?;
    Ok(table)
}

fn check_repeat_customers(
    submission: &dyn SubmissionV1,
    failures: &FailureSet,
) -> Result<Table, ProbeFailure> {
    let entry = EntryPoint::GetRepeatCustomers;
    let input = purchase_table();
    let table = guarded(entry, || submission.get_repeat_customers(&input))?;
    veto(failures, entry)?;
    ensure(table.row_count() == 1, entry, || {
        format!("expected 1 repeat customer, got {}", table.row_count())
    })?;
    let id = table.cell(0, CUSTOMER_ID);
    ensure(id.is_some_and(|v| v.as_i64() == Some(401)), entry, || {
        format!("expected {CUSTOMER_ID} 401, got {id:?}")
    })?;
    Ok(table)
}

fn check_total_spend(
    submission: &dyn SubmissionV1,
    failures: &FailureSet,
) -> Result<Table, ProbeFailure> {
    let entry = EntryPoint::CalculateTotalSpend;
    let input = purchase_table();
    let table = guarded(entry, || submission.calculate_total_spend(&input))?;
    veto(failures, entry)?;
    for (customer, expected) in [(401, 6000.0), (402, 1200.0)] {
        let key = Value::Int(customer);
        let matches = table.count_matching(CUSTOMER_ID, &key);
        ensure(matches == 1, entry, || {
            format!("expected one row for {customer}, got {matches}")
        })?;
        let spent = table.lookup(CUSTOMER_ID, &key, TOTAL_SPENT);
        ensure(spent.is_some_and(|v| v.equals_number(expected)), entry, || {
            format!("expected {expected} for {customer}, got {spent:?}")
        })?;
    }
    Ok(table)
}

fn veto(failures: &FailureSet, entry_point: EntryPoint) -> Result<(), ProbeFailure> {
    if failures.contains(entry_point) {
        Err(ProbeFailure::Vetoed { entry_point })
    } else {
        Ok(())
    }
}

/// Run one fixed case and turn its outcome into a ledger line.
#[must_use]
pub fn run_case(case: CaseId, submission: &dyn SubmissionV1, failures: &FailureSet) -> LedgerLine {
    let outcome = match case {
        CaseId::Tc1 => check_purchase_table(submission),
        CaseId::Tc2 => check_customer_table(submission),
        CaseId::Tc3 => check_merge(submission),
        CaseId::Tc4 => check_repeat_customers(submission, failures),
        CaseId::Tc5 => check_total_spend(submission, failures),
    };
    match outcome {
        Ok(table) => {
            debug!(case = %case, "fixed case passed");
            LedgerLine {
                case,
                verdict: Verdict::Pass,
                output_digest: table_digest(&table).ok(),
            }
        }
        Err(reason) => {
            debug!(case = %case, %reason, "fixed case failed");
            LedgerLine {
                case,
                verdict: Verdict::Fail,
                output_digest: None,
            }
        }
    }
}

/// Run all five fixed cases in ledger order.
#[must_use]
pub fn run_cases(submission: &dyn SubmissionV1, failures: &FailureSet) -> Vec<LedgerLine> {
    CaseId::ALL
        .into_iter()
        .map(|case| run_case(case, submission, failures))
        .collect()
}
