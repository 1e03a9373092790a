//! Anti-cheat probes: phase 1 of a grading run.
//!
//! Each probe calls one entry point on input the fixed cases never use
//! (randomized identifiers, or a structurally different fixed table) and
//! checks the same logic the fixed case will check. A probe emits nothing to
//! the ledger; it only marks its entry point in the [`FailureSet`], which
//! later vetoes the matching fixed case. A submission that pattern-matches
//! the fixed-case literals passes the fixed check but not the probe.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::debug;

use coursegrade_kernel::carrier::table::Table;
use coursegrade_kernel::carrier::value::Value;

use crate::contract::{
    EntryPoint, Record, SubmissionV1, CUSTOMER_ID, PURCHASE_COLUMNS, PURCHASE_COUNT, TOTAL_SPENT,
};
use crate::isolate::{ensure, guarded, ProbeFailure};

/// Inclusive range randomized probe identifiers are drawn from.
pub const RANDOM_ID_RANGE: std::ops::RangeInclusive<i64> = 1000..=1999;

/// Customer that appears twice in the anti-cheat table.
pub const PROBE_REPEAT_ID: i64 = 111;
/// Customer that appears once in the anti-cheat table.
pub const PROBE_SINGLE_ID: i64 = 222;
/// Expected `TotalSpent` for [`PROBE_REPEAT_ID`] (100.0 + 150.0).
pub const PROBE_REPEAT_SPEND: f64 = 250.0;

/// Entry points whose anti-cheat probe failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureSet(BTreeSet<EntryPoint>);

impl FailureSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an entry point as failed. Marking twice is a no-op.
    pub fn mark(&mut self, entry_point: EntryPoint) {
        self.0.insert(entry_point);
    }

    #[must_use]
    pub fn contains(&self, entry_point: EntryPoint) -> bool {
        self.0.contains(&entry_point)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failed entry points in [`EntryPoint`] order.
    pub fn iter(&self) -> impl Iterator<Item = EntryPoint> + '_ {
        self.0.iter().copied()
    }
}

/// Three purchase records with identifiers drawn from [`RANDOM_ID_RANGE`].
pub fn random_purchase_records<R: Rng + ?Sized>(rng: &mut R) -> Vec<Record> {
    [("ItemA", 1, 100.0), ("ItemB", 2, 200.0), ("ItemC", 1, 300.0)]
        .into_iter()
        .map(|(product, quantity, amount)| {
            vec![
                Value::Int(rng.gen_range(RANDOM_ID_RANGE)),
                Value::from(product),
                Value::Int(quantity),
                Value::Float(amount),
            ]
        })
        .collect()
}

/// The fixed anti-cheat purchase table: 111 twice, 222 once.
///
/// # Panics
///
/// Never in practice: the literal rows match the purchase schema.
#[must_use]
pub fn anti_cheat_purchases() -> Table {
    Table::from_records(
        &PURCHASE_COLUMNS,
        &[
            vec![PROBE_REPEAT_ID.into(), "Item1".into(), 1.into(), 100.0.into()],
            vec![PROBE_SINGLE_ID.into(), "Item2".into(), 2.into(), 200.0.into()],
            vec![PROBE_REPEAT_ID.into(), "Item3".into(), 1.into(), 150.0.into()],
        ],
    )
    .expect("anti-cheat fixture matches the purchase schema")
}

/// Probe `create_purchase_df` with randomized identifiers: at least 3 rows back.
///
/// # Errors
///
/// Returns the [`ProbeFailure`] that failed the probe.
pub fn probe_purchase_constructor<R: Rng + ?Sized>(
    submission: &dyn SubmissionV1,
    rng: &mut R,
) -> Result<(), ProbeFailure> {
    let entry = EntryPoint::CreatePurchaseDf;
    let records = random_purchase_records(rng);
    let table = guarded(entry, || submission.create_purchase_df(&records))?;
    ensure(table.row_count() >= records.len(), entry, || {
        format!("expected at least {} rows, got {}", records.len(), table.row_count())
    })
}

/// Probe `get_repeat_customers`: exactly one row, customer 111, with a count column.
///
/// # Errors
///
/// Returns the [`ProbeFailure`] that failed the probe.
pub fn probe_repeat_customers(submission: &dyn SubmissionV1) -> Result<(), ProbeFailure> {
    let entry = EntryPoint::GetRepeatCustomers;
    let input = anti_cheat_purchases();
    let table = guarded(entry, || submission.get_repeat_customers(&input))?;
    ensure(table.has_column(PURCHASE_COUNT), entry, || {
        format!("missing {PURCHASE_COUNT} column")
    })?;
    ensure(table.row_count() == 1, entry, || {
        format!("expected 1 repeat customer, got {}", table.row_count())
    })?;
    let id = table.cell(0, CUSTOMER_ID);
    ensure(
        id.is_some_and(|v| v.as_i64() == Some(PROBE_REPEAT_ID)),
        entry,
        || format!("expected {CUSTOMER_ID} {PROBE_REPEAT_ID}, got {id:?}"),
    )
}

/// Probe `calculate_total_spend`: customer 111 must show exactly 250.0.
///
/// # Errors
///
/// Returns the [`ProbeFailure`] that failed the probe.
pub fn probe_total_spend(submission: &dyn SubmissionV1) -> Result<(), ProbeFailure> {
    let entry = EntryPoint::CalculateTotalSpend;
    let input = anti_cheat_purchases();
    let table = guarded(entry, || submission.calculate_total_spend(&input))?;
    ensure(table.has_column(TOTAL_SPENT), entry, || {
        format!("missing {TOTAL_SPENT} column")
    })?;
    let key = Value::Int(PROBE_REPEAT_ID);
    let matches = table.count_matching(CUSTOMER_ID, &key);
    ensure(matches == 1, entry, || {
        format!("expected one row for {PROBE_REPEAT_ID}, got {matches}")
    })?;
    let spent = table.lookup(CUSTOMER_ID, &key, TOTAL_SPENT);
    ensure(
        spent.is_some_and(|v| v.equals_number(PROBE_REPEAT_SPEND)),
        entry,
        || format!("expected {PROBE_REPEAT_SPEND} for {PROBE_REPEAT_ID}, got {spent:?}"),
    )
}

/// Run all three probes, collecting the entry points that failed.
pub fn run_probes<R: Rng + ?Sized>(submission: &dyn SubmissionV1, rng: &mut R) -> FailureSet {
    let outcomes = [
        (
            EntryPoint::CreatePurchaseDf,
            probe_purchase_constructor(submission, rng),
        ),
        (
            EntryPoint::GetRepeatCustomers,
            probe_repeat_customers(submission),
        ),
        (
            EntryPoint::CalculateTotalSpend,
            probe_total_spend(submission),
        ),
    ];

    let mut failures = FailureSet::new();
    for (entry, outcome) in outcomes {
        match outcome {
            Ok(()) => debug!(entry_point = %entry, "anti-cheat probe passed"),
            Err(reason) => {
                debug!(entry_point = %entry, %reason, "anti-cheat probe failed");
                failures.mark(entry);
            }
        }
    }
    failures
}
