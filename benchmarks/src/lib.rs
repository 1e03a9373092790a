//! Shared helpers for coursegrade benchmark suites.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use coursegrade_harness::contract::{CUSTOMER_COLUMNS, PURCHASE_COLUMNS};
use coursegrade_kernel::carrier::table::Table;
use coursegrade_kernel::carrier::value::Value;

/// Fixed seed so every bench run sees the same tables.
pub const BENCH_SEED: u64 = 0x5EED;

/// A purchase table of `rows` rows over `customers` distinct ids.
///
/// # Panics
///
/// Panics if `customers` is zero. Benchmark setup failures are fatal.
#[must_use]
pub fn purchase_table(rows: usize, customers: i64) -> Table {
    let mut rng = StdRng::seed_from_u64(BENCH_SEED);
    let records: Vec<Vec<Value>> = (0..rows)
        .map(|i| {
            vec![
                Value::Int(rng.gen_range(0..customers)),
                Value::Text(format!("Item{}", i % 17)),
                Value::Int(rng.gen_range(1..=4)),
                Value::Float(f64::from(rng.gen_range(100_u32..=9_000))),
            ]
        })
        .collect();
    Table::from_records(&PURCHASE_COLUMNS, &records).expect("purchase schema")
}

/// A customer table with one row per id in `0..customers`.
///
/// # Panics
///
/// Never in practice.
#[must_use]
pub fn customer_table(customers: i64) -> Table {
    let records: Vec<Vec<Value>> = (0..customers)
        .map(|id| {
            vec![
                Value::Int(id),
                Value::Text(format!("Customer{id}")),
                Value::from("Chennai"),
            ]
        })
        .collect();
    Table::from_records(&CUSTOMER_COLUMNS, &records).expect("customer schema")
}
