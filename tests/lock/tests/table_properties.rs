//! Property tests for the reference transformations over generated tables.
//!
//! Each property is checked over many seeded random inputs so failures
//! reproduce exactly.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use coursegrade_harness::contract::{
    SubmissionV1, CUSTOMER_COLUMNS, CUSTOMER_ID, PURCHASE_COLUMNS, PURCHASE_COUNT, TOTAL_AMOUNT,
    TOTAL_SPENT,
};
use coursegrade_harness::submissions::reference::Reference;
use coursegrade_kernel::carrier::table::Table;
use coursegrade_kernel::carrier::value::{Key, Value};
use coursegrade_kernel::operators::select::filter_column;
use lock_tests::{customer_records, random_purchase_records};

const TRIALS: u64 = 64;

fn purchases(rng: &mut StdRng) -> (Table, i64) {
    let n = rng.gen_range(0..40);
    let customers = rng.gen_range(1..8);
    let records = random_purchase_records(rng, n, customers);
    (Reference.create_purchase_df(&records).unwrap(), customers)
}

fn ids(table: &Table) -> BTreeSet<Key> {
    table
        .column(CUSTOMER_ID)
        .unwrap()
        .into_iter()
        .map(Value::key)
        .collect()
}

#[test]
fn purchase_constructor_keeps_every_record() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    for _ in 0..TRIALS {
        let n = rng.gen_range(0..50);
        let records = random_purchase_records(&mut rng, n, 5);
        let table = Reference.create_purchase_df(&records).unwrap();
        assert_eq!(table.shape(), (n, 4));
        assert_eq!(table.columns(), PURCHASE_COLUMNS);
    }
}

#[test]
fn customer_constructor_keeps_every_record() {
    for m in 0..20 {
        let table = Reference.create_customer_df(&customer_records(m)).unwrap();
        assert_eq!(table.shape(), (usize::try_from(m).unwrap(), 3));
        assert_eq!(table.columns(), CUSTOMER_COLUMNS);
    }
}

#[test]
fn merge_with_full_overlap_keeps_purchase_rows() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..TRIALS {
        let (purchases, customers) = purchases(&mut rng);
        let customer_table = Reference
            .create_customer_df(&customer_records(customers))
            .unwrap();
        let merged = Reference
            .merge_customer_info(&purchases, &customer_table)
            .unwrap();
        assert_eq!(merged.shape(), (purchases.row_count(), 6));
    }
}

#[test]
fn repeat_filter_is_stable_on_its_own_key_set() {
    let mut rng = StdRng::seed_from_u64(22);
    for _ in 0..TRIALS {
        let (purchases, _) = purchases(&mut rng);
        let repeat = Reference.get_repeat_customers(&purchases).unwrap();
        let repeat_ids = ids(&repeat);

        let restricted = filter_column(&purchases, CUSTOMER_ID, |v| {
            repeat_ids.contains(&v.key())
        })
        .unwrap();
        let again = Reference.get_repeat_customers(&restricted).unwrap();
        assert_eq!(ids(&again), repeat_ids);
    }
}

#[test]
fn repeat_counts_are_at_least_two() {
    let mut rng = StdRng::seed_from_u64(33);
    for _ in 0..TRIALS {
        let (purchases, _) = purchases(&mut rng);
        let repeat = Reference.get_repeat_customers(&purchases).unwrap();
        for count in repeat.column(PURCHASE_COUNT).unwrap() {
            assert!(count.as_i64().unwrap() >= 2);
        }
    }
}

#[test]
fn spend_aggregation_preserves_the_total() {
    let mut rng = StdRng::seed_from_u64(44);
    for _ in 0..TRIALS {
        let (purchases, _) = purchases(&mut rng);
        let spend = Reference.calculate_total_spend(&purchases).unwrap();

        let sum = |t: &Table, col: &str| -> f64 {
            t.column(col)
                .unwrap()
                .iter()
                .map(|v| v.as_f64().unwrap())
                .sum()
        };
        // Whole-number amounts: both sums are exact.
        assert_eq!(sum(&spend, TOTAL_SPENT), sum(&purchases, TOTAL_AMOUNT));
        assert_eq!(ids(&spend), ids(&purchases));
        assert_eq!(spend.row_count(), ids(&purchases).len());
    }
}
