//! Shared fixtures for the lock tests.
//!
//! Table generators for the property tests.

use rand::Rng;

use coursegrade_kernel::carrier::value::Value;

/// Products drawn by [`random_purchase_records`].
pub const PRODUCTS: [&str; 5] = ["Shoes", "T-Shirt", "Watch", "Bag", "Hat"];

/// `n` purchase records over `customers` distinct ids starting at 500.
///
/// Amounts are whole rupees so sums stay exact in `f64`.
///
/// # Panics
///
/// Panics if `customers` is zero.
pub fn random_purchase_records<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    customers: i64,
) -> Vec<Vec<Value>> {
    assert!(customers > 0, "need at least one customer");
    (0..n)
        .map(|_| {
            vec![
                Value::Int(500 + rng.gen_range(0..customers)),
                Value::from(PRODUCTS[rng.gen_range(0..PRODUCTS.len())]),
                Value::Int(rng.gen_range(1..=5)),
                Value::Float(f64::from(rng.gen_range(1_u32..=5000))),
            ]
        })
        .collect()
}

/// Customer records for ids `500..500 + customers`.
#[must_use]
pub fn customer_records(customers: i64) -> Vec<Vec<Value>> {
    (0..customers)
        .map(|i| {
            vec![
                Value::Int(500 + i),
                Value::Text(format!("Customer {i}")),
                Value::from("Pune"),
            ]
        })
        .collect()
}
