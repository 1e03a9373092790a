//! Carrier module: cell values, tables, and the table wire codec.
//!
//! This is the foundational layer. No other kernel module is imported here.

pub mod table;
pub mod value;
pub mod wire;
