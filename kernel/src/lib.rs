//! Coursegrade Kernel: the tabular core shared by the harness and submissions.
//!
//! # API Surface
//!
//! - [`carrier::table::Table`] -- the tabular structure every entry point
//!   consumes and produces
//! - [`operators`] -- join, group and filter operators over tables
//! - [`carrier::wire`] -- JSON codec used by the process-plugin protocol
//! - [`proof::canon::canonical_json_bytes`] + [`proof::hash::canonical_hash`]
//!   -- digests for grade reports and submission sources
//!
//! # Module Dependency Direction
//!
//! `carrier` ← `operators`, `carrier` ← `proof`
//!
//! One-way only. No cycles. `operators` and `proof` depend on `carrier`.
//! `carrier` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod operators;
pub mod proof;
