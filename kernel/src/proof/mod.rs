//! Proof module: canonical JSON and domain-separated hashing.
//!
//! Depends on `carrier` (for table digests). Nothing in the kernel depends on `proof`.

pub mod canon;
pub mod hash;
pub mod hash_domain;
