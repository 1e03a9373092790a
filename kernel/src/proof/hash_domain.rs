//! Typed domain separators for canonical hashing.
//!
//! Every digest the workspace produces selects a domain via [`HashDomain`],
//! so a report digest can never collide with a submission digest over the
//! same bytes. This module is the single authority for domain-separator
//! byte strings. The enum, `as_bytes()`, `ALL`, and `Display` are all
//! generated from one macro invocation.

/// Declares `HashDomain` enum, `as_bytes()`, `ALL`, and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used as
        /// a SHA-256 prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            ///
            /// Generated from the same macro invocation as the enum.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    /// Submission source bytes (process plugins).
    SubmissionSource => b"COURSEGRADE::SUBMISSION_SOURCE::V1\0",

    /// Canonical JSON grade report.
    GradeReport => b"COURSEGRADE::GRADE_REPORT::V1\0",

    /// Canonical JSON encoding of a single table.
    TableContent => b"COURSEGRADE::TABLE_CONTENT::V1\0",
}
