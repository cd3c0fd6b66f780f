//! Core scanning engine.
//!
//! The scan runs in two phases:
//!
//! 1. **Walk**: `file_scanner` enumerates `.rs` files under a root, skipping
//!    anything whose basename matches an exclusion glob.
//! 2. **Extract**: each file is parsed with `syn` (no compilation) and the
//!    top-level exported type declarations that pass the candidate predicate
//!    become `ResourceMetadata` records.
//!
//! `Scanner` ties both phases together, hands the merged metadata to the
//! conflict detector and produces an immutable `ScanResult`.

pub mod error;
pub mod extract;
pub mod file_scanner;
pub mod metadata;
pub mod parsers;
pub mod scanner;

pub use error::ScanError;
pub use extract::{CandidateMatcher, DeclarationKind, NamingHeuristic, derive_slug};
pub use metadata::{
    ResourceKey, ResourceMetadata, ScanResult, filter_by_package, group_by_package, slugs,
    type_names,
};
pub use scanner::Scanner;
