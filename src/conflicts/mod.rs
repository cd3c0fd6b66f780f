//! Naming conflicts between discovered declarations.
//!
//! The `detector` runs four independent passes over the full metadata set
//! and the `alias` resolver assigns the unique import qualifiers that let
//! same-named types from different packages coexist in generated code.

pub mod alias;
pub mod detector;

use serde::Serialize;

use crate::core::ResourceMetadata;

pub use alias::{AliasResolver, aliasable, base_alias};
pub use detector::Detector;

/// Severity level of a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Class of naming issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictType {
    /// Same type name declared in several packages.
    DuplicateName,
    /// Placeholder name such as `Resource` or `Item`.
    GenericName,
    /// Name differs from `<Package><Suffix>`.
    NamingConvention,
    /// Same type name declared twice inside one package.
    PackageConflict,
}

impl std::fmt::Display for ConflictType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictType::DuplicateName => write!(f, "duplicate-name"),
            ConflictType::GenericName => write!(f, "generic-name"),
            ConflictType::NamingConvention => write!(f, "naming-convention"),
            ConflictType::PackageConflict => write!(f, "package-conflict"),
        }
    }
}

/// A naming issue found by one detection pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    #[serde(rename = "type")]
    pub conflict_type: ConflictType,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
    /// Declarations involved, in the order the pass produced them.
    pub resources: Vec<ResourceMetadata>,
    /// Whether aliasing resolves the conflict without operator action.
    pub auto_fix: bool,
}

pub fn filter_by_severity(conflicts: &[Conflict], severity: Severity) -> Vec<&Conflict> {
    conflicts.iter().filter(|c| c.severity == severity).collect()
}

pub fn has_errors<'a>(conflicts: impl IntoIterator<Item = &'a Conflict>) -> bool {
    conflicts
        .into_iter()
        .any(|c| c.severity == Severity::Error)
}

pub fn has_warnings<'a>(conflicts: impl IntoIterator<Item = &'a Conflict>) -> bool {
    conflicts
        .into_iter()
        .any(|c| c.severity == Severity::Warning)
}

pub fn auto_fixable(conflicts: &[Conflict]) -> Vec<&Conflict> {
    conflicts.iter().filter(|c| c.auto_fix).collect()
}
