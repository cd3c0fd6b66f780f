use std::{collections::BTreeMap, path::PathBuf, time::Duration};

use serde::Serialize;

use crate::conflicts::Conflict;

/// A discovered candidate declaration.
///
/// Created once per matched declaration during extraction and never mutated
/// afterwards. Identity is the `(package_name, type_name)` pair, see
/// [`ResourceKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    pub type_name: String,
    pub package_name: String,
    /// Module path the package is imported from, e.g. `crate::resources::shop`.
    pub module_path: String,
    pub file_path: PathBuf,
    pub slug: String,
}

impl ResourceMetadata {
    pub fn key(&self) -> ResourceKey {
        ResourceKey::new(&self.package_name, &self.type_name)
    }

    /// `package::Type`, the unaliased reference used in generated code.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.package_name, self.type_name)
    }
}

/// Identity of a declaration: package plus type name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceKey {
    pub package_name: String,
    pub type_name: String,
}

impl ResourceKey {
    pub fn new(package_name: &str, type_name: &str) -> Self {
        Self {
            package_name: package_name.to_string(),
            type_name: type_name.to_string(),
        }
    }
}

impl std::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.package_name, self.type_name)
    }
}

/// Final output of a scan.
///
/// When `success` is false because the walk or a parse failed, the metadata
/// and conflict lists are empty. A strict-mode abort keeps them so the caller
/// can report what blocked generation.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub resources: Vec<ResourceMetadata>,
    pub pages: Vec<ResourceMetadata>,
    pub conflicts: Vec<Conflict>,
    pub page_conflicts: Vec<Conflict>,
    pub success: bool,
    pub message: String,
    pub duration: Duration,
}

impl ScanResult {
    pub(crate) fn failed(message: String, duration: Duration) -> Self {
        Self {
            success: false,
            message,
            duration,
            ..Default::default()
        }
    }

    /// Resource and page conflicts, resources first.
    pub fn all_conflicts(&self) -> impl Iterator<Item = &Conflict> {
        self.conflicts.iter().chain(self.page_conflicts.iter())
    }
}

/// Group metadata by package name. Keys come back sorted.
pub fn group_by_package(metadata: &[ResourceMetadata]) -> BTreeMap<String, Vec<ResourceMetadata>> {
    let mut grouped: BTreeMap<String, Vec<ResourceMetadata>> = BTreeMap::new();
    for m in metadata {
        grouped
            .entry(m.package_name.clone())
            .or_default()
            .push(m.clone());
    }
    grouped
}

pub fn filter_by_package(metadata: &[ResourceMetadata], package_name: &str) -> Vec<ResourceMetadata> {
    metadata
        .iter()
        .filter(|m| m.package_name == package_name)
        .cloned()
        .collect()
}

pub fn type_names(metadata: &[ResourceMetadata]) -> Vec<String> {
    metadata.iter().map(|m| m.type_name.clone()).collect()
}

pub fn slugs(metadata: &[ResourceMetadata]) -> Vec<String> {
    metadata.iter().map(|m| m.slug.clone()).collect()
}

#[cfg(test)]
pub(crate) fn resource(package_name: &str, type_name: &str) -> ResourceMetadata {
    ResourceMetadata {
        type_name: type_name.to_string(),
        package_name: package_name.to_string(),
        module_path: format!("crate::resources::{}", package_name),
        file_path: PathBuf::from(format!("src/resources/{}/mod.rs", package_name)),
        slug: crate::core::derive_slug(type_name, crate::core::DeclarationKind::Resource),
    }
}
