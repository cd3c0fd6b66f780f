use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    config::ScannerConfig,
    conflicts::{AliasResolver, Conflict, ConflictType, Severity, aliasable},
    core::{ResourceKey, ResourceMetadata, ScanResult},
};

/// Timestamp format used in the generated header.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One imported module.
///
/// A module is imported plainly when at least one of its declarations is
/// referenced through the package name (`direct`), and once more per alias
/// handed to its duplicate declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportInfo {
    /// Module path, e.g. `crate::resources::shop`.
    pub path: String,
    pub package: String,
    /// First alias, empty when none is needed.
    pub alias: String,
    pub needs_alias: bool,
    pub aliases: Vec<String>,
    pub direct: bool,
}

/// One registered declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceInfo {
    /// `package::Type` or `alias::Type`.
    pub reference: String,
    pub type_name: String,
    pub package: String,
    pub slug: String,
    /// Source file the declaration was found in.
    pub source: String,
    pub alias: String,
    pub conflict: bool,
}

/// Everything the template sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateData {
    pub timestamp: String,
    pub count: usize,
    pub page_count: usize,
    pub imports: Vec<ImportInfo>,
    pub page_imports: Vec<ImportInfo>,
    pub resources: Vec<ResourceInfo>,
    pub pages: Vec<ResourceInfo>,
    /// Messages of warning and info conflicts. Errors are not copied here.
    pub warnings: Vec<String>,
    /// Every conflict, resources first.
    pub conflicts: Vec<Conflict>,
    pub generated: DateTime<Utc>,
}

/// Project a scan result into template data.
///
/// Aliases come from the same [`AliasResolver`] the detector used, and are
/// only applied to declarations named by an auto-fixable duplicate-name
/// conflict. With `auto_fix` disabled nothing is aliased.
pub fn build_template_data(result: &ScanResult, config: &ScannerConfig) -> TemplateData {
    let generated = config.generated_at();

    let (imports, resources) = build_bucket(&result.resources, &result.conflicts, config.auto_fix);
    let (page_imports, pages) = build_bucket(&result.pages, &result.page_conflicts, config.auto_fix);

    let warnings = result
        .all_conflicts()
        .filter(|c| matches!(c.severity, Severity::Warning | Severity::Info))
        .map(|c| c.message.clone())
        .collect();

    TemplateData {
        timestamp: generated.format(TIMESTAMP_FORMAT).to_string(),
        count: resources.len(),
        page_count: pages.len(),
        imports,
        page_imports,
        resources,
        pages,
        warnings,
        conflicts: result.all_conflicts().cloned().collect(),
        generated,
    }
}

fn build_bucket(
    metadata: &[ResourceMetadata],
    conflicts: &[Conflict],
    auto_fix: bool,
) -> (Vec<ImportInfo>, Vec<ResourceInfo>) {
    let aliases = if auto_fix {
        alias_map(metadata, conflicts)
    } else {
        BTreeMap::new()
    };

    let mut imports: IndexMap<String, ImportInfo> = IndexMap::new();
    let mut infos = Vec::with_capacity(metadata.len());

    for m in metadata {
        let alias = aliases.get(&m.key()).cloned();

        let import = imports
            .entry(m.module_path.clone())
            .or_insert_with(|| ImportInfo {
                path: m.module_path.clone(),
                package: m.package_name.clone(),
                alias: String::new(),
                needs_alias: false,
                aliases: Vec::new(),
                direct: false,
            });

        match &alias {
            Some(alias) => {
                if !import.aliases.contains(alias) {
                    import.aliases.push(alias.clone());
                }
                if import.alias.is_empty() {
                    import.alias = alias.clone();
                }
                import.needs_alias = true;
            }
            None => import.direct = true,
        }

        let qualifier = alias.as_deref().unwrap_or(&m.package_name);
        infos.push(ResourceInfo {
            reference: format!("{}::{}", qualifier, m.type_name),
            type_name: m.type_name.clone(),
            package: m.package_name.clone(),
            slug: m.slug.clone(),
            source: m.file_path.display().to_string(),
            conflict: alias.is_some(),
            alias: alias.unwrap_or_default(),
        });
    }

    (imports.into_values().collect(), infos)
}

/// Aliases for declarations named by auto-fixable duplicate-name conflicts,
/// skipping keys declared twice in one package.
fn alias_map(metadata: &[ResourceMetadata], conflicts: &[Conflict]) -> BTreeMap<ResourceKey, String> {
    let resolver = AliasResolver::new(metadata);

    conflicts
        .iter()
        .filter(|c| c.conflict_type == ConflictType::DuplicateName && c.auto_fix)
        .flat_map(|c| aliasable(&c.resources))
        .filter_map(|r| {
            let key = r.key();
            resolver.get(&key).map(|alias| (key, alias.to_string()))
        })
        .collect()
}
