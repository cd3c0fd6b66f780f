//! Conflict detection over a complete metadata set.
//!
//! `Detector::detect` is a pure function of its input. Passes run in a fixed
//! order and each appends to the result:
//!
//! 1. duplicate type names across packages (`error`, auto-fixable by alias)
//! 2. generic placeholder names (`warning`)
//! 3. naming-convention violations (`info`)
//! 4. duplicate type names inside one package (`error`, never auto-fixed)
//!
//! Grouping passes iterate `BTreeMap`s so output order only depends on the
//! input, never on hashing.

use std::collections::{BTreeMap, BTreeSet};

use super::{AliasResolver, Conflict, ConflictType, Severity, aliasable};
use crate::{
    core::{DeclarationKind, ResourceMetadata},
    utils::title_case,
};

pub struct Detector<'a> {
    resources: &'a [ResourceMetadata],
    kind: DeclarationKind,
    aliases: AliasResolver,
}

impl<'a> Detector<'a> {
    /// Detector for the resource bucket.
    pub fn new(resources: &'a [ResourceMetadata]) -> Self {
        Self::for_kind(DeclarationKind::Resource, resources)
    }

    pub fn for_kind(kind: DeclarationKind, resources: &'a [ResourceMetadata]) -> Self {
        Self {
            resources,
            kind,
            aliases: AliasResolver::new(resources),
        }
    }

    pub fn detect(&self) -> Vec<Conflict> {
        let mut conflicts = Vec::new();
        conflicts.extend(self.detect_duplicate_names());
        conflicts.extend(self.detect_generic_names());
        conflicts.extend(self.detect_naming_conventions());
        conflicts.extend(self.detect_package_conflicts());
        conflicts
    }

    fn detect_duplicate_names(&self) -> Vec<Conflict> {
        let mut grouped: BTreeMap<&str, Vec<&ResourceMetadata>> = BTreeMap::new();
        for r in self.resources {
            grouped.entry(&r.type_name).or_default().push(r);
        }

        grouped
            .into_iter()
            .filter(|(_, members)| members.len() > 1)
            .map(|(type_name, members)| {
                let packages: BTreeSet<&str> =
                    members.iter().map(|r| r.package_name.as_str()).collect();
                let fixable = aliasable(members.iter().copied());
                let auto_fix = !fixable.is_empty();

                let mut suggestion = "Rename types to be unique across all packages".to_string();
                if auto_fix {
                    let aliases: Vec<String> = fixable
                        .iter()
                        .map(|r| {
                            let alias = self.aliases.alias_for(r).unwrap_or_default();
                            format!("{} → {}::{}", r.qualified_name(), alias, r.type_name)
                        })
                        .collect();
                    suggestion.push_str(&format!("\nAuto-fix aliases: {}", aliases.join(", ")));
                }

                Conflict {
                    conflict_type: ConflictType::DuplicateName,
                    severity: Severity::Error,
                    message: format!(
                        "Duplicate type name '{}' found {} times across {} {}",
                        type_name,
                        members.len(),
                        packages.len(),
                        if packages.len() == 1 {
                            "package"
                        } else {
                            "packages"
                        }
                    ),
                    suggestion,
                    resources: members.into_iter().cloned().collect(),
                    auto_fix,
                }
            })
            .collect()
    }

    fn detect_generic_names(&self) -> Vec<Conflict> {
        self.resources
            .iter()
            .filter(|r| self.kind.is_generic_name(&r.type_name))
            .map(|r| Conflict {
                conflict_type: ConflictType::GenericName,
                severity: Severity::Warning,
                message: format!(
                    "Generic type name '{}' should be more specific",
                    r.type_name
                ),
                suggestion: format!(
                    "Rename '{}' to '{}{}'",
                    r.type_name,
                    title_case(&r.package_name),
                    r.type_name
                ),
                resources: vec![r.clone()],
                auto_fix: true,
            })
            .collect()
    }

    fn detect_naming_conventions(&self) -> Vec<Conflict> {
        self.resources
            .iter()
            .filter_map(|r| {
                let expected = format!("{}{}", title_case(&r.package_name), self.kind.suffix());
                (r.type_name != expected).then(|| Conflict {
                    conflict_type: ConflictType::NamingConvention,
                    severity: Severity::Info,
                    message: format!("Type '{}' doesn't follow naming convention", r.type_name),
                    suggestion: format!("Consider renaming to '{}' for consistency", expected),
                    resources: vec![r.clone()],
                    auto_fix: false,
                })
            })
            .collect()
    }

    fn detect_package_conflicts(&self) -> Vec<Conflict> {
        let mut grouped: BTreeMap<&str, Vec<&ResourceMetadata>> = BTreeMap::new();
        for r in self.resources {
            grouped.entry(&r.package_name).or_default().push(r);
        }

        grouped
            .into_iter()
            .filter(|(_, members)| {
                let unique: BTreeSet<&str> = members.iter().map(|r| r.type_name.as_str()).collect();
                unique.len() != members.len()
            })
            .map(|(package_name, members)| Conflict {
                conflict_type: ConflictType::PackageConflict,
                severity: Severity::Error,
                message: format!(
                    "Multiple {}s with same name in package '{}'",
                    self.kind.label(),
                    package_name
                ),
                suggestion: format!(
                    "Rename {}s to be unique within their package",
                    self.kind.label()
                ),
                resources: members.into_iter().cloned().collect(),
                auto_fix: false,
            })
            .collect()
    }
}
