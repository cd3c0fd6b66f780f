//! Declaration extraction: turns a parsed file into metadata records.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{metadata::ResourceMetadata, parsers::rust::exported_type_declarations};

/// Placeholder names that still count as resources but are flagged later.
pub const GENERIC_RESOURCE_NAMES: &[&str] = &["Resource", "Entity", "Model", "Item", "Object"];

pub const GENERIC_PAGE_NAMES: &[&str] = &["Page"];

/// Which bucket a scan root feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Resource,
    Page,
}

impl DeclarationKind {
    /// Name suffix expected on declarations of this kind.
    pub fn suffix(self) -> &'static str {
        match self {
            DeclarationKind::Resource => "Resource",
            DeclarationKind::Page => "Page",
        }
    }

    pub fn generic_names(self) -> &'static [&'static str] {
        match self {
            DeclarationKind::Resource => GENERIC_RESOURCE_NAMES,
            DeclarationKind::Page => GENERIC_PAGE_NAMES,
        }
    }

    pub fn is_generic_name(self, type_name: &str) -> bool {
        self.generic_names().contains(&type_name)
    }

    pub fn label(self) -> &'static str {
        match self {
            DeclarationKind::Resource => "resource",
            DeclarationKind::Page => "page",
        }
    }
}

/// Decides whether a type name is a candidate declaration.
///
/// The default is [`NamingHeuristic`]; any `Fn(&str) -> bool` works too, so a
/// stricter analysis can be dropped in without touching the pipeline.
pub trait CandidateMatcher: Send + Sync {
    fn is_candidate(&self, type_name: &str) -> bool;
}

impl<F> CandidateMatcher for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_candidate(&self, type_name: &str) -> bool {
        self(type_name)
    }
}

/// Name-based matching: the kind's suffix, or one of its generic names.
#[derive(Debug, Clone, Copy)]
pub struct NamingHeuristic {
    kind: DeclarationKind,
}

impl NamingHeuristic {
    pub fn new(kind: DeclarationKind) -> Self {
        Self { kind }
    }
}

impl CandidateMatcher for NamingHeuristic {
    fn is_candidate(&self, type_name: &str) -> bool {
        type_name.ends_with(self.kind.suffix()) || self.kind.is_generic_name(type_name)
    }
}

/// Where a file sits in the module tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLocation {
    pub package_name: String,
    pub module_path: String,
}

/// Resolve the package that owns `file`.
///
/// Packages follow the directory layout: every file in `shop/` belongs to
/// package `shop` (imported from `<module_prefix>::shop`). A file sitting
/// directly in the root is its own package, except the root's `mod.rs` /
/// `lib.rs`, which belongs to the prefix module itself.
pub fn package_location(root: &Path, file: &Path, module_prefix: &str) -> PackageLocation {
    let relative = file.strip_prefix(root).unwrap_or(file);

    let dirs: Vec<String> = relative
        .parent()
        .map(|parent| {
            parent
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();

    if let Some(package_name) = dirs.last() {
        return PackageLocation {
            package_name: package_name.clone(),
            module_path: format!("{}::{}", module_prefix, dirs.join("::")),
        };
    }

    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if matches!(stem.as_str(), "mod" | "lib" | "main") {
        let package_name = module_prefix
            .rsplit("::")
            .next()
            .unwrap_or(module_prefix)
            .to_string();
        PackageLocation {
            package_name,
            module_path: module_prefix.to_string(),
        }
    } else {
        PackageLocation {
            module_path: format!("{}::{}", module_prefix, stem),
            package_name: stem,
        }
    }
}

/// Build one metadata record per candidate declaration in `file`.
pub fn extract_declarations(
    file: &syn::File,
    file_path: &Path,
    location: &PackageLocation,
    kind: DeclarationKind,
    matcher: &dyn CandidateMatcher,
) -> Vec<ResourceMetadata> {
    exported_type_declarations(file)
        .into_iter()
        .filter(|decl| matcher.is_candidate(&decl.name))
        .map(|decl| ResourceMetadata {
            slug: derive_slug(&decl.name, kind),
            type_name: decl.name,
            package_name: location.package_name.clone(),
            module_path: location.module_path.clone(),
            file_path: PathBuf::from(file_path),
        })
        .collect()
}

/// Route slug for a declaration.
///
/// Resources are pluralized (`CompanyResource` -> `companies`); pages keep
/// the stripped, lower-cased name (`SettingsPage` -> `settings`).
pub fn derive_slug(type_name: &str, kind: DeclarationKind) -> String {
    let name = type_name
        .strip_suffix(kind.suffix())
        .unwrap_or(type_name)
        .to_lowercase();

    match kind {
        DeclarationKind::Resource => pluralize(&name),
        DeclarationKind::Page => name,
    }
}

/// English plural heuristics, first matching rule wins:
/// `y` -> `ies`, plural-looking `s` -> unchanged, sibilants -> `es`, else `s`.
///
/// Words ending in `ss` or `us` are singular (`class`, `status`) and take
/// `es` like the other sibilants.
pub fn pluralize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('y') {
        format!("{}ies", stem)
    } else if word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") {
        word.to_string()
    } else if ["x", "ch", "sh", "ss", "us"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        format!("{}es", word)
    } else {
        format!("{}s", word)
    }
}
