use std::{
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

use colored::Colorize;
use glob::Pattern;
use rayon::prelude::*;

use super::{
    error::ScanError,
    extract::{CandidateMatcher, DeclarationKind, NamingHeuristic, extract_declarations, package_location},
    file_scanner::{compile_patterns, scan_files},
    metadata::{ResourceMetadata, ScanResult},
    parsers::rust::parse_rust_source,
};
use crate::{
    config::ScannerConfig,
    conflicts::{Detector, has_errors},
    generate::{TemplateData, build_template_data},
};

/// Discovers resources and pages and runs conflict detection on them.
///
/// Stateless apart from its configuration: scanning the same tree twice
/// gives the same result.
pub struct Scanner {
    config: ScannerConfig,
    resource_matcher: Box<dyn CandidateMatcher>,
    page_matcher: Box<dyn CandidateMatcher>,
}

/// One scan root and how to interpret what is found there.
struct Bucket<'a> {
    root: &'a Path,
    module_prefix: &'a str,
    kind: DeclarationKind,
    matcher: &'a dyn CandidateMatcher,
    /// A missing root is an error rather than an empty bucket.
    required: bool,
}

impl Scanner {
    /// Scanner for `resources_path` with the default configuration.
    pub fn new(resources_path: impl Into<std::path::PathBuf>) -> Self {
        Self::with_config(ScannerConfig::new(resources_path))
    }

    pub fn with_config(config: ScannerConfig) -> Self {
        Self {
            config,
            resource_matcher: Box::new(NamingHeuristic::new(DeclarationKind::Resource)),
            page_matcher: Box::new(NamingHeuristic::new(DeclarationKind::Page)),
        }
    }

    /// Replace the name heuristic used for resources.
    pub fn with_resource_matcher(mut self, matcher: impl CandidateMatcher + 'static) -> Self {
        self.resource_matcher = Box::new(matcher);
        self
    }

    /// Replace the name heuristic used for pages.
    pub fn with_page_matcher(mut self, matcher: impl CandidateMatcher + 'static) -> Self {
        self.page_matcher = Box::new(matcher);
        self
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn scan(&self) -> ScanResult {
        self.scan_cancellable(&AtomicBool::new(false))
    }

    /// Scan, aborting as soon as `cancel` is set.
    ///
    /// Cancellation is reported like any other scan failure: no metadata and
    /// no conflicts are returned.
    pub fn scan_cancellable(&self, cancel: &AtomicBool) -> ScanResult {
        let start = Instant::now();

        let (resources, pages) = match self.collect(cancel) {
            Ok(found) => found,
            Err(e) => {
                if self.config.verbose {
                    eprintln!("{} {}", "error:".bold().red(), e);
                }
                return ScanResult::failed(format!("Scan failed: {}", e), start.elapsed());
            }
        };

        let conflicts = Detector::new(&resources).detect();
        let page_conflicts = Detector::for_kind(DeclarationKind::Page, &pages).detect();
        let conflict_count = conflicts.len() + page_conflicts.len();

        if self.config.strict_mode && has_errors(conflicts.iter().chain(page_conflicts.iter())) {
            return ScanResult {
                resources,
                pages,
                conflicts,
                page_conflicts,
                success: false,
                message: "Strict mode: blocking errors detected".to_string(),
                duration: start.elapsed(),
            };
        }

        let mut message = format!("Scanned {} resources", resources.len());
        if conflict_count > 0 {
            message.push_str(&format!(" ({} conflicts detected)", conflict_count));
        }

        ScanResult {
            resources,
            pages,
            conflicts,
            page_conflicts,
            success: true,
            message,
            duration: start.elapsed(),
        }
    }

    /// Project a scan result into template data using this scanner's config.
    pub fn build_template_data(&self, result: &ScanResult) -> TemplateData {
        build_template_data(result, &self.config)
    }

    fn collect(
        &self,
        cancel: &AtomicBool,
    ) -> Result<(Vec<ResourceMetadata>, Vec<ResourceMetadata>), ScanError> {
        let patterns = compile_patterns(&self.config.exclude_patterns)?;

        let resources = self.scan_bucket(
            &Bucket {
                root: &self.config.resources_path,
                module_prefix: &self.config.resources_module,
                kind: DeclarationKind::Resource,
                matcher: self.resource_matcher.as_ref(),
                required: true,
            },
            &patterns,
            cancel,
        )?;

        let pages = self.scan_bucket(
            &Bucket {
                root: &self.config.pages_path,
                module_prefix: &self.config.pages_module,
                kind: DeclarationKind::Page,
                matcher: self.page_matcher.as_ref(),
                required: false,
            },
            &patterns,
            cancel,
        )?;

        Ok((resources, pages))
    }

    fn scan_bucket(
        &self,
        bucket: &Bucket<'_>,
        patterns: &[Pattern],
        cancel: &AtomicBool,
    ) -> Result<Vec<ResourceMetadata>, ScanError> {
        if !bucket.required && !bucket.root.exists() {
            if self.config.verbose {
                eprintln!(
                    "{} {} directory not found, skipping: {}",
                    "scan:".bold().cyan(),
                    bucket.kind.label(),
                    bucket.root.display()
                );
            }
            return Ok(Vec::new());
        }

        let files = scan_files(bucket.root, patterns, cancel)?;

        if self.config.verbose {
            eprintln!(
                "{} {} {} file(s) under {}",
                "scan:".bold().cyan(),
                files.len(),
                bucket.kind.label(),
                bucket.root.display()
            );
        }

        let parse_all = || {
            files
                .par_iter()
                .map(|path| {
                    if cancel.load(Ordering::Relaxed) {
                        return Err(ScanError::Cancelled);
                    }
                    scan_file(path, bucket)
                })
                .collect::<Vec<_>>()
        };

        let results = if self.config.jobs > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.jobs)
                .build()?
                .install(parse_all)
        } else {
            parse_all()
        };

        // Merge in walk order; the first failing file decides the error.
        let mut found = Vec::new();
        for (path, result) in files.iter().zip(results) {
            let metadata = result?;
            if self.config.verbose && !metadata.is_empty() {
                let names: Vec<&str> = metadata.iter().map(|m| m.type_name.as_str()).collect();
                eprintln!(
                    "{} {} -> {}",
                    "scan:".bold().cyan(),
                    path.display(),
                    names.join(", ")
                );
            }
            found.extend(metadata);
        }

        Ok(found)
    }
}

fn scan_file(path: &Path, bucket: &Bucket<'_>) -> Result<Vec<ResourceMetadata>, ScanError> {
    let code = std::fs::read_to_string(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let file = parse_rust_source(&code).map_err(|source| ScanError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let location = package_location(bucket.root, path, bucket.module_prefix);
    Ok(extract_declarations(
        &file,
        path,
        &location,
        bucket.kind,
        bucket.matcher,
    ))
}
