use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use chrono::{DateTime, Utc};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".resgenrc.json";

/// Scanner and generator settings.
///
/// Every pipeline stage receives this value explicitly; nothing is read from
/// global state once the config is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannerConfig {
    /// Root scanned for resource declarations.
    #[serde(default = "default_resources_path")]
    pub resources_path: PathBuf,
    /// Root scanned for page declarations. May not exist.
    #[serde(default = "default_pages_path")]
    pub pages_path: PathBuf,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Handlebars template. The built-in template is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,
    /// Turn any error-severity conflict into an abort.
    #[serde(default)]
    pub strict_mode: bool,
    /// Apply duplicate-name aliases in generated code.
    #[serde(default = "default_auto_fix")]
    pub auto_fix: bool,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub dry_run: bool,
    /// Globs matched against file and directory basenames.
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
    /// Module path the resources root is mounted at.
    #[serde(default = "default_resources_module")]
    pub resources_module: String,
    #[serde(default = "default_pages_module")]
    pub pages_module: String,
    /// Parser threads; 0 uses rayon's global pool.
    #[serde(default)]
    pub jobs: usize,
    /// Fixed generation time (seconds since the epoch) for reproducible output.
    #[serde(skip)]
    pub source_date_epoch: Option<i64>,
}

fn default_resources_path() -> PathBuf {
    PathBuf::from("src/resources")
}

fn default_pages_path() -> PathBuf {
    PathBuf::from("src/pages")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("src/registry/generated.rs")
}

fn default_auto_fix() -> bool {
    true
}

fn default_exclude_patterns() -> Vec<String> {
    ["*_test.rs", "*_gen.rs"].map(String::from).to_vec()
}

fn default_resources_module() -> String {
    "crate::resources".to_string()
}

fn default_pages_module() -> String {
    "crate::pages".to_string()
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            resources_path: default_resources_path(),
            pages_path: default_pages_path(),
            output_path: default_output_path(),
            template_path: None,
            strict_mode: false,
            auto_fix: default_auto_fix(),
            verbose: false,
            dry_run: false,
            exclude_patterns: default_exclude_patterns(),
            resources_module: default_resources_module(),
            pages_module: default_pages_module(),
            jobs: 0,
            source_date_epoch: None,
        }
    }
}

impl ScannerConfig {
    /// Config scanning `resources_path` with every other setting defaulted.
    pub fn new(resources_path: impl Into<PathBuf>) -> Self {
        Self {
            resources_path: resources_path.into(),
            ..Default::default()
        }
    }

    /// Validate configuration values.
    ///
    /// Returns an error if any exclude pattern is not a valid glob or a
    /// module path is empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.exclude_patterns {
            Pattern::new(pattern).with_context(|| {
                format!("Invalid glob pattern in 'excludePatterns': \"{}\"", pattern)
            })?;
        }

        if self.resources_module.trim().is_empty() {
            anyhow::bail!("'resourcesModule' must not be empty");
        }
        if self.pages_module.trim().is_empty() {
            anyhow::bail!("'pagesModule' must not be empty");
        }

        Ok(())
    }

    /// Resolve relative paths against `base_dir`.
    pub fn with_base_dir(mut self, base_dir: &Path) -> Self {
        let rebase = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base_dir.join(&*path);
            }
        };
        rebase(&mut self.resources_path);
        rebase(&mut self.pages_path);
        rebase(&mut self.output_path);
        if let Some(template_path) = self.template_path.as_mut() {
            rebase(template_path);
        }
        self
    }

    /// Timestamp stamped into generated output.
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.source_date_epoch
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_else(Utc::now)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = ScannerConfig::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: ScannerConfig,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory relative paths in the config are resolved against.
    pub base_dir: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: ScannerConfig = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                base_dir,
            })
        }
        None => Ok(ConfigLoadResult {
            config: ScannerConfig::default(),
            from_file: false,
            base_dir: start_dir.to_path_buf(),
        }),
    }
}
