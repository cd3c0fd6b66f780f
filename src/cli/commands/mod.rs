pub mod generate;
pub mod init;
pub mod scan;

mod command_result;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

pub use command_result::*;

use super::args::CommonArgs;
use crate::config::{ScannerConfig, load_config};

/// Configuration with CLI overrides applied, plus the directory CLI paths
/// are resolved against.
pub(crate) struct Prepared {
    pub config: ScannerConfig,
    pub cwd: PathBuf,
}

impl Prepared {
    /// `path` made absolute against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }
}

/// Load `.resgenrc.json` and layer `common` on top.
///
/// Paths from the config file are relative to the file; paths from the
/// command line are relative to the working directory.
pub(crate) fn prepare_config(common: &CommonArgs) -> Result<Prepared> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let loaded = load_config(&cwd)?;

    if common.verbose && loaded.from_file {
        eprintln!(
            "{} using {}",
            "config:".bold().cyan(),
            loaded.base_dir.join(crate::config::CONFIG_FILE_NAME).display()
        );
    }

    let mut config = loaded.config.with_base_dir(&loaded.base_dir);

    if let Some(path) = &common.resources_path {
        config.resources_path = cwd.join(path);
    }
    if let Some(path) = &common.pages_path {
        config.pages_path = cwd.join(path);
    }
    if !common.exclude.is_empty() {
        config.exclude_patterns = common.exclude.clone();
    }
    if let Some(jobs) = common.jobs {
        config.jobs = jobs;
    }
    config.strict_mode |= common.strict;
    config.verbose |= common.verbose;

    config.validate()?;

    Ok(Prepared { config, cwd })
}
