//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: discover resources and pages and report naming conflicts
//! - `generate`: scan, then render the registration module
//! - `init`: write a default `.resgenrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Scan(cmd)) => cmd.common.verbose,
            Some(Command::Generate(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Arguments shared by `scan` and `generate`. Flags override the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Resources directory (overrides config file)
    #[arg(long)]
    pub resources_path: Option<PathBuf>,

    /// Pages directory (overrides config file)
    #[arg(long)]
    pub pages_path: Option<PathBuf>,

    /// Skip files and directories whose name matches this glob.
    /// Can be specified multiple times; replaces the configured patterns.
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Fail when any error-level conflict is found
    #[arg(long)]
    pub strict: bool,

    /// Number of parser threads (default: one per CPU)
    #[arg(long, short = 'j')]
    pub jobs: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print the scan result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print the generated file instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Do not alias duplicate type names
    #[arg(long)]
    pub no_auto_fix: bool,

    /// Output file (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Handlebars template (overrides config file)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Fixed generation time, in seconds since the epoch
    #[arg(long, env = "SOURCE_DATE_EPOCH", hide_env_values = true)]
    pub source_date_epoch: Option<i64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Discover resources and pages and report naming conflicts
    Scan(ScanCommand),
    /// Generate the registration module
    Generate(GenerateCommand),
    /// Initialize a new .resgenrc.json configuration file
    Init,
}
