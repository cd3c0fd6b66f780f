//! resgen - resource scanner and registry generator
//!
//! resgen walks a Rust source tree, discovers resource and page types by
//! naming convention without compiling anything, detects naming conflicts
//! between independently written packages, and emits a registration module
//! that constructs every discovered type.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanning pipeline (walk, parse, extract)
//! - `conflicts`: Conflict detection and alias resolution
//! - `generate`: Template data and file generation
//! - `utils`: Shared utility functions
//!
//! ## Example
//!
//! ```no_run
//! use resgen::{config::ScannerConfig, core::Scanner, generate::Generator};
//!
//! let config = ScannerConfig::new("src/resources");
//! let scanner = Scanner::with_config(config.clone());
//! let result = scanner.scan();
//! if result.success {
//!     let data = scanner.build_template_data(&result);
//!     let generation = Generator::new(config).generate(&data);
//!     println!("{}", generation.message);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod conflicts;
pub mod core;
pub mod generate;
pub mod utils;
