//! Code generation: turns a scan result into the registration module.
//!
//! - `template_data`: projects a [`ScanResult`](crate::core::ScanResult) into
//!   render-ready data, applying duplicate-name aliases
//! - `template`: the built-in Handlebars template
//! - `generator`: renders the template and writes the output file

pub mod error;
pub mod generator;
pub mod template;
pub mod template_data;

pub use error::GenerateError;
pub use generator::{GenerationResult, Generator};
pub use template::DEFAULT_TEMPLATE;
pub use template_data::{ImportInfo, ResourceInfo, TemplateData, build_template_data};
