//! Source file parsers.
//!
//! - `rust`: Rust source parser (uses syn for the syntax tree, nothing is
//!   compiled or expanded)

pub mod rust;
