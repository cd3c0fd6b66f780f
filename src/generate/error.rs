use std::{io, path::PathBuf};

use thiserror::Error;

/// Fatal generation failure. The output file is never left half-written.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid template '{name}': {source}")]
    Template {
        name: String,
        #[source]
        source: handlebars::TemplateError,
    },

    #[error("failed to render template: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("failed to read template {}: {source}", path.display())]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("strict mode: {count} blocking conflict(s) detected, nothing written")]
    StrictMode { count: usize },
}
