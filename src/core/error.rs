use std::{io, path::PathBuf};

use thiserror::Error;

/// Fatal scan failure. Any of these aborts the whole scan; no partial
/// metadata survives.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to scan {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },

    #[error("invalid exclude pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to start parser pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("scan cancelled")]
    Cancelled,
}
