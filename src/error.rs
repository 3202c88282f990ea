use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the inputs the engine works from.
///
/// Analysis itself never fails: malformed composition data degrades to zero
/// and an empty catalog yields empty result lists.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to read catalog {path:?}: {source}")]
    CatalogIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Catalog JSON is invalid: {0}")]
    CatalogFormat(String),

    #[error("Failed to read rules {path:?}: {source}")]
    RulesIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Rules TOML is invalid: {0}")]
    RulesFormat(#[from] toml::de::Error),

    #[error("Rules table is unusable: {}", .0.join("; "))]
    InvalidRules(Vec<String>),
}
