use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("event '{id}' has {count} options (expected 2 to 4)")]
    OptionCount { id: String, count: usize },

    #[error("event '{id}' has minYear {min} after maxYear {max}")]
    EmptyYearWindow { id: String, min: i32, max: i32 },

    #[error("unknown artifact '{0}'")]
    UnknownArtifact(String),
}
