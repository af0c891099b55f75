//! Crate-wide error kinds.
//!
//! Pipeline errors abort the current stage only; already-written tables
//! remain on disk. API errors never corrupt the index. Retries are confined
//! to the generator driver (see `llm::generator`) — everything else here is
//! first-fail.

use std::path::PathBuf;

/// Errors produced while loading and validating `Profile`/`Rules` config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error ({0}): {1}")]
    Io(PathBuf, std::io::Error),
    #[error("config parse error ({0}): {1}")]
    Parse(PathBuf, toml::de::Error),
    #[error("config serialization error: {0}")]
    Serialize(toml::ser::Error),
    #[error("config validation failed: {0:?}")]
    Invalid(Vec<String>),
}

/// Errors surfaced by the generative simulation pipeline (C1-C9).
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("required source table missing for this stage: {0}")]
    MissingSourceFile(String),
    #[error("CSV I/O error writing {table}: {source}")]
    CsvIo {
        table: String,
        #[source]
        source: std::io::Error,
    },
    #[error("vector index I/O error: {0}")]
    Index(#[from] sled::Error),
}

/// A single malformed row encountered during ingestion. Logged and skipped —
/// never fatal to the ingestion run as a whole.
#[derive(Debug, thiserror::Error)]
#[error("malformed row in {table} at line {line}: {reason}")]
pub struct MalformedRow {
    pub table: String,
    pub line: usize,
    pub reason: String,
}

/// Errors surfaced by the role-scoped retrieval and routing subsystem
/// (C10-C14).
#[derive(Debug, thiserror::Error)]
pub enum RagError {
    #[error("vector collection unavailable: {0}")]
    IndexUnavailable(String),
    #[error("unknown role: {0}")]
    RoleNotFound(String),
    #[error("generator exhausted all models and credentials after retries")]
    GeneratorExhausted,
    #[error(transparent)]
    Index(#[from] sled::Error),
}
