//! System-wide default constants.
//!
//! Centralises magic numbers used outside the `Profile`/`Rules` TOML schema —
//! things that are structural to a run rather than a tunable health parameter.

// ============================================================================
// Simulation
// ============================================================================

/// Ambient weekly chat message count (Poisson lambda), before any
/// intervention-anchored messages are layered on.
pub const CHAT_WEEKLY_LAMBDA: f64 = 5.0;

/// RHR elevation, in bpm over the baseline, that arms CV-01 on the trailing
/// 7-day mean.
pub const CV01_RHR_ELEVATION_BPM: f64 = 5.0;

/// Day-over-day HRV drop, as a fraction of the previous day's value, that
/// arms CV-01.
pub const CV01_HRV_DROP_FRACTION: f64 = 0.15;

/// LDL threshold (mg/dL) above which a labs date fires LIP-02.
pub const LIP02_LDL_THRESHOLD_MGDL: f64 = 130.0;

// ============================================================================
// Embedding / Index
// ============================================================================

/// Dimensionality of the deterministic hash-projected bag-of-words embedder.
pub const EMBEDDING_DIMENSIONS: usize = 384;

/// Name of the sled tree holding ingested documents.
pub const DOCUMENT_COLLECTION_NAME: &str = "elyx_docs";

/// Top-k returned by the retriever's cosine search.
pub const RETRIEVAL_TOP_K: usize = 3;

/// Retrieved document text is truncated to this many characters before being
/// placed in the orchestrator's CONTEXT section.
pub const RETRIEVED_TEXT_TRUNCATE_CHARS: usize = 300;

// ============================================================================
// Generator driver
// ============================================================================

/// Minimum backoff between generator retries (seconds).
pub const GENERATOR_BACKOFF_MIN_SECS: u64 = 4;

/// Maximum backoff between generator retries (seconds).
pub const GENERATOR_BACKOFF_MAX_SECS: u64 = 10;

/// Total attempts per model size before cascading to the next one down.
pub const GENERATOR_MAX_RETRIES: u32 = 3;

// ============================================================================
// Chat simulator
// ============================================================================

/// Business hours window start (24h clock).
pub const CHATSIM_BUSINESS_HOUR_START: u32 = 8;

/// Business hours window end, exclusive (24h clock).
pub const CHATSIM_BUSINESS_HOUR_END: u32 = 19;

/// Minimum minutes between two simulated member questions.
pub const CHATSIM_MIN_ADVANCE_MINUTES: i64 = 15;

/// Maximum minutes between two simulated member questions.
pub const CHATSIM_MAX_ADVANCE_MINUTES: i64 = 120;

// ============================================================================
// Server
// ============================================================================

/// Default HTTP bind address for `elyx-server`.
pub const SERVER_DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Request body size limit (bytes) — generous for the small JSON payloads
/// this API accepts.
pub const SERVER_BODY_LIMIT_BYTES: usize = 1_048_576;
