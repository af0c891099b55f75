//! C9: turn a finalized [`crate::types::Dataset`] into a searchable vector
//! collection.
//!
//! [`documents::build_documents`] produces the text+metadata+embedding
//! triples; [`store::VectorStore`] persists them. Re-running ingestion
//! drops and recreates the collection atomically so a stale index is never
//! served.

pub mod documents;
pub mod embed;
pub mod store;

pub use documents::build_documents;
pub use embed::HashEmbedder;
pub use store::{SearchFilter, VectorStore};

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::error::RagError;
use crate::types::Dataset;

/// Build documents for every row in `dataset` and (re)populate the
/// collection at `index_path`.
pub fn ingest(dataset: &Dataset, index_path: &Path) -> Result<Arc<VectorStore>, RagError> {
    let store = VectorStore::open(index_path)?;
    let docs = build_documents(dataset);
    info!(count = docs.len(), path = %index_path.display(), "ingest: building document set");
    store.reingest(&docs)?;
    Ok(store)
}
