//! A `sled`-backed persistent vector store: one collection, cosine
//! distance, scan-and-sort search. Mutated only by ingestion; the RAG
//! service holds a read-only `Arc` over it for the life of the process.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RagError;
use crate::types::{DocType, Document};

use super::embed::cosine_similarity;
use crate::config::defaults::{DOCUMENT_COLLECTION_NAME as COLLECTION_NAME, EMBEDDING_DIMENSIONS};

const META_KEY: &str = "__collection_meta__";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CollectionMeta {
    embedding_dimensions: usize,
    document_count: usize,
}

/// Handle to the on-disk vector collection.
pub struct VectorStore {
    db: sled::Db,
    tree: sled::Tree,
}

/// Optional filter applied during search, built by the retriever.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub types: Option<Vec<DocType>>,
    pub since: Option<chrono::NaiveDate>,
}

impl SearchFilter {
    fn matches(&self, doc: &Document) -> bool {
        if let Some(types) = &self.types {
            if !types.contains(&doc.metadata.doc_type) {
                return false;
            }
        }
        if let Some(since) = self.since {
            if doc.metadata.date < since {
                return false;
            }
        }
        true
    }
}

impl VectorStore {
    /// Open (or create) the store at `path`. Does not imply the collection
    /// has been ingested yet — that requires [`Self::reingest`].
    pub fn open(path: &std::path::Path) -> Result<Arc<Self>, RagError> {
        let db = sled::open(path)?;
        let tree = db.open_tree(COLLECTION_NAME)?;
        Ok(Arc::new(Self { db, tree }))
    }

    fn meta(&self) -> Option<CollectionMeta> {
        self.tree.get(META_KEY).ok().flatten().and_then(|v| serde_json::from_slice(&v).ok())
    }

    /// `true` once the collection has been ingested at least once.
    pub fn is_ready(&self) -> bool {
        self.meta().is_some()
    }

    /// Drop and recreate the collection atomically, then batch-insert
    /// `docs`. Refreshes `embedding_dimensions` metadata as part of the
    /// same swap.
    pub fn reingest(&self, docs: &[Document]) -> Result<(), RagError> {
        self.tree.clear()?;

        let mut batch = sled::Batch::default();
        for doc in docs {
            let bytes = serde_json::to_vec(doc).map_err(|e| RagError::IndexUnavailable(format!("serialize document: {e}")))?;
            batch.insert(doc.id.as_bytes(), bytes);
        }
        let meta = CollectionMeta { embedding_dimensions: EMBEDDING_DIMENSIONS, document_count: docs.len() };
        let meta_bytes = serde_json::to_vec(&meta).map_err(|e| RagError::IndexUnavailable(format!("serialize metadata: {e}")))?;
        batch.insert(META_KEY, meta_bytes);

        self.tree.apply_batch(batch)?;
        self.db.flush()?;
        info!(count = docs.len(), "ingest: collection {COLLECTION_NAME} rebuilt");
        Ok(())
    }

    fn all_documents(&self) -> Result<Vec<Document>, RagError> {
        let mut out = Vec::new();
        for kv in self.tree.iter() {
            let (k, v) = kv?;
            if k.as_ref() == META_KEY.as_bytes() {
                continue;
            }
            if let Ok(doc) = serde_json::from_slice::<Document>(&v) {
                out.push(doc);
            }
        }
        Ok(out)
    }

    /// Top-`k` documents by cosine similarity to `query_embedding`,
    /// restricted to `filter`. Fails loudly if the collection has never
    /// been ingested.
    pub fn search(&self, query_embedding: &[f32], k: usize, filter: &SearchFilter) -> Result<Vec<Document>, RagError> {
        if !self.is_ready() {
            return Err(RagError::IndexUnavailable(COLLECTION_NAME.to_string()));
        }

        let mut scored: Vec<(f32, Document)> = self
            .all_documents()?
            .into_iter()
            .filter(|d| filter.matches(d))
            .map(|d| (cosine_similarity(query_embedding, &d.embedding), d))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored.into_iter().map(|(_, d)| d).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::embed::HashEmbedder;
    use crate::types::DocumentMetadata;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn doc(id: &str, text: &str, doc_type: DocType, date: NaiveDate, embedder: &HashEmbedder) -> Document {
        Document {
            id: id.to_string(),
            text: text.to_string(),
            metadata: DocumentMetadata { doc_type, date, month: None, numerics: BTreeMap::new() },
            embedding: embedder.encode(text).into_iter().collect(),
        }
    }

    #[test]
    fn search_before_ingest_fails_loudly() {
        let dir = tempdir().expect("tempdir");
        let store = VectorStore::open(dir.path()).expect("open");
        let embedder = HashEmbedder::new();
        let q = embedder.encode("ldl");
        let err = store.search(&q, 3, &SearchFilter::default());
        assert!(matches!(err, Err(RagError::IndexUnavailable(_))));
    }

    #[test]
    fn reingest_then_search_returns_closest_match() {
        let dir = tempdir().expect("tempdir");
        let store = VectorStore::open(dir.path()).expect("open");
        let embedder = HashEmbedder::new();
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let docs = vec![
            doc("a", "latest ldl 130 mg/dl trending down", DocType::Lab, date, &embedder),
            doc("b", "resting heart rate 54 bpm this week", DocType::Daily, date, &embedder),
        ];
        store.reingest(&docs).expect("reingest");

        let q = embedder.encode("what is my ldl");
        let hits = store.search(&q, 1, &SearchFilter::default()).expect("search");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }

    #[test]
    fn filter_by_type_excludes_other_docs() {
        let dir = tempdir().expect("tempdir");
        let store = VectorStore::open(dir.path()).expect("open");
        let embedder = HashEmbedder::new();
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let docs = vec![
            doc("a", "latest ldl 130", DocType::Lab, date, &embedder),
            doc("b", "latest ldl mentioned in daily note", DocType::Daily, date, &embedder),
        ];
        store.reingest(&docs).expect("reingest");

        let q = embedder.encode("ldl");
        let filter = SearchFilter { types: Some(vec![DocType::Lab]), since: None };
        let hits = store.search(&q, 5, &filter).expect("search");
        assert!(hits.iter().all(|d| d.metadata.doc_type == DocType::Lab));
    }
}
