//! C12: role-scoped, date-filtered semantic search over the ingested
//! document collection.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::RagError;
use crate::ingest::{HashEmbedder, SearchFilter, VectorStore};
use crate::types::{DocType, DocumentMetadata, Role};

use crate::config::defaults::{RETRIEVAL_TOP_K as DEFAULT_K, RETRIEVED_TEXT_TRUNCATE_CHARS as MAX_SNIPPET_CHARS};

/// One retrieved document, truncated and ready to drop into the
/// orchestrator's CONTEXT section.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievedDoc {
    pub id: String,
    pub text: String,
    pub metadata: DocumentMetadata,
}

fn allowed_types(role: Role) -> &'static [DocType] {
    match role {
        Role::Ruby => &[DocType::Event, DocType::Intervention, DocType::Chat, DocType::Daily, DocType::Fitness, DocType::BodyComp],
        Role::DrWarren => &[DocType::Lab, DocType::Intervention, DocType::Chat],
        Role::Advik => &[DocType::Daily, DocType::Fitness, DocType::Chat],
        Role::Carla => &[DocType::Daily, DocType::BodyComp, DocType::Chat],
        Role::Rachel => &[DocType::Fitness, DocType::BodyComp, DocType::Chat],
        Role::Neel => &[DocType::Kpi, DocType::Intervention, DocType::Chat],
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars().take(max_chars).collect()
}

/// Retrieve the top-`k` (default 3) documents relevant to `query` for
/// `role`, optionally restricted to `date >= since`.
pub fn retrieve(
    store: &VectorStore,
    embedder: &HashEmbedder,
    query: &str,
    role: Role,
    k: Option<usize>,
    since: Option<NaiveDate>,
) -> Result<Vec<RetrievedDoc>, RagError> {
    let filter = SearchFilter { types: Some(allowed_types(role).to_vec()), since };
    let query_embedding = embedder.encode(query);
    let docs = store.search(&query_embedding, k.unwrap_or(DEFAULT_K), &filter)?;

    Ok(docs
        .into_iter()
        .map(|d| RetrievedDoc { id: d.id, text: truncate(&d.text, MAX_SNIPPET_CHARS), metadata: d.metadata })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::build_documents;
    use crate::types::{Profile, Rules};
    use tempfile::tempdir;

    #[test]
    fn retrieval_respects_role_type_allow_list() {
        let profile = Profile::default();
        let rules = Rules::default();
        let dataset = crate::simulation::run(&profile, &rules);
        let docs = build_documents(&dataset);

        let dir = tempdir().expect("tempdir");
        let store = VectorStore::open(dir.path()).expect("open");
        store.reingest(&docs).expect("reingest");
        let embedder = HashEmbedder::new();

        let hits = retrieve(&store, &embedder, "what is my ldl trend", Role::DrWarren, Some(5), None).expect("retrieve");
        for hit in &hits {
            assert!(allowed_types(Role::DrWarren).contains(&hit.metadata.doc_type));
        }
    }

    #[test]
    fn missing_collection_is_fatal() {
        let dir = tempdir().expect("tempdir");
        let store = VectorStore::open(dir.path()).expect("open");
        let embedder = HashEmbedder::new();
        let err = retrieve(&store, &embedder, "anything", Role::Ruby, None, None);
        assert!(matches!(err, Err(RagError::IndexUnavailable(_))));
    }

    #[test]
    fn snippets_are_truncated_to_300_chars() {
        let long_text = "x".repeat(500);
        assert_eq!(truncate(&long_text, MAX_SNIPPET_CHARS).chars().count(), MAX_SNIPPET_CHARS);
    }
}
