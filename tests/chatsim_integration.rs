//! Chat Simulator Integration Test
//!
//! Boots a real RAG server on an ephemeral loopback port and drives the
//! chat-sim loop against it over actual HTTP, the same path `elyx-chat-sim`
//! takes in production — just with a short profile window so the test
//! stays fast.

use std::sync::Arc;

use elyx_sim::api::{create_app, ApiState};
use elyx_sim::chatsim::{self, RagClient};
use elyx_sim::ingest::{self, HashEmbedder, VectorStore};
use elyx_sim::rag::Generator;
use elyx_sim::simulation;
use elyx_sim::types::{Profile, Rules};

async fn spawn_test_server() -> String {
    let mut profile = Profile::default();
    profile.months = 1;

    let rules = Rules::default();
    let dataset = simulation::run(&profile, &rules);

    let dir = tempfile::tempdir().expect("tempdir");
    let store = VectorStore::open(dir.path()).expect("open store");
    let docs = ingest::build_documents(&dataset);
    store.reingest(&docs).expect("reingest");

    let state = ApiState { dataset: Arc::new(dataset), store, embedder: Arc::new(HashEmbedder::new()), generator: Arc::new(Generator::with_template_default()) };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server task");
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn chat_sim_produces_a_transcript_against_a_live_server() {
    let base_url = spawn_test_server().await;
    let client = RagClient::new(&base_url);

    let mut profile = Profile::default();
    profile.months = 1;

    let transcript = chatsim::run(&profile, &client, 99).await;

    assert!(!transcript.is_empty(), "a one-month simulated window should produce at least one message");
    assert!(transcript.iter().any(|m| m.sender == "member"), "expect at least one member-initiated message");
    assert!(transcript.iter().any(|m| m.sender == "team" && m.role.is_some()), "expect at least one team reply with a resolved role");

    // Timestamps should be non-decreasing — the simulated clock only moves forward.
    for pair in transcript.windows(2) {
        assert!(pair[1].timestamp >= pair[0].timestamp);
    }
}
