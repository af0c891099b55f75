//! C15: the standalone offline chat-sim batch loop. Never runs inside the
//! simulation pipeline or server process — a pure HTTP client of the RAG
//! API (C14).

pub mod client;
pub mod runner;
pub mod templates;
pub mod timeline;

pub use client::RagClient;
pub use runner::{run, ChatSimMessage};
pub use timeline::Timeline;
