//! The role-scoped retrieval-augmented question-answering subsystem
//! (C10-C14). [`router`] picks a role, [`facts`] pulls the latest known
//! values for it, [`retriever`] does semantic search over the ingested
//! documents, and [`orchestrator`] (backed by [`generator`]) turns all of
//! that into a cited answer.

pub mod facts;
pub mod generator;
pub mod orchestrator;
pub mod retriever;
pub mod router;

pub use generator::Generator;
pub use orchestrator::OrchestratedAnswer;
pub use retriever::RetrievedDoc;
