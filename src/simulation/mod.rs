//! The generative simulation pipeline (C1-C9).
//!
//! C2 through C8 run in strict sequence, each stage reading the finalized
//! output of the ones before it. [`pipeline::run`] is the single entry point
//! that owns the RNG and produces a finalized [`crate::types::Dataset`].

pub mod chat;
pub mod daily;
pub mod events;
pub mod fitness;
pub mod interventions;
pub mod kpi;
pub mod labs;
pub mod pipeline;
pub mod util;

pub use pipeline::run;
