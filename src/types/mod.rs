//! Shared data structures for the simulation pipeline and the RAG service.

pub mod chat;
pub mod daily;
pub mod document;
pub mod event;
pub mod fitness;
pub mod intervention;
pub mod kpi;
pub mod labs;
pub mod profile;
pub mod role;
pub mod rules;

pub use chat::ChatRow;
pub use daily::DailyRow;
pub use document::{DocType, Document, DocumentMetadata};
pub use event::{EventRow, EventType};
pub use fitness::{BodyCompRow, FitnessRow};
pub use intervention::{InterventionRow, RuleId};
pub use kpi::KpiMonthRow;
pub use labs::LabsRow;
pub use profile::{Baselines, Bounds, Cadence, Demographics, LabBaselines, Profile, Range};
pub use role::Role;
pub use rules::{RangeF, Rules};

/// The full, finalized output of one pipeline run — every table produced by
/// C2-C8, kept together so C9 can ingest them as a unit.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub events: Vec<EventRow>,
    pub daily: Vec<DailyRow>,
    pub labs: Vec<LabsRow>,
    pub fitness: Vec<FitnessRow>,
    pub body_comp: Vec<BodyCompRow>,
    pub interventions: Vec<InterventionRow>,
    pub chats: Vec<ChatRow>,
    pub kpis: Vec<KpiMonthRow>,
}
