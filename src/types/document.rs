use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The source kind a `Document` was built from. Also the unit the
/// retriever's per-role allow-list filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocType {
    Profile,
    Event,
    Daily,
    Lab,
    Fitness,
    BodyComp,
    Intervention,
    Kpi,
    Chat,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Profile => "profile",
            DocType::Event => "event",
            DocType::Daily => "daily",
            DocType::Lab => "lab",
            DocType::Fitness => "fitness",
            DocType::BodyComp => "body_comp",
            DocType::Intervention => "intervention",
            DocType::Kpi => "kpi",
            DocType::Chat => "chat",
        }
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata carried alongside a document's text and embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub doc_type: DocType,
    /// Canonical date for filtering. For month-keyed rows (KPI), this is the
    /// first day of that month.
    pub date: NaiveDate,
    pub month: Option<String>,
    /// Salient numeric fields the retriever filter set may reference
    /// (e.g. `ldl_mgdl`, `rhr_bpm`, `bodyfat_percent`, `vo2max`).
    pub numerics: BTreeMap<String, f64>,
}

/// A text+metadata+vector triple, one per source row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub metadata: DocumentMetadata,
    pub embedding: Vec<f32>,
}
