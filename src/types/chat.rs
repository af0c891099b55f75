use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single message in the synthesized chat stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRow {
    pub timestamp: DateTime<Utc>,
    pub sender: String,
    pub role: String,
    pub text: String,
    pub tags: Vec<String>,
    pub linked_intervention_id: Option<String>,
}
