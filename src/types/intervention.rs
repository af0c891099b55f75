use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The closed set of trigger rules the intervention engine evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleId {
    /// Cardiovascular drift: 7-day RHR elevation or a sharp HRV drop.
    Cv01,
    /// Lipid: LDL above threshold on a labs date.
    Lip02,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::Cv01 => "CV-01",
            RuleId::Lip02 => "LIP-02",
        }
    }

    pub fn owner(&self) -> &'static str {
        match self {
            RuleId::Cv01 => "coach",
            RuleId::Lip02 => "nutritionist",
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            RuleId::Cv01 => "deload week; sleep hygiene; -20% intensity",
            RuleId::Lip02 => "tighten diet; +1 cardio; omega-3",
        }
    }

    pub fn follow_up_offset_days(&self) -> i64 {
        match self {
            RuleId::Cv01 => 7,
            RuleId::Lip02 => 84,
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rule-triggered intervention, linking a metric/value pair to a
/// prescribed follow-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionRow {
    /// Deterministic id, `intervention:<date>` disambiguated with `#<n>` on
    /// same-day collision. Referenced by `ChatRow::linked_intervention_id`.
    pub id: String,
    pub date: NaiveDate,
    pub rule_id: RuleId,
    pub trigger_metric: String,
    pub trigger_value: f64,
    pub action: String,
    pub owner: String,
    pub follow_up_date: NaiveDate,
    pub note: String,
}
