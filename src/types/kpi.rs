use serde::{Deserialize, Serialize};

/// One month's aggregate KPIs, keyed by `YYYY-MM`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiMonthRow {
    pub month: String,
    pub adherence_avg: f64,
    pub sessions_total: u32,
    pub consults_attended: u32,
    pub consults_missed: u32,
    pub weight_change_kg: f64,
    pub sleep_avg: f64,
    pub stress_avg: f64,
    pub ldl_change_mgdl: f64,
    pub vo2max_change: f64,
    pub rationale_coverage_percent: f64,
}
