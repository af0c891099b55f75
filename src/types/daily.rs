use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day of biometrics and adherence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub adherence: f64,
    pub steps: u32,
    pub active_minutes: u32,
    pub weight_kg: f64,
    pub rhr_bpm: f64,
    pub hrv_ms: f64,
    pub sleep_hours: f64,
    pub sleep_quality: f64,
    pub stress_score: f64,
    pub soreness: f64,
    pub caloric_balance_kcal: f64,
}
