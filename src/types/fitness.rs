use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One week-end fitness measurement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FitnessRow {
    pub date: NaiveDate,
    pub vo2max_est: f64,
    pub five_km_time_min: f64,
    pub one_rm_deadlift_kg: f64,
    pub one_rm_squat_kg: f64,
    pub grip_strength_kg: f64,
    pub fms_score: f64,
    pub spirometry_fev1_l: f64,
}

/// One week-end body-composition measurement, paired by date with `FitnessRow`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BodyCompRow {
    pub date: NaiveDate,
    pub dexa_bodyfat_percent: f64,
    pub dexa_lean_mass_kg: f64,
    pub bone_density_tscore: f64,
}
