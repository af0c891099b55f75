use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One quarterly lab panel (~25 fields).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LabsRow {
    pub date: NaiveDate,
    pub fpg_mgdl: f64,
    pub ogtt2h_mgdl: f64,
    pub fasting_insulin_uiu_ml: f64,
    pub total_cholesterol_mgdl: f64,
    pub ldl_mgdl: f64,
    pub hdl_mgdl: f64,
    pub triglycerides_mgdl: f64,
    pub apob_mgdl: f64,
    pub apoa1_mgdl: f64,
    pub lpa_mgdl: f64,
    pub crp_mgl: f64,
    pub esr_mm_hr: f64,
    pub alt_u_l: f64,
    pub ast_u_l: f64,
    pub creatinine_mgdl: f64,
    pub egfr: f64,
    pub tsh_uiu_ml: f64,
    pub t3_ng_dl: f64,
    pub t4_ug_dl: f64,
    pub cortisol_ug_dl: f64,
    pub vitamin_d_ng_ml: f64,
    pub b12_pg_ml: f64,
    pub ferritin_ng_ml: f64,
    pub omega3_index_percent: f64,
}
