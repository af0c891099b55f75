//! Member profile: demographics, baselines, bounds, cadence, and the RNG seed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_member_id() -> String {
    "member-001".to_string()
}
fn default_name() -> String {
    "Member".to_string()
}
fn default_sex() -> String {
    "unspecified".to_string()
}
fn default_goals() -> Vec<String> {
    vec!["improve cardiovascular fitness".to_string(), "reduce LDL".to_string()]
}
fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}
fn default_months() -> u32 {
    8
}
fn default_seed() -> u64 {
    42
}

/// Demographics section (`[demographics]` in `profile.toml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(default = "default_member_id")]
    pub member_id: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default = "default_sex")]
    pub sex: String,
    #[serde(default = "default_goals")]
    pub goals: Vec<String>,
}

impl Default for Demographics {
    fn default() -> Self {
        Self {
            member_id: default_member_id(),
            name: default_name(),
            age: 45,
            sex: default_sex(),
            goals: default_goals(),
        }
    }
}

/// Baseline lab values held roughly constant by the labs simulator
/// (`[baselines.labs]`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LabBaselines {
    #[serde(default = "defaults::fpg")]
    pub fpg_mgdl: f64,
    #[serde(default = "defaults::ogtt2h")]
    pub ogtt2h_mgdl: f64,
    #[serde(default = "defaults::fasting_insulin")]
    pub fasting_insulin_uiu_ml: f64,
    #[serde(default = "defaults::ldl")]
    pub ldl_mgdl: f64,
    #[serde(default = "defaults::hdl")]
    pub hdl_mgdl: f64,
    #[serde(default = "defaults::tg")]
    pub triglycerides_mgdl: f64,
    #[serde(default = "defaults::apob")]
    pub apob_mgdl: f64,
    #[serde(default = "defaults::apoa1")]
    pub apoa1_mgdl: f64,
    #[serde(default = "defaults::lpa")]
    pub lpa_mgdl: f64,
    #[serde(default = "defaults::crp")]
    pub crp_mgl: f64,
    #[serde(default = "defaults::esr")]
    pub esr_mm_hr: f64,
    #[serde(default = "defaults::alt")]
    pub alt_u_l: f64,
    #[serde(default = "defaults::ast")]
    pub ast_u_l: f64,
    #[serde(default = "defaults::creatinine")]
    pub creatinine_mgdl: f64,
    #[serde(default = "defaults::egfr")]
    pub egfr: f64,
    #[serde(default = "defaults::tsh")]
    pub tsh_uiu_ml: f64,
    #[serde(default = "defaults::t3")]
    pub t3_ng_dl: f64,
    #[serde(default = "defaults::t4")]
    pub t4_ug_dl: f64,
    #[serde(default = "defaults::cortisol")]
    pub cortisol_ug_dl: f64,
    #[serde(default = "defaults::vitamin_d")]
    pub vitamin_d_ng_ml: f64,
    #[serde(default = "defaults::b12")]
    pub b12_pg_ml: f64,
    #[serde(default = "defaults::ferritin")]
    pub ferritin_ng_ml: f64,
    #[serde(default = "defaults::omega3_index")]
    pub omega3_index_percent: f64,
}

mod defaults {
    pub fn fpg() -> f64 {
        95.0
    }
    pub fn ogtt2h() -> f64 {
        120.0
    }
    pub fn fasting_insulin() -> f64 {
        8.0
    }
    pub fn ldl() -> f64 {
        130.0
    }
    pub fn hdl() -> f64 {
        48.0
    }
    pub fn tg() -> f64 {
        120.0
    }
    pub fn apob() -> f64 {
        100.0
    }
    pub fn apoa1() -> f64 {
        140.0
    }
    pub fn lpa() -> f64 {
        30.0
    }
    pub fn crp() -> f64 {
        1.5
    }
    pub fn esr() -> f64 {
        10.0
    }
    pub fn alt() -> f64 {
        25.0
    }
    pub fn ast() -> f64 {
        24.0
    }
    pub fn creatinine() -> f64 {
        0.9
    }
    pub fn egfr() -> f64 {
        95.0
    }
    pub fn tsh() -> f64 {
        2.0
    }
    pub fn t3() -> f64 {
        120.0
    }
    pub fn t4() -> f64 {
        8.0
    }
    pub fn cortisol() -> f64 {
        12.0
    }
    pub fn vitamin_d() -> f64 {
        35.0
    }
    pub fn b12() -> f64 {
        500.0
    }
    pub fn ferritin() -> f64 {
        90.0
    }
    pub fn omega3_index() -> f64 {
        6.0
    }
}

impl Default for LabBaselines {
    fn default() -> Self {
        Self {
            fpg_mgdl: defaults::fpg(),
            ogtt2h_mgdl: defaults::ogtt2h(),
            fasting_insulin_uiu_ml: defaults::fasting_insulin(),
            ldl_mgdl: defaults::ldl(),
            hdl_mgdl: defaults::hdl(),
            triglycerides_mgdl: defaults::tg(),
            apob_mgdl: defaults::apob(),
            apoa1_mgdl: defaults::apoa1(),
            lpa_mgdl: defaults::lpa(),
            crp_mgl: defaults::crp(),
            esr_mm_hr: defaults::esr(),
            alt_u_l: defaults::alt(),
            ast_u_l: defaults::ast(),
            creatinine_mgdl: defaults::creatinine(),
            egfr: defaults::egfr(),
            tsh_uiu_ml: defaults::tsh(),
            t3_ng_dl: defaults::t3(),
            t4_ug_dl: defaults::t4(),
            cortisol_ug_dl: defaults::cortisol(),
            vitamin_d_ng_ml: defaults::vitamin_d(),
            b12_pg_ml: defaults::b12(),
            ferritin_ng_ml: defaults::ferritin(),
            omega3_index_percent: defaults::omega3_index(),
        }
    }
}

/// Baseline values for the daily/fitness/body-comp simulators (`[baselines]`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Baselines {
    #[serde(default = "b_defaults::weight_kg")]
    pub weight_kg: f64,
    #[serde(default = "b_defaults::rhr_bpm")]
    pub rhr_bpm: f64,
    #[serde(default = "b_defaults::hrv_ms")]
    pub hrv_ms: f64,
    #[serde(default = "b_defaults::sleep_hours")]
    pub sleep_hours: f64,
    #[serde(default = "b_defaults::vo2max")]
    pub vo2max: f64,
    #[serde(default = "b_defaults::grip_kg")]
    pub grip_kg: f64,
    #[serde(default = "b_defaults::fms_score")]
    pub fms_score: f64,
    #[serde(default = "b_defaults::fev1_l")]
    pub fev1_l: f64,
    #[serde(default = "b_defaults::body_fat_percent")]
    pub body_fat_percent: f64,
    #[serde(default = "b_defaults::lean_mass_kg")]
    pub lean_mass_kg: f64,
    #[serde(default = "b_defaults::bone_density_tscore")]
    pub bone_density_tscore: f64,
    #[serde(default)]
    pub labs: LabBaselines,
}

mod b_defaults {
    pub fn weight_kg() -> f64 {
        82.0
    }
    pub fn rhr_bpm() -> f64 {
        65.0
    }
    pub fn hrv_ms() -> f64 {
        40.0
    }
    pub fn sleep_hours() -> f64 {
        7.0
    }
    pub fn vo2max() -> f64 {
        42.0
    }
    pub fn grip_kg() -> f64 {
        45.0
    }
    pub fn fms_score() -> f64 {
        14.0
    }
    pub fn fev1_l() -> f64 {
        3.8
    }
    pub fn body_fat_percent() -> f64 {
        22.0
    }
    pub fn lean_mass_kg() -> f64 {
        60.0
    }
    pub fn bone_density_tscore() -> f64 {
        0.0
    }
}

impl Default for Baselines {
    fn default() -> Self {
        Self {
            weight_kg: b_defaults::weight_kg(),
            rhr_bpm: b_defaults::rhr_bpm(),
            hrv_ms: b_defaults::hrv_ms(),
            sleep_hours: b_defaults::sleep_hours(),
            vo2max: b_defaults::vo2max(),
            grip_kg: b_defaults::grip_kg(),
            fms_score: b_defaults::fms_score(),
            fev1_l: b_defaults::fev1_l(),
            body_fat_percent: b_defaults::body_fat_percent(),
            lean_mass_kg: b_defaults::lean_mass_kg(),
            bone_density_tscore: b_defaults::bone_density_tscore(),
            labs: LabBaselines::default(),
        }
    }
}

/// A `[min, max]` clamp range for one metric.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Per-metric clamp bounds the daily/fitness simulators must respect
/// (`[bounds]`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default = "bounds_defaults::weight_kg")]
    pub weight_kg: Range,
    #[serde(default = "bounds_defaults::rhr_bpm")]
    pub rhr_bpm: Range,
    #[serde(default = "bounds_defaults::hrv_ms")]
    pub hrv_ms: Range,
    #[serde(default = "bounds_defaults::sleep_hours")]
    pub sleep_hours: Range,
    #[serde(default = "bounds_defaults::vo2max")]
    pub vo2max: Range,
}

mod bounds_defaults {
    use super::Range;
    pub fn weight_kg() -> Range {
        Range { min: 50.0, max: 150.0 }
    }
    pub fn rhr_bpm() -> Range {
        Range { min: 40.0, max: 100.0 }
    }
    pub fn hrv_ms() -> Range {
        Range { min: 15.0, max: 120.0 }
    }
    pub fn sleep_hours() -> Range {
        Range { min: 3.0, max: 10.0 }
    }
    pub fn vo2max() -> Range {
        Range { min: 20.0, max: 65.0 }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            weight_kg: bounds_defaults::weight_kg(),
            rhr_bpm: bounds_defaults::rhr_bpm(),
            hrv_ms: bounds_defaults::hrv_ms(),
            sleep_hours: bounds_defaults::sleep_hours(),
            vo2max: bounds_defaults::vo2max(),
        }
    }
}

/// Scheduling/cadence knobs (`[cadence]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cadence {
    #[serde(default = "cadence_defaults::travel_every_n_weeks")]
    pub travel_every_n_weeks: u32,
    #[serde(default = "cadence_defaults::illness_probability_weekly")]
    pub illness_probability_weekly: f64,
    #[serde(default = "cadence_defaults::quarterly_labs_weeks")]
    pub quarterly_labs_weeks: Vec<u32>,
}

mod cadence_defaults {
    pub fn travel_every_n_weeks() -> u32 {
        4
    }
    pub fn illness_probability_weekly() -> f64 {
        0.08
    }
    pub fn quarterly_labs_weeks() -> Vec<u32> {
        vec![0, 12, 24]
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            travel_every_n_weeks: cadence_defaults::travel_every_n_weeks(),
            illness_probability_weekly: cadence_defaults::illness_probability_weekly(),
            quarterly_labs_weeks: cadence_defaults::quarterly_labs_weeks(),
        }
    }
}

/// Root member profile (`profile.toml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub demographics: Demographics,
    #[serde(default)]
    pub baselines: Baselines,
    #[serde(default)]
    pub bounds: Bounds,
    #[serde(default = "profile_defaults::adherence_base")]
    pub adherence_base: f64,
    #[serde(default)]
    pub cadence: Cadence,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_start_date", with = "date_fmt")]
    pub start_date: NaiveDate,
    #[serde(default = "default_months")]
    pub months: u32,
}

mod profile_defaults {
    pub fn adherence_base() -> f64 {
        0.8
    }
}

mod date_fmt {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(d)?;
        NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(serde::de::Error::custom)
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            demographics: Demographics::default(),
            baselines: Baselines::default(),
            bounds: Bounds::default(),
            adherence_base: profile_defaults::adherence_base(),
            cadence: Cadence::default(),
            seed: default_seed(),
            start_date: default_start_date(),
            months: default_months(),
        }
    }
}

impl Profile {
    /// The run's exclusive end date: `start_date + months` calendar months.
    pub fn end_date(&self) -> NaiveDate {
        let mut year = self.start_date.year();
        let mut month = self.start_date.month() as i32 + self.months as i32;
        while month > 12 {
            month -= 12;
            year += 1;
        }
        NaiveDate::from_ymd_opt(year, month as u32, self.start_date.day())
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month as u32, 28).unwrap_or(self.start_date))
    }

    /// Number of whole weeks spanned by the run.
    pub fn weeks(&self) -> u32 {
        let days = (self.end_date() - self.start_date).num_days().max(0) as u32;
        days / 7
    }
}

use chrono::Datelike;
