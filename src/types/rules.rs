//! Per-domain stochastic rule parameters (`rules.toml`).
//!
//! Every range is `(lo, hi)` and sampled with `Rng::rand_range`. Every noise
//! std feeds `Rng::gauss(0, std)`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RangeF {
    pub lo: f64,
    pub hi: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AdherenceRules {
    #[serde(default = "d::adh_travel_penalty")]
    pub travel_penalty_per_day: f64,
    #[serde(default = "d::adh_illness_penalty")]
    pub illness_penalty_per_day: f64,
    #[serde(default = "d::adh_noise_std")]
    pub noise_std: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SleepRules {
    #[serde(default = "d::sleep_travel_drop")]
    pub travel_drop_range: RangeF,
    #[serde(default = "d::sleep_noise_std")]
    pub noise_std: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RhrRules {
    #[serde(default = "d::rhr_noise_std")]
    pub noise_std: f64,
    #[serde(default = "d::rhr_travel_bump")]
    pub travel_bump_range: RangeF,
    #[serde(default = "d::rhr_illness_bump")]
    pub illness_bump_range: RangeF,
    #[serde(default = "d::rhr_weekly_drop_if_good")]
    pub weekly_drop_if_good: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HrvRules {
    #[serde(default = "d::hrv_noise_std")]
    pub noise_std: f64,
    #[serde(default = "d::hrv_travel_bump")]
    pub travel_bump_range: RangeF,
    #[serde(default = "d::hrv_illness_bump")]
    pub illness_bump_range: RangeF,
    #[serde(default = "d::hrv_weekly_gain_if_good")]
    pub weekly_gain_if_good_range: RangeF,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightRules {
    #[serde(default = "d::weight_loss_if_high_adherence")]
    pub weekly_loss_if_high_adherence_kg: f64,
    #[serde(default = "d::weight_noise_std")]
    pub noise_std: f64,
    #[serde(default = "d::weight_travel_water_gain")]
    pub travel_water_gain_kg: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GlycemicRules {
    #[serde(default = "d::glycemic_monthly_range")]
    pub monthly_improvement_range: RangeF,
    #[serde(default = "d::glycemic_noise_std")]
    pub noise_std: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LipidsRules {
    #[serde(default = "d::ldl_monthly_range")]
    pub ldl_monthly_range: RangeF,
    #[serde(default = "d::hdl_monthly_range")]
    pub hdl_monthly_range: RangeF,
    #[serde(default = "d::tg_monthly_range")]
    pub tg_monthly_range: RangeF,
    #[serde(default = "d::lipids_noise_std")]
    pub noise_std: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InflammationRules {
    #[serde(default = "d::crp_noise_std")]
    pub noise_std: f64,
    #[serde(default = "d::crp_mean_revert_rate")]
    pub mean_revert_rate: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FitnessRules {
    #[serde(default = "d::vo2_gain_range")]
    pub vo2_gain_range: RangeF,
    #[serde(default = "d::vo2_weekly_loss_if_low")]
    pub vo2_weekly_loss_if_low: f64,
    #[serde(default = "d::grip_gain_range")]
    pub grip_gain_range: RangeF,
    #[serde(default = "d::fms_gain_per_4w")]
    pub fms_gain_per_4w_if_mobility2: f64,
    #[serde(default = "d::spirometry_monthly_gain_range")]
    pub spirometry_monthly_gain_range: RangeF,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BodyCompRules {
    #[serde(default = "d::bf_drop_range")]
    pub bf_drop_range: RangeF,
    #[serde(default = "d::lean_mass_gain")]
    pub lean_mass_gain_kg: f64,
}

mod d {
    use super::RangeF;
    pub fn adh_travel_penalty() -> f64 {
        0.15
    }
    pub fn adh_illness_penalty() -> f64 {
        0.25
    }
    pub fn adh_noise_std() -> f64 {
        0.05
    }
    pub fn sleep_travel_drop() -> RangeF {
        RangeF { lo: 0.2, hi: 1.0 }
    }
    pub fn sleep_noise_std() -> f64 {
        0.3
    }
    pub fn rhr_noise_std() -> f64 {
        1.5
    }
    pub fn rhr_travel_bump() -> RangeF {
        RangeF { lo: 1.0, hi: 4.0 }
    }
    pub fn rhr_illness_bump() -> RangeF {
        RangeF { lo: 2.0, hi: 6.0 }
    }
    pub fn rhr_weekly_drop_if_good() -> f64 {
        1.0
    }
    pub fn hrv_noise_std() -> f64 {
        2.0
    }
    pub fn hrv_travel_bump() -> RangeF {
        RangeF { lo: -5.0, hi: -1.0 }
    }
    pub fn hrv_illness_bump() -> RangeF {
        RangeF { lo: -8.0, hi: -2.0 }
    }
    pub fn hrv_weekly_gain_if_good() -> RangeF {
        RangeF { lo: 0.2, hi: 1.0 }
    }
    pub fn weight_loss_if_high_adherence() -> f64 {
        0.3
    }
    pub fn weight_noise_std() -> f64 {
        0.2
    }
    pub fn weight_travel_water_gain() -> f64 {
        0.5
    }
    pub fn glycemic_monthly_range() -> RangeF {
        RangeF { lo: 0.0, hi: 1.5 }
    }
    pub fn glycemic_noise_std() -> f64 {
        1.5
    }
    pub fn ldl_monthly_range() -> RangeF {
        RangeF { lo: 0.0, hi: 2.5 }
    }
    pub fn hdl_monthly_range() -> RangeF {
        RangeF { lo: 0.0, hi: 0.6 }
    }
    pub fn tg_monthly_range() -> RangeF {
        RangeF { lo: 0.0, hi: 1.5 }
    }
    pub fn lipids_noise_std() -> f64 {
        3.0
    }
    pub fn crp_noise_std() -> f64 {
        0.3
    }
    pub fn crp_mean_revert_rate() -> f64 {
        0.3
    }
    pub fn vo2_gain_range() -> RangeF {
        RangeF { lo: 0.1, hi: 0.4 }
    }
    pub fn vo2_weekly_loss_if_low() -> f64 {
        0.1
    }
    pub fn grip_gain_range() -> RangeF {
        RangeF { lo: 0.1, hi: 0.3 }
    }
    pub fn fms_gain_per_4w() -> f64 {
        1.0
    }
    pub fn spirometry_monthly_gain_range() -> RangeF {
        RangeF { lo: 0.0, hi: 0.05 }
    }
    pub fn bf_drop_range() -> RangeF {
        RangeF { lo: 0.1, hi: 0.4 }
    }
    pub fn lean_mass_gain() -> f64 {
        0.15
    }
}

impl Default for AdherenceRules {
    fn default() -> Self {
        Self {
            travel_penalty_per_day: d::adh_travel_penalty(),
            illness_penalty_per_day: d::adh_illness_penalty(),
            noise_std: d::adh_noise_std(),
        }
    }
}
impl Default for SleepRules {
    fn default() -> Self {
        Self { travel_drop_range: d::sleep_travel_drop(), noise_std: d::sleep_noise_std() }
    }
}
impl Default for RhrRules {
    fn default() -> Self {
        Self {
            noise_std: d::rhr_noise_std(),
            travel_bump_range: d::rhr_travel_bump(),
            illness_bump_range: d::rhr_illness_bump(),
            weekly_drop_if_good: d::rhr_weekly_drop_if_good(),
        }
    }
}
impl Default for HrvRules {
    fn default() -> Self {
        Self {
            noise_std: d::hrv_noise_std(),
            travel_bump_range: d::hrv_travel_bump(),
            illness_bump_range: d::hrv_illness_bump(),
            weekly_gain_if_good_range: d::hrv_weekly_gain_if_good(),
        }
    }
}
impl Default for WeightRules {
    fn default() -> Self {
        Self {
            weekly_loss_if_high_adherence_kg: d::weight_loss_if_high_adherence(),
            noise_std: d::weight_noise_std(),
            travel_water_gain_kg: d::weight_travel_water_gain(),
        }
    }
}
impl Default for GlycemicRules {
    fn default() -> Self {
        Self { monthly_improvement_range: d::glycemic_monthly_range(), noise_std: d::glycemic_noise_std() }
    }
}
impl Default for LipidsRules {
    fn default() -> Self {
        Self {
            ldl_monthly_range: d::ldl_monthly_range(),
            hdl_monthly_range: d::hdl_monthly_range(),
            tg_monthly_range: d::tg_monthly_range(),
            noise_std: d::lipids_noise_std(),
        }
    }
}
impl Default for InflammationRules {
    fn default() -> Self {
        Self { noise_std: d::crp_noise_std(), mean_revert_rate: d::crp_mean_revert_rate() }
    }
}
impl Default for FitnessRules {
    fn default() -> Self {
        Self {
            vo2_gain_range: d::vo2_gain_range(),
            vo2_weekly_loss_if_low: d::vo2_weekly_loss_if_low(),
            grip_gain_range: d::grip_gain_range(),
            fms_gain_per_4w_if_mobility2: d::fms_gain_per_4w(),
            spirometry_monthly_gain_range: d::spirometry_monthly_gain_range(),
        }
    }
}
impl Default for BodyCompRules {
    fn default() -> Self {
        Self { bf_drop_range: d::bf_drop_range(), lean_mass_gain_kg: d::lean_mass_gain() }
    }
}

/// Root rules document (`rules.toml`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Rules {
    #[serde(default)]
    pub adherence: AdherenceRules,
    #[serde(default)]
    pub sleep: SleepRules,
    #[serde(default)]
    pub rhr: RhrRules,
    #[serde(default)]
    pub hrv: HrvRules,
    #[serde(default)]
    pub weight: WeightRules,
    #[serde(default)]
    pub glycemic: GlycemicRules,
    #[serde(default)]
    pub lipids: LipidsRules,
    #[serde(default)]
    pub inflammation: InflammationRules,
    #[serde(default)]
    pub fitness: FitnessRules,
    #[serde(default)]
    pub body_comp: BodyCompRules,
}
