//! C4: the quarterly labs simulator.
//!
//! Runs once per scheduled quarterly date. Reads the preceding 84 days of
//! daily adherence as its only cross-stage input; every other lab value
//! evolves from the profile's baselines plus configured noise.

use chrono::{Datelike, NaiveDate};

use crate::config::Rng;
use crate::types::{DailyRow, LabsRow, Profile, Rules};

use super::util::round2;

/// Plausible physiological clamp ranges not otherwise carried in
/// `Profile`/`Rules` (those two schemas cover only the metrics later stages
/// branch on; the remaining ~20 labs are held near baseline and only need a
/// sanity clamp here).
mod clamp {
    pub const FPG: (f64, f64) = (60.0, 200.0);
    pub const OGTT2H: (f64, f64) = (70.0, 300.0);
    pub const LDL: (f64, f64) = (30.0, 300.0);
    pub const HDL: (f64, f64) = (20.0, 110.0);
    pub const TG: (f64, f64) = (30.0, 500.0);
    pub const APOB: (f64, f64) = (30.0, 250.0);
    pub const APOA1: (f64, f64) = (50.0, 250.0);
    pub const CRP: (f64, f64) = (0.0, 20.0);
}

fn clamp(v: f64, (lo, hi): (f64, f64)) -> f64 {
    v.clamp(lo, hi)
}

/// Whole calendar months between `start` and `q`, floored at 1.
fn months_since(start: NaiveDate, q: NaiveDate) -> i64 {
    let months = i64::from(q.year() - start.year()) * 12 + i64::from(q.month()) - i64::from(start.month());
    months.max(1)
}

/// Mean adherence over the 84 days preceding (and including) `q`, falling
/// back to `profile.adherence_base` if the window has no daily rows yet.
fn trailing_adherence(daily: &[DailyRow], q: NaiveDate, fallback: f64) -> f64 {
    let window_start = q - chrono::Duration::days(84);
    let values: Vec<f64> = daily.iter().filter(|d| d.date > window_start && d.date <= q).map(|d| d.adherence).collect();
    if values.is_empty() {
        fallback
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Produce one `LabsRow` per scheduled quarterly date.
pub fn simulate_labs(profile: &Profile, rules: &Rules, daily: &[DailyRow], rng: &mut Rng) -> Vec<LabsRow> {
    let base = &profile.baselines.labs;
    let mut rows = Vec::new();

    for &week in &profile.cadence.quarterly_labs_weeks {
        let q = profile.start_date + chrono::Duration::weeks(i64::from(week));
        if q >= profile.end_date() {
            continue;
        }

        let adh = trailing_adherence(daily, q, profile.adherence_base);
        let months = months_since(profile.start_date, q) as f64;

        let glyc = &rules.glycemic;
        let fpg = clamp(base.fpg_mgdl - rng.rand_range(glyc.monthly_improvement_range.lo, glyc.monthly_improvement_range.hi) * adh * 2.0 + rng.gauss(0.0, glyc.noise_std), clamp::FPG);
        let ogtt2h = clamp(base.ogtt2h_mgdl - rng.rand_range(glyc.monthly_improvement_range.lo, glyc.monthly_improvement_range.hi) * adh * 2.0 + rng.gauss(0.0, glyc.noise_std), clamp::OGTT2H);

        let lip = &rules.lipids;
        let ldl = clamp(
            base.ldl_mgdl - months * rng.rand_range(lip.ldl_monthly_range.lo, lip.ldl_monthly_range.hi) * (adh / 2.0) + rng.gauss(0.0, lip.noise_std),
            clamp::LDL,
        );
        let hdl = clamp(
            base.hdl_mgdl + months * rng.rand_range(lip.hdl_monthly_range.lo, lip.hdl_monthly_range.hi) * (adh / 2.0) + rng.gauss(0.0, lip.noise_std),
            clamp::HDL,
        );
        let tg = clamp(
            base.triglycerides_mgdl - months * rng.rand_range(lip.tg_monthly_range.lo, lip.tg_monthly_range.hi) * (adh / 2.0) + rng.gauss(0.0, lip.noise_std),
            clamp::TG,
        );
        let total_cholesterol = ldl + hdl + tg / 5.0;

        let apob = clamp(base.apob_mgdl - (ldl - base.ldl_mgdl) * 0.3, clamp::APOB);
        let apoa1 = clamp(base.apoa1_mgdl + (hdl - base.hdl_mgdl) * 0.8, clamp::APOA1);

        let infl = &rules.inflammation;
        let crp_drawn = base.crp_mgl + rng.gauss(0.0, infl.noise_std);
        let crp = clamp(crp_drawn - (crp_drawn - base.crp_mgl) * infl.mean_revert_rate, clamp::CRP);

        rows.push(LabsRow {
            date: q,
            fpg_mgdl: round2(fpg),
            ogtt2h_mgdl: round2(ogtt2h),
            fasting_insulin_uiu_ml: round2(base.fasting_insulin_uiu_ml),
            total_cholesterol_mgdl: round2(total_cholesterol),
            ldl_mgdl: round2(ldl),
            hdl_mgdl: round2(hdl),
            triglycerides_mgdl: round2(tg),
            apob_mgdl: round2(apob),
            apoa1_mgdl: round2(apoa1),
            lpa_mgdl: round2(base.lpa_mgdl),
            crp_mgl: round2(crp),
            esr_mm_hr: round2(base.esr_mm_hr),
            alt_u_l: round2(base.alt_u_l),
            ast_u_l: round2(base.ast_u_l),
            creatinine_mgdl: round2(base.creatinine_mgdl),
            egfr: round2(base.egfr),
            tsh_uiu_ml: round2(base.tsh_uiu_ml),
            t3_ng_dl: round2(base.t3_ng_dl),
            t4_ug_dl: round2(base.t4_ug_dl),
            cortisol_ug_dl: round2(base.cortisol_ug_dl),
            vitamin_d_ng_ml: round2(base.vitamin_d_ng_ml),
            b12_pg_ml: round2(base.b12_pg_ml),
            ferritin_ng_ml: round2(base.ferritin_ng_ml),
            omega3_index_percent: round2(base.omega3_index_percent),
        });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::daily::simulate_daily;
    use crate::simulation::events::generate_events;

    #[test]
    fn one_row_per_scheduled_quarter() {
        let profile = Profile::default();
        let rules = Rules::default();
        let mut rng = Rng::seed_from_u64(profile.seed);
        let events = generate_events(&profile, &mut rng);
        let daily = simulate_daily(&profile, &rules, &events, &mut rng);
        let labs = simulate_labs(&profile, &rules, &daily, &mut rng);
        assert_eq!(labs.len(), profile.cadence.quarterly_labs_weeks.len());
    }

    #[test]
    fn dates_within_run_window() {
        let profile = Profile::default();
        let rules = Rules::default();
        let mut rng = Rng::seed_from_u64(7);
        let events = generate_events(&profile, &mut rng);
        let daily = simulate_daily(&profile, &rules, &events, &mut rng);
        let labs = simulate_labs(&profile, &rules, &daily, &mut rng);
        for row in &labs {
            assert!(row.date >= profile.start_date && row.date < profile.end_date());
        }
    }

    #[test]
    fn high_baseline_ldl_stays_elevated() {
        let mut profile = Profile::default();
        profile.baselines.labs.ldl_mgdl = 180.0;
        let rules = Rules::default();
        let mut rng = Rng::seed_from_u64(1);
        let events = generate_events(&profile, &mut rng);
        let daily = simulate_daily(&profile, &rules, &events, &mut rng);
        let labs = simulate_labs(&profile, &rules, &daily, &mut rng);
        assert!((labs[0].ldl_mgdl - 180.0).abs() < 15.0);
    }
}
