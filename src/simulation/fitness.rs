//! C5: the weekly fitness & body-composition simulator.
//!
//! Week-stepping, reading each week's slice of the (already complete)
//! daily table to decide whether that week's training volume earned a
//! gain. `FitnessRow` and `BodyCompRow` share the same week-end date.

use chrono::Duration;

use crate::config::Rng;
use crate::types::{BodyCompRow, DailyRow, FitnessRow, Profile, Rules};

use super::util::round2;

const GRIP_BOUNDS: (f64, f64) = (30.0, 70.0);
const FMS_BOUNDS: (f64, f64) = (0.0, 21.0);

fn clamp(v: f64, (lo, hi): (f64, f64)) -> f64 {
    v.clamp(lo, hi)
}

/// Produce one paired `(FitnessRow, BodyCompRow)` per week in `[start, end)`.
pub fn simulate_fitness(profile: &Profile, rules: &Rules, daily: &[DailyRow], rng: &mut Rng) -> (Vec<FitnessRow>, Vec<BodyCompRow>) {
    let weeks = profile.weeks();
    let mut vo2max = profile.baselines.vo2max;
    let mut grip = profile.baselines.grip_kg;
    let mut fms = profile.baselines.fms_score;
    let mut bodyfat = profile.baselines.body_fat_percent;
    let mut lean_mass = profile.baselines.lean_mass_kg;
    let mut fev1 = profile.baselines.fev1_l;

    let mut fitness_rows = Vec::new();
    let mut body_comp_rows = Vec::new();

    for week in 0..weeks {
        let week_start = profile.start_date + Duration::days(7 * i64::from(week));
        let week_end_excl = week_start + Duration::days(7);
        let window: Vec<&DailyRow> = daily.iter().filter(|d| d.date >= week_start && d.date < week_end_excl).collect();

        let adh = if window.is_empty() { 0.75 } else { window.iter().map(|d| d.adherence).sum::<f64>() / window.len() as f64 };
        let cardio_sessions = window.iter().filter(|d| d.active_minutes > 35).count();
        let strength_sessions = window.iter().filter(|d| d.soreness > 3.0).count();

        if cardio_sessions >= 3 && adh > 0.7 {
            vo2max += rng.rand_range(rules.fitness.vo2_gain_range.lo, rules.fitness.vo2_gain_range.hi);
        } else {
            vo2max -= rules.fitness.vo2_weekly_loss_if_low;
        }
        vo2max = profile.bounds.vo2max.clamp(vo2max);

        if strength_sessions >= 2 && adh > 0.7 {
            grip += rng.rand_range(rules.fitness.grip_gain_range.lo, rules.fitness.grip_gain_range.hi);
        }
        grip = clamp(grip, GRIP_BOUNDS);

        if week > 0 && week % 4 == 0 {
            if adh > 0.7 {
                fms += rules.fitness.fms_gain_per_4w_if_mobility2;
            }
            fms = clamp(fms, FMS_BOUNDS);

            bodyfat -= rng.rand_range(rules.body_comp.bf_drop_range.lo, rules.body_comp.bf_drop_range.hi) * adh;
            lean_mass += rules.body_comp.lean_mass_gain_kg * adh;
            fev1 += rng.rand_range(rules.fitness.spirometry_monthly_gain_range.lo, rules.fitness.spirometry_monthly_gain_range.hi);
        }

        let five_km_time_min = 30.0 + (55.0 - vo2max).max(0.0) * 0.5;
        let deadlift_kg = (110.0 + grip * 0.5).round();
        let squat_kg = (90.0 + grip * 0.3).round();
        let week_end = week_start + Duration::days(6);

        fitness_rows.push(FitnessRow {
            date: week_end,
            vo2max_est: round2(vo2max),
            five_km_time_min: round2(five_km_time_min),
            one_rm_deadlift_kg: deadlift_kg,
            one_rm_squat_kg: squat_kg,
            grip_strength_kg: round2(grip),
            fms_score: round2(fms),
            spirometry_fev1_l: round2(fev1),
        });
        body_comp_rows.push(BodyCompRow {
            date: week_end,
            dexa_bodyfat_percent: round2(bodyfat),
            dexa_lean_mass_kg: round2(lean_mass),
            bone_density_tscore: round2(profile.baselines.bone_density_tscore),
        });
    }

    (fitness_rows, body_comp_rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::daily::simulate_daily;
    use crate::simulation::events::generate_events;

    #[test]
    fn one_pair_per_week() {
        let profile = Profile::default();
        let rules = Rules::default();
        let mut rng = Rng::seed_from_u64(profile.seed);
        let events = generate_events(&profile, &mut rng);
        let daily = simulate_daily(&profile, &rules, &events, &mut rng);
        let (fitness, body_comp) = simulate_fitness(&profile, &rules, &daily, &mut rng);
        assert_eq!(fitness.len(), profile.weeks() as usize);
        assert_eq!(fitness.len(), body_comp.len());
        for (f, b) in fitness.iter().zip(body_comp.iter()) {
            assert_eq!(f.date, b.date);
        }
    }

    #[test]
    fn fms_clamped_to_range() {
        let profile = Profile::default();
        let rules = Rules::default();
        let mut rng = Rng::seed_from_u64(3);
        let events = generate_events(&profile, &mut rng);
        let daily = simulate_daily(&profile, &rules, &events, &mut rng);
        let (fitness, _) = simulate_fitness(&profile, &rules, &daily, &mut rng);
        for row in &fitness {
            assert!((0.0..=21.0).contains(&row.fms_score));
        }
    }
}
