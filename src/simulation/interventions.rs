//! C6: the trigger/intervention engine.
//!
//! Runs after C3 and C4 have both finished. Two independent rule families —
//! CV-01 scans a rolling window of the daily table, LIP-02 scans each labs
//! row directly — each emitting `InterventionRow`s that later stages (chat
//! synthesis, KPI aggregation) consume as a unit.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::config::defaults::{CV01_HRV_DROP_FRACTION, CV01_RHR_ELEVATION_BPM, LIP02_LDL_THRESHOLD_MGDL};
use crate::types::{DailyRow, InterventionRow, LabsRow, Profile, RuleId};

use super::util::round1;

/// Build a disambiguated id, `<prefix>:<date>` or `<prefix>:<date>#<n>` on
/// same-day collision, tracked via `seen`.
fn next_id(prefix: &str, date: NaiveDate, seen: &mut HashMap<(String, NaiveDate), u32>) -> String {
    let key = (prefix.to_string(), date);
    let n = seen.entry(key).or_insert(0);
    let id = if *n == 0 { format!("{prefix}:{date}") } else { format!("{prefix}:{date}#{n}") };
    *n += 1;
    id
}

/// CV-01: cardiovascular drift. Evaluated per-day (not latched across a
/// contiguous violation window — see SPEC_FULL §9).
fn scan_cv01(profile: &Profile, daily: &[DailyRow], seen: &mut HashMap<(String, NaiveDate), u32>) -> Vec<InterventionRow> {
    let mut out = Vec::new();
    if daily.len() < 7 {
        return out;
    }

    for i in 6..daily.len() {
        let window = &daily[i - 6..=i];
        let rolling_mean_rhr = window.iter().map(|d| d.rhr_bpm).sum::<f64>() / window.len() as f64;
        let prev_hrv = daily[i - 1].hrv_ms;
        let hrv_drop = if prev_hrv.abs() > f64::EPSILON { (prev_hrv - daily[i].hrv_ms) / prev_hrv } else { 0.0 };

        let rhr_fires = rolling_mean_rhr > profile.baselines.rhr_bpm + CV01_RHR_ELEVATION_BPM;
        let hrv_fires = hrv_drop > CV01_HRV_DROP_FRACTION;

        if rhr_fires || hrv_fires {
            let date = daily[i].date;
            let (metric, value) = if rhr_fires {
                ("rhr_7d_avg".to_string(), round1(rolling_mean_rhr))
            } else {
                ("hrv_drop_fraction".to_string(), round1(hrv_drop))
            };
            out.push(InterventionRow {
                id: next_id("intervention", date, seen),
                date,
                rule_id: RuleId::Cv01,
                trigger_metric: metric,
                trigger_value: value,
                action: RuleId::Cv01.action().to_string(),
                owner: RuleId::Cv01.owner().to_string(),
                follow_up_date: date + Duration::days(RuleId::Cv01.follow_up_offset_days()),
                note: "7-day RHR/HRV drift check".to_string(),
            });
        }
    }
    out
}

/// LIP-02: lipid. Fires on every lab date with `ldl_mgdl > 130`.
fn scan_lip02(labs: &[LabsRow], seen: &mut HashMap<(String, NaiveDate), u32>) -> Vec<InterventionRow> {
    labs.iter()
        .filter(|l| l.ldl_mgdl > LIP02_LDL_THRESHOLD_MGDL)
        .map(|l| InterventionRow {
            id: next_id("intervention", l.date, seen),
            date: l.date,
            rule_id: RuleId::Lip02,
            trigger_metric: "ldl_mgdl".to_string(),
            trigger_value: l.ldl_mgdl,
            action: RuleId::Lip02.action().to_string(),
            owner: RuleId::Lip02.owner().to_string(),
            follow_up_date: l.date + Duration::days(RuleId::Lip02.follow_up_offset_days()),
            note: "quarterly lipid panel review".to_string(),
        })
        .collect()
}

/// Run both rule families and return interventions sorted by date, CV-01
/// before LIP-02 on an exact-date tie.
pub fn detect_interventions(profile: &Profile, daily: &[DailyRow], labs: &[LabsRow]) -> Vec<InterventionRow> {
    let mut seen = HashMap::new();
    let mut out = scan_cv01(profile, daily, &mut seen);
    out.extend(scan_lip02(labs, &mut seen));
    out.sort_by_key(|r| r.date);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rng;
    use crate::simulation::daily::simulate_daily;
    use crate::simulation::events::generate_events;
    use crate::simulation::labs::simulate_labs;
    use crate::types::Rules;

    #[test]
    fn cv01_never_fires_before_day_index_6() {
        let profile = Profile::default();
        let rules = Rules::default();
        let mut rng = Rng::seed_from_u64(42);
        let events = generate_events(&profile, &mut rng);
        let daily = simulate_daily(&profile, &rules, &events, &mut rng);
        let labs = simulate_labs(&profile, &rules, &daily, &mut rng);
        let interventions = detect_interventions(&profile, &daily, &labs);
        for iv in interventions.iter().filter(|i| i.rule_id == RuleId::Cv01) {
            let idx = daily.iter().position(|d| d.date == iv.date).expect("date in daily");
            assert!(idx >= 6);
        }
    }

    #[test]
    fn lip02_fires_only_on_lab_dates() {
        let profile = Profile::default();
        let rules = Rules::default();
        let mut rng = Rng::seed_from_u64(42);
        let events = generate_events(&profile, &mut rng);
        let daily = simulate_daily(&profile, &rules, &events, &mut rng);
        let labs = simulate_labs(&profile, &rules, &daily, &mut rng);
        let interventions = detect_interventions(&profile, &daily, &labs);
        let lab_dates: std::collections::HashSet<_> = labs.iter().map(|l| l.date).collect();
        for iv in interventions.iter().filter(|i| i.rule_id == RuleId::Lip02) {
            assert!(lab_dates.contains(&iv.date));
        }
    }

    #[test]
    fn high_ldl_fires_lip02_with_literal_value() {
        let mut profile = Profile::default();
        profile.baselines.labs.ldl_mgdl = 180.0;
        let rules = Rules::default();
        let mut rng = Rng::seed_from_u64(1);
        let events = generate_events(&profile, &mut rng);
        let daily = simulate_daily(&profile, &rules, &events, &mut rng);
        let labs = simulate_labs(&profile, &rules, &daily, &mut rng);
        let interventions = detect_interventions(&profile, &daily, &labs);
        let first = interventions.iter().find(|i| i.rule_id == RuleId::Lip02).expect("LIP-02 should fire");
        assert!((first.trigger_value - 180.0).abs() < 1.0);
    }

    #[test]
    fn scenario_cv01_fires_at_least_once() {
        let mut profile = Profile::default();
        profile.baselines.rhr_bpm = 65.0;
        profile.baselines.hrv_ms = 40.0;
        profile.baselines.weight_kg = 75.0;
        profile.months = 8;
        profile.seed = 42;
        let rules = Rules::default();
        let mut rng = Rng::seed_from_u64(42);
        let events = generate_events(&profile, &mut rng);
        let daily = simulate_daily(&profile, &rules, &events, &mut rng);
        let labs = simulate_labs(&profile, &rules, &daily, &mut rng);
        let interventions = detect_interventions(&profile, &daily, &labs);
        assert!(interventions.iter().any(|i| i.rule_id == RuleId::Cv01));
    }
}
