//! C8: the monthly KPI aggregator.
//!
//! Folds every other finalized table into one row per calendar month. Runs
//! last because it is the only stage that reads all of daily, labs,
//! fitness, interventions, and chats at once.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::types::{ChatRow, DailyRow, FitnessRow, InterventionRow, KpiMonthRow, LabsRow, Profile};

use super::util::round1;

const RATIONALE_COVERAGE_PERCENT: f64 = 90.0;

fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// All `YYYY-MM` keys spanned by `[start, end)`, in order.
fn month_range(start: NaiveDate, end: NaiveDate) -> Vec<String> {
    let mut out = Vec::new();
    let mut y = start.year();
    let mut m = start.month();
    loop {
        let key = format!("{y:04}-{m:02}");
        if let Some(month_start) = NaiveDate::from_ymd_opt(y, m, 1) {
            if month_start >= end {
                break;
            }
        }
        out.push(key);
        m += 1;
        if m > 12 {
            m = 1;
            y += 1;
        }
        if out.len() > 240 {
            break; // defensive bound, run spans are months not decades
        }
    }
    out
}

/// The last day of `YYYY-MM`.
fn month_end(key: &str) -> Option<NaiveDate> {
    let (y, m) = key.split_once('-')?;
    let y: i32 = y.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    let (ny, nm) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1).map(|d| d.pred_opt().unwrap_or(d))
}

pub fn aggregate_kpis(
    profile: &Profile,
    daily: &[DailyRow],
    labs: &[LabsRow],
    fitness: &[FitnessRow],
    _interventions: &[InterventionRow],
    chats: &[ChatRow],
) -> Vec<KpiMonthRow> {
    let months = month_range(profile.start_date, profile.end_date());

    let mut daily_grouped: BTreeMap<String, Vec<&DailyRow>> = BTreeMap::new();
    for row in daily {
        daily_grouped.entry(month_key(row.date)).or_default().push(row);
    }
    let mut fitness_grouped: BTreeMap<String, Vec<&FitnessRow>> = BTreeMap::new();
    for row in fitness {
        fitness_grouped.entry(month_key(row.date)).or_default().push(row);
    }
    let mut chats_grouped: BTreeMap<String, Vec<&ChatRow>> = BTreeMap::new();
    for row in chats {
        chats_grouped.entry(month_key(row.timestamp.date_naive())).or_default().push(row);
    }

    let mut prev_ldl: Option<f64> = None;
    let mut prev_vo2_mean: Option<f64> = None;
    let mut rows = Vec::new();

    for month in &months {
        let month_daily = daily_grouped.get(month).cloned().unwrap_or_default();
        let month_fitness = fitness_grouped.get(month).cloned().unwrap_or_default();
        let month_chats = chats_grouped.get(month).cloned().unwrap_or_default();

        let adherence_avg = mean(month_daily.iter().map(|d| d.adherence));
        let sleep_avg = mean(month_daily.iter().map(|d| d.sleep_hours));
        let stress_avg = mean(month_daily.iter().map(|d| d.stress_score));
        let sessions_total = month_daily.iter().filter(|d| d.active_minutes > 35).count() as u32;

        let weight_change_kg = if month_daily.len() >= 2 {
            let last = month_daily[month_daily.len() - 1].weight_kg;
            let second_last = month_daily[month_daily.len() - 2].weight_kg;
            last - second_last
        } else {
            0.0
        };

        let consults_attended = month_chats.iter().filter(|c| c.sender != "member").count() as u32;
        let consults_missed = 0; // carried from the source as an explicit placeholder, see DESIGN.md

        let month_end_date = month_end(month).unwrap_or(profile.end_date());
        let latest_ldl = labs.iter().filter(|l| l.date <= month_end_date).max_by_key(|l| l.date).map(|l| l.ldl_mgdl);
        let ldl_change_mgdl = match (latest_ldl, prev_ldl) {
            (Some(cur), Some(prev)) => cur - prev,
            _ => 0.0,
        };
        if latest_ldl.is_some() {
            prev_ldl = latest_ldl;
        }

        let vo2_mean = if month_fitness.is_empty() { None } else { Some(mean(month_fitness.iter().map(|f| f.vo2max_est))) };
        let vo2max_change = match (vo2_mean, prev_vo2_mean) {
            (Some(cur), Some(prev)) => cur - prev,
            _ => 0.0,
        };
        if let Some(v) = vo2_mean {
            prev_vo2_mean = Some(v);
        }

        rows.push(KpiMonthRow {
            month: month.clone(),
            adherence_avg: round1(adherence_avg),
            sessions_total,
            consults_attended,
            consults_missed,
            weight_change_kg: round1(weight_change_kg),
            sleep_avg: round1(sleep_avg),
            stress_avg: round1(stress_avg),
            ldl_change_mgdl: round1(ldl_change_mgdl),
            vo2max_change: round1(vo2max_change),
            rationale_coverage_percent: RATIONALE_COVERAGE_PERCENT,
        });
    }

    rows
}

fn mean(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let count = values.clone().count();
    if count == 0 {
        0.0
    } else {
        values.sum::<f64>() / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rng;
    use crate::simulation::daily::simulate_daily;
    use crate::simulation::events::generate_events;
    use crate::simulation::fitness::simulate_fitness;
    use crate::simulation::interventions::detect_interventions;
    use crate::simulation::labs::simulate_labs;
    use crate::types::Rules;

    #[test]
    fn one_row_per_month_in_range() {
        let profile = Profile::default();
        let rules = Rules::default();
        let mut rng = Rng::seed_from_u64(profile.seed);
        let events = generate_events(&profile, &mut rng);
        let daily = simulate_daily(&profile, &rules, &events, &mut rng);
        let labs = simulate_labs(&profile, &rules, &daily, &mut rng);
        let (fitness, _) = simulate_fitness(&profile, &rules, &daily, &mut rng);
        let interventions = detect_interventions(&profile, &daily, &labs);
        let chats = crate::simulation::chat::synthesize_chat(&profile, &interventions, &mut rng);

        let kpis = aggregate_kpis(&profile, &daily, &labs, &fitness, &interventions, &chats);
        assert_eq!(kpis.len() as u32, profile.months);
    }

    #[test]
    fn rationale_coverage_is_fixed() {
        let profile = Profile::default();
        let rules = Rules::default();
        let mut rng = Rng::seed_from_u64(2);
        let events = generate_events(&profile, &mut rng);
        let daily = simulate_daily(&profile, &rules, &events, &mut rng);
        let labs = simulate_labs(&profile, &rules, &daily, &mut rng);
        let (fitness, _) = simulate_fitness(&profile, &rules, &daily, &mut rng);
        let interventions = detect_interventions(&profile, &daily, &labs);
        let chats = crate::simulation::chat::synthesize_chat(&profile, &interventions, &mut rng);
        let kpis = aggregate_kpis(&profile, &daily, &labs, &fitness, &interventions, &chats);
        for row in &kpis {
            assert_eq!(row.rationale_coverage_percent, 90.0);
        }
    }
}
