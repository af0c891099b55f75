//! C3: the day-by-day biometric simulator.
//!
//! Walks the run one calendar day at a time, threading a small mutable
//! state struct forward. The update order within a day is part of the
//! contract: adherence is computed first because the weight update reads
//! the freshly-computed value, and sleep quality/stress read the day's
//! freshly-computed sleep hours.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::config::Rng;
use crate::types::{DailyRow, EventRow, EventType, Profile, Rules};

/// Mutable state threaded from one day to the next.
struct DailyState {
    weight_kg: f64,
    rhr_bpm: f64,
    hrv_ms: f64,
    sleep_hours: f64,
    no_weight_loss_days: u32,
}

impl DailyState {
    fn from_profile(profile: &Profile) -> Self {
        Self {
            weight_kg: profile.baselines.weight_kg,
            rhr_bpm: profile.baselines.rhr_bpm,
            hrv_ms: profile.baselines.hrv_ms,
            sleep_hours: profile.baselines.sleep_hours,
            no_weight_loss_days: 0,
        }
    }
}

/// Events for a single day, partitioned by type.
struct DayEvents<'a> {
    travel: Vec<&'a EventRow>,
    illness: Vec<&'a EventRow>,
}

impl DayEvents<'_> {
    fn is_travel(&self) -> bool {
        !self.travel.is_empty()
    }
    fn is_illness(&self) -> bool {
        !self.illness.is_empty()
    }
}

fn index_events_by_date(events: &[EventRow]) -> HashMap<NaiveDate, Vec<&EventRow>> {
    let mut map: HashMap<NaiveDate, Vec<&EventRow>> = HashMap::new();
    for e in events {
        map.entry(e.date).or_default().push(e);
    }
    map
}

/// Produce one `DailyRow` per calendar day in `[start, end)`.
pub fn simulate_daily(profile: &Profile, rules: &Rules, events: &[EventRow], rng: &mut Rng) -> Vec<DailyRow> {
    let by_date = index_events_by_date(events);
    let mut state = DailyState::from_profile(profile);
    let mut rows = Vec::new();

    let start = profile.start_date;
    let end = profile.end_date();
    let mut day = start;

    while day < end {
        let today: Vec<&EventRow> = by_date.get(&day).cloned().unwrap_or_default();
        let day_events = DayEvents {
            travel: today.iter().filter(|e| e.event_type == EventType::Travel).copied().collect(),
            illness: today.iter().filter(|e| e.event_type == EventType::Illness).copied().collect(),
        };

        let row = simulate_one_day(profile, rules, &mut state, day, &day_events, rng);
        rows.push(row);
        day += Duration::days(1);
    }

    rows
}

#[allow(clippy::too_many_lines)]
fn simulate_one_day(
    profile: &Profile,
    rules: &Rules,
    state: &mut DailyState,
    date: NaiveDate,
    events: &DayEvents<'_>,
    rng: &mut Rng,
) -> DailyRow {
    // Step 2: adherence.
    let travel_penalty: f64 = events.travel.iter().map(|e| rules.adherence.travel_penalty_per_day * f64::from(e.intensity)).sum();
    let illness_penalty: f64 =
        events.illness.iter().map(|e| rules.adherence.illness_penalty_per_day * f64::from(e.intensity)).sum();
    let adherence =
        (profile.adherence_base - travel_penalty - illness_penalty + rng.gauss(0.0, rules.adherence.noise_std)).clamp(0.0, 1.0);

    // Step 3: steps / active minutes.
    let steps = (4000.0 + 6000.0 * adherence + rng.gauss(0.0, 500.0)).max(0.0).round() as u32;
    let active_minutes = (60.0 * adherence + rng.gauss(0.0, 5.0)).max(0.0).round() as u32;

    // Step 4: sleep.
    let travel_drop = if events.is_travel() { rng.rand_range(rules.sleep.travel_drop_range.lo, rules.sleep.travel_drop_range.hi) } else { 0.0 };
    let sleep_hours = profile
        .bounds
        .sleep_hours
        .clamp(profile.baselines.sleep_hours - travel_drop + rng.gauss(0.0, rules.sleep.noise_std));
    state.sleep_hours = sleep_hours;
    let sleep_quality = (3.0 + (sleep_hours - 6.5) * 0.4 + rng.gauss(0.0, 0.4)).clamp(1.0, 5.0);

    // Step 5: stress.
    let stress = (3.0
        + f64::from(u8::from(events.is_travel()))
        + f64::from(u8::from(events.is_illness()))
        + rng.gauss(0.0, 0.5))
    .clamp(1.0, 5.0);

    // Step 6: soreness.
    let soreness_base = if rng.bernoulli(0.3) { 1.0 } else { 0.0 };
    let soreness = (soreness_base + rng.gauss(1.0, 1.0)).clamp(0.0, 10.0);

    // Step 7: caloric balance.
    let caloric_balance = -300.0 * adherence + rng.gauss(0.0, 100.0);

    // Step 8: weight.
    let weekly_loss = if caloric_balance < 0.0 { rules.weight.weekly_loss_if_high_adherence_kg * adherence } else { 0.0 };
    let mut delta = -weekly_loss / 7.0 + rng.gauss(0.0, rules.weight.noise_std) / 7.0;
    if events.is_travel() {
        delta += rules.weight.travel_water_gain_kg / 7.0;
    }
    let new_weight = profile.bounds.weight_kg.clamp(state.weight_kg + delta);
    if state.weight_kg - new_weight > 0.01 {
        state.no_weight_loss_days = 0;
    } else {
        state.no_weight_loss_days += 1;
    }
    state.weight_kg = new_weight;

    // Step 9: RHR / HRV.
    let mut rhr = state.rhr_bpm + rng.gauss(0.0, rules.rhr.noise_std);
    let mut hrv = state.hrv_ms + rng.gauss(0.0, rules.hrv.noise_std);
    if events.is_travel() {
        rhr += rng.rand_range(rules.rhr.travel_bump_range.lo, rules.rhr.travel_bump_range.hi);
        hrv += rng.rand_range(rules.hrv.travel_bump_range.lo, rules.hrv.travel_bump_range.hi);
    }
    if events.is_illness() {
        rhr += rng.rand_range(rules.rhr.illness_bump_range.lo, rules.rhr.illness_bump_range.hi);
        hrv += rng.rand_range(rules.hrv.illness_bump_range.lo, rules.hrv.illness_bump_range.hi);
    }
    if adherence > 0.75 && sleep_hours > 6.8 {
        rhr -= rules.rhr.weekly_drop_if_good / 7.0;
        hrv += rng.rand_range(rules.hrv.weekly_gain_if_good_range.lo, rules.hrv.weekly_gain_if_good_range.hi) / 7.0;
    }
    state.rhr_bpm = profile.bounds.rhr_bpm.clamp(rhr);
    state.hrv_ms = profile.bounds.hrv_ms.clamp(hrv);

    DailyRow {
        date,
        adherence: crate::simulation::util::round3(adherence),
        steps,
        active_minutes,
        weight_kg: crate::simulation::util::round2(state.weight_kg),
        rhr_bpm: state.rhr_bpm.round(),
        hrv_ms: crate::simulation::util::round1(state.hrv_ms),
        sleep_hours: crate::simulation::util::round1(sleep_hours),
        sleep_quality: crate::simulation::util::round1(sleep_quality),
        stress_score: crate::simulation::util::round1(stress),
        soreness: crate::simulation::util::round1(soreness),
        caloric_balance_kcal: crate::simulation::util::round1(caloric_balance),
    }
}
