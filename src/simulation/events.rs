//! C2: the travel / illness event stream.
//!
//! Every week a scheduled travel block may land, and independently an
//! illness block may start at random. Blocks can overlap and are truncated
//! at the run's end date.

use chrono::Duration;

use crate::config::Rng;
use crate::types::{EventRow, EventType, Profile};

pub fn generate_events(profile: &Profile, rng: &mut Rng) -> Vec<EventRow> {
    let mut events = Vec::new();
    let weeks = profile.weeks();
    let end = profile.end_date();
    let cadence = &profile.cadence;

    for w in 0..weeks {
        let week_start = profile.start_date + Duration::days(7 * i64::from(w));

        if w > 0 && cadence.travel_every_n_weeks > 0 && w % cadence.travel_every_n_weeks == 0 {
            let length = rng.rand_int(5, 7);
            for i in 0..length {
                let date = week_start + Duration::days(i);
                if date >= end {
                    break;
                }
                let intensity = rng.rand_int(1, 3) as u8;
                events.push(EventRow {
                    date,
                    event_type: EventType::Travel,
                    intensity,
                    note: "traveling for work".to_string(),
                });
            }
        }

        if rng.bernoulli(cadence.illness_probability_weekly) {
            let start_offset = rng.rand_int(0, 6);
            let length = rng.rand_int(3, 5);
            let illness_start = week_start + Duration::days(start_offset);
            for i in 0..length {
                let date = illness_start + Duration::days(i);
                if date >= end {
                    break;
                }
                let intensity = rng.rand_int(1, 2) as u8;
                events.push(EventRow {
                    date,
                    event_type: EventType::Illness,
                    intensity,
                    note: "feeling unwell".to_string(),
                });
            }
        }
    }

    events.sort_by_key(|e| e.date);
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_blocks_land_on_cadence_weeks() {
        let profile = Profile::default();
        let mut rng = Rng::seed_from_u64(profile.seed);
        let events = generate_events(&profile, &mut rng);
        let travel_weeks: std::collections::BTreeSet<i64> = events
            .iter()
            .filter(|e| e.event_type == EventType::Travel)
            .map(|e| (e.date - profile.start_date).num_days() / 7)
            .collect();
        assert!(!travel_weeks.is_empty());
        for w in travel_weeks {
            assert_eq!(w % i64::from(profile.cadence.travel_every_n_weeks), 0);
        }
    }

    #[test]
    fn no_events_before_start_or_on_or_after_end() {
        let profile = Profile::default();
        let mut rng = Rng::seed_from_u64(7);
        let events = generate_events(&profile, &mut rng);
        let end = profile.end_date();
        for e in &events {
            assert!(e.date >= profile.start_date);
            assert!(e.date < end);
        }
    }

    #[test]
    fn same_seed_same_events() {
        let profile = Profile::default();
        let mut r1 = Rng::seed_from_u64(99);
        let mut r2 = Rng::seed_from_u64(99);
        let e1 = generate_events(&profile, &mut r1);
        let e2 = generate_events(&profile, &mut r2);
        assert_eq!(e1.len(), e2.len());
        for (a, b) in e1.iter().zip(e2.iter()) {
            assert_eq!(a.date, b.date);
            assert_eq!(a.event_type, b.event_type);
            assert_eq!(a.intensity, b.intensity);
        }
    }
}
