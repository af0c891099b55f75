//! The simulated clock driving the chat-sim loop: a current instant that
//! advances stochastically and wraps to the next business morning rather
//! than drifting into the night.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};

use crate::config::defaults::{
    CHATSIM_BUSINESS_HOUR_END as BUSINESS_HOUR_END_EXCLUSIVE, CHATSIM_BUSINESS_HOUR_START as BUSINESS_HOUR_START,
    CHATSIM_MAX_ADVANCE_MINUTES, CHATSIM_MIN_ADVANCE_MINUTES,
};
use crate::config::Rng;

pub struct Timeline {
    pub now: DateTime<Utc>,
}

impl Timeline {
    pub fn starting_at(date: NaiveDate) -> Self {
        let time = NaiveTime::from_hms_opt(BUSINESS_HOUR_START, 0, 0).unwrap_or_default();
        Self { now: Utc.from_utc_datetime(&date.and_time(time)) }
    }

    /// Advance the clock 15-120 minutes; if that lands outside business
    /// hours, roll forward to the next day's opening instead.
    pub fn advance(&mut self, rng: &mut Rng) {
        let minutes = rng.rand_int(CHATSIM_MIN_ADVANCE_MINUTES, CHATSIM_MAX_ADVANCE_MINUTES);
        let candidate = self.now + Duration::minutes(minutes);
        let hour = candidate_hour(candidate);
        self.now = if (BUSINESS_HOUR_START..BUSINESS_HOUR_END_EXCLUSIVE).contains(&hour) {
            candidate
        } else {
            next_business_morning(candidate)
        };
    }

    pub fn advance_to_next_day(&mut self) {
        self.now = next_business_morning(self.now + Duration::days(1));
    }
}

fn candidate_hour(dt: DateTime<Utc>) -> u32 {
    dt.hour()
}

fn next_business_morning(dt: DateTime<Utc>) -> DateTime<Utc> {
    let date = if dt.hour() >= BUSINESS_HOUR_END_EXCLUSIVE { dt.date_naive() + Duration::days(1) } else { dt.date_naive() };
    let time = NaiveTime::from_hms_opt(BUSINESS_HOUR_START, 0, 0).unwrap_or_default();
    Utc.from_utc_datetime(&date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn advance_never_lands_outside_business_hours() {
        let mut rng = Rng::seed_from_u64(11);
        let mut timeline = Timeline::starting_at(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        for _ in 0..200 {
            timeline.advance(&mut rng);
            let hour = timeline.now.hour();
            assert!((BUSINESS_HOUR_START..BUSINESS_HOUR_END_EXCLUSIVE).contains(&hour));
        }
    }

    #[test]
    fn advance_to_next_day_opens_at_business_start() {
        let mut timeline = Timeline::starting_at(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        timeline.advance_to_next_day();
        assert_eq!(timeline.now.hour(), BUSINESS_HOUR_START);
    }
}
