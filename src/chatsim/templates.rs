//! Small templated pools the chat-sim loop draws member questions from.

use crate::config::Rng;

/// The shape of member-initiated traffic, used only to pick a template
/// pool — actual role routing still happens inside the running server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Research,
    HealthConcern,
    Schedule,
}

const RESEARCH_QUESTIONS: &[&str] = &[
    "What does the latest research say about omega-3 and LDL?",
    "Is there good evidence that HRV training actually improves recovery?",
    "What's the science behind VO2max as a longevity marker?",
];

const HEALTH_CONCERN_QUESTIONS: &[&str] = &[
    "My resting heart rate has been climbing this week, should I be worried?",
    "Can you walk me through my latest lab panel?",
    "I've been feeling more fatigued than usual, any thoughts?",
    "My sleep quality has dropped, what might be causing that?",
];

const SCHEDULE_QUESTIONS: &[&str] = &["Can we move my next check-in to later this week?", "When is my next quarterly diagnostic due?"];

pub fn random_topic(rng: &mut Rng) -> Topic {
    match rng.rand_int(0, 2) {
        0 => Topic::Research,
        1 => Topic::HealthConcern,
        _ => Topic::Schedule,
    }
}

pub fn member_question(topic: Topic, rng: &mut Rng) -> &'static str {
    let pool = match topic {
        Topic::Research => RESEARCH_QUESTIONS,
        Topic::HealthConcern => HEALTH_CONCERN_QUESTIONS,
        Topic::Schedule => SCHEDULE_QUESTIONS,
    };
    pool[rng.rand_int(0, pool.len() as i64 - 1) as usize]
}

/// The team-initiated message for a milestone date (e.g. a quarterly labs
/// review), delivered before any member-initiated traffic that day.
pub fn milestone_message(label: &str) -> String {
    format!("Heads up — {label} is scheduled. Let us know if you have questions ahead of time.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_topic_has_a_non_empty_pool() {
        let mut rng = Rng::seed_from_u64(1);
        for _ in 0..30 {
            let topic = random_topic(&mut rng);
            assert!(!member_question(topic, &mut rng).is_empty());
        }
    }
}
