//! C7: the chat synthesizer.
//!
//! Two independent traffic sources are merged and sorted: weekly ambient
//! member/team chatter, and one message anchored to every intervention the
//! trigger engine fired. A member ambient message may pick up a
//! `linked_intervention_id` if an intervention landed within a day of it.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};

use crate::config::Rng;
use crate::types::{ChatRow, InterventionRow, Profile, RuleId};

const BUSINESS_HOUR_START: u32 = 8;
const BUSINESS_HOUR_END_EXCLUSIVE: u32 = 22; // 08:00-21:59

fn random_business_timestamp(date: NaiveDate, rng: &mut Rng) -> DateTime<Utc> {
    let hour = rng.rand_int(i64::from(BUSINESS_HOUR_START), i64::from(BUSINESS_HOUR_END_EXCLUSIVE - 1)) as u32;
    let minute = rng.rand_int(0, 59) as u32;
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
    Utc.from_utc_datetime(&date.and_time(time))
}

fn member_message_text(profile: &Profile, rng: &mut Rng) -> String {
    let templates = [
        format!(
            "How's my adherence trending lately? I've been trying to stay close to {:.0}%.",
            profile.adherence_base * 100.0
        ),
        "Quick one — any changes needed to my plan this week?".to_string(),
        format!("Been averaging around {:.1}h of sleep, is that enough?", profile.baselines.sleep_hours),
        "Can we reschedule my appointment next week?".to_string(),
        "Feeling a bit off today, is that something to flag?".to_string(),
        "What's my latest LDL looking like?".to_string(),
        "Just checking in — anything I should focus on?".to_string(),
    ];
    templates[rng.rand_int(0, templates.len() as i64 - 1) as usize].clone()
}

fn team_reply_text(role: &str) -> String {
    match role {
        "coach" => "Logged — let's keep the cardio sessions steady this week.".to_string(),
        "nutritionist" => "Noted, I'll adjust the macros in your next plan update.".to_string(),
        _ => "Thanks for flagging — I've scheduled a follow-up on our end.".to_string(),
    }
}

/// Weighted pick over `(coach, nutritionist, concierge) = (0.75, 0.15, 0.10)`.
fn weighted_reply_role(rng: &mut Rng) -> &'static str {
    let r = rng.rand();
    if r < 0.75 {
        "coach"
    } else if r < 0.90 {
        "nutritionist"
    } else {
        "concierge"
    }
}

fn owner_role_label(owner: &str) -> &'static str {
    match owner {
        "nutritionist" => "Dr. Warren",
        _ => "Coach",
    }
}

struct AmbientMessage {
    timestamp: DateTime<Utc>,
    sender: String,
    role: String,
    text: String,
    tags: Vec<String>,
}

fn generate_ambient(profile: &Profile, rng: &mut Rng) -> Vec<AmbientMessage> {
    let mut out = Vec::new();
    let weeks = profile.weeks();

    for w in 0..weeks {
        let week_start = profile.start_date + Duration::days(7 * i64::from(w));
        let k = rng.poisson(crate::config::defaults::CHAT_WEEKLY_LAMBDA);

        for _ in 0..k {
            let day_offset = rng.rand_int(0, 6);
            let date = week_start + Duration::days(day_offset);
            if date >= profile.end_date() {
                continue;
            }
            let member_ts = random_business_timestamp(date, rng);
            out.push(AmbientMessage {
                timestamp: member_ts,
                sender: "member".to_string(),
                role: "member".to_string(),
                text: member_message_text(profile, rng),
                tags: vec!["ambient".to_string()],
            });

            if rng.bernoulli(0.6) {
                let role = weighted_reply_role(rng);
                let delay_minutes = rng.rand_int(30, 180);
                let mut reply_ts = member_ts + Duration::minutes(delay_minutes);
                let hour = reply_ts.hour();
                if !(BUSINESS_HOUR_START..BUSINESS_HOUR_END_EXCLUSIVE).contains(&hour) {
                    let next_day = (reply_ts.date_naive() + Duration::days(1)).and_hms_opt(BUSINESS_HOUR_START, 0, 0).unwrap_or_default();
                    reply_ts = Utc.from_utc_datetime(&next_day);
                }
                out.push(AmbientMessage {
                    timestamp: reply_ts,
                    sender: role.to_string(),
                    role: role.to_string(),
                    text: team_reply_text(role),
                    tags: vec!["ambient".to_string(), "reply".to_string()],
                });
            }
        }
    }

    out
}

/// Find the closest intervention within ±1 day of `date`; ties broken by
/// earliest date.
fn closest_intervention<'a>(date: NaiveDate, interventions: &'a [InterventionRow]) -> Option<&'a InterventionRow> {
    interventions
        .iter()
        .filter(|iv| (iv.date - date).num_days().abs() <= 1)
        .min_by_key(|iv| ((iv.date - date).num_days().abs(), iv.date))
}

/// Produce the full chat stream: ambient traffic merged with one message
/// per intervention, sorted by timestamp (intervention-anchored before
/// ambient on an exact tie).
pub fn synthesize_chat(profile: &Profile, interventions: &[InterventionRow], rng: &mut Rng) -> Vec<ChatRow> {
    let mut rows = Vec::new();

    for iv in interventions {
        let ts = Utc.from_utc_datetime(&iv.date.and_hms_opt(10, 0, 0).unwrap_or_default());
        let mut tags = vec!["intervention".to_string()];
        if iv.rule_id == RuleId::Lip02 {
            tags.push("labs".to_string());
        }
        rows.push(ChatRow {
            timestamp: ts,
            sender: iv.owner.clone(),
            role: owner_role_label(&iv.owner).to_string(),
            text: format!("Following up: {} ({}: {}). {}", iv.note, iv.trigger_metric, iv.trigger_value, iv.action),
            tags,
            linked_intervention_id: Some(iv.id.clone()),
        });
    }

    for msg in generate_ambient(profile, rng) {
        let linked = if msg.sender == "member" { closest_intervention(msg.timestamp.date_naive(), interventions).map(|iv| iv.id.clone()) } else { None };
        rows.push(ChatRow { timestamp: msg.timestamp, sender: msg.sender, role: msg.role, text: msg.text, tags: msg.tags, linked_intervention_id: linked });
    }

    rows.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rng;
    use crate::simulation::daily::simulate_daily;
    use crate::simulation::events::generate_events;
    use crate::simulation::interventions::detect_interventions;
    use crate::simulation::labs::simulate_labs;
    use crate::types::Rules;

    fn build_dataset(seed: u64) -> (Profile, Vec<InterventionRow>, Rng) {
        let profile = Profile::default();
        let rules = Rules::default();
        let mut rng = Rng::seed_from_u64(seed);
        let events = generate_events(&profile, &mut rng);
        let daily = simulate_daily(&profile, &rules, &events, &mut rng);
        let labs = simulate_labs(&profile, &rules, &daily, &mut rng);
        let interventions = detect_interventions(&profile, &daily, &labs);
        (profile, interventions, rng)
    }

    #[test]
    fn linked_interventions_exist_within_one_day() {
        let (profile, interventions, mut rng) = build_dataset(42);
        let chats = synthesize_chat(&profile, &interventions, &mut rng);
        for chat in chats.iter().filter_map(|c| c.linked_intervention_id.as_ref().map(|id| (c, id))) {
            let (chat, id) = chat;
            let iv = interventions.iter().find(|i| &i.id == id).expect("linked intervention should exist");
            assert!((iv.date - chat.timestamp.date_naive()).num_days().abs() <= 1);
        }
    }

    #[test]
    fn one_message_per_intervention_at_minimum() {
        let (profile, interventions, mut rng) = build_dataset(1);
        let chats = synthesize_chat(&profile, &interventions, &mut rng);
        let anchored = chats.iter().filter(|c| c.tags.contains(&"intervention".to_string())).count();
        assert_eq!(anchored, interventions.len());
    }

    #[test]
    fn output_sorted_by_timestamp() {
        let (profile, interventions, mut rng) = build_dataset(9);
        let chats = synthesize_chat(&profile, &interventions, &mut rng);
        for w in chats.windows(2) {
            assert!(w[0].timestamp <= w[1].timestamp);
        }
    }
}
