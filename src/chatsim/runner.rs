//! C15: drive a multi-day synthetic conversation against a running RAG
//! server, one `/ask` call at a time, recording the transcript.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::Rng;
use crate::types::Profile;

use super::client::RagClient;
use super::templates::{member_question, milestone_message, random_topic, Topic};
use super::timeline::Timeline;

#[derive(Debug, Clone, Serialize)]
pub struct ChatSimMessage {
    pub timestamp: DateTime<Utc>,
    pub sender: String,
    pub role: Option<String>,
    pub text: String,
}

fn milestone_dates(profile: &Profile) -> Vec<chrono::NaiveDate> {
    profile.cadence.quarterly_labs_weeks.iter().map(|w| profile.start_date + Duration::days(7 * i64::from(*w))).collect()
}

fn explicit_role_for_topic(topic: Topic) -> Option<&'static str> {
    match topic {
        Topic::Research | Topic::Schedule => Some("Ruby"),
        Topic::HealthConcern => None, // let the server's router pick among Dr. Warren/Advik/Carla
    }
}

/// Run the chat-sim loop for `profile.months` worth of days against
/// `client`, returning the full transcript in chronological order.
pub async fn run(profile: &Profile, client: &RagClient, seed: u64) -> Vec<ChatSimMessage> {
    let mut rng = Rng::seed_from_u64(seed);
    let milestones = milestone_dates(profile);
    let mut timeline = Timeline::starting_at(profile.start_date);
    let mut transcript = Vec::new();

    let total_days = (profile.end_date() - profile.start_date).num_days().max(0);

    for _ in 0..total_days {
        let today = timeline.now.date_naive();

        if milestones.contains(&today) {
            transcript.push(ChatSimMessage {
                timestamp: timeline.now,
                sender: "team".to_string(),
                role: Some("Dr. Warren".to_string()),
                text: milestone_message("a quarterly diagnostics review"),
            });
            timeline.advance(&mut rng);
        }

        let conversations = rng.rand_int(1, 3);
        for i in 0..conversations {
            let member_initiated = i % 2 == 0;
            let topic = random_topic(&mut rng);

            if member_initiated {
                let question = member_question(topic, &mut rng);
                transcript.push(ChatSimMessage { timestamp: timeline.now, sender: "member".to_string(), role: None, text: question.to_string() });
                timeline.advance(&mut rng);

                match client.ask(question, explicit_role_for_topic(topic)).await {
                    Ok(resp) => {
                        transcript.push(ChatSimMessage { timestamp: timeline.now, sender: "team".to_string(), role: Some(resp.role), text: resp.answer });
                    }
                    Err(e) => {
                        info!(error = %e, "chat-sim: /ask call failed, skipping this conversation turn");
                    }
                }
                timeline.advance(&mut rng);
            } else {
                let question = member_question(topic, &mut rng);
                match client.ask(question, explicit_role_for_topic(topic)).await {
                    Ok(resp) => {
                        transcript.push(ChatSimMessage {
                            timestamp: timeline.now,
                            sender: "team".to_string(),
                            role: Some(resp.role),
                            text: format!("Proactive check-in: {}", resp.answer),
                        });
                    }
                    Err(e) => {
                        info!(error = %e, "chat-sim: /ask call failed, skipping this conversation turn");
                    }
                }
                timeline.advance(&mut rng);
            }
        }

        timeline.advance_to_next_day();
    }

    transcript
}
