//! C10: decide which concierge-team role answers a question.
//!
//! Three-stage dispatch: an explicit role always wins; failing that, an
//! exact phrase match short-circuits; failing that, keyword scoring picks
//! the top role, defaulting to [`Role::DEFAULT`] on a tie or a zero score.

use regex::Regex;

use crate::types::Role;

/// An exact, case-insensitive multi-word phrase that routes straight to a
/// role regardless of keyword score.
struct PhraseRule {
    role: Role,
    phrases: &'static [&'static str],
}

/// Single-word keywords scored via word-boundary match (worth +2) or plain
/// substring match (+1, only counted when the word-boundary match didn't
/// already fire for that keyword).
struct KeywordRule {
    role: Role,
    keywords: &'static [&'static str],
}

const PHRASE_TABLE: &[PhraseRule] = &[
    PhraseRule { role: Role::Ruby, phrases: &["reschedule my appointment", "change my plan", "cancel my session", "billing question"] },
    PhraseRule { role: Role::DrWarren, phrases: &["lab results", "blood test", "my ldl", "cholesterol panel", "doctor's note"] },
    PhraseRule { role: Role::Advik, phrases: &["heart rate variability", "resting heart rate", "sleep score", "recovery score"] },
    PhraseRule { role: Role::Carla, phrases: &["meal plan", "caloric balance", "what should i eat", "macro split"] },
    PhraseRule { role: Role::Rachel, phrases: &["range of motion", "mobility screen", "strength training", "physical therapy"] },
    PhraseRule { role: Role::Neel, phrases: &["quarterly business review", "overall progress", "program outcomes"] },
];

const KEYWORD_TABLE: &[KeywordRule] = &[
    KeywordRule { role: Role::Ruby, keywords: &["schedule", "appointment", "reschedule", "billing", "logistics", "concierge", "coordinate"] },
    KeywordRule { role: Role::DrWarren, keywords: &["lab", "labs", "ldl", "apob", "cholesterol", "glucose", "crp", "clinical", "diagnosis"] },
    KeywordRule { role: Role::Advik, keywords: &["hrv", "rhr", "sleep", "wearable", "recovery", "stress", "steps", "biometric"] },
    KeywordRule { role: Role::Carla, keywords: &["diet", "nutrition", "calorie", "caloric", "weight", "meal", "macro", "protein"] },
    KeywordRule { role: Role::Rachel, keywords: &["mobility", "strength", "rehab", "fms", "deadlift", "squat", "vo2max", "fitness"] },
    KeywordRule { role: Role::Neel, keywords: &["strategic", "quarterly", "qbr", "relationship", "outcomes", "progress", "review"] },
];

fn word_boundary_regex(keyword: &str) -> Option<Regex> {
    Regex::new(&format!(r"\b{}\b", regex::escape(keyword))).ok()
}

/// Route `question` to a role. `explicit_role` (if parseable) always wins.
pub fn route(question: &str, explicit_role: Option<&str>) -> Role {
    if let Some(role) = explicit_role.and_then(Role::parse) {
        return role;
    }

    let lowered = question.to_lowercase();

    for rule in PHRASE_TABLE {
        if rule.phrases.iter().any(|p| lowered.contains(p)) {
            return rule.role;
        }
    }

    let mut best_role = Role::DEFAULT;
    let mut best_score = 0i32;

    for rule in KEYWORD_TABLE {
        let mut score = 0i32;
        for keyword in rule.keywords {
            let whole_word = word_boundary_regex(keyword).map(|re| re.is_match(&lowered)).unwrap_or(false);
            if whole_word {
                score += 2;
            } else if lowered.contains(keyword) {
                score += 1;
            }
        }
        if score > best_score {
            best_score = score;
            best_role = rule.role;
        }
    }

    if best_score == 0 {
        Role::DEFAULT
    } else {
        best_role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_role_always_wins() {
        assert_eq!(route("what's my caloric intake doing", Some("Neel")), Role::Neel);
    }

    #[test]
    fn lab_keywords_route_to_dr_warren() {
        assert_eq!(route("can you explain my latest LDL and ApoB numbers?", None), Role::DrWarren);
    }

    #[test]
    fn wearable_keywords_route_to_advik() {
        assert_eq!(route("my HRV and RHR have been weird this week", None), Role::Advik);
    }

    #[test]
    fn nutrition_keywords_route_to_carla() {
        assert_eq!(route("what's a good meal plan for my caloric goals?", None), Role::Carla);
    }

    #[test]
    fn unrecognized_question_defaults_to_ruby() {
        assert_eq!(route("hello there, just saying hi", None), Role::Ruby);
    }

    #[test]
    fn exact_phrase_short_circuits_scoring() {
        assert_eq!(route("I need to reschedule my appointment for next Tuesday, also my sleep has been bad", None), Role::Ruby);
    }
}
