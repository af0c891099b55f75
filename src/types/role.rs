//! The closed set of concierge-team personas.

use serde::{Deserialize, Serialize};

/// One of the fixed concierge-team roles. Each owns a subset of table types
/// for the facts assembler and the retriever's per-role allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Ruby,
    DrWarren,
    Advik,
    Carla,
    Rachel,
    Neel,
}

impl Role {
    /// All roles, in the fixed order used by `GET /roles`.
    pub const ALL: [Role; 6] = [
        Role::Ruby,
        Role::DrWarren,
        Role::Advik,
        Role::Carla,
        Role::Rachel,
        Role::Neel,
    ];

    /// The default role the router falls back to on tie or zero score.
    pub const DEFAULT: Role = Role::Ruby;

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Ruby => "Ruby",
            Role::DrWarren => "Dr. Warren",
            Role::Advik => "Advik",
            Role::Carla => "Carla",
            Role::Rachel => "Rachel",
            Role::Neel => "Neel",
        }
    }

    /// Parse a role from its display name or a small set of case-insensitive
    /// aliases (as a client might pass an explicit `role` field).
    pub fn parse(s: &str) -> Option<Role> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "ruby" => Some(Role::Ruby),
            "dr. warren" | "dr warren" | "drwarren" | "warren" => Some(Role::DrWarren),
            "advik" => Some(Role::Advik),
            "carla" => Some(Role::Carla),
            "rachel" => Some(Role::Rachel),
            "neel" => Some(Role::Neel),
            _ => None,
        }
    }

    /// Persona line used in the answer-orchestrator prompt.
    pub fn persona(&self) -> &'static str {
        match self {
            Role::Ruby => {
                "You are Ruby, the concierge coordinator. You handle logistics, scheduling, \
                 and general member relationship questions."
            }
            Role::DrWarren => {
                "You are Dr. Warren, the team physician. You interpret lab results and clinical \
                 risk, and own medical judgment calls."
            }
            Role::Advik => {
                "You are Advik, the performance scientist. You read daily biometrics — sleep, \
                 HRV, RHR, stress — and talk about physiological trends."
            }
            Role::Carla => {
                "You are Carla, the nutritionist. You advise on caloric balance, weight trend, \
                 and body composition."
            }
            Role::Rachel => {
                "You are Rachel, the physiotherapist / fitness lead. You track fitness and \
                 mobility metrics and training load."
            }
            Role::Neel => {
                "You are Neel, the concierge lead. You speak to overall program progress and \
                 monthly outcomes."
            }
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
