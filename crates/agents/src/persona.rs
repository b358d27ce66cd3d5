//! The four fixed personas of the recovery squad.

use serde::{Deserialize, Serialize};

use crate::prompts;

/// A named role with a fixed instruction template.
///
/// Declaration order is the report section order and must not change:
/// emotional analysis, closure draft, recovery plan, hard truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Therapist,
    Closure,
    Planner,
    Honesty,
}

impl Persona {
    /// All personas, in report order.
    pub const ALL: [Persona; 4] = [
        Persona::Therapist,
        Persona::Closure,
        Persona::Planner,
        Persona::Honesty,
    ];

    /// Stable key used in structured payloads and logs.
    pub fn key(&self) -> &'static str {
        match self {
            Persona::Therapist => "therapist",
            Persona::Closure => "closure",
            Persona::Planner => "planner",
            Persona::Honesty => "honesty",
        }
    }

    /// Parse a payload `mode` value. Returns `None` for anything that is not
    /// an explicit persona key, including "team".
    pub fn from_key(key: &str) -> Option<Persona> {
        match key {
            "therapist" => Some(Persona::Therapist),
            "closure" => Some(Persona::Closure),
            "planner" => Some(Persona::Planner),
            "honesty" => Some(Persona::Honesty),
            _ => None,
        }
    }

    /// Human-readable agent name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::Therapist => "Therapist",
            Persona::Closure => "Closure Specialist",
            Persona::Planner => "Recovery Planner",
            Persona::Honesty => "Brutal Honesty",
        }
    }

    /// Markdown section header used in the composed report.
    pub fn section_header(&self) -> &'static str {
        match self {
            Persona::Therapist => "## 🧠 Emotional Analysis",
            Persona::Closure => "## ✍️ Closure Draft",
            Persona::Planner => "## 📅 Recovery Plan",
            Persona::Honesty => "## ⚖️ Hard Truth",
        }
    }

    /// Fixed system instructions for this persona.
    pub fn instructions(&self) -> &'static str {
        match self {
            Persona::Therapist => prompts::THERAPIST_INSTRUCTIONS,
            Persona::Closure => prompts::CLOSURE_INSTRUCTIONS,
            Persona::Planner => prompts::PLANNER_INSTRUCTIONS,
            Persona::Honesty => prompts::HONESTY_INSTRUCTIONS,
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_roundtrip() {
        for persona in Persona::ALL {
            assert_eq!(Persona::from_key(persona.key()), Some(persona));
        }
    }

    #[test]
    fn team_is_not_a_persona_key() {
        assert_eq!(Persona::from_key("team"), None);
        assert_eq!(Persona::from_key("coach"), None);
        assert_eq!(Persona::from_key(""), None);
    }

    #[test]
    fn report_order_is_fixed() {
        assert_eq!(
            Persona::ALL,
            [
                Persona::Therapist,
                Persona::Closure,
                Persona::Planner,
                Persona::Honesty,
            ]
        );
    }

    #[test]
    fn serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&Persona::Closure).unwrap();
        assert_eq!(json, "\"closure\"");
        let parsed: Persona = serde_json::from_str("\"honesty\"").unwrap();
        assert_eq!(parsed, Persona::Honesty);
    }

    #[test]
    fn instructions_are_distinct_and_nonempty() {
        let all: Vec<&str> = Persona::ALL.iter().map(|p| p.instructions()).collect();
        for (i, a) in all.iter().enumerate() {
            assert!(!a.trim().is_empty());
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
