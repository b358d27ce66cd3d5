//! Composition of the four-section recovery report.

use squad_agents::Persona;

pub const REPORT_TITLE: &str = "# 💔 Breakup Recovery Plan";

/// Placeholder for a section whose agent invocation failed.
pub const AGENT_ERROR_PLACEHOLDER: &str = "⚠️ Agent Error";

/// Normalize whitespace for user-facing text.
///
/// Leading/trailing whitespace is trimmed, each interior line is trimmed
/// individually, original line breaks are preserved.
pub fn clean_text(text: &str) -> String {
    text.trim()
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Concatenate the four sections under their fixed headers.
///
/// `sections` must be in persona order (therapist, closure, planner,
/// honesty); the caller collects results positionally, never by completion
/// order.
pub fn compose_report(sections: &[String; 4]) -> String {
    let mut parts = vec![REPORT_TITLE.to_string(), String::new()];
    for (persona, section) in Persona::ALL.iter().zip(sections) {
        parts.push(persona.section_header().to_string());
        parts.push(section.clone());
        parts.push(String::new());
    }
    parts.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_trims_each_line() {
        let raw = "  first line  \n   second line\t\n\nthird  ";
        assert_eq!(clean_text(raw), "first line\nsecond line\n\nthird");
    }

    #[test]
    fn clean_text_preserves_interior_blank_lines() {
        let raw = "a\n\nb";
        assert_eq!(clean_text(raw), "a\n\nb");
    }

    #[test]
    fn report_has_title_and_headers_in_order() {
        let sections = [
            "feel your feelings".to_string(),
            "dear ex".to_string(),
            "day 1: gym".to_string(),
            "you ignored the signs".to_string(),
        ];
        let report = compose_report(&sections);

        assert!(report.starts_with(REPORT_TITLE));

        let analysis = report.find("## 🧠 Emotional Analysis").unwrap();
        let closure = report.find("## ✍️ Closure Draft").unwrap();
        let plan = report.find("## 📅 Recovery Plan").unwrap();
        let truth = report.find("## ⚖️ Hard Truth").unwrap();
        assert!(analysis < closure && closure < plan && plan < truth);

        assert!(report.contains("feel your feelings"));
        assert!(report.contains("dear ex"));
        assert!(report.contains("day 1: gym"));
        assert!(report.contains("you ignored the signs"));
    }

    #[test]
    fn report_has_no_trailing_whitespace() {
        let sections = [
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
            "d".to_string(),
        ];
        let report = compose_report(&sections);
        assert_eq!(report, report.trim());
    }
}
