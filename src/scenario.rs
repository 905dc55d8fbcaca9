//! Scenario catalog and run request resolution.
//!
//! Scenarios are the preset logic traps offered by the split-screen test.
//! Each one carries the question sent to both engines and a `trap`
//! explanation that doubles as the source of the automatic fallback text
//! when the remote calls fail.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{Result, ThinkmodeError};

/// How hard a scenario is for an impulsive answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{}", name)
    }
}

/// A preset prompt with a known reasoning trap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub id: &'static str,
    pub title: &'static str,
    pub question: &'static str,
    pub difficulty: Difficulty,
    pub trap: &'static str,
}

/// The built-in scenarios, in display order.
pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        id: "drying-time",
        title: "The Drying Time Trap",
        question: "If it takes 10 minutes to dry 1 shirt in the sun, how long does it take to dry 5 shirts?",
        difficulty: Difficulty::Easy,
        trap: "Impulse says 50 minutes. Reality is concurrent (10 minutes).",
    },
    Scenario {
        id: "word-count",
        title: "The \"Strawberry\" Test",
        question: "How many times does the letter \"r\" appear in the word \"Strawberry\"?",
        difficulty: Difficulty::Medium,
        trap: "Tokenization sees the word as chunks, missing individual letters without breakdown.",
    },
    Scenario {
        id: "sister-logic",
        title: "The Sibling Paradox",
        question: "Alice has 4 brothers. Each brother has 3 sisters. How many sisters does Alice have?",
        difficulty: Difficulty::Hard,
        trap: "Impulse math (4*3=12) fails. They share sisters. The answer depends on including Alice.",
    },
];

/// Fallback shown in the fast pane when a custom query fails.
pub const CUSTOM_IMPULSE_FALLBACK: &str = "I apologize, but the Impulse Engine encountered a rate limit or error. For your custom query, I'm unable to provide an automated guess at this time.";

/// Fallback shown in the reasoning pane when a custom query fails.
pub const CUSTOM_REASONING_FALLBACK: &str = "System Auto-Response: Reasoning process interrupted. To maintain operation, I have switched to automatic mode. Please try again in a few minutes or check your API configuration.";

/// The scenario selected when nothing else is configured.
pub fn default_scenario() -> &'static Scenario {
    &SCENARIOS[0]
}

/// Look up a scenario by id.
pub fn find_scenario(id: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.id == id)
}

/// Look up a scenario by id, failing with `UnknownScenario`.
pub fn require_scenario(id: &str) -> Result<&'static Scenario> {
    find_scenario(id).ok_or_else(|| ThinkmodeError::UnknownScenario(id.to_string()))
}

impl Scenario {
    /// Canned answer for the fast pane: the trap up to its first period.
    pub fn impulse_fallback(&self) -> String {
        let first_clause = self.trap.split('.').next().unwrap_or(self.trap);
        format!(
            "[AUTOMATIC RESPONSE] Based on typical impulsive patterns: {}.",
            first_clause
        )
    }

    /// Canned three-step narrative for the reasoning pane, ending in the full trap.
    pub fn reasoning_fallback(&self) -> String {
        format!(
            "[AUTOMATIC REASONING] Analyzing \"{}\"... \n1. Identified common logic trap.\n2. Verified constraints.\n3. Conclusion: {}",
            self.title, self.trap
        )
    }
}

fn markup_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>?").expect("invalid markup pattern"))
}

/// Strip markup-like substrings and surrounding whitespace from free text.
pub fn sanitize_input(text: &str) -> String {
    markup_pattern().replace_all(text, "").trim().to_string()
}

/// The effective prompt for one experiment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub prompt: String,
    pub is_custom: bool,
    pub scenario: &'static Scenario,
}

impl RunRequest {
    /// Resolve the prompt: sanitized custom text when present, otherwise the
    /// scenario question.
    pub fn resolve(custom_input: &str, scenario: &'static Scenario) -> Self {
        let sanitized = sanitize_input(custom_input);
        if sanitized.is_empty() {
            Self {
                prompt: scenario.question.to_string(),
                is_custom: false,
                scenario,
            }
        } else {
            Self {
                prompt: sanitized,
                is_custom: true,
                scenario,
            }
        }
    }

    /// Fallback texts for (fast, reasoning) when the run fails.
    pub fn fallback_texts(&self) -> (String, String) {
        if self.is_custom {
            (
                CUSTOM_IMPULSE_FALLBACK.to_string(),
                CUSTOM_REASONING_FALLBACK.to_string(),
            )
        } else {
            (
                self.scenario.impulse_fallback(),
                self.scenario.reasoning_fallback(),
            )
        }
    }

    /// Short label for logs: the scenario title or "custom query".
    pub fn label(&self) -> &str {
        if self.is_custom {
            "custom query"
        } else {
            self.scenario.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_scenario_ids_are_unique() {
        let ids: HashSet<_> = SCENARIOS.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), SCENARIOS.len());
    }

    #[test]
    fn test_default_scenario_is_drying_time() {
        assert_eq!(default_scenario().id, "drying-time");
        assert_eq!(default_scenario().difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_find_scenario() {
        assert_eq!(find_scenario("sister-logic").unwrap().title, "The Sibling Paradox");
        assert!(find_scenario("nope").is_none());
    }

    #[test]
    fn test_require_scenario_unknown() {
        let err = require_scenario("nope").unwrap_err();
        assert!(matches!(err, ThinkmodeError::UnknownScenario(id) if id == "nope"));
    }

    #[test]
    fn test_sanitize_strips_markup() {
        assert_eq!(
            sanitize_input("  <script>alert(1)</script>What is 2+2? "),
            "alert(1)What is 2+2?"
        );
        assert_eq!(sanitize_input("<b>bold"), "bold");
        assert_eq!(sanitize_input("trailing <unclosed"), "trailing");
    }

    #[test]
    fn test_resolve_empty_input_uses_scenario_question() {
        let scenario = default_scenario();
        let request = RunRequest::resolve("   ", scenario);
        assert!(!request.is_custom);
        assert_eq!(request.prompt, scenario.question);
    }

    #[test]
    fn test_resolve_markup_only_input_falls_back_to_scenario() {
        let request = RunRequest::resolve("<div></div>", default_scenario());
        assert!(!request.is_custom);
    }

    #[test]
    fn test_resolve_custom_input() {
        let request = RunRequest::resolve(" What is 9 plus 10? ", default_scenario());
        assert!(request.is_custom);
        assert_eq!(request.prompt, "What is 9 plus 10?");
        assert_eq!(request.label(), "custom query");
    }

    #[test]
    fn test_drying_time_fallbacks() {
        let scenario = find_scenario("drying-time").unwrap();
        let (fast, reasoning) = RunRequest::resolve("", scenario).fallback_texts();
        assert_eq!(
            fast,
            "[AUTOMATIC RESPONSE] Based on typical impulsive patterns: Impulse says 50 minutes."
        );
        assert!(reasoning.starts_with("[AUTOMATIC REASONING] Analyzing \"The Drying Time Trap\"..."));
        assert!(reasoning.contains("\n1. Identified common logic trap."));
        assert!(reasoning.contains("\n2. Verified constraints."));
        assert!(reasoning.ends_with(
            "3. Conclusion: Impulse says 50 minutes. Reality is concurrent (10 minutes)."
        ));
    }

    #[test]
    fn test_custom_fallbacks_ignore_scenario() {
        for scenario in SCENARIOS {
            let (fast, reasoning) = RunRequest::resolve("What is 9 plus 10?", scenario).fallback_texts();
            assert_eq!(fast, CUSTOM_IMPULSE_FALLBACK);
            assert_eq!(reasoning, CUSTOM_REASONING_FALLBACK);
        }
    }

    #[test]
    fn test_difficulty_display() {
        assert_eq!(Difficulty::Hard.to_string(), "Hard");
    }
}
