//! Prompt templates for the two engines.

const FAST_INSTRUCTIONS: &str = "Answer the following question as quickly as possible. Do not explain your reasoning. Just provide the final answer.";

const REASONING_INSTRUCTIONS: &str = "Please solve the following problem. Show your step-by-step reasoning clearly before providing the final answer. Treat this as a complex logic puzzle.";

/// Prompt for the impulsive engine: answer only, no justification.
pub fn fast_prompt(question: &str) -> String {
    format!("{} Question: {}", FAST_INSTRUCTIONS, question)
}

/// Prompt for the reasoning engine: visible step-by-step work.
pub fn reasoning_prompt(question: &str) -> String {
    format!("{} Question: {}", REASONING_INSTRUCTIONS, question)
}
