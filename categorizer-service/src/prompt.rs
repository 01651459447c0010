//! Categorization instructions sent alongside every statement.
//!
//! The template text is product behaviour: the category heuristics live in its
//! wording, so it is kept byte-for-byte in `prompts/categorization.txt`.

use serde_json::Value;

/// Instruction template with a single `{chart_of_accounts}` slot.
pub const CATEGORIZATION_PROMPT: &str = include_str!("../prompts/categorization.txt");

const CHART_PLACEHOLDER: &str = "{chart_of_accounts}";

/// Render the instructions for one request.
///
/// A JSON string is inserted verbatim, any other value as compact JSON, and
/// an absent or `null` chart leaves the section empty.
pub fn build_categorization_prompt(chart_of_accounts: Option<&Value>) -> String {
    let chart = match chart_of_accounts {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    };

    CATEGORIZATION_PROMPT.replacen(CHART_PLACEHOLDER, &chart, 1)
}
