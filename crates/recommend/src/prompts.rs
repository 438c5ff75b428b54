//! Prompt text for the two generation calls, and handling of their replies.

use serde_json::Value;
use smartmeal_llm::first_json_object;
use smartmeal_recipe::Recipe;

use crate::Constraints;

pub const SUMMARY_WIDTH: usize = 220;

pub const NO_RESULTS_MESSAGE: &str = "No recipes matched your constraints, even after relaxing \
cook speed and healthiness slightly. Try loosening your request (e.g., allow medium time or \
broader cuisines).";

pub const NO_ANCHOR_MESSAGE: &str = "Could not select an anchor recipe from the candidates.";

pub const NO_SIMILAR_MESSAGE: &str = "I couldn't find any recipes that match those constraints.";

pub const CONSTRAINT_SCHEMA_HINT: &str = r#"Expected JSON keys (all optional):

- max_total_minutes: integer, total prep + cook time, e.g. 30
- cook_speed: "fast" | "medium" | "slow" | null
- difficulty_max: "easy" | "medium" | "hard" | null
- is_vegan: true/false/null
- is_vegetarian: true/false/null
- is_gluten_free: true/false/null
- is_dairy_free: true/false/null
- is_nut_free: true/false/null
- is_halal: true/false/null
- is_kosher: true/false/null
- tastes_include: array of taste words, e.g. ["spicy", "savory"]
- tastes_exclude: array of taste words
- cuisines_include: array of strings, e.g. ["asian", "mediterranean"]
- healthiness_min: integer 0-100
- num_results: integer, number of recipes to recommend"#;

pub fn extraction_prompt(user_text: &str) -> String {
    format!(
        r#"You are a meal-planning constraints extractor for a recipe recommender.

User goals:
"""{user_text}"""

{CONSTRAINT_SCHEMA_HINT}

Rules:
- Infer only what is clearly implied (e.g., "quick" -> max_total_minutes about 30, cook_speed "fast").
- Map "healthy" or "very healthy" to healthiness_min (e.g., 60-80).
- If a field is not mentioned, set it to null or omit it.
- Use true/false/null for dietary flags.
- Output STRICT JSON only (no prose, no code fences).
"#
    )
}

/// Raw constraints object from an extraction reply. Anything that is not a
/// JSON object becomes an empty object.
pub fn parse_extraction(reply: &str) -> Value {
    let blob = first_json_object(reply).unwrap_or(reply);

    match serde_json::from_str::<Value>(blob) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => {
            tracing::warn!("Extraction reply is not a JSON object, using no constraints");
            Value::Object(Default::default())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not parse extraction reply, using no constraints");
            Value::Object(Default::default())
        }
    }
}

/// Collapse whitespace and cut to at most `width` characters at a word
/// boundary, marking the cut with ` [...]`.
pub fn shorten(text: &str, width: usize) -> String {
    const PLACEHOLDER: &str = " [...]";

    let words = text.split_whitespace().collect::<Vec<_>>();
    let collapsed = words.join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(PLACEHOLDER.len());
    let mut out = String::new();
    for word in words {
        let extra = usize::from(!out.is_empty()) + word.chars().count();
        if out.chars().count() + extra > budget {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }

    if out.is_empty() {
        return PLACEHOLDER.trim_start().to_string();
    }
    out.push_str(PLACEHOLDER);
    out
}

/// One-line description of a recipe for the explanation prompt.
pub fn summarize(recipe: &Recipe) -> String {
    let line = format!(
        "{}: time ~{} min, speed={}, diff={}, tastes={}, health={}, main_ingredient={}",
        recipe.title,
        recipe.total_time_min(),
        recipe.cook_speed,
        recipe.difficulty,
        recipe.tastes,
        recipe.healthiness_score,
        recipe.main_ingredient,
    );

    shorten(&line, SUMMARY_WIDTH)
}

pub fn explanation_prompt(
    user_text: &str,
    constraints: &Constraints,
    anchor_summary: &str,
    similar_summaries: &[String],
) -> String {
    let constraints_json =
        serde_json::to_string_pretty(constraints).unwrap_or_else(|_| "{}".to_string());
    let similar = similar_summaries
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are Smart Meal Planner, explaining recipe recommendations to a user.

User goals:
"""{user_text}"""

Interpreted constraints (JSON, may be partial):
{constraints_json}

Base recipe we anchored on:
{anchor_summary}

Top similar recipes that also match the constraints:
{similar}

Explain in a short paragraph:
- Why these recipes fit the user's goals (time, diet, healthiness, taste, etc.).
- How they differ from each other (e.g., fastest vs healthiest vs simplest).
- End with a brief bullet list recommending 2-3 to try first.
Keep it concise and user-friendly.
"#
    )
}

/// Explanation used when the generator fails or returns nothing.
pub fn fallback_explanation(anchor: &Recipe, similar: &[&Recipe]) -> String {
    let titles = similar
        .iter()
        .map(|r| r.title.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Sorry, I couldn't write a detailed explanation right now. Based on your goals I started \
         from {} and picked these similar recipes that also fit your constraints: {titles}.",
        anchor.title
    )
}
