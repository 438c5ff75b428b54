//! Helpers for the loosely typed cells of the recipe dataset.
//!
//! The dataset is exported from a dataframe, so list-valued columns are
//! stored as list literals (`["sweet","spicy"]` or `['sweet', 'spicy']`),
//! numbers may be written as `12.0` or left empty, and booleans come in
//! several spellings.

use serde::{Deserialize, Deserializer};

/// Parse a stringified list literal into its items.
///
/// Returns `None` when the cell is not a well-formed list literal. A blank
/// cell is an empty list.
pub fn parse_list(raw: &str) -> Option<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(Vec::new());
    }

    if !trimmed.starts_with('[') {
        return None;
    }

    parse_json_list(trimmed).or_else(|| parse_literal_list(trimmed))
}

fn parse_json_list(raw: &str) -> Option<Vec<String>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw).ok()?;

    Some(
        values
            .into_iter()
            .filter_map(|value| match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some(s),
                other => Some(other.to_string()),
            })
            .filter(|s| !s.trim().is_empty())
            .collect(),
    )
}

/// List literal whose items may each use single or double quotes, as a
/// dataframe export writes `["confectioners' sugar", 'butter']`. Backslash
/// escapes are honoured inside quotes. Bare items are kept as text except
/// `None`/`null`/`nan`.
fn parse_literal_list(raw: &str) -> Option<Vec<String>> {
    let inner = raw.strip_prefix('[')?.strip_suffix(']')?;
    let mut chars = inner.chars().peekable();
    let mut items = Vec::new();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        match chars.peek().copied() {
            None => break,
            Some(quote @ ('\'' | '"')) => {
                chars.next();
                let mut item = String::new();
                let mut closed = false;

                while let Some(c) = chars.next() {
                    match c {
                        '\\' => match chars.next()? {
                            'n' => item.push('\n'),
                            't' => item.push('\t'),
                            other => item.push(other),
                        },
                        c if c == quote => {
                            closed = true;
                            break;
                        }
                        c => item.push(c),
                    }
                }

                if !closed {
                    return None;
                }
                items.push(item);
            }
            Some(_) => {
                let mut token = String::new();
                while let Some(c) = chars.next_if(|c| *c != ',') {
                    token.push(c);
                }

                let token = token.trim();
                if token.is_empty() || token.contains(['\'', '"', '[', ']']) {
                    return None;
                }
                if !matches!(token.to_ascii_lowercase().as_str(), "none" | "null" | "nan") {
                    items.push(token.to_string());
                }
            }
        }

        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        match chars.next() {
            None => break,
            Some(',') => continue,
            Some(_) => return None,
        }
    }

    Some(
        items
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect(),
    )
}

/// Flatten a list-valued cell into space separated tokens.
///
/// Cells that do not parse as a list literal are returned verbatim.
pub fn flatten_list(raw: &str) -> String {
    match parse_list(raw) {
        Some(items) => items.join(" "),
        None => raw.to_string(),
    }
}

/// Items of a list-valued cell, or its non-blank lines when it is plain text.
pub fn list_or_lines(raw: &str) -> Vec<String> {
    parse_list(raw).unwrap_or_else(|| {
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    })
}

pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Some(0.0);
    }

    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "nan" | "false" | "0" | "0.0" | "no" | "n" | "f" => Some(false),
        "true" | "1" | "1.0" | "yes" | "y" | "t" => Some(true),
        _ => None,
    }
}

pub(crate) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_number(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid number: {raw:?}")))
}

pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid flag: {raw:?}")))
}
