/// Drop a leading `<think>...</think>` reasoning trace, if any.
pub fn strip_think(text: &str) -> &str {
    match text.split_once("</think>") {
        Some((_, answer)) => answer.trim(),
        None => text.trim(),
    }
}

/// First balanced `{...}` block of a model reply, ignoring code fences and
/// braces inside string literals.
pub fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}
