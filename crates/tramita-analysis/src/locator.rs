//! Brace-balanced location of a JSON object inside arbitrary text

/// Locate the first syntactically complete JSON object embedded in `text`.
///
/// Models routinely prepend or append explanatory prose around the object
/// they were asked for, so a plain `from_str` on the whole reply is
/// useless. Scanning starts at the first `{` and tracks brace depth
/// together with string state: braces and quotes inside string literals
/// must never affect depth, and `\"` must not close a string.
///
/// Returns the span from the first `{` through its matching `}`, or
/// `None` when no `{` exists or the object is truncated.
pub(crate) fn locate_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + idx + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}
