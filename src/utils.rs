use unicode_width::UnicodeWidthChar;

use url::{ParseError, Url};

/// Safely truncate a string, ensuring it is not truncated in the middle of multi-byte characters
///
/// This function will:
/// 1. Correctly handle Unicode characters (including Chinese, emoji, etc.)
/// 2. Add ellipsis when maximum length is reached
/// 3. Ensure the output string's display width does not exceed the specified length
pub fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthStr;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(1);

        if current_width + char_width + 3 > max_width {
            break;
        }

        result.push(c);
        current_width += char_width;
    }

    result.push_str("...");
    result
}

/// Hostname of `url` without a leading `www.`
pub fn display_host(url: &str) -> Result<String, ParseError> {
    let parsed_url = Url::parse(url)?;
    let host = parsed_url.host_str().ok_or(ParseError::EmptyHost)?;
    Ok(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Resolve a possibly-relative reference against the page URL
pub fn absolutize(base: &Url, reference: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() || reference.starts_with("data:") {
        return None;
    }
    base.join(reference).ok().map(|u| u.to_string())
}

/// Collapse runs of whitespace into single spaces
pub fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove a surrounding markdown code fence (```json ... ```), if any
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Extract the outermost `{...}` block from LLM output
pub fn extract_json_from_text(text: &str) -> Option<&str> {
    let text = strip_code_fences(text);
    let start = text.find('{')?;
    let end = text.rfind('}')?;

    if start <= end {
        let potential_json = &text[start..=end];
        if potential_json.contains('"') || potential_json.contains(':') {
            return Some(potential_json);
        }
    }

    None
}
