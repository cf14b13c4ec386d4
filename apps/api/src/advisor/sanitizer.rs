//! Response sanitizer: strips code-fence wrapping from raw model output.
//!
//! Purely textual: nothing here looks at JSON structure. Stripping repeats until the
//! text stops changing, which makes `clean` idempotent even for nested or doubled fences.

const FENCE: &str = "```";

pub fn clean(raw: &str) -> &str {
    let mut text = raw.trim();
    loop {
        let next = strip_once(text);
        if next.len() == text.len() {
            return text;
        }
        text = next;
    }
}

/// Removes one leading fence (with its optional language tag) and one trailing fence.
fn strip_once(text: &str) -> &str {
    let mut text = text;

    if let Some(after_open) = text.strip_prefix(FENCE) {
        text = strip_language_tag(after_open);
    }
    if let Some(before_close) = text.strip_suffix(FENCE) {
        text = before_close;
    }

    text.trim()
}

/// Drops a language tag such as `json` directly after an opening fence. Any tag counts
/// when whitespace (usually the newline) follows it. A `json` tag glued to the payload
/// (`json{` or `json[`) also counts. Otherwise the text after the fence is payload.
fn strip_language_tag(after_open: &str) -> &str {
    let tag_end = after_open
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')))
        .unwrap_or(after_open.len());
    let (tag, rest) = after_open.split_at(tag_end);

    let glued_json = tag.eq_ignore_ascii_case("json") && rest.starts_with(['{', '[']);
    if rest.starts_with(char::is_whitespace) || glued_json {
        rest
    } else {
        after_open
    }
}
