//! Small string helpers shared by the parser and the renderer

/// Count the leading spaces and tabs of a line
pub fn count_leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|&ch| ch == ' ' || ch == '\t').count()
}

/// Remove at most `max` leading spaces or tabs from a line
pub fn strip_leading_whitespace(line: &str, max: usize) -> &str {
    let count = count_leading_whitespace(line).min(max);
    // Spaces and tabs are single-byte, so the char count is a byte offset
    &line[count..]
}

/// Join strings with a separator
pub fn join<S: AsRef<str>>(parts: &[S], separator: &str) -> String {
    let mut result = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            result.push_str(separator);
        }
        result.push_str(part.as_ref());
    }
    result
}

/// Mask `&`, `<` and `>` for use in HTML text
pub fn escape_html(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Mask text for use inside a double-quoted HTML attribute
pub fn escape_attribute(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}

/// Build the anchor name for a heading: alphanumerics are kept, everything
/// else becomes `-`.
pub fn heading_anchor(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}

/// Detect a man page reference of the form `name(N)`.
///
/// Returns the page name and the single-digit section. Anything containing
/// whitespace is rejected, as are multi-character sections like `3pm`.
pub fn man_page_reference(target: &str) -> Option<(&str, char)> {
    if target.chars().any(char::is_whitespace) {
        return None;
    }

    let rest = target.strip_suffix(')')?;
    let section = rest.chars().last()?;
    if !section.is_ascii_digit() {
        return None;
    }

    let name = rest[..rest.len() - 1].strip_suffix('(')?;
    if name.is_empty() {
        return None;
    }

    Some((name, section))
}

/// Split a `document/section` link target. Both parts are trimmed, the
/// section loses surrounding double quotes, and either may be empty.
pub fn split_section(target: &str) -> (&str, &str) {
    let (document, section) = target.split_once('/').unwrap_or((target, ""));
    let section = section.trim();
    let section = section
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(section);
    (document.trim(), section)
}
