/// Escapes text for safe interpolation into HTML element content and
/// double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes and turns newlines into `<br>`.
pub fn escape_multiline(input: &str) -> String {
    escape_html(input).replace('\n', "<br>")
}
