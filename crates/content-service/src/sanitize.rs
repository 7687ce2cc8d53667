//! HTML sanitization for caller-supplied text

/// Render markup inert for HTML contexts.
///
/// Every character that can open a tag, an attribute value or an entity is
/// escaped, so tags and event handlers show up as literal text while the
/// plain-text content survives unchanged when rendered.
///
/// The stored text is entity-encoded: `It's "fine" & done` is kept as
/// `It&#x27;s &quot;fine&quot; &amp; done`, and only reads as the original
/// once rendered as HTML.
pub fn sanitize_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
