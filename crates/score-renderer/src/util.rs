//! Shared helpers for HTML output.

/// Escape text for use in HTML element content and attribute values.
///
/// # Examples
///
/// ```
/// use score_renderer::escape_html;
///
/// assert_eq!(escape_html("<T & 'U'>"), "&lt;T &amp; &#x27;U&#x27;&gt;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Join a base URL ending in `/` with a relative asset path.
pub(crate) fn asset_url(base_url: &str, asset: &str) -> String {
    format!("{base_url}{}", asset.trim_start_matches('/'))
}
