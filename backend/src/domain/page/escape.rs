//! HTML text escaping for values spliced into markup.

/// Escape `&`, `<`, `>`, `"` and `'` as HTML entities.
///
/// The output is safe inside element text and inside double- or
/// single-quoted attribute values.
///
/// # Examples
/// ```
/// use orbital_backend::domain::page::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"),
///     "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
