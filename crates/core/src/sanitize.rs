//! Markup sanitizing for user-supplied text.
//!
//! Rich-text fields (descriptions, article bodies) keep a safe subset of HTML;
//! single-line fields (titles, names) keep none.

/// Strip unsafe markup (scripts, event handlers, `javascript:` URLs) while
/// keeping basic formatting tags.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

/// Remove every tag, keeping only the text content.
pub fn strip_html(input: &str) -> String {
    ammonia::Builder::empty().clean(input).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_html_drops_scripts_keeps_formatting() {
        let cleaned = clean_html("<p>Hello <b>world</b><script>alert(1)</script></p>");
        assert_eq!(cleaned, "<p>Hello <b>world</b></p>");
    }

    #[test]
    fn clean_html_drops_event_handlers() {
        let cleaned = clean_html(r#"<a href="https://example.org" onclick="steal()">x</a>"#);
        assert!(!cleaned.contains("onclick"));
        assert!(cleaned.contains("https://example.org"));
    }

    #[test]
    fn strip_html_keeps_text_only() {
        assert_eq!(strip_html("<i>Juara</i> 1 Olimpiade"), "Juara 1 Olimpiade");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_html("Lomba Cerdas Cermat"), "Lomba Cerdas Cermat");
        assert_eq!(clean_html("Lomba Cerdas Cermat"), "Lomba Cerdas Cermat");
    }
}
