//! Horizontal rules.

use crate::scan;

/// `<hr>`, `<hr attrs>` and `<hr/>` become a Markdown thematic break on its own line.
pub fn rewrite_rules(text: &str) -> String {
    scan::rewrite_markers(text, |s| {
        scan::open_tag(s, "hr")
            .map(|(len, _)| len)
            .or_else(|| s.starts_with("<hr/>").then_some(5))
            .map(|len| (len, "\n---"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules() {
        assert_eq!(rewrite_rules("a<hr>b"), "a\n---b");
        assert_eq!(rewrite_rules("a<hr dir=\"ltr\">b"), "a\n---b");
        assert_eq!(rewrite_rules("a<hr/>b"), "a\n---b");
        assert_eq!(rewrite_rules("<html>"), "<html>");
    }
}
