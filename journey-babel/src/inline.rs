//! Inline spans, headings and leftover paragraph markup.
//!
//! Wrapping spans never cross a newline: the content ends at the first matching
//! closing marker on the same line, and an opening marker without one is left
//! alone. Journey sometimes puts `&nbsp;` right before a closing tag; the space
//! renders after the formatted run there, so the entities are moved behind the
//! closing Markdown delimiter instead of ending up inside it.

use crate::scan::{self, Reach};

const NBSP: &str = "&nbsp;";

/// A tag family rewritten to a symmetric Markdown delimiter.
struct Wrapping {
    /// Accepted tag spellings, for both the opening and the closing marker.
    tags: &'static [&'static str],
    delimiter: &'static str,
}

const EMPHASIS: Wrapping = Wrapping {
    tags: &["em", "i"],
    delimiter: "*",
};

const STRONG: Wrapping = Wrapping {
    tags: &["strong", "b"],
    delimiter: "**",
};

const STRIKETHROUGH: Wrapping = Wrapping {
    tags: &["del"],
    delimiter: "~~",
};

/// Heading tags and their Markdown prefixes. Level three maps to five hashes.
const HEADINGS: [(&str, &str); 3] = [("h1", "\n# "), ("h2", "\n## "), ("h3", "\n##### ")];

/// Rewrites inline formatting and removes the remaining paragraph, heading,
/// strikethrough and span tags.
pub fn rewrite_inline(text: &str) -> String {
    let mut text = wrap_tags(text, &EMPHASIS);
    text = wrap_tags(&text, &STRONG);
    text = wrap_tags(&text, &STRIKETHROUGH);
    text = wrap_underline(&text);
    for (tag, prefix) in HEADINGS {
        text = scan::rewrite_markers(&text, |s| scan::exact_tag_len(s, tag).map(|len| (len, prefix)));
    }
    text = text.replace(NBSP, " ");

    text = scan::strip_markers(&text, paragraph_with_attrs_len);
    text = scan::strip_markers(&text, |s| scan::bare_or_close_len(s, "p"));
    text = scan::strip_markers(&text, heading_tag_len);
    text = scan::strip_markers(&text, |s| scan::bare_or_close_len(s, "del"));
    scan::strip_markers(&text, |s| scan::open_or_close_len(s, "span"))
}

fn wrap_tags(text: &str, wrapping: &Wrapping) -> String {
    wrap_spans(
        text,
        |s| wrapping.tags.iter().find_map(|tag| scan::exact_tag_len(s, tag)),
        wrapping.tags,
        wrapping.delimiter,
        |_| true,
    )
}

/// Markdown has no underline; styled underline spans degrade to emphasis.
fn wrap_underline(text: &str) -> String {
    wrap_spans(
        text,
        |s| {
            scan::open_tag(s, "span")
                .filter(|(_, attrs)| is_underline_style(attrs))
                .map(|(len, _)| len)
        },
        &["span"],
        "*",
        |content| content.chars().any(|c| c.is_alphanumeric() || c == '_'),
    )
}

fn is_underline_style(attrs: &str) -> bool {
    attrs
        .find("style")
        .is_some_and(|at| attrs[at..].contains("underline"))
}

fn wrap_spans<O, A>(
    text: &str,
    open: O,
    closing_tags: &[&str],
    delimiter: &str,
    accepts: A,
) -> String
where
    O: Fn(&str) -> Option<usize>,
    A: Fn(&str) -> bool,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(lt) = rest.find('<') {
        let (before, candidate) = rest.split_at(lt);
        out.push_str(before);
        if let Some(open_len) = open(candidate) {
            let body = &candidate[open_len..];
            if let Some((close_at, close_len)) = scan::find_closing(body, closing_tags, Reach::Line)
            {
                let content = &body[..close_at];
                if accepts(content) {
                    push_wrapped(&mut out, content, delimiter);
                    rest = &body[close_at + close_len..];
                    continue;
                }
            }
        }
        out.push('<');
        rest = &candidate[1..];
    }
    out.push_str(rest);
    out
}

/// Emits `delimiter content delimiter`, moving trailing `&nbsp;` entities behind
/// the closing delimiter.
fn push_wrapped(out: &mut String, content: &str, delimiter: &str) {
    let mut kept = content;
    while let Some(shorter) = kept.strip_suffix(NBSP) {
        kept = shorter;
    }
    out.push_str(delimiter);
    out.push_str(kept);
    out.push_str(delimiter);
    out.push_str(&content[kept.len()..]);
}

/// `<p …>` with at least one whitespace character after the tag name.
fn paragraph_with_attrs_len(s: &str) -> Option<usize> {
    scan::open_tag(s, "p")
        .filter(|(_, attrs)| !attrs.is_empty())
        .map(|(len, _)| len)
}

/// `<hN>` or a closing marker for it, for any run of digits N.
fn heading_tag_len(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('<')?;
    let unescaped = rest.trim_start_matches('\\');
    let name = unescaped.trim_start_matches('/');
    if name.len() == unescaped.len() && unescaped.len() != rest.len() {
        return None;
    }
    let digits = name.strip_prefix('h')?;
    let level_len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if level_len == 0 {
        return None;
    }
    let tail = digits[level_len..].strip_prefix('>')?;
    Some(s.len() - tail.len())
}
