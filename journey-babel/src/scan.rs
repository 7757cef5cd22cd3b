//! Hand-written matchers for the markers of the Journey dialect.
//!
//! Every matcher takes the text starting at a candidate `<` and reports how many
//! bytes the marker spans. Markers are ASCII, so every offset computed here lands
//! on a char boundary of the scanned text.
//!
//! Closing markers are matched leniently: Journey exports its HTML inside JSON and
//! the closing slash frequently survives as `<\/em>`, so any run of backslashes
//! followed by one or more slashes is accepted.

use std::ops::Range;

/// How far a closing marker may be searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reach {
    /// Give up at the first newline (inline spans).
    Line,
    /// Search across newlines (lists, quotes).
    Block,
}

/// A located block: opening tag through its closing marker.
///
/// Offsets are byte offsets into the buffer the block was found in. The buffer is
/// rewritten after every splice, so a `BlockMatch` is only valid until then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BlockMatch {
    pub start: usize,
    pub end: usize,
    /// Attribute text of the opening tag (between the tag name and `>`).
    pub attrs: Range<usize>,
    /// Contents between the opening tag and the closing marker.
    pub inner: Range<usize>,
}

impl BlockMatch {
    pub fn attrs_text<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[self.attrs.clone()]
    }

    pub fn inner_text<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[self.inner.clone()]
    }
}

/// Length of the bare tag `<name>` at the start of `s`.
pub(crate) fn exact_tag_len(s: &str, name: &str) -> Option<usize> {
    let tail = s.strip_prefix('<')?.strip_prefix(name)?.strip_prefix('>')?;
    Some(s.len() - tail.len())
}

/// Length of a closing marker for `name` at the start of `s`.
pub(crate) fn closing_tag_len(s: &str, name: &str) -> Option<usize> {
    let rest = s.strip_prefix('<')?.trim_start_matches('\\');
    let unslashed = rest.trim_start_matches('/');
    if unslashed.len() == rest.len() {
        return None;
    }
    let tail = unslashed.strip_prefix(name)?.strip_prefix('>')?;
    Some(s.len() - tail.len())
}

/// Opening tag `<name>` or `<name attrs>` at the start of `s`.
///
/// Returns the tag length and the raw attribute text. The tag ends at the first
/// `>`; a `<` before that means the tag was never closed and nothing matches.
pub(crate) fn open_tag<'a>(s: &'a str, name: &str) -> Option<(usize, &'a str)> {
    let rest = s.strip_prefix('<')?.strip_prefix(name)?;
    if let Some(tail) = rest.strip_prefix('>') {
        return Some((s.len() - tail.len(), ""));
    }
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let close = rest.find(['<', '>'])?;
    if rest.as_bytes()[close] == b'<' {
        return None;
    }
    Some((s.len() - rest.len() + close + 1, &rest[..close]))
}

/// Either an opening tag (with or without attributes) or a closing marker.
pub(crate) fn open_or_close_len(s: &str, name: &str) -> Option<usize> {
    open_tag(s, name)
        .map(|(len, _)| len)
        .or_else(|| closing_tag_len(s, name))
}

/// Either the bare tag `<name>` or a closing marker.
pub(crate) fn bare_or_close_len(s: &str, name: &str) -> Option<usize> {
    exact_tag_len(s, name).or_else(|| closing_tag_len(s, name))
}

/// Position and length of the first closing marker for any of `names` in `s`.
pub(crate) fn find_closing(s: &str, names: &[&str], reach: Reach) -> Option<(usize, usize)> {
    let mut from = 0;
    while let Some(offset) = s[from..].find(['<', '\n']) {
        let at = from + offset;
        if s.as_bytes()[at] == b'\n' {
            if reach == Reach::Line {
                return None;
            }
        } else if let Some(len) = names.iter().find_map(|name| closing_tag_len(&s[at..], name)) {
            return Some((at, len));
        }
        from = at + 1;
    }
    None
}

/// First `name` block in `text`.
///
/// The closing marker is the first one after the opening tag (non-greedy). If the
/// first opening tag has no closing marker after it, no later one can either.
pub(crate) fn find_block(text: &str, name: &str) -> Option<BlockMatch> {
    let mut from = 0;
    while let Some(offset) = text[from..].find('<') {
        let start = from + offset;
        if let Some((open_len, attrs)) = open_tag(&text[start..], name) {
            let attrs_start = start + 1 + name.len();
            let inner_start = start + open_len;
            let (close_at, close_len) =
                find_closing(&text[inner_start..], &[name], Reach::Block)?;
            let inner_end = inner_start + close_at;
            return Some(BlockMatch {
                start,
                end: inner_end + close_len,
                attrs: attrs_start..attrs_start + attrs.len(),
                inner: inner_start..inner_end,
            });
        }
        from = start + 1;
    }
    None
}

/// Replaces `name` blocks one at a time until none remain.
///
/// `render` receives the current buffer and the located block and returns the
/// text that replaces the whole block. Offsets shift after every splice, so the
/// buffer is searched again from the start each time.
pub(crate) fn rewrite_blocks<F>(text: &str, name: &str, mut render: F) -> String
where
    F: FnMut(&str, &BlockMatch) -> String,
{
    let mut buffer = text.to_string();
    // A rendered block never contains more `<` than its inner text, so every splice
    // removes at least the two markers of the block itself.
    let mut budget = buffer.matches('<').count() / 2 + 1;
    while let Some(block) = find_block(&buffer, name) {
        if budget == 0 {
            log::warn!("giving up on <{name}> blocks after exhausting the splice budget");
            break;
        }
        budget -= 1;
        let replacement = render(&buffer, &block);
        buffer.replace_range(block.start..block.end, &replacement);
    }
    buffer
}

/// Rewrites every marker recognised by `matcher` in a single left-to-right pass.
///
/// `matcher` is handed the text at each `<` and returns the marker length together
/// with its replacement. Scanning resumes after the replaced marker.
pub(crate) fn rewrite_markers<F>(text: &str, mut matcher: F) -> String
where
    F: FnMut(&str) -> Option<(usize, &'static str)>,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(lt) = rest.find('<') {
        let (before, candidate) = rest.split_at(lt);
        out.push_str(before);
        match matcher(candidate) {
            Some((len, replacement)) => {
                out.push_str(replacement);
                rest = &candidate[len..];
            }
            None => {
                out.push('<');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Deletes every marker recognised by `matcher`.
pub(crate) fn strip_markers<F>(text: &str, matcher: F) -> String
where
    F: Fn(&str) -> Option<usize>,
{
    rewrite_markers(text, |s| matcher(s).map(|len| (len, "")))
}
