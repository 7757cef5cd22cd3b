//! Blockquotes.
//!
//! Every line of a quote gets its own `> ` prefix, so like lists the blocks are
//! rewritten one at a time.

use crate::scan;

/// Replaces every `<blockquote>` block with its lines prefixed by `> `.
pub fn rewrite_quotes(text: &str) -> String {
    scan::rewrite_blocks(text, "blockquote", |buffer, block| {
        quote_lines(block.inner_text(buffer))
    })
}

/// Prefixes each line of `inner`. A blank segment before the first newline or
/// after the last one is the line break around the quote, not a quoted line,
/// and stays unprefixed.
fn quote_lines(inner: &str) -> String {
    let lines: Vec<&str> = inner.split('\n').collect();
    let last = lines.len() - 1;
    let mut out = String::with_capacity(inner.len() + 2 * lines.len());
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let at_edge = index == 0 || index == last;
        if !(at_edge && line.trim().is_empty()) {
            out.push_str("> ");
        }
        out.push_str(line);
    }
    out
}
