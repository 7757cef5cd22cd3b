//! Ordered, unordered and task lists.
//!
//! A list is one non-repeating wrapper around an unknown number of items, and
//! ordered items need their position in the list. Lists are therefore rewritten
//! one block at a time: find the first block, render its items, splice the result
//! into the buffer and search again.

use crate::scan::{self, Reach};

const TASK_CLASS: &str = "class=\"task\"";
const CHECKED: &str = "data-checked=\"true\"";

/// Rewrites every `<ol>` block, then every `<ul>` block.
pub fn rewrite_lists(text: &str) -> String {
    let text = scan::rewrite_blocks(text, "ol", |buffer, block| {
        render_ordered(block.inner_text(buffer))
    });
    scan::rewrite_blocks(&text, "ul", |buffer, block| {
        render_unordered(block.attrs_text(buffer), block.inner_text(buffer))
    })
}

/// One `<li>` of an ordered list.
#[derive(Debug, PartialEq)]
struct Item<'a> {
    content: &'a str,
    /// Whitespace following the closing marker, kept after the item.
    trailing: &'a str,
}

fn render_ordered(inner: &str) -> String {
    let mut out = leading_whitespace(inner).to_string();
    for (index, item) in ordered_items(inner).iter().enumerate() {
        out.push_str(&format!("\n{}. {}{}", index + 1, item.content, item.trailing));
    }
    out
}

/// Items in order of appearance. Anything between items that is not whitespace
/// is dropped along with the list markers.
fn ordered_items(inner: &str) -> Vec<Item<'_>> {
    let mut items = Vec::new();
    let mut from = 0;
    while let Some(offset) = inner[from..].find('<') {
        let at = from + offset;
        if let Some((open_len, _)) = scan::open_tag(&inner[at..], "li") {
            let body_start = at + open_len;
            if let Some((close_at, close_len)) =
                scan::find_closing(&inner[body_start..], &["li"], Reach::Line)
            {
                let after = body_start + close_at + close_len;
                let trailing = leading_whitespace(&inner[after..]);
                items.push(Item {
                    content: &inner[body_start..body_start + close_at],
                    trailing,
                });
                from = after + trailing.len();
                continue;
            }
        }
        from = at + 1;
    }
    items
}

fn render_unordered(attrs: &str, inner: &str) -> String {
    let task = attrs.contains(TASK_CLASS);
    scan::rewrite_markers(inner, |s| {
        if let Some((len, item_attrs)) = scan::open_tag(s, "li") {
            let marker = match (task, item_attrs.contains(CHECKED)) {
                (false, _) => "\n- ",
                (true, true) => "\n- [X] ",
                (true, false) => "\n- [ ] ",
            };
            return Some((len, marker));
        }
        scan::closing_tag_len(s, "li").map(|len| (len, ""))
    })
}

fn leading_whitespace(s: &str) -> &str {
    &s[..s.len() - s.trim_start().len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_list_numbering() {
        let html = "<ol><li>Alpha</li><li>Beta</li><li>Gamma</li></ol>";
        assert_eq!(rewrite_lists(html), "\n1. Alpha\n2. Beta\n3. Gamma");
    }

    #[test]
    fn test_ordered_list_keeps_whitespace() {
        let html = "<ol>\n<li>Alpha</li>\n<li>Beta<\\/li>\n</ol>";
        assert_eq!(rewrite_lists(html), "\n\n1. Alpha\n\n2. Beta\n");
    }

    #[test]
    fn test_each_ordered_list_restarts_numbering() {
        let html = "<ol><li>a</li><li>b</li></ol> and <ol><li>c</li></ol>";
        assert_eq!(rewrite_lists(html), "\n1. a\n2. b and \n1. c");
    }

    #[test]
    fn test_unordered_list() {
        let html = "<ul><li>X</li><li>Y</li></ul>";
        assert_eq!(rewrite_lists(html), "\n- X\n- Y");
    }

    #[test]
    fn test_task_list() {
        let html = "<ul class=\"task\"><li data-checked=\"true\">Done</li><li>Todo</li></ul>";
        assert_eq!(rewrite_lists(html), "\n- [X] Done\n- [ ] Todo");
    }

    #[test]
    fn test_task_list_unchecked_attribute() {
        let html = "<ul class=\"task\"><li data-checked=\"false\">Later</li></ul>";
        assert_eq!(rewrite_lists(html), "\n- [ ] Later");
    }

    #[test]
    fn test_empty_lists_keep_leading_whitespace() {
        assert_eq!(rewrite_lists("a<ol>\n</ol>b"), "a\nb");
        assert_eq!(rewrite_lists("a<ul>  </ul>b"), "a  b");
    }

    #[test]
    fn test_unterminated_list_is_left() {
        let html = "<ol><li>a</li>";
        assert_eq!(rewrite_lists(html), html);
    }

    #[test]
    fn test_ordered_items_skip_unclosed_item() {
        let items = ordered_items("<li>open\n<li>b</li> ");
        assert_eq!(
            items,
            vec![Item {
                content: "b",
                trailing: " "
            }]
        );
    }
}
