//! Whole-entry conversion tests (Journey markup → Day One Markdown)

use insta::assert_snapshot;
use journey_babel::{convert, Converter, NameEntry, NameTable, PhraseTable, Stage};

const KITCHENSINK: &str = concat!(
    "<p>Morning at the <strong>coffeeshop&nbsp;</strong>with <em>name one</em>.</p>",
    "<h3>Plans<\\/h3>",
    "<ol><li>Call <b>NOME ONE</b></li><li>Buy <del>milk</del> beans</li></ol>",
    "<ul class=\"task\"><li data-checked=\"true\">Pack</li><li>Leave</li></ul>",
    "<blockquote>\nStay curious.\nKeep going.\n</blockquote>",
    "<hr dir=\"ltr\">",
);

fn converter_with(canonical: &str, misspellings: &[&str]) -> Converter {
    let names = NameTable::new(vec![NameEntry::new(canonical, misspellings.iter().copied())])
        .expect("valid name table");
    Converter::new(names, PhraseTable::default())
}

#[test]
fn test_kitchensink() {
    let converter = converter_with("Name One", &["Nome One"]);
    assert_snapshot!(converter.convert(KITCHENSINK), @r"
    Morning at the **coffee shop** with *Name One*.
    ##### Plans
    1. Call **NAME ONE**
    2. Buy ~~milk~~ beans
    - [X] Pack
    - [ ] Leave
    > Stay curious.
    > Keep going.

    ---
    ");
}

#[test]
fn test_kitchensink_stages() {
    let converter = converter_with("Name One", &["Nome One"]);
    let after_lists = converter.convert_through(KITCHENSINK, Stage::Lists);
    assert!(after_lists.contains("\n1. Call **NOME ONE**\n2. Buy ~~milk~~ beans"));
    assert!(after_lists.contains("**coffeeshop**"));
    assert!(after_lists.contains("<blockquote>"));

    let after_names = converter.convert_through(KITCHENSINK, Stage::Names);
    assert!(after_names.contains("**coffee shop** with *Name One*"));
    assert!(after_names.contains("<hr dir=\"ltr\">"));
}

#[test]
fn test_exported_entry_with_escaped_closing_tags() {
    let converter = converter_with("Name One", &["Nome One"]);
    let html = "<p dir=\"auto\">Went to <b>Nome One<\\/b>'s coffeeShop.<\\/p>\n<ul>\n<li>one<\\/li>\n<li>two<\\/li>\n<\\/ul>";
    assert_eq!(
        converter.convert(html),
        "Went to **Name One**'s coffee Shop.\n\n\n- one\n\n- two\n"
    );
}

#[test]
fn test_ordered_list_numbering() {
    let out = convert("<ol><li>Alpha</li><li>Beta</li><li>Gamma</li></ol>");
    assert_eq!(out, "\n1. Alpha\n2. Beta\n3. Gamma");
}

#[test]
fn test_unordered_list() {
    let out = convert("<ul><li>X</li><li>Y</li></ul>");
    assert_eq!(out, "\n- X\n- Y");
}

#[test]
fn test_task_list() {
    let out = convert("<ul class=\"task\"><li data-checked=\"true\">Done</li><li>Todo</li></ul>");
    assert!(out.contains("[X] Done"));
    assert!(out.contains("[ ] Todo"));
}

#[test]
fn test_blockquote_prefixes_every_line() {
    let out = convert("<blockquote>Line1\nLine2</blockquote>");
    assert_eq!(out, "> Line1\n> Line2");
}

#[test]
fn test_empty_list_keeps_captured_whitespace() {
    assert_eq!(convert("<ol>\n</ol>"), "\n");
    assert_eq!(convert("<ul class=\"task\"> </ul>"), " ");
}

#[test]
fn test_name_normalization() {
    let converter = converter_with("Example Name", &["Exemple Name"]);
    assert_eq!(converter.convert("EXEMPLE NAME"), "EXAMPLE NAME");
    assert_eq!(converter.convert("exemple name"), "Example Name");
    assert_eq!(converter.convert("example name"), "Example Name");
}

#[test]
fn test_plain_text_passes_through() {
    let converter = converter_with("Example Name", &["Exemple Name"]);
    let text = "Met Example Name at the coffee shop.\nEXAMPLE NAME waved.";
    assert_eq!(converter.convert(text), text);
}

#[test]
fn test_underline_inside_list_item() {
    let html = "<ul><li><span style=\"text-decoration: underline\">u</span></li></ul>";
    assert_eq!(convert(html), "\n- *u*");
}

#[test]
fn test_links_pass_through() {
    let html = "<a href=\"https://example.com\">site</a>";
    assert_eq!(convert(html), html);
}

#[test]
fn test_headings_and_rules() {
    assert_eq!(
        convert("<h1>Trip</h1><h2>Day 1</h2>text<hr>"),
        "\n# Trip\n## Day 1text\n---"
    );
}

#[test]
fn test_malformed_markup_degrades_gracefully() {
    assert_eq!(convert("<ol><li>a</li>"), "<ol><li>a</li>");
    assert_eq!(convert("<blockquote>never closed"), "<blockquote>never closed");
    assert_eq!(convert("<strong>open"), "<strong>open");
    assert_eq!(convert("a < b && c > d"), "a < b && c > d");
}

#[test]
fn test_empty_input() {
    assert_eq!(convert(""), "");
}
