//! Property tests: conversion is total and leaves markup-free text alone

use journey_babel::{convert, rewrite_inline, rewrite_lists, Converter, NameTable, PhraseTable};
use proptest::prelude::*;

/// Fragments of Journey markup, well-formed or not, glued together in any order.
fn markup_soup() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("<ol>".to_string()),
        Just("</ol>".to_string()),
        Just("<ul class=\"task\">".to_string()),
        Just("</ul>".to_string()),
        Just("<li data-checked=\"true\">".to_string()),
        Just("<li>".to_string()),
        Just("<\\/li>".to_string()),
        Just("<blockquote>".to_string()),
        Just("</blockquote>".to_string()),
        Just("<b>".to_string()),
        Just("</strong>".to_string()),
        Just("<span style=\"text-decoration: underline\">".to_string()),
        Just("</span>".to_string()),
        Just("<h3>".to_string()),
        Just("<hr/>".to_string()),
        Just("&nbsp;".to_string()),
        "[a-z <>/\\\\\n]{0,6}",
    ];
    prop::collection::vec(fragment, 0..40).prop_map(|parts| parts.concat())
}

/// Well-formed inline spans and paragraphs with plain words between them.
fn inline_runs() -> impl Strategy<Value = String> {
    let word = "[a-z]{1,6}(&nbsp;)?";
    let run = prop_oneof![
        word.prop_map(|w| format!("<b>{w}</b>")),
        word.prop_map(|w| format!("<em>{w}<\\/em>")),
        word.prop_map(|w| format!("<del>{w}</del>")),
        word.prop_map(|w| format!("<p dir=\"auto\">{w}</p>")),
        word.prop_map(|w| format!("<h2>{w}</h2>")),
        "[a-z ]{0,8}",
    ];
    prop::collection::vec(run, 0..12).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn convert_is_total_on_arbitrary_text(text in ".*") {
        let _ = convert(&text);
    }

    #[test]
    fn convert_is_total_on_markup_soup(text in markup_soup()) {
        let _ = convert(&text);
    }

    #[test]
    fn markup_free_text_is_unchanged(text in "[A-Za-z0-9 .,!?'\n]*") {
        let converter = Converter::new(NameTable::default(), PhraseTable::empty());
        prop_assert_eq!(converter.convert(&text), text);
    }

    #[test]
    fn inline_is_idempotent_on_well_formed_spans(text in inline_runs()) {
        let once = rewrite_inline(&text);
        prop_assert!(!once.contains('<'), "tags left in {:?}", once);
        prop_assert_eq!(rewrite_inline(&once), once);
    }

    #[test]
    fn ordered_items_are_numbered_in_order(items in prop::collection::vec("[a-z]{1,8}", 0..20)) {
        let html = format!(
            "<ol>{}</ol>",
            items.iter().map(|item| format!("<li>{item}</li>")).collect::<String>()
        );
        let expected: String = items
            .iter()
            .enumerate()
            .map(|(index, item)| format!("\n{}. {item}", index + 1))
            .collect();
        prop_assert_eq!(rewrite_lists(&html), expected);
    }
}
