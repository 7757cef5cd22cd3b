//! Fixed lexical corrections that do not depend on markup.

use crate::error::TableError;
use serde::{Deserialize, Serialize};

/// A compound word that should be written as two words.
///
/// The first character of each half matches in either case; the remaining
/// characters must match exactly. The halves keep the casing they were written
/// with, so `CoffeeShop` becomes `Coffee Shop` and `coffeeshop` becomes
/// `coffee shop`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundSplit {
    pub head: String,
    pub tail: String,
}

impl CompoundSplit {
    pub fn new(head: impl Into<String>, tail: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            tail: tail.into(),
        }
    }
}

/// Ordered set of phrase corrections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseTable {
    splits: Vec<CompoundSplit>,
}

impl PhraseTable {
    /// Builds a table, rejecting splits with an empty half.
    pub fn new(splits: Vec<CompoundSplit>) -> Result<Self, TableError> {
        if let Some(index) = splits
            .iter()
            .position(|split| split.head.is_empty() || split.tail.is_empty())
        {
            return Err(TableError::EmptyPhraseHalf { index });
        }
        Ok(Self { splits })
    }

    /// A table without any corrections.
    pub fn empty() -> Self {
        Self { splits: Vec::new() }
    }

    pub fn splits(&self) -> &[CompoundSplit] {
        &self.splits
    }
}

impl Default for PhraseTable {
    fn default() -> Self {
        Self {
            splits: vec![CompoundSplit::new("coffee", "shop")],
        }
    }
}

/// Applies every split of `table`, in order, each over the previous result.
pub fn rewrite_phrases(text: &str, table: &PhraseTable) -> String {
    table
        .splits
        .iter()
        .fold(text.to_string(), |text, split| split_compound(&text, split))
}

fn split_compound(text: &str, split: &CompoundSplit) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    for (at, _) in text.char_indices() {
        if at < copied {
            continue;
        }
        let Some(head_len) = match_half(&text[at..], &split.head) else {
            continue;
        };
        let Some(tail_len) = match_half(&text[at + head_len..], &split.tail) else {
            continue;
        };
        out.push_str(&text[copied..at]);
        out.push_str(&text[at..at + head_len]);
        out.push(' ');
        out.push_str(&text[at + head_len..at + head_len + tail_len]);
        copied = at + head_len + tail_len;
    }
    out.push_str(&text[copied..]);
    out
}

/// Byte length of `half` at the start of `s`, first character case-insensitive.
fn match_half(s: &str, half: &str) -> Option<usize> {
    let mut expected = half.chars();
    let first = expected.next()?;
    let mut actual = s.chars();
    let found = actual.next()?;
    if !found.to_lowercase().eq(first.to_lowercase()) {
        return None;
    }
    let rest = actual.as_str().strip_prefix(expected.as_str())?;
    Some(s.len() - rest.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_splits_coffee_shop() {
        let table = PhraseTable::default();
        assert_eq!(rewrite_phrases("the coffeeshop", &table), "the coffee shop");
        assert_eq!(rewrite_phrases("CoffeeShop", &table), "Coffee Shop");
        assert_eq!(rewrite_phrases("coffeeShop", &table), "coffee Shop");
        assert_eq!(rewrite_phrases("Coffeeshops", &table), "Coffee shops");
    }

    #[test]
    fn test_only_first_letters_are_case_insensitive() {
        let table = PhraseTable::default();
        assert_eq!(rewrite_phrases("COFFEESHOP", &table), "COFFEESHOP");
        assert_eq!(rewrite_phrases("coffee shop", &table), "coffee shop");
    }

    #[test]
    fn test_repeated_occurrences() {
        let table = PhraseTable::default();
        assert_eq!(
            rewrite_phrases("coffeeshop, Coffeeshop", &table),
            "coffee shop, Coffee shop"
        );
    }

    #[test]
    fn test_non_ascii_text_around_matches() {
        let table = PhraseTable::new(vec![CompoundSplit::new("éclair", "shop")]).unwrap();
        assert_eq!(rewrite_phrases("ÉclairShop ☕", &table), "Éclair Shop ☕");
    }

    #[test]
    fn test_rejects_empty_half() {
        let result = PhraseTable::new(vec![CompoundSplit::new("coffee", "")]);
        assert_eq!(result, Err(TableError::EmptyPhraseHalf { index: 0 }));
    }
}
