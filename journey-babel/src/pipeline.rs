//! The ordered conversion pipeline
//!
//! Stages run strictly in order: later stages assume earlier ones already removed
//! competing markup. The quote stage expects list markup to be gone, and the name
//! table must never see un-rewritten tag text.

use crate::error::UnknownStage;
use crate::inline::rewrite_inline;
use crate::lists::rewrite_lists;
use crate::names::{rewrite_names, NameTable};
use crate::phrases::{rewrite_phrases, PhraseTable};
use crate::quotes::rewrite_quotes;
use crate::rules::rewrite_rules;
use std::fmt;
use std::str::FromStr;

/// One step of the conversion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Inline,
    Lists,
    Phrases,
    Names,
    Quotes,
    Rules,
}

impl Stage {
    /// All stages, in execution order.
    pub const ALL: [Stage; 6] = [
        Stage::Inline,
        Stage::Lists,
        Stage::Phrases,
        Stage::Names,
        Stage::Quotes,
        Stage::Rules,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Inline => "inline",
            Stage::Lists => "lists",
            Stage::Phrases => "phrases",
            Stage::Names => "names",
            Stage::Quotes => "quotes",
            Stage::Rules => "rules",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Stage::Inline => "Emphasis, strong, strikethrough, underline, headings, entities",
            Stage::Lists => "Ordered, unordered and task lists",
            Stage::Phrases => "Fixed lexical corrections",
            Stage::Names => "Name spelling and capitalization",
            Stage::Quotes => "Blockquotes",
            Stage::Rules => "Horizontal rules",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name() == s)
            .ok_or_else(|| UnknownStage(s.to_string()))
    }
}

/// Converts Journey markup to Day One Markdown with a fixed set of correction tables.
///
/// A `Converter` holds no mutable state; one instance can convert any number of
/// entries, from any number of threads.
///
/// # Examples
///
/// ```ignore
/// let names = NameTable::new(vec![NameEntry::new("Ada Lovelace", ["Ada Lovelance"])])?;
/// let converter = Converter::new(names, PhraseTable::default());
/// assert_eq!(converter.convert("<b>ada lovelace</b>"), "**Ada Lovelace**");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Converter {
    names: NameTable,
    phrases: PhraseTable,
}

impl Converter {
    pub fn new(names: NameTable, phrases: PhraseTable) -> Self {
        Self { names, phrases }
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn phrases(&self) -> &PhraseTable {
        &self.phrases
    }

    /// Runs every stage.
    pub fn convert(&self, markup: &str) -> String {
        self.convert_through(markup, Stage::Rules)
    }

    /// Runs the stages up to and including `last`.
    pub fn convert_through(&self, markup: &str, last: Stage) -> String {
        let mut text = markup.to_string();
        for stage in Stage::ALL {
            text = self.apply(stage, &text);
            log::trace!("stage {stage}: {} bytes", text.len());
            if stage == last {
                break;
            }
        }
        text
    }

    /// Runs a single stage over `text`.
    pub fn apply(&self, stage: Stage, text: &str) -> String {
        match stage {
            Stage::Inline => rewrite_inline(text),
            Stage::Lists => rewrite_lists(text),
            Stage::Phrases => rewrite_phrases(text, &self.phrases),
            Stage::Names => rewrite_names(text, &self.names),
            Stage::Quotes => rewrite_quotes(text),
            Stage::Rules => rewrite_rules(text),
        }
    }
}
