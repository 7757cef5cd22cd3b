//! Journey markup to Day One Markdown
//!
//!     Journey stores entry text in a small HTML dialect: a handful of inline tags, flat
//!     lists, task lists, blockquotes and horizontal rules. Day One imports Markdown. This
//!     crate converts one into the other.
//!
//!     This is a pure lib: no file, network or process access, no printing, no environment
//!     lookups. The same input always yields the same output. Loading entries and talking
//!     to Day One is the job of journey-cli.
//!
//! Architecture
//!
//!     Conversion is an ordered pipeline of text rewrites, each stage working over the full
//!     buffer produced by the previous one (see ./pipeline.rs):
//!
//!     1. inline    emphasis, strong, strikethrough, underline, headings, &nbsp;, tag removal
//!     2. lists     <ol>, <ul>, task lists
//!     3. phrases   fixed lexical corrections (coffeeshop -> coffee shop)
//!     4. names     table-driven spelling fixes for people and places
//!     5. quotes    <blockquote>, one `> ` per line
//!     6. rules     <hr>
//!
//!     The order matters. The quote stage expects lists to be gone already, and the name
//!     table must not see tag text.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── scan.rs                 # Marker matchers and the one-block-at-a-time splice loop
//!     ├── inline.rs
//!     ├── lists.rs
//!     ├── phrases.rs              # PhraseTable
//!     ├── names.rs                # NameTable
//!     ├── quotes.rs
//!     ├── rules.rs
//!     ├── pipeline.rs             # Stage and Converter
//!     └── lib.rs
//!
//! Core Algorithms
//!
//!     There is no HTML parser here. Journey's dialect is small and flat, and a real parser
//!     would normalize away the exact whitespace the output depends on. Each construct has a
//!     small hand-written matcher in ./scan.rs instead, so there is no backtracking and every
//!     loop provably terminates.
//!
//!     Lists and quotes are a non-repeating wrapper around an unknown number of items, and
//!     ordered items need their index. They are rewritten one block at a time: find the first
//!     block, render it, splice the result into the buffer, search again. Each splice removes
//!     the block's own markers, which bounds the loop on any input.
//!
//! Unsupported
//!
//!     Tables and arbitrary nested markup are left as they are. Links are passed through;
//!     Day One renders `<a href>` itself.
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     └── conversion
//!         ├── entries.rs          # Whole entries through the pipeline
//!         └── properties.rs       # proptest: totality, idempotence
//!
pub mod error;
pub mod inline;
pub mod lists;
pub mod names;
pub mod phrases;
pub mod pipeline;
pub mod quotes;
pub mod rules;

pub(crate) mod scan;

pub use error::{TableError, UnknownStage};
pub use inline::rewrite_inline;
pub use lists::rewrite_lists;
pub use names::{rewrite_names, NameEntry, NameTable};
pub use phrases::{rewrite_phrases, CompoundSplit, PhraseTable};
pub use pipeline::{Converter, Stage};
pub use quotes::rewrite_quotes;
pub use rules::rewrite_rules;

/// Converts one entry's markup with the default tables: no name corrections and the
/// built-in phrase corrections.
///
/// Never fails. Markup that is not recognised, or not terminated, is left in place.
pub fn convert(markup: &str) -> String {
    Converter::default().convert(markup)
}
