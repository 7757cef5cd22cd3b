//! Error types for table construction and stage lookup

use thiserror::Error;

/// A correction table that would make a rewrite ill-defined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Name entry without a canonical spelling
    #[error("name entry #{index} has an empty canonical spelling")]
    EmptyCanonical { index: usize },
    /// Empty misspelling; it would match between every pair of characters
    #[error("misspelling #{position} of '{canonical}' is empty")]
    EmptyMisspelling { canonical: String, position: usize },
    /// Compound split with an empty half
    #[error("phrase split #{index} has an empty head or tail")]
    EmptyPhraseHalf { index: usize },
}

/// Stage name that does not match any pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stage '{0}'")]
pub struct UnknownStage(pub String);
