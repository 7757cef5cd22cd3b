//! Import pipeline behind the `journey2dayone` binary.
//!
//! Entries are loaded from a Journey export ([`entry`]), checked and converted
//! ([`validate`]), then handed to an [`dayone::EntrySink`]: either Day One's
//! command line program or a dry run that prints the commands.

pub mod dayone;
pub mod entry;
pub mod error;
pub mod import;
pub mod validate;

pub use error::{ImportError, Result};
