//! Minimal glossary serialization library.
//!
//! Entries are built from a list of words (the first is the headword, the rest
//! are alternate lookup forms) and a definition body, metadata is attached as
//! key/value pairs, and the whole glossary is written in a named format.

pub mod dictzip;
mod error;
mod glossary;
pub mod stardict;
mod tabfile;

pub use error::{Error, Result};
pub use glossary::{with_suffix, DefinitionFormat, Entry, Format, Glossary, WriteOptions};
