//! Glossary-to-dictionary conversion
//!
//! 1. Load one JSON glossary per book
//! 2. Rewrite markdown links/emphasis into dictionary markup
//! 3. Resolve backlinks and merge occurrences across books
//! 4. Write StarDict output plus a stylesheet

pub mod alt_words;
pub mod backlinks;
pub mod config;
mod error;
pub mod links;
pub mod merge;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod rewrite;
pub mod syntax;

pub use alt_words::alternate_words;
pub use config::{BookSpec, Config};
pub use error::{Error, Result};
pub use links::{LinkCollision, LinkTable};
pub use merge::{Accumulator, Entry};
pub use output::{write_dictionary, OutputSpec};
pub use record::{Book, BookRecord};
pub use syntax::Syntax;
