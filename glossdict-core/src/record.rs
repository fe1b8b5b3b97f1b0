use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One glossary term as it appears in one book's JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookRecord {
    pub id: String,
    pub name: String,
    pub chapter: String,
    /// Description with `[label](#id)` links and `_emphasis_`
    pub info: String,
}

#[derive(Debug, Clone)]
pub struct Book {
    pub number: String,
    pub title: String,
    pub records: Vec<BookRecord>,
}

impl Book {
    pub fn new(number: impl Into<String>, title: impl Into<String>, records: Vec<BookRecord>) -> Self {
        Book {
            number: number.into(),
            title: title.into(),
            records,
        }
    }

    pub fn load(path: &Path, number: &str, title: &str) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let records: Vec<BookRecord> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::Json {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("loaded {} records from {}", records.len(), path.display());
        Ok(Book::new(number, title, records))
    }
}
