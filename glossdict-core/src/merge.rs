//! Accumulating entries across books.
//!
//! Each ingested book gets the next recency number. A name's occurrences are
//! kept newest first, and a backlink is only listed at the newest occurrence
//! that found it, so a cumulative dictionary does not repeat the same
//! reference under every book.

use crate::backlinks::BacklinkIndex;
use crate::error::Result;
use crate::links::{LinkCollision, LinkTable};
use crate::record::Book;
use crate::rewrite::convert_definition;
use crate::syntax::Syntax;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// One book's rendering of a glossary term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    book: String,
    chapter: String,
    definition: String,
    backlinks: BTreeSet<String>,
    recency: usize,
}

impl Entry {
    pub fn new(
        book: impl Into<String>,
        chapter: impl Into<String>,
        definition: impl Into<String>,
        backlinks: BTreeSet<String>,
        recency: usize,
    ) -> Self {
        Entry {
            book: book.into(),
            chapter: chapter.into(),
            definition: definition.into(),
            backlinks,
            recency,
        }
    }

    pub fn book(&self) -> &str {
        &self.book
    }

    pub fn chapter(&self) -> &str {
        &self.chapter
    }

    /// "Book title, chapter"
    pub fn origin(&self) -> String {
        format!("{}, {}", self.book, self.chapter)
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn backlinks(&self) -> &BTreeSet<String> {
        &self.backlinks
    }

    pub fn recency(&self) -> usize {
        self.recency
    }
}

#[derive(Debug, Default)]
pub struct Accumulator {
    entries: BTreeMap<String, Vec<Entry>>,
    links: LinkTable,
    collisions: Vec<LinkCollision>,
    books: Vec<String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest_file(&mut self, syntax: &Syntax, path: &Path, number: &str, title: &str) -> Result<()> {
        let book = Book::load(path, number, title)?;
        self.ingest(syntax, &book);
        Ok(())
    }

    /// Merge a book into the accumulated entries. Returns link identifiers
    /// whose target name this book changed.
    pub fn ingest(&mut self, syntax: &Syntax, book: &Book) -> Vec<LinkCollision> {
        let recency = self.books.len();
        self.books.push(book.title.clone());

        let collisions = self
            .links
            .merge(LinkTable::from_records(&book.records), &book.title);
        for collision in &collisions {
            log::warn!("ambiguous link {collision}");
        }
        self.collisions.extend(collisions.iter().cloned());

        let index = BacklinkIndex::build(syntax, &book.records);
        for record in &book.records {
            let entry = Entry::new(
                book.title.as_str(),
                record.chapter.as_str(),
                convert_definition(syntax, &self.links, &record.info),
                index.resolve(&self.links, &record.name),
                recency,
            );
            let occurrences = self.entries.entry(record.name.clone()).or_default();
            insert_occurrence(occurrences, entry);
        }

        log::debug!(
            "ingested {} records from {}, {} names total",
            book.records.len(),
            book.title,
            self.entries.len()
        );
        collisions
    }

    pub fn entries(&self) -> &BTreeMap<String, Vec<Entry>> {
        &self.entries
    }

    /// Occurrences of `name`, newest book first.
    pub fn occurrences(&self, name: &str) -> Option<&[Entry]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn links(&self) -> &LinkTable {
        &self.links
    }

    pub fn collisions(&self) -> &[LinkCollision] {
        &self.collisions
    }

    /// Titles of the ingested books, oldest first.
    pub fn books(&self) -> &[String] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn insert_occurrence(occurrences: &mut Vec<Entry>, entry: Entry) {
    occurrences.insert(0, entry);
    // stable: a repeat within one book stays ahead of the earlier record
    occurrences.sort_by(|a, b| b.recency.cmp(&a.recency));
    prune_backlinks(occurrences);
}

/// Drop every backlink that an earlier occurrence in the list already shows.
/// Expects `occurrences` sorted newest first, with a repeat inside one book
/// ahead of that book's earlier record.
fn prune_backlinks(occurrences: &mut [Entry]) {
    let mut shown: BTreeSet<String> = BTreeSet::new();
    for entry in occurrences.iter_mut() {
        entry.backlinks.retain(|name| !shown.contains(name));
        shown.extend(entry.backlinks.iter().cloned());
    }
}
