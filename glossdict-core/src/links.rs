use crate::record::BookRecord;
use std::collections::HashMap;
use std::fmt;

/// Link identifier -> display name of the entry it points at.
///
/// At least one name appears in two books under different identifiers, so
/// several identifiers may resolve to the same name. The reverse, one
/// identifier reused for a different name by a later book, is ambiguous: the
/// later name wins and the change is reported as a [`LinkCollision`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTable {
    targets: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCollision {
    pub id: String,
    pub previous: String,
    pub current: String,
    /// Title of the book whose ingestion replaced the mapping
    pub book: String,
}

impl fmt::Display for LinkCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} pointed at '{}', now '{}' (from {})",
            self.id, self.previous, self.current, self.book
        )
    }
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table for a single batch of records; a repeated identifier keeps its
    /// last record.
    pub fn from_records(records: &[BookRecord]) -> Self {
        let mut targets = HashMap::with_capacity(records.len());
        for record in records {
            if let Some(old) = targets.insert(record.id.clone(), record.name.clone()) {
                if old != record.name {
                    log::warn!("#{} used for both '{}' and '{}' in one book", record.id, old, record.name);
                }
            }
        }
        LinkTable { targets }
    }

    /// Fold `batch` into this table, last write wins. Returns identifiers
    /// whose target name changed.
    pub fn merge(&mut self, batch: LinkTable, book: &str) -> Vec<LinkCollision> {
        let mut collisions = Vec::new();
        for (id, name) in batch.targets {
            if let Some(previous) = self.targets.get(&id) {
                if *previous != name {
                    collisions.push(LinkCollision {
                        id: id.clone(),
                        previous: previous.clone(),
                        current: name.clone(),
                        book: book.to_string(),
                    });
                }
            }
            self.targets.insert(id, name);
        }
        collisions.sort_by(|a, b| a.id.cmp(&b.id));
        collisions
    }

    pub fn target(&self, id: &str) -> Option<&str> {
        self.targets.get(id).map(String::as_str)
    }

    /// Every identifier that resolves to `name`.
    pub fn ids_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.targets
            .iter()
            .filter(move |(_, target)| *target == name)
            .map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
