use crate::links::LinkTable;
use crate::record::BookRecord;
use crate::syntax::Syntax;
use std::collections::{BTreeSet, HashMap};

/// Reverse link index for one book: identifier -> names of the records whose
/// text links to it.
#[derive(Debug, Default)]
pub struct BacklinkIndex {
    referrers: HashMap<String, BTreeSet<String>>,
}

impl BacklinkIndex {
    pub fn build(syntax: &Syntax, records: &[BookRecord]) -> Self {
        let mut referrers: HashMap<String, BTreeSet<String>> = HashMap::new();
        for record in records {
            for id in syntax.linked_ids(&record.info) {
                referrers
                    .entry(id.to_string())
                    .or_default()
                    .insert(record.name.clone());
            }
        }
        BacklinkIndex { referrers }
    }

    /// Names of records linking to any identifier that resolves to `name`.
    pub fn resolve(&self, links: &LinkTable, name: &str) -> BTreeSet<String> {
        links
            .ids_for(name)
            .filter_map(|id| self.referrers.get(id))
            .flatten()
            .cloned()
            .collect()
    }
}

/// Backlinks of `name` within one book's records.
pub fn find_backlinks(
    syntax: &Syntax,
    links: &LinkTable,
    name: &str,
    records: &[BookRecord],
) -> BTreeSet<String> {
    BacklinkIndex::build(syntax, records).resolve(links, name)
}
