use crate::error::{Error, Result};
use crate::glossary::{with_suffix, Glossary};
use std::fs;
use std::path::{Path, PathBuf};

/// One `word|alt|alt\tdefinition` line per entry, written to `base.txt`.
pub(crate) fn write(glossary: &Glossary, base: &Path) -> Result<Vec<PathBuf>> {
    let mut text = String::new();
    for entry in glossary.entries() {
        let alternates = entry
            .alternates()
            .iter()
            .map(String::as_str)
            .filter(|w| *w != entry.headword());
        let words: Vec<&str> = std::iter::once(entry.headword()).chain(alternates).collect();
        text.push_str(&words.join("|"));
        text.push('\t');
        text.push_str(&escape(entry.definition()));
        text.push('\n');
    }

    let path = with_suffix(base, ".txt");
    fs::write(&path, text).map_err(|e| Error::io(&path, e))?;
    Ok(vec![path])
}

fn escape(definition: &str) -> String {
    definition
        .replace('\\', "\\\\")
        .replace('\r', "")
        .replace('\n', "\\n")
        .replace('\t', "\\t")
}
