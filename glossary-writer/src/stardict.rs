//! StarDict 3.0.0 writer.
//!
//! Produces `.ifo`, `.idx`, `.dict` (or `.dict.dz`) and, when any entry has
//! alternate words, `.syn` (or `.syn.dz`). Words in `.idx` and `.syn` are
//! ordered with [`stardict_cmp`], which is what readers binary-search with.

use crate::dictzip;
use crate::error::{Error, Result};
use crate::glossary::{with_suffix, DefinitionFormat, Glossary, WriteOptions};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// Info keys written to the `.ifo` file, in order, after the counts.
const IFO_KEYS: &[&str] = &["author", "email", "website", "description", "date"];

/// g_ascii_strcasecmp, with a plain byte comparison as tie breaker.
pub fn stardict_cmp(a: &str, b: &str) -> Ordering {
    let fold = |s: &str| s.bytes().map(|c| c.to_ascii_lowercase()).collect::<Vec<_>>();
    fold(a)
        .cmp(&fold(b))
        .then_with(|| a.as_bytes().cmp(b.as_bytes()))
}

pub(crate) fn write(glossary: &Glossary, base: &Path, options: &WriteOptions) -> Result<Vec<PathBuf>> {
    let entries = glossary.entries();

    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&a, &b| stardict_cmp(entries[a].headword(), entries[b].headword()));

    let same_type = common_format(glossary);

    let mut dict = Vec::new();
    let mut idx = Vec::new();
    let mut syn: Vec<(&str, u32)> = Vec::new();

    for (position, &i) in order.iter().enumerate() {
        let entry = &entries[i];
        let overflow = || Error::OffsetOverflow {
            word: entry.headword().to_string(),
        };

        let offset = u32::try_from(dict.len()).map_err(|_| overflow())?;
        match same_type {
            Some(_) => dict.extend_from_slice(entry.definition().as_bytes()),
            None => {
                dict.push(entry.format().type_char());
                dict.extend_from_slice(entry.definition().as_bytes());
                dict.push(0);
            }
        }
        let size = u32::try_from(dict.len()).map_err(|_| overflow())? - offset;

        idx.extend_from_slice(entry.headword().as_bytes());
        idx.push(0);
        idx.extend_from_slice(&offset.to_be_bytes());
        idx.extend_from_slice(&size.to_be_bytes());

        let position = u32::try_from(position).map_err(|_| overflow())?;
        for alt in entry.alternates() {
            syn.push((alt.as_str(), position));
        }
    }

    syn.sort_by(|a, b| stardict_cmp(a.0, b.0).then(a.1.cmp(&b.1)));
    let mut syn_bytes = Vec::new();
    for (word, position) in &syn {
        syn_bytes.extend_from_slice(word.as_bytes());
        syn_bytes.push(0);
        syn_bytes.extend_from_slice(&position.to_be_bytes());
    }

    let ifo = ifo_text(glossary, idx.len(), syn.len(), same_type);

    let mut written = Vec::new();
    written.push(write_file(&with_suffix(base, ".ifo"), ifo.as_bytes())?);
    written.push(write_file(&with_suffix(base, ".idx"), &idx)?);
    written.push(write_maybe_compressed(base, ".dict", &dict, options.dictzip)?);
    if !syn.is_empty() {
        written.push(write_maybe_compressed(base, ".syn", &syn_bytes, options.dictzip)?);
    } else {
        remove_stale(&with_suffix(base, ".syn"))?;
        remove_stale(&with_suffix(base, ".syn.dz"))?;
    }

    log::debug!(
        "stardict {}: {} words, {} synonyms",
        base.display(),
        entries.len(),
        syn.len()
    );
    Ok(written)
}

fn common_format(glossary: &Glossary) -> Option<DefinitionFormat> {
    let mut formats = glossary.entries().iter().map(|e| e.format());
    match formats.next() {
        None => Some(DefinitionFormat::Html),
        Some(first) => formats.all(|f| f == first).then_some(first),
    }
}

fn ifo_text(
    glossary: &Glossary,
    idx_size: usize,
    syn_count: usize,
    same_type: Option<DefinitionFormat>,
) -> String {
    let mut lines = vec![
        "StarDict's dict ifo file".to_string(),
        "version=3.0.0".to_string(),
        format!(
            "bookname={}",
            ifo_value(glossary.info("title").unwrap_or("Untitled"))
        ),
        format!("wordcount={}", glossary.len()),
    ];
    if syn_count > 0 {
        lines.push(format!("synwordcount={syn_count}"));
    }
    lines.push(format!("idxfilesize={idx_size}"));

    for key in IFO_KEYS {
        if let Some(value) = glossary.info(key) {
            lines.push(format!("{key}={}", ifo_value(value)));
        }
    }
    if let Some(format) = same_type {
        lines.push(format!("sametypesequence={}", format.type_char() as char));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

// .ifo is line oriented
fn ifo_value(value: &str) -> String {
    value.trim().replace("\r\n", "<br>").replace('\n', "<br>")
}

fn write_maybe_compressed(base: &Path, suffix: &str, data: &[u8], compress: bool) -> Result<PathBuf> {
    let plain = with_suffix(base, suffix);
    let packed = with_suffix(base, &format!("{suffix}.dz"));
    if compress {
        remove_stale(&plain)?;
        write_file(&packed, &dictzip::compress(data)?)
    } else {
        remove_stale(&packed)?;
        write_file(&plain, data)
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<PathBuf> {
    fs::write(path, data).map_err(|e| Error::io(path, e))?;
    Ok(path.to_path_buf())
}

// A leftover from an earlier run with the other compression setting would
// shadow the fresh file in some readers.
fn remove_stale(path: &Path) -> Result<()> {
    if path.exists() {
        log::debug!("removing stale {}", path.display());
        fs::remove_file(path).map_err(|e| Error::io(path, e))?;
    }
    Ok(())
}
