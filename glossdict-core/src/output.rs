use crate::alt_words::alternate_words;
use crate::error::{Error, Result};
use crate::merge::{Accumulator, Entry};
use crate::syntax::Syntax;
use glossary_writer::{dictzip, with_suffix, DefinitionFormat, Format, Glossary, WriteOptions};
use std::fs;
use std::path::{Path, PathBuf};

pub const STYLESHEET: &str = "\
.dict-origin {
    font-size: smaller;
    font-style: italic;
    padding-bottom: 1em;
}

.dict-definition {}

.dict-backlinks {
    font-size: smaller;
}

.dict-backlinks > dt {
    font-weight: bold;
}

.dict-backlinks > dd {
    font-style: italic;
}

.dict-internal-link {}

.dict-emphasis {}
";

#[derive(Debug, Clone)]
pub struct OutputSpec {
    /// Output path without extension, e.g. `out/wot-book-01`
    pub base: PathBuf,
    pub title: String,
    pub author: String,
    pub dictzip: bool,
}

/// Write the StarDict files and stylesheet for everything in `acc`.
pub fn write_dictionary(syntax: &Syntax, acc: &Accumulator, spec: &OutputSpec) -> Result<Vec<PathBuf>> {
    let stylesheet = stylesheet_href(&spec.base);

    let mut glos = Glossary::new();
    for (name, occurrences) in acc.entries() {
        let words = std::iter::once(name.clone()).chain(alternate_words(syntax, name));
        let entry = glos.new_entry(
            words,
            render_entry(&stylesheet, occurrences),
            DefinitionFormat::Html,
        )?;
        glos.add_entry(entry);
    }
    glos.set_info("title", spec.title.as_str());
    glos.set_info("author", spec.author.as_str());

    if let Some(parent) = spec.base.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let options = WriteOptions {
        dictzip: spec.dictzip,
    };
    let mut written = glos.write(&spec.base, Format::StarDict, &options)?;

    // KOReader reads a compressed .dict but not a compressed .syn
    for path in written.iter_mut() {
        if has_suffix(path, ".syn.dz") {
            *path = dictzip::decompress_file(path)?;
        }
    }

    let css = with_suffix(&spec.base, ".css");
    fs::write(&css, STYLESHEET).map_err(|e| Error::io(&css, e))?;
    written.push(css);

    log::info!(
        "wrote {} ({} entries)",
        spec.base.display(),
        glos.len()
    );
    Ok(written)
}

fn stylesheet_href(base: &Path) -> String {
    let name = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{name}.css")
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.to_string_lossy().ends_with(suffix)
}

/// Html body for one name: every book occurrence newest first, then the
/// backlinks, labelled per book once there is more than one occurrence.
pub fn render_entry(stylesheet: &str, occurrences: &[Entry]) -> String {
    let mut html = format!(
        "<link rel=\"stylesheet\" type=\"text/css\" href=\"{stylesheet}\"/>\n<div>\n"
    );

    for entry in occurrences {
        html.push_str(&format!(
            "<div class=\"dict-origin\">{}</div>\n<div class=\"dict-definition\">{}</div>\n<hr>\n",
            entry.origin(),
            entry.definition()
        ));
    }

    html.push_str("<div>\n");
    for entry in occurrences.iter().filter(|e| !e.backlinks().is_empty()) {
        html.push_str("<dl class=\"dict-backlinks\">\n");
        if occurrences.len() > 1 {
            html.push_str(&format!("<dt>Backlinks ({}):</dt>\n", entry.book()));
        } else {
            html.push_str("<dt>Backlinks:</dt>\n");
        }
        for name in entry.backlinks() {
            html.push_str(&format!("<dd><a href=\"bword://{name}\">{name}</a></dd>\n"));
        }
        html.push_str("</dl>\n");
    }
    html.push_str("</div>\n</div>\n");
    html
}
