use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How a definition body should be interpreted by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Html,
    Plain,
}

impl DefinitionFormat {
    /// StarDict type identifier ('h' for html, 'm' for plain utf-8 text)
    pub fn type_char(self) -> u8 {
        match self {
            DefinitionFormat::Html => b'h',
            DefinitionFormat::Plain => b'm',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    StarDict,
    Tabfile,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "stardict" => Ok(Format::StarDict),
            "tabfile" | "tab" => Ok(Format::Tabfile),
            _ => Err(Error::UnknownFormat(name.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Compress `.dict` and `.syn` with dictzip (StarDict only)
    pub dictzip: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    headword: String,
    alternates: Vec<String>,
    definition: String,
    format: DefinitionFormat,
}

impl Entry {
    pub fn headword(&self) -> &str {
        &self.headword
    }

    /// Alternate lookup forms, de-duplicated in first-seen order. The headword
    /// may appear here too; sdcv only finds a word through the synonym index
    /// when it is listed there.
    pub fn alternates(&self) -> &[String] {
        &self.alternates
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn format(&self) -> DefinitionFormat {
        self.format
    }
}

#[derive(Debug, Default)]
pub struct Glossary {
    entries: Vec<Entry>,
    info: BTreeMap<String, String>,
}

impl Glossary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_entry<I, S>(
        &self,
        words: I,
        definition: impl Into<String>,
        format: DefinitionFormat,
    ) -> Result<Entry>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words = words.into_iter().map(Into::into);
        let headword = words.next().ok_or(Error::NoWords)?;

        let mut seen = HashSet::new();
        let alternates = words
            .filter(|w| !w.is_empty() && seen.insert(w.clone()))
            .collect();

        Ok(Entry {
            headword,
            alternates,
            definition: definition.into(),
            format,
        })
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_info(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.info.insert(key.into(), value.into());
    }

    pub fn info(&self, key: &str) -> Option<&str> {
        self.info.get(key).map(String::as_str)
    }

    /// Write the glossary next to `base` and return the files created.
    pub fn write(&self, base: &Path, format: Format, options: &WriteOptions) -> Result<Vec<PathBuf>> {
        match format {
            Format::StarDict => crate::stardict::write(self, base, options),
            Format::Tabfile => crate::tabfile::write(self, base),
        }
    }
}

/// `base` + `suffix`, without treating dots already in `base` as an extension.
pub fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
