use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A book series to convert, read from TOML. Books are ingested in the order
/// they are listed, which is also their recency order.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub title: String,
    pub author: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// File name of each book's JSON, `{number}` is substituted
    #[serde(default = "default_input_pattern")]
    pub input_pattern: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub dictzip: bool,
    #[serde(default = "default_true")]
    pub cumulative: bool,
    #[serde(default = "default_true")]
    pub single: bool,
    #[serde(default = "default_cumulative_prefix")]
    pub cumulative_prefix: String,
    #[serde(default = "default_single_prefix")]
    pub single_prefix: String,
    pub books: Vec<BookSpec>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BookSpec {
    pub number: String,
    pub title: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("assets/data")
}

fn default_input_pattern() -> String {
    "book-{number}.json".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

fn default_cumulative_prefix() -> String {
    "wot-cumulative-book-".to_string()
}

fn default_single_prefix() -> String {
    "wot-book-".to_string()
}

impl Config {
    /// Load and validate `path`. Relative directories are taken relative to
    /// the config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config: Config = toml::from_str(&contents).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(root) = path.parent() {
            config.data_dir = root.join(&config.data_dir);
            config.output_dir = root.join(&config.output_dir);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.books.is_empty() {
            return Err(Error::InvalidConfig("no books listed".to_string()));
        }
        if !self.input_pattern.contains("{number}") {
            return Err(Error::InvalidConfig(format!(
                "input_pattern '{}' has no {{number}} placeholder",
                self.input_pattern
            )));
        }
        let mut seen = HashSet::new();
        for book in &self.books {
            if !seen.insert(book.number.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "book number {} listed twice",
                    book.number
                )));
            }
        }
        Ok(())
    }

    pub fn book(&self, number: &str) -> Option<&BookSpec> {
        self.books.iter().find(|b| b.number == number)
    }

    pub fn input_path(&self, book: &BookSpec) -> PathBuf {
        self.data_dir
            .join(self.input_pattern.replace("{number}", &book.number))
    }

    pub fn dictionary_title(&self, book: &BookSpec) -> String {
        format!("{} {}: {}", self.title, book.number, book.title)
    }

    pub fn cumulative_base(&self, book: &BookSpec) -> PathBuf {
        self.output_dir
            .join(format!("{}{}", self.cumulative_prefix, book.number))
    }

    pub fn single_base(&self, book: &BookSpec) -> PathBuf {
        self.output_dir
            .join(format!("{}{}", self.single_prefix, book.number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
title = "Wheel of Time Compendium"
author = "Karl Hammond, Jason Wright"

[[books]]
number = "01"
title = "The Eye of the World"

[[books]]
number = "00"
title = "New Spring"
"#;

    #[test]
    fn defaults_fill_in() {
        let config: Config = toml::from_str(MINIMAL).unwrap();
        config.validate().unwrap();

        assert_eq!(config.data_dir, PathBuf::from("assets/data"));
        assert!(config.cumulative && config.single && !config.dictzip);
        assert_eq!(config.books[1].number, "00");

        let book = config.book("01").unwrap();
        assert_eq!(config.input_path(book), PathBuf::from("assets/data/book-01.json"));
        assert_eq!(
            config.dictionary_title(book),
            "Wheel of Time Compendium 01: The Eye of the World"
        );
        assert_eq!(config.cumulative_base(book), PathBuf::from("./wot-cumulative-book-01"));
        assert_eq!(config.single_base(book), PathBuf::from("./wot-book-01"));
    }

    #[test]
    fn duplicate_numbers_are_rejected() {
        let text = format!("{MINIMAL}\n[[books]]\nnumber = \"01\"\ntitle = \"Again\"\n");
        let config: Config = toml::from_str(&text).unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn pattern_needs_placeholder() {
        let text = format!("input_pattern = \"book.json\"\n{MINIMAL}");
        let config: Config = toml::from_str(&text).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_resolves_relative_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.toml");
        fs::write(&path, MINIMAL).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_dir, dir.path().join("assets/data"));
        assert_eq!(config.output_dir, dir.path().join("."));
    }

    #[test]
    fn unknown_keys_fail_to_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, format!("colour = \"red\"\n{MINIMAL}")).unwrap();
        assert!(matches!(Config::load(&path), Err(Error::Config { .. })));
    }
}
