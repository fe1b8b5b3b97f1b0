use glossdict_core::pipeline::{build, ingest_all};
use glossdict_core::{Book, BookRecord, Config, Syntax};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

const BOOK_ONE: &str = r##"[
  {"id": "rand", "name": "Rand al'Thor", "chapter": "Chapter 1", "info": "A shepherd from _Emond's_ Field."},
  {"id": "tam", "name": "Tam al'Thor", "chapter": "Chapter 1", "info": "Father of [Rand](#rand)."},
  {"id": "lan", "name": "al'Lan Mandragoran", "chapter": "Chapter 3", "info": "Warder to [Moiraine](#moiraine), teaches [Rand](#rand)."},
  {"id": "moiraine", "name": "Moiraine Damodred", "chapter": "Chapter 3", "info": "Aes Sedai, see [Lan](#lan) and [the Horn](#horn)."}
]"##;

const BOOK_TWO: &str = r##"[
  {"id": "rand", "name": "Rand al'Thor", "chapter": "Chapter 5", "info": "Now the Dragon Reborn."},
  {"id": "tam", "name": "Tam al'Thor", "chapter": "Chapter 2", "info": "Still father of [Rand](#rand)."},
  {"id": "min", "name": "Min Farshaw", "chapter": "Chapter 9", "info": "Sees viewings around [Rand](#rand)."}
]"##;

fn series(dir: &Path, dictzip: bool) -> Config {
    let data = dir.join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("book-01.json"), BOOK_ONE).unwrap();
    fs::write(data.join("book-02.json"), BOOK_TWO).unwrap();

    let toml = format!(
        r#"
title = "Wheel of Time Compendium"
author = "Karl Hammond, Jason Wright"
data_dir = "data"
output_dir = "out"
dictzip = {dictzip}

[[books]]
number = "01"
title = "The Eye of the World"

[[books]]
number = "02"
title = "The Great Hunt"
"#
    );
    let path = dir.join("series.toml");
    fs::write(&path, toml).unwrap();
    Config::load(&path).unwrap()
}

fn idx_words(path: &Path) -> Vec<String> {
    let bytes = fs::read(path).unwrap();
    let mut words = Vec::new();
    let mut rest = &bytes[..];
    while !rest.is_empty() {
        let nul = rest.iter().position(|&b| b == 0).unwrap();
        words.push(String::from_utf8(rest[..nul].to_vec()).unwrap());
        rest = &rest[nul + 9..];
    }
    words
}

#[test]
fn writes_cumulative_and_single_dictionaries() {
    let dir = tempfile::tempdir().unwrap();
    let config = series(dir.path(), false);
    let syntax = Syntax::compile().unwrap();

    let report = build(&syntax, &config, None).unwrap();
    assert!(report.collisions.is_empty());

    let out = dir.path().join("out");
    for base in ["wot-cumulative-book-01", "wot-cumulative-book-02", "wot-book-01", "wot-book-02"] {
        for ext in ["ifo", "idx", "dict", "syn", "css"] {
            assert!(out.join(format!("{base}.{ext}")).exists(), "{base}.{ext}");
        }
    }

    assert_eq!(
        idx_words(&out.join("wot-cumulative-book-02.idx")),
        ["al'Lan Mandragoran", "Min Farshaw", "Moiraine Damodred", "Rand al'Thor", "Tam al'Thor"]
    );
    assert_eq!(
        idx_words(&out.join("wot-book-02.idx")),
        ["Min Farshaw", "Rand al'Thor", "Tam al'Thor"]
    );

    let ifo = fs::read_to_string(out.join("wot-book-02.ifo")).unwrap();
    assert!(ifo.contains("bookname=Wheel of Time Compendium 02: The Great Hunt\n"));

    let dict = fs::read_to_string(out.join("wot-cumulative-book-02.dict")).unwrap();
    assert!(dict.contains("<dt>Backlinks (The Great Hunt):</dt>"));
    assert!(dict.contains(r#"<a class="dict-internal-link" href="bword://Rand al'Thor">Rand al'Thor</a>"#));
    assert!(dict.contains(r#"<em class="dict-emphasis">Emond's</em>"#));
    // unknown id stays literal
    assert!(dict.contains("[the Horn](#horn)"));

    let css = fs::read_to_string(out.join("wot-book-01.css")).unwrap();
    assert!(css.contains(".dict-backlinks > dt"));
}

#[test]
fn dictzip_keeps_the_synonym_index_uncompressed() {
    let dir = tempfile::tempdir().unwrap();
    let config = series(dir.path(), true);
    let syntax = Syntax::compile().unwrap();

    build(&syntax, &config, Some("01")).unwrap();

    let out = dir.path().join("out");
    assert!(out.join("wot-book-01.dict.dz").exists());
    assert!(out.join("wot-book-01.syn").exists());
    assert!(!out.join("wot-book-01.syn.dz").exists());
    assert!(!out.join("wot-book-02.ifo").exists());
}

#[test]
fn only_later_book_keeps_earlier_books_in_cumulative() {
    let dir = tempfile::tempdir().unwrap();
    let config = series(dir.path(), false);
    let syntax = Syntax::compile().unwrap();

    let report = build(&syntax, &config, Some("02")).unwrap();

    let out = dir.path().join("out");
    let words = idx_words(&out.join("wot-cumulative-book-02.idx"));
    assert!(words.iter().any(|w| w == "al'Lan Mandragoran"));
    assert!(words.iter().any(|w| w == "Moiraine Damodred"));
    assert_eq!(
        idx_words(&out.join("wot-book-02.idx")),
        ["Min Farshaw", "Rand al'Thor", "Tam al'Thor"]
    );

    assert!(!out.join("wot-book-01.ifo").exists());
    assert!(!out.join("wot-cumulative-book-01.ifo").exists());
    assert!(report
        .written
        .iter()
        .all(|p| p.to_string_lossy().contains("-02.")));
}

#[test]
fn rebuilding_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = series(dir.path(), false);
    let syntax = Syntax::compile().unwrap();

    let first = build(&syntax, &config, None).unwrap();
    let before: Vec<Vec<u8>> = first.written.iter().map(|p| fs::read(p).unwrap()).collect();
    let second = build(&syntax, &config, None).unwrap();
    let after: Vec<Vec<u8>> = second.written.iter().map(|p| fs::read(p).unwrap()).collect();

    assert_eq!(first.written, second.written);
    assert_eq!(before, after);
}

#[test]
fn merged_backlinks_lose_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = series(dir.path(), false);
    let syntax = Syntax::compile().unwrap();
    let acc = ingest_all(&syntax, &config).unwrap();

    let rand = acc.occurrences("Rand al'Thor").unwrap();
    assert_eq!(rand.len(), 2);
    assert_eq!(rand[0].book(), "The Great Hunt");

    let newest: Vec<&str> = rand[0].backlinks().iter().map(String::as_str).collect();
    let oldest: Vec<&str> = rand[1].backlinks().iter().map(String::as_str).collect();
    assert_eq!(newest, ["Min Farshaw", "Tam al'Thor"]);
    assert_eq!(oldest, ["al'Lan Mandragoran"]);

    let union: BTreeSet<&str> = newest.iter().chain(&oldest).copied().collect();
    assert_eq!(
        union,
        BTreeSet::from(["Min Farshaw", "Tam al'Thor", "al'Lan Mandragoran"])
    );
}

#[test]
fn ambiguous_identifiers_are_reported() {
    let syntax = Syntax::compile().unwrap();
    let record = |id: &str, name: &str| BookRecord {
        id: id.to_string(),
        name: name.to_string(),
        chapter: "1".to_string(),
        info: String::new(),
    };

    let mut acc = glossdict_core::Accumulator::new();
    acc.ingest(&syntax, &Book::new("01", "b1", vec![record("gray", "Gray Man")]));
    acc.ingest(&syntax, &Book::new("02", "b2", vec![record("gray", "Gray Ajah")]));

    assert_eq!(acc.collisions().len(), 1);
    assert_eq!(acc.collisions()[0].previous, "Gray Man");
    assert_eq!(acc.collisions()[0].current, "Gray Ajah");
}

#[test]
fn unknown_only_number_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = series(dir.path(), false);
    let syntax = Syntax::compile().unwrap();
    assert!(build(&syntax, &config, Some("99")).is_err());
}
