use crate::config::Config;
use crate::error::{Error, Result};
use crate::links::LinkCollision;
use crate::merge::Accumulator;
use crate::output::{write_dictionary, OutputSpec};
use crate::record::Book;
use crate::syntax::Syntax;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct BuildReport {
    pub written: Vec<PathBuf>,
    pub collisions: Vec<LinkCollision>,
}

/// Convert every configured book. For each book a cumulative dictionary
/// (all books so far) and a single-book dictionary are written, as enabled
/// in the config. With `only`, books after that number are not ingested and
/// only that book's dictionaries are written.
pub fn build(syntax: &Syntax, config: &Config, only: Option<&str>) -> Result<BuildReport> {
    if let Some(number) = only {
        if config.book(number).is_none() {
            return Err(Error::InvalidConfig(format!("no book numbered {number}")));
        }
    }

    let mut report = BuildReport::default();
    let mut cumulative = Accumulator::new();

    for spec in &config.books {
        let wanted = only.map_or(true, |number| number == spec.number);
        if !wanted && !config.cumulative {
            continue;
        }

        log::info!("Converting {} {}", spec.number, spec.title);
        let book = Book::load(&config.input_path(spec), &spec.number, &spec.title)?;
        let title = config.dictionary_title(spec);

        if config.cumulative {
            report.collisions.extend(cumulative.ingest(syntax, &book));
            if wanted {
                let output = OutputSpec {
                    base: config.cumulative_base(spec),
                    title: title.clone(),
                    author: config.author.clone(),
                    dictzip: config.dictzip,
                };
                report.written.extend(write_dictionary(syntax, &cumulative, &output)?);
            }
        }

        if config.single && wanted {
            let mut single = Accumulator::new();
            single.ingest(syntax, &book);
            let output = OutputSpec {
                base: config.single_base(spec),
                title,
                author: config.author.clone(),
                dictzip: config.dictzip,
            };
            report.written.extend(write_dictionary(syntax, &single, &output)?);
        }

        if only == Some(spec.number.as_str()) {
            break;
        }
    }

    Ok(report)
}

/// Ingest every configured book into one accumulator without writing output.
pub fn ingest_all(syntax: &Syntax, config: &Config) -> Result<Accumulator> {
    let mut acc = Accumulator::new();
    for spec in &config.books {
        acc.ingest_file(syntax, &config.input_path(spec), &spec.number, &spec.title)?;
    }
    Ok(acc)
}
