use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glossdict_core::pipeline::{build, ingest_all};
use glossdict_core::{alternate_words, Config, Syntax};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "glossdict")]
#[command(about = "Convert book glossary JSON into StarDict dictionaries")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write cumulative and single-book dictionaries for every configured book
    Build {
        #[arg(short, long, default_value = "glossdict.toml")]
        config: PathBuf,

        /// Write into this directory instead of the configured one
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Compress the .dict files with dictzip
        #[arg(long)]
        dictzip: bool,

        /// Stop after this book number and only write its dictionaries
        #[arg(long)]
        only: Option<String>,
    },

    /// Print the lookup forms generated for a name
    AltWords {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Ingest all books and list link identifiers that changed target
    Links {
        #[arg(short, long, default_value = "glossdict.toml")]
        config: PathBuf,
    },
}

fn load_config(path: &Path) -> Result<Config> {
    Config::load(path).with_context(|| format!("loading {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let syntax = Syntax::compile().context("compiling glossary patterns")?;

    match args.command {
        Command::Build {
            config,
            output_dir,
            dictzip,
            only,
        } => {
            let mut config = load_config(&config)?;
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            config.dictzip |= dictzip;

            let report = build(&syntax, &config, only.as_deref())?;
            log::info!(
                "{} files written, {} ambiguous link identifiers",
                report.written.len(),
                report.collisions.len()
            );
        }

        Command::AltWords { names } => {
            for name in &names {
                println!("{name}");
                for word in alternate_words(&syntax, name) {
                    println!("  {word}");
                }
            }
        }

        Command::Links { config } => {
            let config = load_config(&config)?;
            let acc = ingest_all(&syntax, &config)?;
            println!(
                "{} identifiers, {} names, {} books",
                acc.links().len(),
                acc.len(),
                acc.books().len()
            );
            if acc.collisions().is_empty() {
                println!("no ambiguous identifiers");
            }
            for collision in acc.collisions() {
                println!("{collision}");
            }
        }
    }

    Ok(())
}
