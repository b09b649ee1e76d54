use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use filing_tone::config::{self, Config};
use filing_tone::document::Document;
use filing_tone::edgar::client::EdgarClient;
use filing_tone::edgar::{EdgarSource, FilingQuery};
use filing_tone::lexicon::file::FileLexicon;
use filing_tone::lexicon::traits::LexiconSource;
use filing_tone::lexicon::Lexicon;
use filing_tone::output;
use filing_tone::pipeline::clean::{Cleaner, NumericPattern, StopWordSet};
use filing_tone::pipeline::SentimentPipeline;
use filing_tone::source::file::FileSource;
use filing_tone::source::DocumentSource;

/// filing-tone: financial sentiment profile of an annual report.
///
/// Tokenizes a filing, drops stop words and numbers, matches what's left
/// against a financial sentiment lexicon and summarizes the result.
#[derive(Parser)]
#[command(name = "filing-tone", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the filing comes from: a local file or EDGAR.
#[derive(clap::Args)]
struct DocumentArgs {
    /// Read the document from a file (.json document or plain text)
    #[arg(long, conflicts_with = "cik")]
    file: Option<PathBuf>,

    /// Section label for a plain-text file
    #[arg(long, default_value = filing_tone::document::DEFAULT_SECTION)]
    section: String,

    /// Company CIK to fetch from EDGAR
    #[arg(long, required_unless_present = "file")]
    cik: Option<u64>,

    /// Filing form type (default: 10-K)
    #[arg(long, default_value = "10-K")]
    form: String,

    /// Year the filing was made (default: most recent)
    #[arg(long)]
    year: Option<i32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a filing against the sentiment lexicon
    Analyze {
        #[command(flatten)]
        document: DocumentArgs,

        /// Lexicon CSV (overrides FILING_TONE_LEXICON)
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Words shown per category (overrides FILING_TONE_TOP_N)
        #[arg(long, value_parser = parse_top)]
        top: Option<usize>,

        /// Extra stop words, one per line, added to the English list
        #[arg(long)]
        stop_words: Option<PathBuf>,

        /// Print the full report as JSON instead of charts
        #[arg(long)]
        json: bool,

        /// Also write a Markdown report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Download a filing and save it as a sectioned document JSON
    Fetch {
        #[command(flatten)]
        document: DocumentArgs,

        /// Output path for the document JSON
        #[arg(long, short)]
        out: PathBuf,
    },

    /// Show lexicon statistics
    Lexicon {
        /// Lexicon CSV (overrides FILING_TONE_LEXICON)
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("filing_tone=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            document,
            lexicon,
            top,
            stop_words,
            json,
            report,
        } => {
            let mut config = Config::load()?;
            if let Some(path) = lexicon {
                config.lexicon_path = path;
            }
            if let Some(n) = top {
                config.top_n = n;
            }

            let lexicon = load_lexicon(&config)?;
            let stop = load_stop_words(stop_words.as_deref())?;
            let (title, doc) = fetch_document(&config, &document).await?;

            let pipeline =
                SentimentPipeline::new(Cleaner::new(NumericPattern::two_digit_run(), &stop), &lexicon);
            let result = pipeline
                .run(&doc)
                .with_context(|| format!("Failed to score {title}"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                output::terminal::display_report(&title, &result, config.top_n);
            }

            if let Some(path) = report {
                output::markdown::write_report(&path, &title, &result, config.top_n)?;
                eprintln!("Report written to {}", path.display());
            }
        }

        Commands::Fetch { document, out } => {
            let config = Config::load()?;
            let (title, doc) = fetch_document(&config, &document).await?;
            println!("Fetched {title}");

            let json = serde_json::to_string_pretty(&doc)?;
            std::fs::write(&out, json)
                .with_context(|| format!("Failed to write {}", out.display()))?;

            println!(
                "{} {} segments ({}) saved to {}",
                "Done.".bold(),
                doc.segments().len(),
                doc.sections().join(", "),
                out.display()
            );
        }

        Commands::Lexicon { lexicon } => {
            let mut config = Config::load()?;
            if let Some(path) = lexicon {
                config.lexicon_path = path;
            }
            let lexicon = load_lexicon(&config)?;
            output::terminal::display_lexicon(&lexicon);
        }
    }

    Ok(())
}

/// Load the lexicon named by the config, failing loudly if it's missing.
fn load_lexicon(config: &Config) -> Result<Lexicon> {
    config.require_lexicon()?;
    let lexicon = FileLexicon::new(&config.lexicon_path).load()?;
    Ok(lexicon)
}

fn parse_top(raw: &str) -> Result<usize, String> {
    config::parse_top_n(raw).map_err(|e| e.to_string())
}

/// English stop words, plus any listed in `extra` (one per line).
fn load_stop_words(extra: Option<&Path>) -> Result<Cow<'static, StopWordSet>> {
    let english = StopWordSet::english();
    let Some(path) = extra else {
        return Ok(Cow::Borrowed(english));
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read stop words from {}", path.display()))?;
    let stop = english.extended(contents.lines());
    info!(path = %path.display(), words = stop.len(), "Extended stop words");
    Ok(Cow::Owned(stop))
}

/// Fetch the document selected on the command line, with a report title.
///
/// EDGAR filings are titled by company, form and filing date; files by
/// their source description.
async fn fetch_document(config: &Config, args: &DocumentArgs) -> Result<(String, Document)> {
    if let Some(path) = &args.file {
        let source = FileSource::new(path).with_section(args.section.clone());
        let title = source.describe();
        info!(source = %title, "Reading document");
        let doc = source.fetch().await?;
        return Ok((title, doc));
    }

    let cik = args
        .cik
        .ok_or_else(|| anyhow::anyhow!("Pass either --file or --cik"))?;
    config.require_edgar()?;
    let client = EdgarClient::new(
        &config.sec_user_agent,
        &config.edgar_data_url,
        &config.edgar_archives_url,
    )?;
    let source = EdgarSource::new(
        client,
        FilingQuery {
            cik,
            form: args.form.clone(),
            year: args.year,
        },
    );
    info!(source = %source.describe(), "Fetching document");
    let (filing, doc) = source.fetch_with_filing().await?;
    Ok((filing.title(), doc))
}
