use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::edgar::client::{DEFAULT_ARCHIVES_URL, DEFAULT_DATA_URL};

/// How many words per category reports show unless told otherwise.
pub const DEFAULT_TOP_N: usize = 10;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. CLI flags
/// override individual fields after loading.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the `word,sentiment` lexicon CSV.
    pub lexicon_path: PathBuf,
    /// User-Agent sent to SEC (SEC asks for a name and contact email).
    pub sec_user_agent: String,
    /// Submissions API host (override for testing).
    pub edgar_data_url: String,
    /// Archives host (override for testing).
    pub edgar_archives_url: String,
    /// Words shown per category in rankings.
    pub top_n: usize,
}

/// Returns the default lexicon location.
/// Uses the platform data directory: ~/.local/share/filing-tone/loughran.csv on Linux.
pub fn default_lexicon_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("filing-tone")
        .join("loughran.csv")
}

/// Parse a words-per-category count. Zero would hide every ranking.
pub fn parse_top_n(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => anyhow::bail!("must be a positive integer, got '{raw}'"),
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the SEC User-Agent, which is only
    /// required when talking to EDGAR.
    pub fn load() -> Result<Self> {
        let top_n = match env::var("FILING_TONE_TOP_N") {
            Ok(raw) => parse_top_n(&raw).map_err(|e| anyhow::anyhow!("FILING_TONE_TOP_N {e}"))?,
            Err(_) => DEFAULT_TOP_N,
        };

        Ok(Self {
            lexicon_path: env::var("FILING_TONE_LEXICON")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_lexicon_path()),
            sec_user_agent: env::var("SEC_USER_AGENT").unwrap_or_default(),
            edgar_data_url: env::var("EDGAR_DATA_URL")
                .unwrap_or_else(|_| DEFAULT_DATA_URL.to_string()),
            edgar_archives_url: env::var("EDGAR_ARCHIVES_URL")
                .unwrap_or_else(|_| DEFAULT_ARCHIVES_URL.to_string()),
            top_n,
        })
    }

    /// Check that the SEC User-Agent is configured.
    /// Call this before any operation that talks to EDGAR.
    pub fn require_edgar(&self) -> Result<()> {
        if self.sec_user_agent.trim().is_empty() {
            anyhow::bail!(
                "SEC_USER_AGENT not set. SEC requires a name and contact email, e.g.\n\
                 SEC_USER_AGENT=\"Jane Analyst jane@example.com\". Add it to your .env file."
            );
        }
        Ok(())
    }

    /// Check that the lexicon file exists before we try to classify anything.
    pub fn require_lexicon(&self) -> Result<()> {
        if !self.lexicon_path.exists() {
            anyhow::bail!(
                "Sentiment lexicon not found at {}\n\
                 Set FILING_TONE_LEXICON or pass --lexicon with a `word,sentiment` CSV.",
                self.lexicon_path.display()
            );
        }
        Ok(())
    }
}
