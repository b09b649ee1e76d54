// SEC EDGAR client — filing index lookup and document download over HTTP.
//
// Two hosts are involved: data.sec.gov serves the per-company submissions
// index (JSON), www.sec.gov serves the archived filing documents. SEC
// rejects requests without a descriptive User-Agent, so one is mandatory.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Default host for the submissions API.
pub const DEFAULT_DATA_URL: &str = "https://data.sec.gov";

/// Default host for archived filing documents.
pub const DEFAULT_ARCHIVES_URL: &str = "https://www.sec.gov";

/// Thin reqwest wrapper over the two EDGAR hosts.
pub struct EdgarClient {
    client: reqwest::Client,
    data_url: String,
    archives_url: String,
}

/// One filing picked out of a company's submissions index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRef {
    pub cik: u64,
    pub company: String,
    pub form: String,
    pub accession_number: String,
    pub filing_date: NaiveDate,
    pub primary_document: String,
}

impl FilingRef {
    /// Path of the primary document under the archives host.
    pub fn archive_path(&self) -> String {
        format!(
            "/Archives/edgar/data/{}/{}/{}",
            self.cik,
            self.accession_number.replace('-', ""),
            self.primary_document
        )
    }

    /// Human-readable label, e.g. "Example Corp 10-K filed 2024-02-15".
    pub fn title(&self) -> String {
        format!("{} {} filed {}", self.company, self.form, self.filing_date)
    }
}

impl EdgarClient {
    pub fn new(user_agent: &str, data_url: &str, archives_url: &str) -> Result<Self> {
        if user_agent.trim().is_empty() {
            anyhow::bail!("EDGAR requires a User-Agent identifying you (name and email)");
        }
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            data_url: data_url.trim_end_matches('/').to_string(),
            archives_url: archives_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        debug!(url = url, "EDGAR GET request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("EDGAR request failed: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("EDGAR {url} returned {status}: {body}");
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get(url)
            .await?
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize {url} response"))
    }

    /// Fetch the submissions index for a company.
    pub async fn submissions(&self, cik: u64) -> Result<Submissions> {
        let url = format!("{}/submissions/CIK{cik:010}.json", self.data_url);
        self.get_json(&url)
            .await
            .with_context(|| format!("Failed to load submissions for CIK {cik}"))
    }

    /// Find the filing of `form` for the given year (or the latest one).
    ///
    /// The recent table is searched first. Older filings live in extra
    /// index pages listed under `filings.files`, which are only fetched
    /// when the recent table has no match.
    pub async fn find_filing(&self, cik: u64, form: &str, year: Option<i32>) -> Result<FilingRef> {
        let submissions = self.submissions(cik).await?;
        let mut filing = select_filing(&submissions, cik, form, year);

        if filing.is_none() {
            for page in &submissions.filings.files {
                let url = format!("{}/submissions/{}", self.data_url, page.name);
                let older: RecentFilings = self
                    .get_json(&url)
                    .await
                    .with_context(|| format!("Failed to load submissions page {}", page.name))?;
                debug!(page = %page.name, rows = older.form.len(), "Searched older submissions");
                let found = select_from(&older, &submissions.name, cik, form, year);
                if found.as_ref().map(|f| f.filing_date) > filing.as_ref().map(|f| f.filing_date) {
                    filing = found;
                }
            }
        }

        let pages = 1 + submissions.filings.files.len();
        let filing = filing.ok_or_else(|| match year {
            Some(y) => anyhow::anyhow!(
                "No {form} filed in {y} for CIK {cik} (searched {pages} index pages)"
            ),
            None => anyhow::anyhow!(
                "No {form} filings found for CIK {cik} (searched {pages} index pages)"
            ),
        })?;

        info!(
            cik = cik,
            company = %filing.company,
            form = %filing.form,
            filed = %filing.filing_date,
            "Selected filing"
        );
        Ok(filing)
    }

    /// Download a filing's primary document as HTML text.
    pub async fn fetch_document(&self, filing: &FilingRef) -> Result<String> {
        let url = format!("{}{}", self.archives_url, filing.archive_path());

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Downloading {}", filing.primary_document));
        pb.enable_steady_tick(Duration::from_millis(100));

        let result = match self.get(&url).await {
            Ok(response) => response.text().await.context("Failed to read filing body"),
            Err(e) => Err(e),
        };
        pb.finish_and_clear();

        let html = result.with_context(|| format!("Failed to download {url}"))?;
        info!(bytes = html.len(), document = %filing.primary_document, "Downloaded filing");
        Ok(html)
    }
}

/// Pick the most recent filing matching `form` exactly (and `year`, if set)
/// from the recent table of a submissions index.
pub fn select_filing(
    submissions: &Submissions,
    cik: u64,
    form: &str,
    year: Option<i32>,
) -> Option<FilingRef> {
    select_from(&submissions.filings.recent, &submissions.name, cik, form, year)
}

/// Same as [`select_filing`] over any filings table.
///
/// Rows with an unparseable date are skipped rather than failing the lookup.
pub fn select_from(
    recent: &RecentFilings,
    company: &str,
    cik: u64,
    form: &str,
    year: Option<i32>,
) -> Option<FilingRef> {
    let rows = recent
        .form
        .len()
        .min(recent.accession_number.len())
        .min(recent.filing_date.len())
        .min(recent.primary_document.len());

    (0..rows)
        .filter(|&i| recent.form[i] == form)
        .filter_map(|i| match NaiveDate::parse_from_str(&recent.filing_date[i], "%Y-%m-%d") {
            Ok(date) => Some((i, date)),
            Err(e) => {
                warn!(date = %recent.filing_date[i], error = %e, "Skipping filing with bad date");
                None
            }
        })
        .filter(|(_, date)| year.map_or(true, |y| date.year() == y))
        .max_by_key(|(_, date)| *date)
        .map(|(i, date)| FilingRef {
            cik,
            company: company.to_string(),
            form: recent.form[i].clone(),
            accession_number: recent.accession_number[i].clone(),
            filing_date: date,
            primary_document: recent.primary_document[i].clone(),
        })
}

// -- Serde types for the submissions index --

/// Response from `/submissions/CIK##########.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Submissions {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub filings: SubmissionFilings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionFilings {
    #[serde(default)]
    pub recent: RecentFilings,
    /// Extra index pages holding filings too old for `recent`.
    #[serde(default)]
    pub files: Vec<FilingFile>,
}

/// One entry of `filings.files`, e.g. `CIK0000320193-submissions-001.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilingFile {
    pub name: String,
}

/// Column-oriented table: index `i` of each vector describes filing `i`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFilings {
    #[serde(default)]
    pub accession_number: Vec<String>,
    #[serde(default)]
    pub filing_date: Vec<String>,
    #[serde(default)]
    pub form: Vec<String>,
    #[serde(default)]
    pub primary_document: Vec<String>,
}
