// SEC EDGAR retrieval — find a company's filing and turn it into a Document.

pub mod client;
pub mod sections;

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::document::Document;
use crate::source::DocumentSource;
use client::{EdgarClient, FilingRef};

/// Which filing to retrieve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingQuery {
    /// Central Index Key of the company.
    pub cik: u64,
    /// Form type, e.g. "10-K".
    pub form: String,
    /// Calendar year the filing was made in; latest when unset.
    pub year: Option<i32>,
}

/// Document source backed by EDGAR.
pub struct EdgarSource {
    client: EdgarClient,
    query: FilingQuery,
}

impl EdgarSource {
    pub fn new(client: EdgarClient, query: FilingQuery) -> Self {
        Self { client, query }
    }

    /// Resolve the query and download the document, returning both.
    pub async fn fetch_with_filing(&self) -> Result<(FilingRef, Document)> {
        let filing = self
            .client
            .find_filing(self.query.cik, &self.query.form, self.query.year)
            .await?;
        let html = self.client.fetch_document(&filing).await?;
        let document = sections::document_from_html(&html)?;
        info!(
            segments = document.segments().len(),
            sections = ?document.sections(),
            "Split filing into sections"
        );
        Ok((filing, document))
    }
}

#[async_trait]
impl DocumentSource for EdgarSource {
    fn describe(&self) -> String {
        match self.query.year {
            Some(year) => format!("EDGAR {} {} for CIK {}", year, self.query.form, self.query.cik),
            None => format!("EDGAR latest {} for CIK {}", self.query.form, self.query.cik),
        }
    }

    async fn fetch(&self) -> Result<Document> {
        let (_filing, document) = self.fetch_with_filing().await?;
        Ok(document)
    }
}
