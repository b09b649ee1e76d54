// Document sources — where a filing's text comes from.
//
// Like the lexicon, the pipeline never cares how the document was obtained.
// Sources are async because the main one (EDGAR) goes over HTTP.

pub mod file;

use anyhow::Result;
use async_trait::async_trait;

use crate::document::Document;

/// Supplies one validated document per call.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Short human-readable description for logs and reports.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Document>;
}
