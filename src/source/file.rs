// Local file source — a saved document JSON or a plain text file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use super::DocumentSource;
use crate::document::{Document, RawDocument, DEFAULT_SECTION};

pub struct FileSource {
    path: PathBuf,
    /// Section label used when the file is plain text.
    section: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            section: DEFAULT_SECTION.to_string(),
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }

    /// Parse file contents the same way `fetch` would.
    pub fn parse(&self, contents: &str) -> Result<Document> {
        if self.is_json() {
            let raw: RawDocument = serde_json::from_str(contents)
                .with_context(|| format!("Invalid document JSON in {}", self.path.display()))?;
            Ok(Document::from_raw(raw)?)
        } else {
            Ok(Document::from_text(&self.section, contents)?)
        }
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Document> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read document {}", self.path.display()))?;
        let document = self.parse(&contents)?;
        info!(
            path = %self.path.display(),
            segments = document.segments().len(),
            "Loaded document from file"
        );
        Ok(document)
    }
}
