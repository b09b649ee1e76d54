// Document — the ordered, section-tagged text of one filing.
//
// Retrieval collaborators hand us a RawDocument (straight off JSON or built
// from a downloaded filing). Validation turns it into a Document, which the
// pipeline then treats as read-only.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result, SegmentField};

/// Label used for a plain-text file that carries no section structure.
pub const DEFAULT_SECTION: &str = "FULL TEXT";

/// One contiguous piece of filing text and the section it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub section: String,
    pub text: String,
}

impl Segment {
    pub fn new(section: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            text: text.into(),
        }
    }
}

/// A validated filing: every segment has a non-blank section label and text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    segments: Vec<Segment>,
}

/// Unvalidated segment, as it arrives from a file or an upstream source.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSegment {
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Unvalidated document shape: `{"segments": [{"section": .., "text": ..}]}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDocument {
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

impl Document {
    /// Build a document from segments, rejecting any with a blank section label.
    ///
    /// Zero segments is allowed here; the pipeline reports it as an empty
    /// document when it runs.
    pub fn new(segments: Vec<Segment>) -> Result<Self> {
        for (index, segment) in segments.iter().enumerate() {
            if segment.section.trim().is_empty() {
                return Err(PipelineError::MalformedDocument {
                    index,
                    field: SegmentField::Section,
                });
            }
        }
        Ok(Self { segments })
    }

    /// Validate a raw document. The first segment missing a field fails the
    /// whole document; nothing is partially accepted.
    pub fn from_raw(raw: RawDocument) -> Result<Self> {
        let mut segments = Vec::with_capacity(raw.segments.len());
        for (index, seg) in raw.segments.into_iter().enumerate() {
            let section = seg.section.ok_or(PipelineError::MalformedDocument {
                index,
                field: SegmentField::Section,
            })?;
            let text = seg.text.ok_or(PipelineError::MalformedDocument {
                index,
                field: SegmentField::Text,
            })?;
            segments.push(Segment { section, text });
        }
        Self::new(segments)
    }

    /// Wrap a single block of text as a one-segment document.
    pub fn from_text(section: &str, text: impl Into<String>) -> Result<Self> {
        Self::new(vec![Segment::new(section, text)])
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Distinct section labels in first-appearance order.
    pub fn sections(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if !seen.contains(&segment.section.as_str()) {
                seen.push(&segment.section);
            }
        }
        seen
    }
}
