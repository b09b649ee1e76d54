// Error taxonomy for the scoring core.
//
// The pipeline never recovers from these on its own: each is raised at the
// stage where it happens and handed straight back to the caller. The binary
// and the retrieval collaborators wrap them in anyhow like everything else.

use thiserror::Error;

/// Which required field of a document segment was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentField {
    Section,
    Text,
}

impl std::fmt::Display for SegmentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentField::Section => f.write_str("section"),
            SegmentField::Text => f.write_str("text"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    /// No segments, no tokens, or nothing left to divide by.
    #[error("document is empty: {0}")]
    EmptyDocument(&'static str),

    #[error("segment {index} is malformed: missing {field}")]
    MalformedDocument { index: usize, field: SegmentField },

    #[error("sentiment lexicon unavailable: {reason}")]
    LexiconUnavailable { reason: String },
}

impl PipelineError {
    pub fn lexicon(reason: impl Into<String>) -> Self {
        PipelineError::LexiconUnavailable {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
