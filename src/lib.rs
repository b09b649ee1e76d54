// filing-tone: financial sentiment profile of annual regulatory filings.
//
// This is the library root. The scoring core (document, lexicon, pipeline)
// does no I/O; edgar, source and output are the collaborators around it.

pub mod config;
pub mod document;
pub mod edgar;
pub mod error;
pub mod lexicon;
pub mod output;
pub mod pipeline;
pub mod source;
