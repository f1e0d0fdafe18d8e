//! Per-annotator corpora assembled from per-document files.
//!
//! Each annotator keeps a directory `D`; their copy of document `doc` lives
//! at `D/<doc><basename(D)>.<ext>`. The corpora built here are aligned
//! sentence by sentence, with gaps where an annotator lacks a document.

pub mod aggregate;
pub mod error;
pub mod format;

pub use aggregate::{aggregate_by_directory, discover_documents};
pub use error::AggregateError;
pub use format::{ConllFormat, DocumentFormat};
