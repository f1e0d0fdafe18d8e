use std::path::PathBuf;
use syn_conll::ConllError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("no annotator directories given")]
    NoDirectories,

    #[error("{} has no directory name to match files against", path.display())]
    UnnamedDirectory { path: PathBuf },

    #[error("failed to list {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ConllError,
    },

    #[error("differing lengths for {document} (first {agreeing} sentences are same length)")]
    DifferingLengths { document: String, agreeing: usize },
}
