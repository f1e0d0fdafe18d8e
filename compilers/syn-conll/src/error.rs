use std::path::PathBuf;
use syn_protocol::StructureError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConllError {
    #[error("wrong number of columns in token line: expected 10, found {found}")]
    FieldCount { found: usize },

    #[error("{column} column holds {value:?}, which is neither `_` nor an unsigned integer")]
    InvalidInteger { column: &'static str, value: String },

    #[error("malformed dependency tree")]
    Structure(#[from] StructureError),

    #[error("line {line}")]
    Line {
        line: usize,
        #[source]
        source: Box<ConllError>,
    },

    #[error("sentence {index}")]
    Sentence {
        index: usize,
        #[source]
        source: Box<ConllError>,
    },

    #[error("failed to parse {}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<ConllError>,
    },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConllError {
    /// True when the error only says that the file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConllError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }

    /// The innermost error, past the line/sentence/file context.
    pub fn root_cause(&self) -> &ConllError {
        match self {
            ConllError::Line { source, .. }
            | ConllError::Sentence { source, .. }
            | ConllError::File { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
