use crate::error::AggregateError;
use std::path::Path;
use syn_protocol::{Sentence, TokenCount};

/// How one annotator's copy of a document is found and read.
pub trait DocumentFormat {
    type Item: TokenCount;

    /// File extension without the dot.
    fn extension(&self) -> &str;

    /// Read every annotation in the file. `Ok(None)` means the file does
    /// not exist; any other failure is an error.
    fn load(&self, path: &Path) -> Result<Option<Vec<Self::Item>>, AggregateError>;
}

/// Dependency annotations in CoNLL-X files.
#[derive(Debug, Clone)]
pub struct ConllFormat {
    extension: String,
}

impl Default for ConllFormat {
    fn default() -> Self {
        Self::new("conll")
    }
}

impl ConllFormat {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl DocumentFormat for ConllFormat {
    type Item = Sentence;

    fn extension(&self) -> &str {
        &self.extension
    }

    fn load(&self, path: &Path) -> Result<Option<Vec<Sentence>>, AggregateError> {
        match syn_conll::read_corpus(path) {
            Ok(corpus) => Ok(Some(corpus.slots.into_iter().filter_map(|slot| slot.into_present()).collect())),
            Err(err) if err.is_not_found() => Ok(None),
            Err(source) => Err(AggregateError::Load {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
