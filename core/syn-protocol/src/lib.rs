//! Shared types for the treebank agreement tools: tokens, sentences wired
//! into dependency trees, and corpora that may carry gaps for missing
//! annotations.

pub mod corpus;
pub mod error;
pub mod model;

// Re-export core types for convenience
pub use corpus::{Corpus, Slot, TokenCount};
pub use error::StructureError;
pub use model::{Sentence, Token};
