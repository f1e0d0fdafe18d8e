//! CoNLL-X reading and writing.
//!
//! One token per line, ten whitespace-separated columns
//! (`ID FORM LEMMA CPOSTAG POSTAG FEATS HEAD DEPREL PHEAD PDEPREL`),
//! `_` for empty values, `|` between features, `#` lines as sentence
//! comments and a blank line after every sentence.

pub mod columns;
pub mod error;
pub mod lexer;
pub mod reader;
pub mod writer;

pub use error::ConllError;
pub use reader::{parse_corpus, parse_sentence, parse_token, read_corpus};
pub use writer::{format_corpus, format_sentence, format_token, write_corpus};
