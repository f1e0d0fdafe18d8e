use crate::columns::{write_index, write_list, write_str};
use crate::error::ConllError;
use std::fs;
use std::path::Path;
use syn_protocol::{Corpus, Sentence, Token};

/// Printed in place of the synthetic root, which has no CoNLL row.
pub const ROOT_LABEL: &str = "__ROOT__";

/// Inverse of [`parse_token`](crate::parse_token): ten tab-separated columns.
pub fn format_token(token: &Token) -> String {
    if token.is_root() {
        return ROOT_LABEL.to_string();
    }

    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        token.id,
        write_str(&token.word),
        write_str(&token.lemma),
        write_str(&token.cpos),
        write_str(&token.pos),
        write_list(&token.feats),
        write_index(token.head),
        write_str(&token.deprel),
        write_index(token.phead),
        write_str(&token.prel),
    )
}

/// Comments, then one line per token (root excluded), then a blank line.
pub fn format_sentence(sentence: &Sentence) -> String {
    let mut out = String::new();
    for comment in &sentence.comments {
        out.push_str(comment);
        out.push('\n');
    }
    for token in sentence.words() {
        out.push_str(&format_token(token));
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Every present sentence in order; gaps produce no output.
pub fn format_corpus(corpus: &Corpus) -> String {
    corpus.present().map(format_sentence).collect()
}

pub fn write_corpus(path: impl AsRef<Path>, corpus: &Corpus) -> Result<(), ConllError> {
    let path = path.as_ref();
    fs::write(path, format_corpus(corpus)).map_err(|source| ConllError::Io {
        path: path.to_path_buf(),
        source,
    })
}
