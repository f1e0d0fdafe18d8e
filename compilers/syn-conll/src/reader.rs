use crate::columns::{read_index, read_list, read_str, COMMENT_MARKER};
use crate::error::ConllError;
use crate::lexer::split_columns;
use std::fs;
use std::path::Path;
use syn_protocol::{Corpus, Sentence, Token};

/// Parse one CoNLL-X token line (exactly ten columns). IDs start at 1;
/// position 0 belongs to the synthetic root.
pub fn parse_token(line: &str) -> Result<Token, ConllError> {
    let columns = split_columns(line);
    let [id, word, lemma, cpos, pos, feats, head, deprel, phead, prel]: [&str; 10] = columns
        .as_slice()
        .try_into()
        .map_err(|_| ConllError::FieldCount { found: columns.len() })?;

    let id = read_index("ID", id)?.ok_or_else(|| ConllError::InvalidInteger {
        column: "ID",
        value: id.to_string(),
    })?;
    let id = u32::try_from(id)
        .ok()
        .filter(|&id| id > 0)
        .ok_or_else(|| ConllError::InvalidInteger {
            column: "ID",
            value: id.to_string(),
        })?;

    Ok(Token {
        id,
        word: read_str(word),
        lemma: read_str(lemma),
        cpos: read_str(cpos),
        pos: read_str(pos),
        feats: read_list(feats),
        head: read_index("HEAD", head)?,
        deprel: read_str(deprel),
        phead: read_index("PHEAD", phead)?,
        prel: read_str(prel),
        children: Vec::new(),
    })
}

fn build_sentence<'a, I>(lines: I) -> Result<Sentence, ConllError>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let mut sentence = Sentence::new();
    for (line, text) in lines {
        if text.starts_with(COMMENT_MARKER) {
            sentence.push_comment(text);
            continue;
        }
        let token = parse_token(text).map_err(|source| ConllError::Line {
            line,
            source: Box::new(source),
        })?;
        sentence.push(token);
    }
    sentence.finish()?;
    Ok(sentence)
}

/// Parse one sentence block: comment lines then token lines. Line numbers
/// in errors count from 1 at the start of the block.
pub fn parse_sentence(block: &str) -> Result<Sentence, ConllError> {
    build_sentence(
        block
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !line.trim().is_empty()),
    )
}

/// Group the lines of a document into sentence blocks separated by blank
/// lines, keeping 1-based line numbers. Empty blocks are dropped.
fn sentence_blocks(text: &str) -> Vec<Vec<(usize, &str)>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push((i + 1, line));
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Parse a whole document. Line numbers in errors are document lines;
/// sentence numbers count from 1.
pub fn parse_corpus(name: impl Into<String>, text: &str) -> Result<Corpus, ConllError> {
    let sentences = sentence_blocks(text)
        .into_iter()
        .enumerate()
        .map(|(index, block)| {
            build_sentence(block).map_err(|source| ConllError::Sentence {
                index: index + 1,
                source: Box::new(source),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Corpus::from_sentences(name, sentences))
}

/// Read a CoNLL-X file into a corpus named after its path.
pub fn read_corpus(path: impl AsRef<Path>) -> Result<Corpus, ConllError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConllError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let corpus = parse_corpus(path.display().to_string(), &text).map_err(|source| ConllError::File {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;

    log::debug!("Read {} sentences from {}", corpus.len(), path.display());
    Ok(corpus)
}
