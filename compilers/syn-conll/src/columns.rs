//! Conversions between raw column text and typed token fields.
//!
//! A lone `_` stands for "no value" in every column, so a genuine `_` word
//! reads back as absent. That ambiguity is part of the format.

use crate::error::ConllError;

pub const NULL: &str = "_";
pub const LIST_SEPARATOR: char = '|';
pub const COMMENT_MARKER: char = '#';

pub fn read_index(column: &'static str, raw: &str) -> Result<Option<usize>, ConllError> {
    if raw == NULL {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| ConllError::InvalidInteger {
        column,
        value: raw.to_string(),
    })
}

pub fn read_str(raw: &str) -> Option<String> {
    if raw == NULL {
        None
    } else {
        Some(raw.to_string())
    }
}

pub fn read_list(raw: &str) -> Vec<String> {
    if raw == NULL {
        Vec::new()
    } else {
        raw.split(LIST_SEPARATOR).map(str::to_string).collect()
    }
}

pub fn write_index(value: Option<usize>) -> String {
    match value {
        Some(index) => index.to_string(),
        None => NULL.to_string(),
    }
}

pub fn write_str(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NULL)
}

pub fn write_list(values: &[String]) -> String {
    if values.is_empty() {
        NULL.to_string()
    } else {
        values.join("|")
    }
}
