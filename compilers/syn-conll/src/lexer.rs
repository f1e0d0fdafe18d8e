use nom::{
    bytes::complete::take_till1,
    character::complete::multispace0,
    multi::many0,
    sequence::preceded,
    IResult,
};

/// One column: any run of non-whitespace, after optional leading whitespace.
fn column(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, take_till1(char::is_whitespace))(input)
}

/// Split a token line into its columns.
///
/// Any run of whitespace separates columns, so tab- and space-aligned files
/// both read; trailing whitespace is ignored.
pub fn split_columns(line: &str) -> Vec<&str> {
    match many0(column)(line) {
        Ok((_, columns)) => columns,
        Err(_) => Vec::new(),
    }
}
