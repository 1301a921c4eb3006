/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" which has titles and
/// pairs key-vector of values. A value is an integer, a float, a boolean, a bare word or a double quoted string, so
/// equations with spaces can be written as `equation: "x**2 + 3*x + 2"`.
/// Lines starting with //, # or % are comments.
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{alpha1, alphanumeric1, char, multispace0, space0},
    combinator::{map, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::HashMap;
use std::fmt::Display;

pub type SectionMap = HashMap<String, Vec<Value>>;
pub type DocumentMap = HashMap<String, SectionMap>;
/// section title with its key-value pairs in document order, before duplicates are checked
type RawSection = (String, Vec<(String, Vec<Value>)>);

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    /// integers are accepted wherever a float is expected
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// word characters and underscores, not starting with a digit
fn parse_identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

/// Parses a title; whitespace after it is dropped
fn parse_title(input: &str) -> IResult<&str, String> {
    let (input, result) = parse_identifier(input)?;
    Ok((input.trim_start(), result))
}

fn parse_key(input: &str) -> IResult<&str, String> {
    parse_identifier(input)
}

fn parse_quoted(input: &str) -> IResult<&str, Value> {
    let mut parser = map(
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        |s: &str| Value::String(s.to_string()),
    );
    parser.parse(input)
}

fn parse_bare(input: &str) -> IResult<&str, Value> {
    // everything up to a comma, whitespace or semicolon
    let mut parser = map(
        take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\n' | '\r' | ';' | '"')),
        |s: &str| {
            if let Ok(val) = s.parse::<i64>() {
                Value::Integer(val)
            } else if let Ok(val) = s.parse::<f64>() {
                Value::Float(val)
            } else if let Ok(val) = s.parse::<bool>() {
                Value::Boolean(val)
            } else {
                Value::String(s.to_string())
            }
        },
    );
    parser.parse(input)
}

fn parse_value(input: &str) -> IResult<&str, Value> {
    alt((parse_quoted, parse_bare)).parse(input)
}

fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let (input, _) = space0(input)?;
    let separator_coma = delimited(space0, tag(","), space0);
    separated_list0(separator_coma, parse_value).parse(input)
}

/// Parses `key: value, value`; trailing whitespace is dropped
fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let mut parser = separated_pair(parse_key, colon_separator, parse_value_list);
    let (input, result) = parser.parse(input)?;
    Ok((input.trim_start(), result))
}

/// Parses a section with a title and at least one key-value pair
fn parse_section(input: &str) -> IResult<&str, RawSection> {
    let (input, _) = space0(input)?;
    let (input, title) = parse_title(input)?;
    let (input, _) = multispace0(input)?;
    let (input, pairs) = many1(terminated(parse_key_value_pair, space0)).parse(input)?;
    Ok((input, (title, pairs)))
}

/// Drops comment lines (starting with //, # or %) and blank lines
fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the sections of a document without comments
fn parse_document(input: &str) -> IResult<&str, Vec<RawSection>> {
    let mut parser = many1(delimited(space0, parse_section, multispace0));
    parser.parse(input)
}

/// Builds the document map; a repeated section title or a repeated key within a section
/// is an error.
fn into_document_map(sections: Vec<RawSection>) -> Result<DocumentMap, String> {
    let mut document = DocumentMap::new();
    for (title, pairs) in sections {
        if document.contains_key(&title) {
            return Err(format!("Section '{}' appears more than once", title));
        }
        let mut section = SectionMap::new();
        for (key, values) in pairs {
            if section.insert(key.clone(), values).is_some() {
                return Err(format!(
                    "Key '{}' appears more than once in section '{}'",
                    key, title
                ));
            }
        }
        document.insert(title, section);
    }
    Ok(document)
}

/// Parses a whole document; fails if anything is left unparsed
pub fn parse_document_as(input: &str) -> Result<DocumentMap, String> {
    let filtered = filter_comments(input);
    match parse_document(&filtered) {
        Ok((remaining, parsed)) => {
            if !remaining.trim().is_empty() {
                return Err(format!(
                    "Failed to parse entire document. Remaining: '{}'",
                    remaining
                ));
            }
            into_document_map(parsed)
        }
        Err(e) => Err(format!("Parsing error: {:?}", e)),
    }
}

/////////////////////////////TESTS////////////////////////////////////////////////////
