//! Pulls `name: number` fields out of a telemetry line.
//!
//! A line is free-form text with any number of fields scattered through it,
//! for example
//!
//! ```text
//! Eventid: 128, Spo2: 96.30, Heart: 89, Pres: 123.80, Temp: 37.30, Audio: 84, Xval: 0.20, Yval: 3.00, Zval: -4.60
//! ```
//!
//! A field is one or more word characters, a colon, exactly one space, and a
//! run of digits, `.` and `-`. Everything between fields is ignored.

use crate::telemetry_record::{TelemetryRecord, Value};

use nom::{
    bytes::complete::{tag, take_while1},
    sequence::separated_pair,
    IResult,
};

use std::{error::Error, fmt, str::FromStr};

/// Returned when a field matched but its literal isn't a number, like
/// `Pres: 1.2.3` or `Temp: -`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The literal for `field` could not be converted
    MalformedNumber {
        /// Name of the offending field
        field: String,
        /// The text that failed to convert
        literal: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedNumber { field, literal } => {
                write!(f, "malformed number {:?} for field {}", literal, field)
            }
        }
    }
}

impl Error for ParseError {}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_literal_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-'
}

fn parse_field_name(s: &str) -> IResult<&str, &str> {
    take_while1(is_word_char)(s)
}

fn parse_literal(s: &str) -> IResult<&str, &str> {
    take_while1(is_literal_char)(s)
}

fn parse_field(s: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(parse_field_name, tag(": "), parse_literal)(s)
}

/// Every field in `line`, leftmost first, without overlaps. When no field
/// starts at the current position we step forward one character and try
/// again.
fn scan_fields(line: &str) -> Vec<(&str, &str)> {
    let mut found = Vec::new();
    let mut rest = line;

    while !rest.is_empty() {
        match parse_field(rest) {
            Ok((remaining, pair)) => {
                found.push(pair);
                rest = remaining;
            }
            Err(_) => {
                let mut chars = rest.chars();
                chars.next();
                rest = chars.as_str();
            }
        }
    }

    found
}

/// Converts a numeric literal by its spelling: a decimal point or exponent
/// marker makes it a float, anything else is an integer.
pub fn classify_literal(literal: &str) -> Option<Value> {
    if literal.contains(['.', 'e', 'E']) {
        literal.parse::<f64>().ok().map(Value::Float)
    } else {
        literal.parse::<i64>().ok().map(Value::Integer)
    }
}

/// Parses one telemetry line into a [`TelemetryRecord`].
///
/// A line without any fields gives an empty record. If a name shows up twice
/// the last value wins.
pub fn parse(line: &str) -> Result<TelemetryRecord, ParseError> {
    let mut record = TelemetryRecord::new();

    for (field, literal) in scan_fields(line) {
        let value = classify_literal(literal).ok_or_else(|| ParseError::MalformedNumber {
            field: field.to_owned(),
            literal: literal.to_owned(),
        })?;
        record.insert(field, value);
    }

    Ok(record)
}

impl FromStr for TelemetryRecord {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
