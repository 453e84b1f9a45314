//! Fixed-format key-value data files.
//!
//! The engine reads one data file per concern group, each a sequence of
//! `value  =: key` records. Values are typed; formatting is deterministic
//! so that writing and re-parsing a file reproduces the records exactly.
//!
//! # File format
//!
//! ```text
//! # surgerun data file
//! # generated: 2024-03-01 12:00:00 UTC
//! -4.32e4                   =: t0
//! 208                       =: nout
//! 3 3 3                     =: mthlim
//! T                         =: dt_variable
//! center center center      =: auxtype
//! ```
//!
//! Comment lines start with `#` and are ignored on read. Floats are
//! written in scientific notation (Rust's shortest round-trip form), lists
//! space-separated. A single-element list is indistinguishable from a
//! scalar on the wire, so list constructors normalize length-1 input to
//! the scalar variant.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use chrono::Utc;
use thiserror::Error;

/// Error type for data-file operations.
#[derive(Debug, Error)]
pub enum DataFileError {
    /// I/O error during file operations.
    #[error("data file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line is not a `value =: key` record.
    #[error("malformed record at line {line}: '{text}'")]
    MalformedRecord {
        /// 1-based line number.
        line: usize,
        /// Offending line content.
        text: String,
    },

    /// A record carries no value.
    #[error("empty value at line {line} for key '{key}'")]
    EmptyValue {
        /// 1-based line number.
        line: usize,
        /// Key of the offending record.
        key: String,
    },
}

/// One typed record value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Integer scalar.
    Int(i64),
    /// Floating-point scalar, written in scientific notation.
    Float(f64),
    /// Boolean, written `T` / `F`.
    Bool(bool),
    /// Free text (tags, registry rows with paths).
    Str(String),
    /// Integer list, space-separated; always length ≥ 2.
    IntList(Vec<i64>),
    /// Float list, space-separated; always length ≥ 2.
    FloatList(Vec<f64>),
}

impl Value {
    /// Integer list, normalized to a scalar when it has one element.
    pub fn int_list(values: Vec<i64>) -> Self {
        match values.as_slice() {
            [single] => Value::Int(*single),
            _ => Value::IntList(values),
        }
    }

    /// Float list, normalized to a scalar when it has one element.
    pub fn float_list(values: Vec<f64>) -> Self {
        match values.as_slice() {
            [single] => Value::Float(*single),
            _ => Value::FloatList(values),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{:e}", v),
            Value::Bool(true) => write!(f, "T"),
            Value::Bool(false) => write!(f, "F"),
            Value::Str(s) => write!(f, "{}", s),
            Value::IntList(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", v)?;
                }
                Ok(())
            }
            Value::FloatList(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{:e}", v)?;
                }
                Ok(())
            }
        }
    }
}

/// Parse a value from the text left of the `=:` separator.
///
/// Scalars try integer, then boolean, then float, falling back to text.
/// Multi-token values become an integer or float list when every token
/// parses, otherwise text.
fn parse_value(text: &str) -> Option<Value> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        [] => None,
        [token] => Some(parse_scalar(token, text)),
        _ => {
            let ints: Result<Vec<i64>, _> = tokens.iter().map(|t| t.parse::<i64>()).collect();
            if let Ok(ints) = ints {
                return Some(Value::IntList(ints));
            }
            let floats: Result<Vec<f64>, _> = tokens.iter().map(|t| t.parse::<f64>()).collect();
            if let Ok(floats) = floats {
                return Some(Value::FloatList(floats));
            }
            Some(Value::Str(text.to_string()))
        }
    }
}

fn parse_scalar(token: &str, text: &str) -> Value {
    match token {
        "T" => return Value::Bool(true),
        "F" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(i) = token.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(v) = token.parse::<f64>() {
        return Value::Float(v);
    }
    Value::Str(text.to_string())
}

/// One `value =: key` record.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// Field name the engine looks the value up under.
    pub key: String,
    /// Typed value.
    pub value: Value,
}

/// An ordered sequence of records, written as one data file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataFile {
    /// Records in emission order.
    pub records: Vec<Record>,
}

impl DataFile {
    /// Empty data file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        self.records.push(Record {
            key: key.into(),
            value,
        });
    }

    /// Value of the first record with this key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.records
            .iter()
            .find(|record| record.key == key)
            .map(|record| &record.value)
    }

    /// Write the records to `path` with a generation header.
    pub fn write_to(&self, path: &Path) -> Result<(), DataFileError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "# surgerun data file")?;
        writeln!(
            writer,
            "# generated: {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        for record in &self.records {
            writeln!(writer, "{:<24}  =: {}", record.value.to_string(), record.key)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read records back from a file written by [`DataFile::write_to`].
    ///
    /// # Errors
    ///
    /// Returns [`DataFileError::MalformedRecord`] for a non-comment line
    /// without the `=:` separator and [`DataFileError::EmptyValue`] for a
    /// record with nothing left of it.
    pub fn read_from(path: &Path) -> Result<Self, DataFileError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let (value_text, key) = trimmed.split_once("=:").ok_or_else(|| {
                DataFileError::MalformedRecord {
                    line: index + 1,
                    text: trimmed.to_string(),
                }
            })?;
            let key = key.trim().to_string();
            let value =
                parse_value(value_text.trim()).ok_or_else(|| DataFileError::EmptyValue {
                    line: index + 1,
                    key: key.clone(),
                })?;
            records.push(Record { key, value });
        }
        Ok(Self { records })
    }
}
