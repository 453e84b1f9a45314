//! Data-file emission and re-parsing.
//!
//! The engine's input contract is a set of fixed-format key-value text
//! files. This module owns that wire format; the configurators hand it
//! fully validated records only.

mod datafile;

pub use datafile::{DataFile, DataFileError, Record, Value};
