//! Error types shared across the crate.

use std::io;
use thiserror::Error;

/// Errors raised by track I/O and the streaming algebra.
#[derive(Error, Debug)]
pub enum TrackError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid interval: start ({start}) must be less than end ({end})")]
    InvalidInterval { start: i64, end: i64 },

    #[error(
        "Input not sorted: feature ({start}, {end}) comes after ({prev_start}, {prev_end})"
    )]
    Unsorted {
        prev_start: i64,
        prev_end: i64,
        start: i64,
        end: i64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Field mismatch: expected {expected} trailing columns, stream {stream} has {found}")]
    FieldMismatch {
        stream: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unknown chromosome: {0}")]
    UnknownChromosome(String),
}

pub type Result<T> = std::result::Result<T, TrackError>;
