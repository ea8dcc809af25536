/// Error types for loading, plotting and saving.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading a history log into a column table.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("header truncated: needed {needed} lines, found {found}")]
    TruncatedHeader { needed: usize, found: usize },
    #[error("header has {names} attribute names but {values} values")]
    AttributeMismatch { names: usize, values: usize },
    #[error("line {line}: expected {expected} values, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}, column '{column}': cannot parse '{token}' as a number")]
    BadNumber {
        line: usize,
        column: String,
        token: String,
    },
    #[error("no column named '{0}'")]
    MissingColumn(String),
    #[error("column '{name}' has {found} rows, table has {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
}

/// Failures while rendering a plot request into the figure.
#[derive(Error, Debug, PartialEq)]
pub enum PlotError {
    #[error("no column named '{0}'")]
    UnknownColumn(String),
}

/// Failures while writing the rendered figure to disk.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("no file name given")]
    EmptyPath,
    #[error("unsupported image format: '{0}'")]
    UnsupportedFormat(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Top-level failure returned from `main`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to load run: {0}")]
    Load(#[from] LoadError),
    #[error("GUI error: {0}")]
    Gui(#[from] eframe::Error),
}
