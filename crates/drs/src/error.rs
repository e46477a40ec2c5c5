//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// archive ended while reading {what}
    #[error("archive ended while reading {what}: expected {expected} bytes, got {actual}")]
    TruncatedInput {
        /// The structure being read
        what: &'static str,
        /// Bytes required
        expected: u64,
        /// Bytes available before the end of the archive
        actual: u64,
    },

    /// unsupported archive version
    #[error("unsupported archive version {0:?}, expected \"1.00\"")]
    UnsupportedVersion(String),

    /// unsupported archive type
    #[error("unsupported archive type {0:?}, expected \"tribe\"")]
    UnsupportedType(String),

    /// archive declares too many tables
    #[error("archive declares {count} tables, the limit is {limit}")]
    #[diagnostic(help("the archive is most likely corrupt"))]
    TooManyTables {
        /// Declared table count
        count: u32,
        /// Exclusive upper bound
        limit: u32,
    },

    /// table declares too many files
    #[error("table declares {count} files, the limit is {limit}")]
    #[diagnostic(help("the archive is most likely corrupt"))]
    TooManyFiles {
        /// Declared file count
        count: u32,
        /// Exclusive upper bound
        limit: u32,
    },

    /// unable to seek to {offset}
    #[error("unable to seek to offset {offset}")]
    SeekError {
        /// Absolute offset requested
        offset: u64,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// generated file name is too long
    #[error("output name {name:?} is {len} characters long, the limit is {limit}")]
    NameTooLong {
        /// The rendered name
        name: String,
        /// Length of the rendered name in characters
        len: usize,
        /// Inclusive upper bound
        limit: usize,
    },

    /// no table at index {0}
    #[error("no table at index {0}")]
    TableNotFound(usize),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
