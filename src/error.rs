use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::input::SourceKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A byte block of the wrong width was handed to the decoder.
    /// Non-fatal: drop the block and keep reading.
    #[error("malformed input_event record: expected {expected} bytes, got {actual}")]
    MalformedRecord { expected: usize, actual: usize },

    /// The event device could not be opened or read.
    #[error("input source {path:?} unavailable: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no readable input device matches {0}")]
    NoMatchingDevice(String),

    #[error("raw code {0:#x} is mapped more than once")]
    DuplicateMapping(u16),

    /// A reader was given a source whose codes the tracker's table cannot read.
    #[error("{actual} source cannot feed a table built for {expected} codes")]
    SourceMismatch {
        expected: SourceKind,
        actual: SourceKind,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
