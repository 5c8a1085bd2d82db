//! EVT Core Library
//!
//! This library provides the binary record codec for EVT event files: a
//! bidirectional field cursor, the fixed-size command parameter records built
//! on top of it, and the catalog that maps command codes to record layouts.

pub mod catalog;
pub mod command_types;
pub mod field;
pub mod record;
pub mod source;

pub use catalog::{CommandCatalog, OpaqueRecord, Record, RecordVariant};
pub use field::{Direction, FieldCursor, Scalar};
pub use record::CommandRecord;
pub use source::{CommandHeader, CommandKind, CommandSource, Event, RawCommand};

/// Result type for evt-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for evt-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cursor overrun: {width} byte field at offset {offset} exceeds block of {size} bytes")]
    Overrun {
        offset: usize,
        width: usize,
        size: usize,
    },

    #[error("Block size mismatch for {code}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        code: String,
        expected: usize,
        actual: usize,
    },

    #[error("Layout mismatch for {code}: declared {declared} bytes, traversal covered {traversed}")]
    LayoutMismatch {
        code: String,
        declared: usize,
        traversed: usize,
    },

    #[error("Unexpected nonzero value ({value}) in reserved field {field}")]
    ReservedField { field: String, value: String },

    #[error("No {kind} command at index {index}")]
    CommandNotFound { kind: CommandKind, index: usize },
}

impl Error {
    /// Returns true for cursor and size errors (the block could not be traversed)
    pub fn is_codec_error(&self) -> bool {
        matches!(
            self,
            Error::Overrun { .. } | Error::SizeMismatch { .. } | Error::LayoutMismatch { .. }
        )
    }

    /// Returns true when a reserved field held a nonzero value
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::ReservedField { .. })
    }
}
