use std::io;
use thiserror::Error;

pub type Result<T, E = SeqIoError> = std::result::Result<T, E>;

/// Errors from sequence reading, writing and chunking.
#[derive(Debug, Error)]
pub enum SeqIoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed input.
    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    /// Invalid mode/format combination or other bad setting.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A single record does not fit into the chunk buffer.
    #[error("Record does not fit into a chunk buffer of {buffer_size} bytes")]
    BufferOverflow { buffer_size: usize },
}

impl SeqIoError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    pub(crate) fn format_at(line: usize, message: impl AsRef<str>) -> Self {
        Self::InvalidFormat {
            message: format!("line {line}: {}", message.as_ref()),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
