//! Error kinds raised by the line processing core.
//!
//! Every variant is fatal: the core never retries or recovers locally, it
//! hands the error straight back to the caller which reports it and exits.

use std::io;

use crate::color::Channel;

/// Errors that can occur while reading, classifying and rendering lines.
#[derive(Debug, thiserror::Error)]
pub enum ColorizeError {
    #[error("less than {expected} bytes read")]
    Read {
        expected: usize,
        #[source]
        source: io::Error,
    },

    #[error("write failed")]
    Write {
        #[source]
        source: io::Error,
    },

    #[error("{channel} color '{name}' not recognized")]
    UnknownColor { channel: Channel, name: String },

    #[error("no escape sequence policy for {mode} mode")]
    InvalidEscapePolicy { mode: &'static str },
}

impl ColorizeError {
    pub(crate) fn write(source: io::Error) -> Self {
        Self::Write { source }
    }
}

pub type Result<T> = std::result::Result<T, ColorizeError>;
