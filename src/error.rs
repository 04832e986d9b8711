// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Error types
//!
//! | Variant | Raised by | Session effect |
//! |---------|-----------|----------------|
//! | `InputClosed` | any prompt | aborts the session |
//! | `Console` | terminal read/write | aborts the session |
//! | `Profile` | startup profile collection | aborts the session |
//! | `Storage` | log appends | cycle abandoned, session continues |
//! | `Contract` | absent event / empty id between components | reported, session continues |
//!
//! Invalid interview answers never surface here: they are re-prompted in place.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the emergency console components
#[derive(Debug, Error)]
pub enum Error {
    /// Input reached end-of-file while a prompt was waiting for an answer
    #[error("input stream closed while waiting for an answer")]
    InputClosed,

    /// Terminal I/O failed
    #[error("console I/O failed: {0}")]
    Console(#[source] io::Error),

    /// An append-only log could not be written
    #[error("failed to append to {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A component was handed an absent event or an empty identifier
    #[error("contract violation: {0}")]
    Contract(&'static str),

    /// The reporting profile could not be completed
    #[error("profile collection failed: {0}")]
    Profile(String),
}

impl Error {
    /// Whether this error must end the whole session rather than a single cycle
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::InputClosed | Error::Console(_) | Error::Profile(_)
        )
    }

    /// Whether this error signals a programming mistake rather than an I/O outcome
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Error::Contract(_))
    }
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality_classification() {
        assert!(Error::InputClosed.is_fatal());
        assert!(Error::Console(io::Error::new(io::ErrorKind::BrokenPipe, "pipe")).is_fatal());
        assert!(Error::Profile("closed".into()).is_fatal());

        let storage = Error::Storage {
            path: PathBuf::from("history.log"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!storage.is_fatal());
        assert!(!storage.is_contract_violation());

        let contract = Error::Contract("missing event");
        assert!(!contract.is_fatal());
        assert!(contract.is_contract_violation());
    }

    #[test]
    fn test_storage_message_names_path() {
        let err = Error::Storage {
            path: PathBuf::from("data/history.log"),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        let msg = err.to_string();
        assert!(msg.contains("data/history.log"));
        assert!(msg.contains("disk full"));
    }
}
