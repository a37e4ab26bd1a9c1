//! Mapping of `quick-xml` failures onto the two contract error channels.

use foproc_traits::{ProcessError, ProcessingError};
use std::io;
use std::sync::Arc;

/// Converts reader/writer failures into a [`ProcessError`], keeping transport
/// errors on the `Io` channel.
pub(crate) trait IntoProcessError {
    fn into_process_error(self, position: u64) -> ProcessError;
}

impl IntoProcessError for io::Error {
    fn into_process_error(self, _position: u64) -> ProcessError {
        ProcessError::Io(self)
    }
}

impl IntoProcessError for quick_xml::Error {
    fn into_process_error(self, position: u64) -> ProcessError {
        match self {
            quick_xml::Error::Io(shared) => ProcessError::Io(
                Arc::try_unwrap(shared)
                    .unwrap_or_else(|e| io::Error::new(e.kind(), e.to_string())),
            ),
            other => malformed(other.to_string(), position),
        }
    }
}

impl IntoProcessError for quick_xml::events::attributes::AttrError {
    fn into_process_error(self, position: u64) -> ProcessError {
        malformed(self.to_string(), position)
    }
}

pub(crate) fn malformed(message: impl Into<String>, position: u64) -> ProcessError {
    ProcessingError::Malformed {
        message: message.into(),
        position,
    }
    .into()
}
