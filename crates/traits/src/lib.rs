//! The processor contract shared by every foproc component.
//!
//! A processor consumes a byte stream of XML/FO content together with a
//! precompiled transformation definition and writes the transformed document
//! to a byte sink. Failures are reported through exactly two channels:
//!
//! - **`ProcessError::Processing`**: the transformation cannot complete
//!   (malformed input, unsupported definition, invalid result).
//! - **`ProcessError::Io`**: reading the input or writing the output failed.
//!
//! Implementations live in other crates (`foproc-xml`, the root `foproc`
//! crate); this crate only declares the seams.

pub mod error;
pub mod processor;

pub use error::{ProcessError, ProcessingError};
pub use processor::{CompiledTransform, PROCESSOR_ROLE, Processor, downcast_transform};
