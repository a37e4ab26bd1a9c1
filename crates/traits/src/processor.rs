//! The `Processor` trait and the transformation definitions it consumes.

use crate::error::{ProcessError, ProcessingError};
use std::any::Any;
use std::fmt::Debug;
use std::io::{Read, Write};

/// Registry key identifying the processor contract.
pub const PROCESSOR_ROLE: &str = "foproc_traits::Processor";

/// A reusable, precompiled transformation definition.
///
/// Definitions are immutable once built, so a single instance (usually in an
/// `Arc`) can be shared by any number of concurrent `process` calls.
pub trait CompiledTransform: Send + Sync + Debug {
    /// Returns a human-readable identifier for logging and error messages.
    fn name(&self) -> &str;

    /// Exposes the concrete type so a processor can recover the definition
    /// format it understands.
    fn as_any(&self) -> &dyn Any;
}

/// Transforms an input byte stream into an output byte stream.
///
/// The caller owns both streams and is responsible for closing them. An
/// implementation either writes the complete transformed document and flushes
/// the sink, or returns exactly one [`ProcessError`]. Transport failures must
/// surface as `ProcessError::Io` and are never folded into processing errors.
///
/// The contract makes no promise about reentrancy; every implementation
/// documents its own concurrency guarantees.
pub trait Processor: Send + Sync {
    fn process(
        &self,
        input: &mut dyn Read,
        transform: &dyn CompiledTransform,
        output: &mut dyn Write,
    ) -> Result<(), ProcessError>;

    /// Returns a human-readable name for this processor (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Recovers the concrete definition type `T`, or reports that `processor`
/// cannot apply the given definition.
pub fn downcast_transform<'a, T: CompiledTransform + 'static>(
    processor: &str,
    transform: &'a dyn CompiledTransform,
) -> Result<&'a T, ProcessingError> {
    transform
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| ProcessingError::UnsupportedTransform {
            processor: processor.to_string(),
            transform: transform.name().to_string(),
        })
}
