//! A streaming XML implementation of the foproc `Processor` contract.
//!
//! [`XmlProcessor`] reads XML/FO events from the input with `quick-xml`,
//! rewrites elements according to a compiled [`foproc_rules::RuleSet`], and
//! writes the result to the output as it goes. Memory use is bounded by the
//! nesting depth of the document, not its size.

pub mod config;
pub mod error;
pub mod processor;

pub use config::XmlProcessorConfig;
pub use processor::XmlProcessor;
