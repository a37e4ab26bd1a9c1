//! foproc: stream XML/FO documents through precompiled rewrite rules.
//!
//! The crate ties the workspace together:
//!
//! - the [`Processor`] contract and its error channels (`foproc-traits`);
//! - [`RuleSet`], the compiled transformation definition (`foproc-rules`);
//! - [`XmlProcessor`], the streaming implementation (`foproc-xml`);
//! - [`PassthroughProcessor`], a byte-for-byte identity processor;
//! - [`ProcessorRegistry`], role-keyed lookup of processors;
//! - [`pipeline`] helpers for byte buffers and files.

pub mod error;
pub mod passthrough;
pub mod pipeline;
pub mod registry;

pub use error::FoprocError;
pub use passthrough::PassthroughProcessor;
pub use pipeline::{load_rules, process_bytes, process_files, process_to_file};
pub use registry::{PASSTHROUGH_ROLE, ProcessorRegistry, RegistryError};

pub use foproc_rules::{Action, AttributeEdits, RuleError, RuleSet};
pub use foproc_traits::{
    CompiledTransform, PROCESSOR_ROLE, ProcessError, ProcessingError, Processor,
};
pub use foproc_xml::{XmlProcessor, XmlProcessorConfig};
