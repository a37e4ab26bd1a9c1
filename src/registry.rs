//! Role-keyed lookup of processors.

use crate::passthrough::PassthroughProcessor;
use foproc_traits::{PROCESSOR_ROLE, Processor};
use foproc_xml::XmlProcessor;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Role under which [`ProcessorRegistry::with_defaults`] registers the
/// passthrough processor.
pub const PASSTHROUGH_ROLE: &str = "passthrough";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("No processor registered for role '{0}'")]
    NotFound(String),

    #[error("Processor registry lock poisoned")]
    LockPoisoned,
}

/// A thread-safe map from role names to shared processors.
#[derive(Default)]
pub struct ProcessorRegistry {
    processors: RwLock<HashMap<String, Arc<dyn Processor>>>,
}

impl fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorRegistry")
            .field("roles", &self.roles())
            .finish()
    }
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// A registry with the streaming XML processor under [`PROCESSOR_ROLE`]
    /// and the passthrough processor under [`PASSTHROUGH_ROLE`].
    pub fn with_defaults() -> Self {
        let mut processors: HashMap<String, Arc<dyn Processor>> = HashMap::new();
        processors.insert(PROCESSOR_ROLE.to_string(), Arc::new(XmlProcessor::default()));
        processors.insert(PASSTHROUGH_ROLE.to_string(), Arc::new(PassthroughProcessor));
        Self {
            processors: RwLock::new(processors),
        }
    }

    /// Registers `processor` under `role`, returning the processor it replaced.
    pub fn register(
        &self,
        role: impl Into<String>,
        processor: Arc<dyn Processor>,
    ) -> Result<Option<Arc<dyn Processor>>, RegistryError> {
        let role = role.into();
        log::debug!("Registering {} for role '{}'", processor.name(), role);
        let mut processors = self
            .processors
            .write()
            .map_err(|_| RegistryError::LockPoisoned)?;
        Ok(processors.insert(role, processor))
    }

    pub fn lookup(&self, role: &str) -> Result<Arc<dyn Processor>, RegistryError> {
        let processors = self
            .processors
            .read()
            .map_err(|_| RegistryError::LockPoisoned)?;
        processors
            .get(role)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(role.to_string()))
    }

    /// Returns `false` if the lock is poisoned.
    pub fn contains(&self, role: &str) -> bool {
        self.processors
            .read()
            .map(|p| p.contains_key(role))
            .unwrap_or(false)
    }

    /// Registered roles in sorted order; empty if the lock is poisoned.
    pub fn roles(&self) -> Vec<String> {
        let mut roles: Vec<String> = self
            .processors
            .read()
            .map(|p| p.keys().cloned().collect())
            .unwrap_or_default();
        roles.sort();
        roles
    }

    pub fn len(&self) -> usize {
        self.processors.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
