use crate::registry::RegistryError;
use foproc_rules::RuleError;
use foproc_traits::ProcessError;
use thiserror::Error;

/// Top-level error for callers that load rules, look up processors and run
/// them in one go (the CLI in particular).
#[derive(Error, Debug)]
pub enum FoprocError {
    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("Rule set error: {0}")]
    Rules(#[from] RuleError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FoprocError {
    /// Process exit code: 2 for transport failures, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            FoprocError::Io(_) => 2,
            FoprocError::Process(e) if e.is_io() => 2,
            _ => 1,
        }
    }
}
