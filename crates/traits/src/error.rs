use thiserror::Error;

/// The two failure channels of [`crate::Processor::process`].
///
/// Callers match on the variant to pick a recovery strategy, e.g. retry on
/// `Io` and abort on `Processing`.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Processing failed: {0}")]
    Processing(#[from] ProcessingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProcessError {
    pub fn is_io(&self) -> bool {
        matches!(self, ProcessError::Io(_))
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, ProcessError::Processing(_))
    }
}

/// Domain failures raised while transforming a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessingError {
    #[error("Malformed input at byte {position}: {message}")]
    Malformed { message: String, position: u64 },

    #[error("Input contains no root element")]
    EmptyDocument,

    #[error("Processor '{processor}' cannot apply transformation '{transform}'")]
    UnsupportedTransform { processor: String, transform: String },

    #[error("Invalid UTF-8 in input: {0}")]
    Encoding(String),

    #[error("Transformation error: {0}")]
    Transform(String),
}

impl From<std::str::Utf8Error> for ProcessingError {
    fn from(e: std::str::Utf8Error) -> Self {
        ProcessingError::Encoding(e.to_string())
    }
}
