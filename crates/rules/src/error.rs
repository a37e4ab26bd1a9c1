use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Pattern parse error in '{0}': {1}")]
    PatternParse(String, String),

    #[error("Invalid rule #{index} ('{pattern}'): {message}")]
    InvalidRule {
        index: usize,
        pattern: String,
        message: String,
    },
}
