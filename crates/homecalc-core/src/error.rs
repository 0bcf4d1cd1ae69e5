use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomeCalcError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for HomeCalcError {
    fn from(e: serde_json::Error) -> Self {
        HomeCalcError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for HomeCalcError {
    fn from(e: std::io::Error) -> Self {
        HomeCalcError::Io(e.to_string())
    }
}

impl HomeCalcError {
    pub(crate) fn unknown_variant(field: &str, value: &str, expected: &[&str]) -> Self {
        HomeCalcError::InvalidInput {
            field: field.into(),
            reason: format!("unknown value '{value}', expected one of: {}", expected.join(", ")),
        }
    }
}
