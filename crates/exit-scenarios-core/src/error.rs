use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExitScenariosError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Tax calculation failed: {0}")]
    TaxCalculation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ExitScenariosError {
    fn from(e: serde_json::Error) -> Self {
        ExitScenariosError::SerializationError(e.to_string())
    }
}

impl From<serde_yaml::Error> for ExitScenariosError {
    fn from(e: serde_yaml::Error) -> Self {
        ExitScenariosError::Config(e.to_string())
    }
}
