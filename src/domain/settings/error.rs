use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("filtering pattern is invalid: {0}")]
    InvalidPattern(String),
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        AppError::InvalidConfiguration(err.to_string())
    }
}
