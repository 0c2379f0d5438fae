use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiDesignerError {
    #[error("io error: `{0}`")]
    IoError(#[from] std::io::Error),

    #[error("Failed to (de)serialize stored data: `{0}`")]
    SerdeError(#[from] serde_json::Error),

    #[error("{kind} '{id}' was not found")]
    NotFound {
        kind: &'static str,
        id: String,
    },

    #[error("Invalid value for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Stored collection '{key}' has version {version}, newest supported version is {supported}")]
    UnsupportedStoreVersion {
        key: String,
        version: u32,
        supported: u32,
    },

    #[error("Invalid value '{value}' for {kind}")]
    InvalidValue {
        kind: &'static str,
        value: String,
    },
}

impl ApiDesignerError {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ApiDesignerError::NotFound { kind, id: id.into() }
    }

    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ApiDesignerError::Validation { field, message: message.into() }
    }
}

pub type Result<T = ()> = std::result::Result<T, ApiDesignerError>;
