use crate::core::selection::SelectionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathwayError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("Course not found: {id}")]
    NotFoundError { id: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Selection is not ready: {0}")]
    ValidationError(#[from] SelectionError),

    #[error("Invalid input: {message}")]
    InputError { message: String },

    #[error("Payment error: {message}")]
    PaymentError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    NotFound,
    Configuration,
    Input,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PathwayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PathwayError::ApiError(_) | PathwayError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            PathwayError::NotFoundError { .. } => ErrorCategory::NotFound,
            PathwayError::ConfigError { .. } | PathwayError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            PathwayError::ValidationError(_)
            | PathwayError::InputError { .. }
            | PathwayError::PaymentError { .. } => ErrorCategory::Input,
            PathwayError::IoError(_)
            | PathwayError::SerializationError(_)
            | PathwayError::StorageError { .. } => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PathwayError::ApiError(_) | PathwayError::HttpStatusError { .. } => {
                "Check --api-base-url and that the catalog service is reachable".to_string()
            }
            PathwayError::NotFoundError { .. } => {
                "Run `edu-pathway courses` to browse the available courses".to_string()
            }
            PathwayError::ConfigError { .. } | PathwayError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or the matching command line flag".to_string()
            }
            PathwayError::ValidationError(e) => e.to_string(),
            PathwayError::InputError { .. } => {
                "Pass subjects as subject:grade, e.g. mathematics:A english:B+".to_string()
            }
            PathwayError::PaymentError { .. } => {
                "Re-enter the phone number and the M-Pesa confirmation code".to_string()
            }
            PathwayError::IoError(_)
            | PathwayError::SerializationError(_)
            | PathwayError::StorageError { .. } => {
                "Check --store-dir is writable, or delete the stored files to reset".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PathwayError::ApiError(_) | PathwayError::HttpStatusError { .. } => {
                "Failed to reach the course catalog. Please try again later.".to_string()
            }
            PathwayError::NotFoundError { id } => format!("Course '{}' was not found.", id),
            PathwayError::ValidationError(e) => e.to_string(),
            PathwayError::InputError { message } | PathwayError::PaymentError { message } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PathwayError>;
