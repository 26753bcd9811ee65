use thiserror::Error;

/// Fallback shown when the server gives no usable `detail`.
pub const DEFAULT_API_ERROR: &str = "API call failed";

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Local storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for '{field}': {reason}")]
    Validation { field: String, reason: String },
}

impl StudioError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Message suitable for an alert banner.
    pub fn user_message(&self) -> String {
        match self {
            StudioError::Api { message, .. } => message.clone(),
            StudioError::Transport(e) if e.is_connect() => {
                "Không thể kết nối tới máy chủ đặt lịch".to_string()
            }
            StudioError::Transport(e) => e.to_string(),
            StudioError::Decode(_) => DEFAULT_API_ERROR.to_string(),
            StudioError::Io(e) => e.to_string(),
            StudioError::Storage { .. } => "Dữ liệu lưu trên máy bị hỏng".to_string(),
            StudioError::Config { message } => message.clone(),
            // The banner sits next to the field, so the reason alone reads better.
            StudioError::Validation { reason, .. } => reason.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
