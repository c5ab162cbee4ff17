use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid cart: {reason}")]
    InvalidCart { reason: String },

    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BookingError::ApiError(_) | BookingError::UnexpectedStatus { .. } => {
                ErrorCategory::Network
            }
            BookingError::IoError(_) => ErrorCategory::Storage,
            BookingError::ConfigError { .. }
            | BookingError::InvalidConfigValueError { .. }
            | BookingError::MissingConfigError { .. } => ErrorCategory::Configuration,
            BookingError::SerializationError(_) | BookingError::InvalidCart { .. } => {
                ErrorCategory::Data
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常可以重試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BookingError::ApiError(e) if e.is_timeout() => {
                "The booking service did not respond in time".to_string()
            }
            BookingError::ApiError(_) => "Could not reach the booking service".to_string(),
            BookingError::UnexpectedStatus { status, .. } => {
                format!("The booking service answered with HTTP {}", status)
            }
            BookingError::IoError(e) => format!("Could not access local cart storage: {}", e),
            BookingError::SerializationError(_) => "Received malformed data".to_string(),
            BookingError::InvalidCart { reason } => format!("The cart is not valid: {}", reason),
            BookingError::MissingConfigError { field } => {
                format!("Configuration is missing '{}'", field)
            }
            BookingError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            BookingError::ConfigError { message } => format!("Configuration problem: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your connection and the api.base_url setting, then try again",
            ErrorCategory::Storage => "Make sure storage.cart_dir exists and is writable",
            ErrorCategory::Configuration => "Review the configuration file and fix the reported value",
            ErrorCategory::Data => "Clear the cart with `cart clear` and add the services again",
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
