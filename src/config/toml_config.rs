use crate::core::resolver::DEFAULT_CART_KEY;
use crate::core::submitter::{BookingDefaults, DEFAULT_PLACEHOLDER, DEFAULT_PREFERRED_TIME};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{
    validate_cart_key, validate_endpoint_path, validate_non_empty_string, validate_path,
    validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BOOKING_PATH: &str = "/api/bookings";
pub const DEFAULT_PROFILE_PATH: &str = "/api/profile";
pub const DEFAULT_CART_DIR: &str = "./.cart";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: Option<StorageConfig>,
    pub booking: Option<BookingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub booking_path: Option<String>,
    pub profile_path: Option<String>,
    pub auth_token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl ApiConfig {
    pub fn booking_path(&self) -> &str {
        self.booking_path.as_deref().unwrap_or(DEFAULT_BOOKING_PATH)
    }

    pub fn profile_path(&self) -> &str {
        self.profile_path.as_deref().unwrap_or(DEFAULT_PROFILE_PATH)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub cart_dir: Option<String>,
    pub cart_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    pub placeholder: Option<String>,
    pub preferred_time: Option<String>,
    pub notes: Option<String>,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BOOKING_API_TOKEN})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BookingError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn cart_dir(&self) -> &str {
        self.storage
            .as_ref()
            .and_then(|s| s.cart_dir.as_deref())
            .unwrap_or(DEFAULT_CART_DIR)
    }

    pub fn cart_key(&self) -> &str {
        self.storage
            .as_ref()
            .and_then(|s| s.cart_key.as_deref())
            .unwrap_or(DEFAULT_CART_KEY)
    }

    pub fn booking_defaults(&self) -> BookingDefaults {
        let booking = self.booking.as_ref();
        BookingDefaults {
            placeholder: booking
                .and_then(|b| b.placeholder.clone())
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
            preferred_time: booking
                .and_then(|b| b.preferred_time.clone())
                .unwrap_or_else(|| DEFAULT_PREFERRED_TIME.to_string()),
            notes: booking.and_then(|b| b.notes.clone()),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        validate_endpoint_path("api.booking_path", self.api.booking_path())?;
        validate_endpoint_path("api.profile_path", self.api.profile_path())?;

        if let Some(timeout) = self.api.timeout_seconds {
            validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }

        // 未替換的 ${VAR} 代表環境變數沒設定
        if let Some(token) = &self.api.auth_token {
            if token.starts_with("${") {
                return Err(BookingError::MissingConfigError {
                    field: format!("api.auth_token ({})", token),
                });
            }
        }

        validate_path("storage.cart_dir", self.cart_dir())?;
        validate_cart_key("storage.cart_key", self.cart_key())?;

        let defaults = self.booking_defaults();
        validate_non_empty_string("booking.placeholder", &defaults.placeholder)?;
        validate_non_empty_string("booking.preferred_time", &defaults.preferred_time)?;

        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
