use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdError {
    #[error("Lookup failed in {source_name}: {message}")]
    RetrievalError {
        source_name: String,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Catalog parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl AdError {
    pub fn retrieval(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        AdError::RetrievalError {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// 設定類錯誤可由使用者修正，其餘屬於執行期錯誤
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            AdError::TomlError(_)
                | AdError::ConfigError { .. }
                | AdError::InvalidConfigValueError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AdError>;
