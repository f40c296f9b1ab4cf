//! Error types shared across HorizonLock crates.

/// Top-level error type for HorizonLock operations.
#[derive(Debug, thiserror::Error)]
pub enum HorizonError {
    #[error("Sensor error: {message}")]
    Sensor { message: String },

    #[error("Calibration error: {message}")]
    Calibration { message: String },

    #[error("Warp error: {message}")]
    Warp { message: String },

    #[error("Session error: {message}")]
    Session { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using HorizonError.
pub type HorizonResult<T> = Result<T, HorizonError>;

impl HorizonError {
    pub fn sensor(msg: impl Into<String>) -> Self {
        Self::Sensor {
            message: msg.into(),
        }
    }

    pub fn calibration(msg: impl Into<String>) -> Self {
        Self::Calibration {
            message: msg.into(),
        }
    }

    pub fn warp(msg: impl Into<String>) -> Self {
        Self::Warp {
            message: msg.into(),
        }
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
