use serde_json::Value;

/// Failures talking to the node or one of the HTTP services.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} is not supported by this node")]
    NotSupported(&'static str),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{url} returned {status}: {body}")]
    Status { url: String, status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("read-only call failed: {0}")]
    ReadOnly(String),
}

/// Script failure, one variant per class of error the scripts report.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Missing or malformed arguments. `usage` and `example` go to stderr.
    #[error("{message}")]
    Usage {
        message: String,
        usage: &'static str,
        example: &'static str,
    },
    #[error("{0} environment variable is required")]
    MissingEnv(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error(transparent)]
    Network(#[from] ApiError),
    #[error("transaction rejected: {error}{}", .reason.as_deref().map(|r| format!(" ({r})")).unwrap_or_default())]
    Rejected {
        txid: String,
        error: String,
        reason: Option<String>,
        reason_data: Option<Value>,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScriptError {
    pub fn validation(message: impl Into<String>) -> Self {
        ScriptError::Validation(message.into())
    }
}
