//! Domain error types.

/// Top-level error type for sahamcard.
#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("catalogue error: {reason}")]
    Catalogue { reason: String },

    #[error("unknown ticker: {code}")]
    UnknownTicker { code: String },

    #[error("unknown listing board: {value}")]
    InvalidBoard { value: String },

    #[error("card render error: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&CardError> for std::process::ExitCode {
    fn from(err: &CardError) -> Self {
        let code: u8 = match err {
            CardError::Io(_) => 1,
            CardError::ConfigParse { .. }
            | CardError::ConfigMissing { .. }
            | CardError::ConfigInvalid { .. } => 2,
            CardError::Catalogue { .. } | CardError::InvalidBoard { .. } => 3,
            CardError::UnknownTicker { .. } => 4,
            CardError::Render { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
