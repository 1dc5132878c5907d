use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Upstream fetch from '{service}' failed: {message}")]
    Upstream { service: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    /// Shorthand for the upstream-fetch-failure class. The engine never
    /// analyzes a snapshot whose fetch produced one of these.
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
