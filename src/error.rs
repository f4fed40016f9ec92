use thiserror::Error;

pub type PricebookResult<T> = Result<T, PricebookError>;

#[derive(Error, Debug)]
pub enum PricebookError {
    #[error("no pricing workbook found (tried: {0})")]
    SourceNotFound(String),

    #[error("cannot parse workbook '{path}': {reason}")]
    UnreadableFormat { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("artifact serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("profile error: {0}")]
    Profile(#[from] serde_yaml::Error),
}
