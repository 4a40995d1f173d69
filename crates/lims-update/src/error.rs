use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Key path must be non-empty, e.g. 'action' or 'data.spec_id'.")]
    EmptyKeyPath,

    #[error("Input JSON must have a top-level 'rules' list.")]
    MissingRulesList,

    #[error("Cannot parse {as_type} from '{raw}'")]
    InvalidTypedValue { as_type: &'static str, raw: String },

    #[error("invalid json literal: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, UpdateError>;
