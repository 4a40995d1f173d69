use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Invalid mode '{0}'.")]
    UnknownMode(String),

    #[error("parametertype_id must be a positive integer (got {0}).")]
    NonPositiveParameterId(i64),

    #[error("{mode} requires numeric target.")]
    MissingTarget { mode: &'static str },

    #[error("target must not be negative (got {0}).")]
    NegativeTarget(f64),

    #[error("Qualitative mode requires both match texts (EN and DE, non-empty).")]
    MissingQualitativeText,

    #[error("deviation% must be between 0 and 50 (got {0}).")]
    DeviationOutOfRange(f64),

    #[error("unknown nutrition parametertype_id {0}")]
    UnknownNutritionParameter(i64),
}

pub type Result<T> = std::result::Result<T, EngineError>;
