use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum BuyableError {
    #[error("Unknown spec attribute: {0}")]
    UnknownSpecAttribute(String),

    #[error("Unknown buyable attribute: {0}")]
    UnknownBuyableAttribute(String),

    #[error("Didn't specify a spec or it's not a single spec buyable model")]
    SpecNotSpecified,

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Spec not found: {0}")]
    SpecNotFound(String),

    #[error("Entity attributes must serialize to an object, got {0}")]
    NotAnObject(String),

    #[error("Owner has not been saved yet")]
    NotPersisted,

    #[error("Owner not found: {kind} {id}")]
    OwnerNotFound { kind: String, id: Uuid },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl BuyableError {
    /// True for the errors a caller triggers by passing a bad key, value or
    /// selection, as opposed to storage and serialization failures.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            BuyableError::UnknownSpecAttribute(_)
                | BuyableError::UnknownBuyableAttribute(_)
                | BuyableError::SpecNotSpecified
                | BuyableError::InvalidValue { .. }
                | BuyableError::SpecNotFound(_)
        )
    }

    pub(crate) fn invalid_value(field: &str, reason: impl Into<String>) -> Self {
        BuyableError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuyableError>;
