//! Error types for catalog loading and page binding

use crate::core::catalog::Currency;

/// Failure while loading the price catalog. Any of these fails the whole fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request for {currency} prices failed: {reason}")]
    Transport { currency: Currency, reason: String },

    #[error("Price API returned status {status} for {currency}")]
    Status { currency: Currency, status: u16 },

    #[error("Invalid {currency} price payload: {reason}")]
    Decode { currency: Currency, reason: String },
}

impl FetchError {
    pub fn currency(&self) -> Currency {
        match self {
            FetchError::Transport { currency, .. }
            | FetchError::Status { currency, .. }
            | FetchError::Decode { currency, .. } => *currency,
        }
    }
}

/// Failure to write a value into the page
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BindingError {
    #[error("No element matches `{selector}`")]
    Missing { selector: String },

    #[error("Failed to update `{selector}`: {reason}")]
    Dom { selector: String, reason: String },
}

impl BindingError {
    pub fn missing(selector: impl Into<String>) -> Self {
        BindingError::Missing {
            selector: selector.into(),
        }
    }

    pub fn dom(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        BindingError::Dom {
            selector: selector.into(),
            reason: reason.into(),
        }
    }
}
