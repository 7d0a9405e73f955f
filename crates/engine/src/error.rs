//! The module contains the errors the engine can return.
//!
//! Allocation itself never fails: bad numeric input is clamped and a split
//! that does not add up is reported through the `conserves` flag. Errors only
//! show up at the edges:
//!
//! - [`InvalidAmount`] from strict money parsing.
//! - [`InvalidCurrency`] for an unsupported currency code.
//! - [`InvalidStrategy`] for an unknown split strategy name.
//! - [`NotReady`] when a draft is asked for a submission it cannot produce.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidCurrency`]: EngineError::InvalidCurrency
//!  [`InvalidStrategy`]: EngineError::InvalidStrategy
//!  [`NotReady`]: EngineError::NotReady
use thiserror::Error;

use crate::DraftIssue;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Unsupported currency: {0}")]
    InvalidCurrency(String),
    #[error("Unknown split strategy: {0}")]
    InvalidStrategy(String),
    #[error("Draft not ready: {0}")]
    NotReady(DraftIssue),
}
