//! Conservation check and save-readiness issues.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::MoneyCents;

/// Returns `true` when `shares` add up exactly to `total`.
///
/// Both sides are whole cents, so this is the "equal once rounded to 2
/// decimals" comparison. An overflowing sum never conserves.
///
/// ```rust
/// use engine::{MoneyCents, conserves};
///
/// let shares = [MoneyCents::new(3_00), MoneyCents::new(7_00)];
/// assert!(conserves(MoneyCents::new(10_00), shares));
/// assert!(!conserves(MoneyCents::new(10_01), shares));
/// ```
#[must_use]
pub fn conserves(total: MoneyCents, shares: impl IntoIterator<Item = MoneyCents>) -> bool {
    shares
        .into_iter()
        .try_fold(MoneyCents::ZERO, MoneyCents::checked_add)
        .is_some_and(|sum| sum == total)
}

/// Why a draft cannot be saved yet, in the order the checks run.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum DraftIssue {
    #[error("Enter an amount to start splitting")]
    MissingAmount,
    #[error("Split amounts don't match the total sum of {total}")]
    SplitMismatch { total: MoneyCents },
    #[error("Add a description for the expense")]
    MissingDescription,
}

impl DraftIssue {
    /// Whether the issue means the split itself is wrong, as opposed to
    /// something the user simply has not filled in yet.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::SplitMismatch { .. })
    }
}
