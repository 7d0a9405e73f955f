//! Participant allocation records.
//!
//! A [`Participant`] is one person splitting an expense. It carries the
//! strategy-dependent input ([`RawValue`]) and the share computed from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::MoneyCents;

/// Stable identifier of a participant inside one draft.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for ParticipantId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ParticipantId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Strategy-dependent input of a participant.
///
/// Ignored by an equal split, a monetary amount (major units) for a fixed
/// split, percentage points for a percentage split and a weight for a shares
/// split.
///
/// The value is always finite and `>= 0`: NaN, infinities and negative
/// numbers are clamped to zero on construction.
///
/// ```rust
/// use engine::RawValue;
///
/// assert_eq!(RawValue::new(2.5).get(), 2.5);
/// assert_eq!(RawValue::new(-1.0), RawValue::ZERO);
/// assert_eq!(RawValue::new(f64::NAN), RawValue::ZERO);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct RawValue(f64);

impl RawValue {
    pub const ZERO: RawValue = RawValue(0.0);
    pub const ONE: RawValue = RawValue(1.0);

    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            Self::ZERO
        }
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Parses what a user typed into a value field. Invalid input is zero.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        match input.trim().replace(',', ".").parse::<f64>() {
            Ok(value) => Self::new(value),
            Err(_) => {
                tracing::debug!(input, "unparseable raw value treated as zero");
                Self::ZERO
            }
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<RawValue> for f64 {
    fn from(value: RawValue) -> Self {
        value.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: Option<String>,
    pub raw_value: RawValue,
    pub share: MoneyCents,
}

impl Participant {
    /// A participant with a raw value of 1 and no share yet.
    #[must_use]
    pub fn new(id: impl Into<ParticipantId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            raw_value: RawValue::ONE,
            share: MoneyCents::ZERO,
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn raw_value(mut self, raw_value: impl Into<RawValue>) -> Self {
        self.raw_value = raw_value.into();
        self
    }

    /// Name to show for this participant, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}
