//! Input events for an expense draft.
//!
//! Every way the expense screen can change a draft is one [`DraftEvent`].
//! Events are serde-friendly so a sequence of them can be stored or replayed
//! against a fresh draft with [`ExpenseDraft::apply`](crate::ExpenseDraft::apply).

use serde::{Deserialize, Serialize};

use crate::{MoneyCents, ParticipantId, RawValue, SplitStrategy};

/// A value as typed by the user: either text from an input field or an
/// already numeric value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserInput {
    Number(f64),
    Text(String),
}

impl UserInput {
    /// Reads the input as money; invalid or negative input is zero.
    #[must_use]
    pub fn to_money(&self) -> MoneyCents {
        match self {
            Self::Number(value) => MoneyCents::from_major(*value).clamp_non_negative(),
            Self::Text(text) => MoneyCents::parse_lenient(text),
        }
    }

    /// Reads the input as a raw participant value; invalid input is zero.
    #[must_use]
    pub fn to_raw_value(&self) -> RawValue {
        match self {
            Self::Number(value) => RawValue::new(*value),
            Self::Text(text) => RawValue::parse_lenient(text),
        }
    }
}

impl From<&str> for UserInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for UserInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DraftEvent {
    SetTotal {
        amount: UserInput,
    },
    SetStrategy {
        strategy: SplitStrategy,
    },
    AddParticipant {
        id: ParticipantId,
        #[serde(default)]
        name: Option<String>,
    },
    RemoveParticipant {
        id: ParticipantId,
    },
    SetRawValue {
        id: ParticipantId,
        value: UserInput,
    },
    SetPayer {
        id: ParticipantId,
    },
    SetDescription {
        description: String,
    },
}
