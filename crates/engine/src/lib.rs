//! Split allocation engine.
//!
//! Given a total and a list of participants, the engine distributes the
//! total under a [`SplitStrategy`] and reports whether the resulting shares
//! add up to it. The pure entry point is [`recompute`]; [`ExpenseDraft`]
//! wraps it with the mutations of an expense being edited.
//!
//! The engine does no I/O. Who the participants are and what happens to the
//! result once saved are up to the caller.

pub use allocation::{
    Allocation, FULL_PERCENT, PERCENT_EPSILON, ParticipantShare, normalize_percentages,
    recompute,
};
pub use commands::{DraftEvent, UserInput};
pub use currency::Currency;
pub use draft::{DraftState, ExpenseDraft, Submission};
pub use error::EngineError;
pub use money::MoneyCents;
pub use participant::{Participant, ParticipantId, RawValue};
pub use strategy::SplitStrategy;
pub use validation::{DraftIssue, conserves};

mod allocation;
mod commands;
mod currency;
mod draft;
mod error;
mod money;
mod participant;
mod strategy;
mod validation;

type ResultEngine<T> = Result<T, EngineError>;
