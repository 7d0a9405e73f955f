//! The in-progress state of one expense.
//!
//! An [`ExpenseDraft`] owns the total, the strategy and the participant list
//! of an expense that has not been saved yet. Every mutation runs a full
//! [`recompute`], so shares and the `conserves` flag are always consistent
//! with the inputs, whatever order the edits came in.
//!
//! Mutations never fail. Those that can be refused (duplicate participant,
//! removing the acting user, unknown ids) return `false` and leave the draft
//! untouched.

use serde::{Deserialize, Serialize};

use crate::{
    Allocation, DraftEvent, DraftIssue, EngineError, MoneyCents, Participant, ParticipantId,
    ParticipantShare, RawValue, ResultEngine, SplitStrategy, recompute,
};

/// Whether a draft has anybody to split with yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftState {
    Empty,
    HasParticipants,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExpenseDraft {
    acting_user: ParticipantId,
    payer: ParticipantId,
    total: MoneyCents,
    strategy: SplitStrategy,
    description: String,
    participants: Vec<Participant>,
    conserves: bool,
}

/// What a caller needs to submit a saved draft.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub participants: Vec<ParticipantShare>,
    pub payer: ParticipantId,
    pub total: MoneyCents,
    pub description: String,
}

impl ExpenseDraft {
    /// Creates an empty draft for `acting_user`.
    ///
    /// The acting user is the default payer but is not a participant until
    /// added.
    #[must_use]
    pub fn new(acting_user: impl Into<ParticipantId>) -> Self {
        let acting_user = acting_user.into();
        Self {
            payer: acting_user.clone(),
            acting_user,
            total: MoneyCents::ZERO,
            strategy: SplitStrategy::default(),
            description: String::new(),
            participants: Vec::new(),
            conserves: true,
        }
    }

    /// Opens a draft the way the expense screen does: the acting user is the
    /// only participant.
    #[must_use]
    pub fn open(acting_user: Participant) -> Self {
        let mut draft = Self::new(acting_user.id.clone());
        draft.add_participant(acting_user);
        draft
    }

    /// Opens a draft seeded with a preselected participant list, e.g. the
    /// pair of a one-on-one transaction view.
    ///
    /// Duplicate ids are dropped and the acting user is put first when the
    /// list does not already include them.
    #[must_use]
    pub fn with_participants(
        acting_user: Participant,
        preselected: impl IntoIterator<Item = Participant>,
    ) -> Self {
        let mut draft = Self::new(acting_user.id.clone());
        let mut participants: Vec<Participant> = Vec::new();
        for participant in preselected {
            if !participants.iter().any(|p| p.id == participant.id) {
                participants.push(participant);
            }
        }
        if !participants.iter().any(|p| p.id == draft.acting_user) {
            participants.insert(0, acting_user);
        }
        draft.participants = participants;
        draft.reset_raw_values();
        draft
    }

    pub fn acting_user(&self) -> &ParticipantId {
        &self.acting_user
    }

    /// The payer, once the draft has participants.
    pub fn payer(&self) -> Option<&ParticipantId> {
        self.contains(&self.payer).then_some(&self.payer)
    }

    pub fn total(&self) -> MoneyCents {
        self.total
    }

    pub fn strategy(&self) -> SplitStrategy {
        self.strategy
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Whether the current shares add up to the total.
    pub fn conserves(&self) -> bool {
        self.conserves
    }

    pub fn state(&self) -> DraftState {
        if self.participants.is_empty() {
            DraftState::Empty
        } else {
            DraftState::HasParticipants
        }
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.participants.iter().any(|p| &p.id == id)
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    /// Snapshot of the current shares and conservation flag.
    pub fn allocation(&self) -> Allocation {
        Allocation {
            participants: self.participants.clone(),
            conserves: self.conserves,
        }
    }

    /// Appends a participant with the default raw value of the current
    /// strategy. Returns `false` if the id is already in the draft.
    pub fn add_participant(&mut self, participant: Participant) -> bool {
        if self.contains(&participant.id) {
            tracing::debug!(id = %participant.id, "participant already in draft");
            return false;
        }
        let mut participant = participant;
        participant.raw_value = self
            .strategy
            .default_raw_value(self.total, self.participants.len() + 1);
        participant.share = MoneyCents::ZERO;
        self.participants.push(participant);
        self.repair_payer();
        self.refresh();
        true
    }

    /// Removes a participant. The acting user, unknown ids and the last
    /// remaining participant are refused.
    pub fn remove_participant(&mut self, id: &ParticipantId) -> bool {
        if id == &self.acting_user {
            tracing::debug!(%id, "acting user cannot be removed");
            return false;
        }
        let Some(index) = self.participants.iter().position(|p| &p.id == id) else {
            return false;
        };
        if self.participants.len() == 1 {
            tracing::debug!(%id, "last participant cannot be removed");
            return false;
        }
        self.participants.remove(index);
        self.repair_payer();
        self.refresh();
        true
    }

    /// Replaces one participant's raw value and recomputes every share.
    pub fn set_raw_value(&mut self, id: &ParticipantId, value: impl Into<RawValue>) -> bool {
        let value = value.into();
        let Some(participant) = self.participants.iter_mut().find(|p| &p.id == id) else {
            tracing::debug!(%id, "raw value for unknown participant ignored");
            return false;
        };
        participant.raw_value = value;
        self.refresh();
        true
    }

    /// Same as [`set_raw_value`](Self::set_raw_value) with text typed by the user.
    pub fn set_raw_value_input(&mut self, id: &ParticipantId, input: &str) -> bool {
        self.set_raw_value(id, RawValue::parse_lenient(input))
    }

    /// Sets the total and resets every raw value to the strategy default,
    /// since fixed amounts are derived from the total.
    pub fn set_total(&mut self, total: MoneyCents) {
        self.total = total.clamp_non_negative();
        self.reset_raw_values();
    }

    /// Same as [`set_total`](Self::set_total) with text typed by the user.
    pub fn set_total_input(&mut self, input: &str) {
        self.set_total(MoneyCents::parse_lenient(input));
    }

    /// Switches strategy, resetting every raw value to its default.
    pub fn set_strategy(&mut self, strategy: SplitStrategy) {
        self.strategy = strategy;
        self.reset_raw_values();
    }

    /// Picks who paid. Only participants can pay.
    pub fn set_payer(&mut self, id: &ParticipantId) -> bool {
        if !self.contains(id) {
            tracing::debug!(%id, "payer must be a participant");
            return false;
        }
        self.payer = id.clone();
        true
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into().trim().to_string();
    }

    /// Applies one input event. Returns `false` when the event was refused.
    pub fn apply(&mut self, event: DraftEvent) -> bool {
        match event {
            DraftEvent::SetTotal { amount } => {
                self.set_total(amount.to_money());
                true
            }
            DraftEvent::SetStrategy { strategy } => {
                self.set_strategy(strategy);
                true
            }
            DraftEvent::AddParticipant { id, name } => {
                let mut participant = Participant::new(id);
                participant.name = name;
                self.add_participant(participant)
            }
            DraftEvent::RemoveParticipant { id } => self.remove_participant(&id),
            DraftEvent::SetRawValue { id, value } => self.set_raw_value(&id, value.to_raw_value()),
            DraftEvent::SetPayer { id } => self.set_payer(&id),
            DraftEvent::SetDescription { description } => {
                self.set_description(description);
                true
            }
        }
    }

    /// First reason the draft cannot be saved, if any.
    pub fn issue(&self) -> Option<DraftIssue> {
        if !self.total.is_positive() {
            return Some(DraftIssue::MissingAmount);
        }
        if !self.conserves || self.participants.is_empty() {
            return Some(DraftIssue::SplitMismatch { total: self.total });
        }
        if self.description.is_empty() {
            return Some(DraftIssue::MissingDescription);
        }
        None
    }

    pub fn can_save(&self) -> bool {
        self.issue().is_none()
    }

    /// Read-only snapshot for the submission collaborator.
    pub fn submission(&self) -> ResultEngine<Submission> {
        if let Some(issue) = self.issue() {
            return Err(EngineError::NotReady(issue));
        }
        let payer = self
            .payer()
            .cloned()
            .unwrap_or_else(|| self.acting_user.clone());
        Ok(Submission {
            participants: self.allocation().shares(),
            payer,
            total: self.total,
            description: self.description.clone(),
        })
    }

    fn reset_raw_values(&mut self) {
        let count = self.participants.len();
        let raw_value = self.strategy.default_raw_value(self.total, count);
        for participant in &mut self.participants {
            participant.raw_value = raw_value;
        }
        self.refresh();
    }

    /// Keeps the payer pointing at a participant: the acting user if present,
    /// else the first participant.
    fn repair_payer(&mut self) {
        if self.contains(&self.payer) {
            return;
        }
        let fallback = if self.contains(&self.acting_user) {
            Some(self.acting_user.clone())
        } else {
            self.participants.first().map(|p| p.id.clone())
        };
        if let Some(payer) = fallback {
            self.payer = payer;
        }
    }

    fn refresh(&mut self) {
        let allocation = recompute(self.total, self.strategy, &self.participants);
        self.participants = allocation.participants;
        self.conserves = allocation.conserves;
    }
}
