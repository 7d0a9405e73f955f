//! Mapping between engine values and what the binary prints.

use std::collections::BTreeMap;

use api_types::{
    split::{ShareView, SplitType, SplitView},
    transaction::{CreateTransaction, ParticipantRef},
};
use engine::{Currency, DraftState, ExpenseDraft, SplitStrategy, Submission};

fn split_type(strategy: SplitStrategy) -> SplitType {
    match strategy {
        SplitStrategy::Equal => SplitType::Equal,
        SplitStrategy::FixedAmount => SplitType::Amount,
        SplitStrategy::Percentage => SplitType::Percentage,
        SplitStrategy::Shares => SplitType::Shares,
    }
}

fn api_currency(currency: Currency) -> api_types::Currency {
    match currency {
        Currency::Usd => api_types::Currency::Usd,
        Currency::Eur => api_types::Currency::Eur,
    }
}

pub fn split_view(draft: &ExpenseDraft, currency: Currency) -> SplitView {
    SplitView {
        split_type: split_type(draft.strategy()),
        currency: api_currency(currency),
        total: draft.total().to_major(),
        payer: draft.payer().map(ToString::to_string),
        participants: draft
            .participants()
            .iter()
            .map(|p| ShareView {
                id: p.id.to_string(),
                name: p.display_name().to_string(),
                value: p.raw_value.get(),
                share: p.share.to_major(),
            })
            .collect(),
        conserves: draft.conserves(),
        issue: draft.issue().map(|issue| issue.to_string()),
    }
}

/// Builds the `createTransaction` body from a saved draft.
pub fn create_transaction(submission: &Submission) -> CreateTransaction {
    CreateTransaction {
        participants: submission
            .participants
            .iter()
            .map(|p| ParticipantRef {
                id: p.id.to_string(),
            })
            .collect(),
        how_much_each_participant_needs_to_pay: submission
            .participants
            .iter()
            .map(|p| (p.id.to_string(), p.share.to_major()))
            .collect::<BTreeMap<_, _>>(),
        who_paid_the_total_sum: submission.payer.to_string(),
        total_sum_paid: submission.total.to_major(),
    }
}

/// Plain text rendering of a draft, one participant per line.
///
/// `*` marks the payer. The last line is `!` for a split that does not add
/// up, `?` for something still to fill in.
pub fn render(draft: &ExpenseDraft, currency: Currency) -> String {
    let title = if draft.description().is_empty() {
        "(no description)"
    } else {
        draft.description()
    };
    let mut text = format!(
        "{title}: {} split {}\n",
        currency.format(draft.total()),
        draft.strategy()
    );

    if draft.state() == DraftState::Empty {
        text.push_str(&format!("  nobody to split with, not even {}\n", draft.acting_user()));
    }
    let payer = draft.payer();
    for participant in draft.participants() {
        let marker = if Some(&participant.id) == payer { "*" } else { " " };
        text.push_str(&format!(
            "{marker} {:<16} {:>10.2} {:>12}\n",
            participant.display_name(),
            participant.raw_value.get(),
            currency.format(participant.share)
        ));
    }

    match draft.issue() {
        Some(issue) => {
            let marker = if issue.is_error() { "!" } else { "?" };
            text.push_str(&format!("{marker} {issue}\n"));
        }
        None => text.push_str("ready to save\n"),
    }
    text
}
