use engine::{
    ExpenseDraft, MoneyCents, Participant, ParticipantId, RawValue, SplitStrategy,
    normalize_percentages, recompute,
};
use proptest::prelude::*;

fn participants(values: &[f64]) -> Vec<Participant> {
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| Participant::new(format!("p{idx}")).raw_value(*value))
        .collect()
}

fn any_split() -> impl Strategy<Value = SplitStrategy> {
    prop::sample::select(SplitStrategy::ALL.to_vec())
}

/// Strategies that keep raw values exactly as typed.
fn verbatim_split() -> impl Strategy<Value = SplitStrategy> {
    prop::sample::select(vec![
        SplitStrategy::Equal,
        SplitStrategy::FixedAmount,
        SplitStrategy::Shares,
    ])
}

fn sum(participants: &[Participant]) -> i64 {
    participants.iter().map(|p| p.share.cents()).sum()
}

proptest! {
    #[test]
    fn equal_fixed_and_shares_always_conserve(
        total in 0i64..=100_000_000,
        values in prop::collection::vec(-50.0f64..=5_000.0, 1..=8),
        strategy in verbatim_split(),
    ) {
        let allocation = recompute(MoneyCents::new(total), strategy, &participants(&values));

        prop_assert!(allocation.conserves);
        prop_assert_eq!(sum(&allocation.participants), total);
    }

    #[test]
    fn complete_percentages_conserve(
        total in 0i64..=100_000_000,
        values in prop::collection::vec(0.0f64..=150.0, 1..=8),
    ) {
        let percent: f64 = values.iter().sum();
        prop_assume!(percent >= 100.0);

        let allocation = recompute(MoneyCents::new(total), SplitStrategy::Percentage, &participants(&values));
        prop_assert!(allocation.conserves);
        prop_assert_eq!(sum(&allocation.participants), total);
    }

    #[test]
    fn defaults_conserve_under_every_strategy(
        total in 0i64..=100_000_000,
        count in 1usize..=12,
        strategy in any_split(),
    ) {
        let mut draft = ExpenseDraft::open(Participant::new("me"));
        for idx in 1..count {
            draft.add_participant(Participant::new(format!("p{idx}")));
        }
        draft.set_total(MoneyCents::new(total));
        draft.set_strategy(strategy);

        prop_assert!(draft.conserves());
        prop_assert_eq!(sum(draft.participants()), total);
    }

    #[test]
    fn shares_and_raw_values_are_never_negative(
        total in -1_000_000i64..=1_000_000,
        values in prop::collection::vec(prop::num::f64::ANY, 0..=8),
        strategy in any_split(),
    ) {
        let allocation = recompute(MoneyCents::new(total), strategy, &participants(&values));
        for participant in &allocation.participants {
            prop_assert!(participant.share.cents() >= 0);
            prop_assert!(participant.raw_value.get() >= 0.0);
            prop_assert!(participant.raw_value.get().is_finite());
        }
    }

    #[test]
    fn percentage_normalization_is_idempotent(
        values in prop::collection::vec(0.0f64..=1_000.0, 0..=10),
    ) {
        let raw: Vec<RawValue> = values.into_iter().map(RawValue::new).collect();
        let once = normalize_percentages(&raw);
        let twice = normalize_percentages(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn acting_user_survives_any_removal(
        others in 0usize..=5,
        removals in prop::collection::vec(0usize..=6, 0..=10),
    ) {
        let mut draft = ExpenseDraft::open(Participant::new("me"));
        for idx in 0..others {
            draft.add_participant(Participant::new(format!("p{idx}")));
        }
        for idx in removals {
            let target = if idx == 0 {
                ParticipantId::new("me")
            } else {
                ParticipantId::new(format!("p{}", idx - 1))
            };
            draft.remove_participant(&target);
        }
        prop_assert!(draft.contains(&ParticipantId::new("me")));
        prop_assert!(draft.payer().is_some());
    }

    #[test]
    fn raw_value_edits_converge_in_any_order(
        total in 0i64..=10_000_000,
        values in prop::collection::vec(0.0f64..=500.0, 2..=6),
        strategy in verbatim_split(),
    ) {
        let mut forward = ExpenseDraft::open(Participant::new("p0"));
        for idx in 1..values.len() {
            forward.add_participant(Participant::new(format!("p{idx}")));
        }
        forward.set_total(MoneyCents::new(total));
        forward.set_strategy(strategy);
        let mut backward = forward.clone();

        for (idx, value) in values.iter().enumerate() {
            forward.set_raw_value(&ParticipantId::new(format!("p{idx}")), *value);
        }
        for (idx, value) in values.iter().enumerate().rev() {
            backward.set_raw_value(&ParticipantId::new(format!("p{idx}")), *value);
        }

        prop_assert_eq!(forward.participants(), backward.participants());
        prop_assert_eq!(forward.conserves(), backward.conserves());
    }
}
