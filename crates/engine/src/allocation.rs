//! The allocation engine.
//!
//! [`recompute`] is the single entry point: it takes a total, a strategy and
//! the current participant list and returns a fresh list with every share
//! computed from scratch, plus the conservation flag. Nothing is patched
//! incrementally, so the result only depends on the inputs.
//!
//! Proportional strategies (equal, percentage, shares) work on fixed-point
//! weights and hand out cents with a largest-remainder pass: every
//! participant first gets the floor of its exact share, then the leftover
//! cents go one by one to the largest fractional remainders, earlier
//! participants first on ties. Shares are therefore exact integer cents.

use serde::{Deserialize, Serialize};

use crate::{MoneyCents, Participant, ParticipantId, RawValue, SplitStrategy, validation};

/// Percentage points a complete percentage split adds up to.
pub const FULL_PERCENT: f64 = 100.0;

/// Tolerance under which a percentage sum counts as exactly 100.
pub const PERCENT_EPSILON: f64 = 1e-9;

/// Fixed-point resolution of the largest weight in a proportional split.
const WEIGHT_SCALE: f64 = 1e15;

/// Result of one recompute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Same ids, same order as the input, with raw values as normalized by
    /// the strategy and fresh shares.
    pub participants: Vec<Participant>,
    /// Whether the shares add up to the total.
    pub conserves: bool,
}

/// The `{id, share}` view of one participant in an [`Allocation`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantShare {
    pub id: ParticipantId,
    pub share: MoneyCents,
}

impl Allocation {
    #[must_use]
    pub fn shares(&self) -> Vec<ParticipantShare> {
        self.participants
            .iter()
            .map(|p| ParticipantShare {
                id: p.id.clone(),
                share: p.share,
            })
            .collect()
    }
}

/// Computes every participant's share of `total` under `strategy`.
///
/// Never fails: a negative total is treated as zero and raw values are
/// non-negative by construction. The input slice is left untouched.
///
/// ```rust
/// use engine::{MoneyCents, Participant, SplitStrategy, recompute};
///
/// let participants = vec![Participant::new("a"), Participant::new("b"), Participant::new("c")];
/// let allocation = recompute(MoneyCents::new(10_00), SplitStrategy::Equal, &participants);
///
/// let shares: Vec<i64> = allocation.participants.iter().map(|p| p.share.cents()).collect();
/// assert_eq!(shares, vec![334, 333, 333]);
/// assert!(allocation.conserves);
/// ```
#[must_use]
pub fn recompute(
    total: MoneyCents,
    strategy: SplitStrategy,
    participants: &[Participant],
) -> Allocation {
    let total = total.clamp_non_negative();
    let mut next = participants.to_vec();

    match strategy {
        SplitStrategy::Equal => split_equal(total, &mut next),
        SplitStrategy::FixedAmount => split_fixed(total, &mut next),
        SplitStrategy::Percentage => split_percentage(total, &mut next),
        SplitStrategy::Shares => split_shares(total, &mut next),
    }

    let conserves = validation::conserves(total, next.iter().map(|p| p.share));
    tracing::debug!(
        %strategy,
        total = %total,
        participants = next.len(),
        conserves,
        "allocation recomputed"
    );

    Allocation {
        participants: next,
        conserves,
    }
}

/// Rescales percentages so they add up to exactly 100 when they exceed it.
///
/// Sums up to 100 (within [`PERCENT_EPSILON`]) are returned unchanged, so
/// applying the normalization twice gives the same values as applying it
/// once.
///
/// ```rust
/// use engine::{RawValue, normalize_percentages};
///
/// let once = normalize_percentages(&[RawValue::new(70.0), RawValue::new(70.0)]);
/// assert_eq!(once, vec![RawValue::new(50.0), RawValue::new(50.0)]);
/// assert_eq!(normalize_percentages(&once), once);
/// ```
///
/// Values are summed relative to the largest one, so percentages too large
/// to add up in `f64` are still rescaled.
///
/// ```rust
/// use engine::{RawValue, normalize_percentages};
///
/// let huge = normalize_percentages(&[RawValue::new(1e308), RawValue::new(1e308)]);
/// assert_eq!(huge, vec![RawValue::new(50.0), RawValue::new(50.0)]);
/// ```
#[must_use]
pub fn normalize_percentages(values: &[RawValue]) -> Vec<RawValue> {
    let max = largest(values);
    if max == 0.0 {
        return values.to_vec();
    }
    let relative: f64 = values.iter().map(|v| v.get() / max).sum();
    if relative * max <= FULL_PERCENT + PERCENT_EPSILON {
        return values.to_vec();
    }
    values
        .iter()
        .map(|v| RawValue::new(v.get() / max / relative * FULL_PERCENT))
        .collect()
}

fn largest(values: &[RawValue]) -> f64 {
    values.iter().map(|v| v.get()).fold(0.0, f64::max)
}

/// Turns raw values into integer weights, the largest one mapped to
/// [`WEIGHT_SCALE`], so tiny but nonzero values keep their proportion.
fn weights(values: &[RawValue]) -> Vec<u64> {
    let max = largest(values);
    if max == 0.0 {
        return vec![0; values.len()];
    }
    values
        .iter()
        .map(|v| (v.get() / max * WEIGHT_SCALE).round() as u64)
        .collect()
}

fn split_equal(total: MoneyCents, participants: &mut [Participant]) {
    for participant in participants.iter_mut() {
        participant.raw_value = RawValue::ONE;
    }
    // A lone participant takes the total as is.
    if let [only] = participants {
        only.share = total;
        return;
    }
    let weights = vec![1; participants.len()];
    assign(participants, apportion(total, &weights));
}

/// Walks the list in order; each participant takes its fixed amount, capped
/// at what is still unassigned. Whatever is left goes to the last one.
fn split_fixed(total: MoneyCents, participants: &mut [Participant]) {
    let mut remaining = total;
    for participant in participants.iter_mut() {
        let wanted = MoneyCents::from_major(participant.raw_value.get()).clamp_non_negative();
        participant.share = wanted.min(remaining);
        remaining -= participant.share;
    }
    if remaining.is_positive()
        && let Some(last) = participants.last_mut()
    {
        last.share += remaining;
    }
}

fn split_percentage(total: MoneyCents, participants: &mut [Participant]) {
    let raw: Vec<RawValue> = participants.iter().map(|p| p.raw_value).collect();
    let normalized = normalize_percentages(&raw);
    for (participant, value) in participants.iter_mut().zip(&normalized) {
        participant.raw_value = *value;
    }

    let percent: f64 = normalized.iter().map(|v| v.get()).sum();
    let target = if (percent - FULL_PERCENT).abs() <= PERCENT_EPSILON {
        total
    } else {
        MoneyCents::from_major(total.to_major() * percent / FULL_PERCENT).min(total)
    };

    assign(participants, apportion(target, &weights(&normalized)));
}

fn split_shares(total: MoneyCents, participants: &mut [Participant]) {
    let raw: Vec<RawValue> = participants.iter().map(|p| p.raw_value).collect();
    if raw.iter().all(|v| v.get() == 0.0) {
        let equal = vec![1; participants.len()];
        assign(participants, apportion(total, &equal));
        return;
    }
    assign(participants, apportion(total, &weights(&raw)));
}

fn assign(participants: &mut [Participant], shares: Vec<MoneyCents>) {
    for (participant, share) in participants.iter_mut().zip(shares) {
        participant.share = share;
    }
}

/// Splits `target` proportionally to `weights` in whole cents.
///
/// The result always adds up to `target` unless every weight is zero, in
/// which case everybody gets nothing.
fn apportion(target: MoneyCents, weights: &[u64]) -> Vec<MoneyCents> {
    let total_weight: u128 = weights.iter().map(|w| u128::from(*w)).sum();
    if total_weight == 0 {
        return vec![MoneyCents::ZERO; weights.len()];
    }

    let target_minor = u128::try_from(target.clamp_non_negative().cents()).unwrap_or_default();
    let mut floors = Vec::with_capacity(weights.len());
    let mut remainders = Vec::with_capacity(weights.len());
    let mut allocated: u128 = 0;

    for (index, weight) in weights.iter().enumerate() {
        let scaled = target_minor * u128::from(*weight);
        let floor = scaled / total_weight;
        allocated += floor;
        floors.push(floor);
        remainders.push((scaled % total_weight, index));
    }

    // Each floor drops less than one cent, so the leftover is below the
    // number of participants.
    let leftover = usize::try_from(target_minor.saturating_sub(allocated)).unwrap_or(usize::MAX);
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for (_, index) in remainders.into_iter().take(leftover) {
        floors[index] += 1;
    }

    floors
        .into_iter()
        .map(|cents| MoneyCents::new(i64::try_from(cents).unwrap_or(i64::MAX)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people(values: &[f64]) -> Vec<Participant> {
        values
            .iter()
            .enumerate()
            .map(|(idx, value)| Participant::new(format!("p{idx}")).raw_value(*value))
            .collect()
    }

    fn cents(allocation: &Allocation) -> Vec<i64> {
        allocation
            .participants
            .iter()
            .map(|p| p.share.cents())
            .collect()
    }

    #[test]
    fn apportion_hands_leftover_to_largest_remainders() {
        let shares = apportion(MoneyCents::new(100), &[1, 1, 1]);
        assert_eq!(shares, vec![MoneyCents::new(34), MoneyCents::new(33), MoneyCents::new(33)]);

        // 2/3 of 1.00 leaves the larger remainder.
        let shares = apportion(MoneyCents::new(100), &[2, 1]);
        assert_eq!(shares, vec![MoneyCents::new(67), MoneyCents::new(33)]);
    }

    #[test]
    fn apportion_with_no_weight_allocates_nothing() {
        let shares = apportion(MoneyCents::new(100), &[0, 0]);
        assert_eq!(shares, vec![MoneyCents::ZERO, MoneyCents::ZERO]);
    }

    #[test]
    fn equal_split_single_participant_takes_total() {
        let allocation = recompute(MoneyCents::new(10_00), SplitStrategy::Equal, &people(&[7.0]));
        assert_eq!(cents(&allocation), vec![10_00]);
        assert_eq!(allocation.participants[0].raw_value, RawValue::ONE);
        assert!(allocation.conserves);
    }

    #[test]
    fn fixed_amount_caps_at_remaining() {
        let allocation = recompute(
            MoneyCents::new(10_00),
            SplitStrategy::FixedAmount,
            &people(&[8.0, 5.0, 1.0]),
        );
        assert_eq!(cents(&allocation), vec![8_00, 2_00, 0]);
        assert!(allocation.conserves);
    }

    #[test]
    fn fixed_amount_leftover_goes_to_last() {
        let allocation = recompute(
            MoneyCents::new(10_00),
            SplitStrategy::FixedAmount,
            &people(&[3.0, 3.0]),
        );
        assert_eq!(cents(&allocation), vec![3_00, 7_00]);
        assert!(allocation.conserves);
    }

    #[test]
    fn percentage_below_hundred_does_not_conserve() {
        let allocation = recompute(
            MoneyCents::new(100_00),
            SplitStrategy::Percentage,
            &people(&[30.0, 30.0]),
        );
        assert_eq!(cents(&allocation), vec![30_00, 30_00]);
        assert!(!allocation.conserves);
    }

    #[test]
    fn percentage_over_hundred_is_rescaled_first() {
        let allocation = recompute(
            MoneyCents::new(100_00),
            SplitStrategy::Percentage,
            &people(&[60.0, 90.0]),
        );
        assert!((allocation.participants[0].raw_value.get() - 40.0).abs() < 1e-9);
        assert!((allocation.participants[1].raw_value.get() - 60.0).abs() < 1e-9);
        assert_eq!(cents(&allocation), vec![40_00, 60_00]);
        assert!(allocation.conserves);
    }

    #[test]
    fn percentage_thirds_still_conserve() {
        let third = 100.0 / 3.0;
        let allocation = recompute(
            MoneyCents::new(100_00),
            SplitStrategy::Percentage,
            &people(&[third, third, third]),
        );
        assert_eq!(cents(&allocation), vec![33_34, 33_33, 33_33]);
        assert!(allocation.conserves);
    }

    #[test]
    fn percentage_too_large_to_sum_is_still_rescaled() {
        let allocation = recompute(
            MoneyCents::new(100_00),
            SplitStrategy::Percentage,
            &people(&[1e308, 1e308]),
        );
        assert_eq!(allocation.participants[0].raw_value.get(), 50.0);
        assert_eq!(allocation.participants[1].raw_value.get(), 50.0);
        assert_eq!(cents(&allocation), vec![50_00, 50_00]);
        assert!(allocation.conserves);
    }

    #[test]
    fn tiny_shares_are_not_treated_as_zero() {
        let allocation = recompute(
            MoneyCents::new(20_00),
            SplitStrategy::Shares,
            &people(&[1e-7, 0.0]),
        );
        assert_eq!(cents(&allocation), vec![20_00, 0]);

        let allocation = recompute(
            MoneyCents::new(30_00),
            SplitStrategy::Shares,
            &people(&[1e-9, 2e-9]),
        );
        assert_eq!(cents(&allocation), vec![10_00, 20_00]);
    }

    #[test]
    fn weights_scale_to_the_largest_value() {
        let values = [RawValue::new(2.0), RawValue::new(1.0), RawValue::ZERO];
        assert_eq!(weights(&values), vec![1_000_000_000_000_000, 500_000_000_000_000, 0]);
        assert_eq!(weights(&[RawValue::ZERO, RawValue::ZERO]), vec![0, 0]);
    }

    #[test]
    fn shares_follow_weights() {
        let allocation = recompute(
            MoneyCents::new(30_00),
            SplitStrategy::Shares,
            &people(&[1.0, 2.0, 3.0]),
        );
        assert_eq!(cents(&allocation), vec![5_00, 10_00, 15_00]);
        assert!(allocation.conserves);
    }

    #[test]
    fn shares_ignore_zero_weight_participants() {
        let allocation = recompute(
            MoneyCents::new(10_00),
            SplitStrategy::Shares,
            &people(&[0.0, 1.0]),
        );
        assert_eq!(cents(&allocation), vec![0, 10_00]);
    }

    #[test]
    fn empty_list_conserves_only_zero() {
        assert!(recompute(MoneyCents::ZERO, SplitStrategy::Equal, &[]).conserves);
        assert!(!recompute(MoneyCents::new(1), SplitStrategy::Shares, &[]).conserves);
        assert!(!recompute(MoneyCents::new(1), SplitStrategy::FixedAmount, &[]).conserves);
    }

    #[test]
    fn negative_total_is_treated_as_zero() {
        let allocation = recompute(MoneyCents::new(-5_00), SplitStrategy::Equal, &people(&[1.0, 1.0]));
        assert_eq!(cents(&allocation), vec![0, 0]);
        assert!(allocation.conserves);
    }

    #[test]
    fn recompute_leaves_input_untouched() {
        let input = people(&[70.0, 70.0]);
        let before = input.clone();
        let first = recompute(MoneyCents::new(100_00), SplitStrategy::Percentage, &input);
        assert_eq!(input, before);
        let second = recompute(MoneyCents::new(100_00), SplitStrategy::Percentage, &input);
        assert_eq!(first, second);
    }
}
