use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents, RawValue};

/// Rule used to divide a draft total among its participants.
///
/// The strategy is global to a draft: every participant is computed under
/// the same one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    #[default]
    Equal,
    #[serde(alias = "amount")]
    FixedAmount,
    Percentage,
    Shares,
}

impl SplitStrategy {
    pub const ALL: [SplitStrategy; 4] = [
        SplitStrategy::Equal,
        SplitStrategy::FixedAmount,
        SplitStrategy::Percentage,
        SplitStrategy::Shares,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::FixedAmount => "fixed_amount",
            Self::Percentage => "percentage",
            Self::Shares => "shares",
        }
    }

    /// Raw value a participant starts with under this strategy.
    ///
    /// `count` is the size of the participant list the value is meant for,
    /// including the participant being initialized.
    ///
    /// ```rust
    /// use engine::{MoneyCents, SplitStrategy};
    ///
    /// let total = MoneyCents::new(30_00);
    /// assert_eq!(SplitStrategy::Equal.default_raw_value(total, 3).get(), 1.0);
    /// assert_eq!(SplitStrategy::Percentage.default_raw_value(total, 4).get(), 25.0);
    /// assert_eq!(SplitStrategy::Shares.default_raw_value(total, 3).get(), 1.0);
    /// assert_eq!(SplitStrategy::FixedAmount.default_raw_value(total, 3).get(), 10.0);
    /// ```
    #[must_use]
    pub fn default_raw_value(self, total: MoneyCents, count: usize) -> RawValue {
        let count = count.max(1) as f64;
        match self {
            Self::Equal | Self::Shares => RawValue::ONE,
            Self::Percentage => RawValue::new(100.0 / count),
            Self::FixedAmount => RawValue::new(total.clamp_non_negative().to_major() / count),
        }
    }
}

impl fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitStrategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(Self::Equal),
            "amount" | "fixed" | "fixed_amount" => Ok(Self::FixedAmount),
            "percentage" | "percent" => Ok(Self::Percentage),
            "shares" => Ok(Self::Shares),
            other => Err(EngineError::InvalidStrategy(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strategy_names_and_aliases() {
        assert_eq!("Equal".parse::<SplitStrategy>().unwrap(), SplitStrategy::Equal);
        assert_eq!("amount".parse::<SplitStrategy>().unwrap(), SplitStrategy::FixedAmount);
        assert_eq!("percent".parse::<SplitStrategy>().unwrap(), SplitStrategy::Percentage);
        assert_eq!(
            "Thirds".parse::<SplitStrategy>(),
            Err(EngineError::InvalidStrategy("thirds".to_string()))
        );
    }

    #[test]
    fn serde_accepts_legacy_amount_name() {
        let strategy: SplitStrategy = serde_json::from_str("\"amount\"").unwrap();
        assert_eq!(strategy, SplitStrategy::FixedAmount);
        assert_eq!(
            serde_json::to_string(&SplitStrategy::FixedAmount).unwrap(),
            "\"fixed_amount\""
        );
    }

    #[test]
    fn defaults_survive_an_empty_list() {
        let total = MoneyCents::new(10_00);
        assert_eq!(SplitStrategy::Percentage.default_raw_value(total, 0).get(), 100.0);
        assert_eq!(SplitStrategy::FixedAmount.default_raw_value(total, 0).get(), 10.0);
    }
}
