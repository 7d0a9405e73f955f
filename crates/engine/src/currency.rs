use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents};

/// Currency a draft is entered in.
///
/// The allocation math never depends on it: amounts are always integer
/// cents (see [`MoneyCents`]) and every supported currency has 2 minor units.
/// It only decides how amounts are shown back to the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }

    /// Formats an amount the way the expense screen shows it.
    ///
    /// ```rust
    /// use engine::{Currency, MoneyCents};
    ///
    /// assert_eq!(Currency::Usd.format(MoneyCents::new(1050)), "$10.50");
    /// assert_eq!(Currency::Eur.format(MoneyCents::new(1050)), "10.50€");
    /// ```
    #[must_use]
    pub fn format(self, amount: MoneyCents) -> String {
        match self {
            Currency::Usd => format!("{}{amount}", self.symbol()),
            Currency::Eur => format!("{amount}{}", self.symbol()),
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(EngineError::InvalidCurrency(other.to_string())),
        }
    }
}
