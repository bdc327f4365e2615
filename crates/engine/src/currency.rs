use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Salary currencies known to the directory.
///
/// Each currency converts to SEK at a fixed rate, expressed in hundredths so
/// that conversions stay in integer arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Sek,
    Eur,
    Dkk,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Sek => "SEK",
            Currency::Eur => "EUR",
            Currency::Dkk => "DKK",
        }
    }

    /// Value of one major unit in öre (SEK hundredths).
    ///
    /// Example: 1 EUR = 11.00 SEK, so the rate is `1100`.
    #[must_use]
    pub const fn sek_rate_ore(self) -> i64 {
        match self {
            Currency::Sek => 100,
            Currency::Eur => 1100,
            Currency::Dkk => 148,
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
            "SEK" => Ok(Currency::Sek),
            "EUR" => Ok(Currency::Eur),
            "DKK" => Ok(Currency::Dkk),
            other => Err(EngineError::UnsupportedCurrency(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!(Currency::try_from("sek").unwrap(), Currency::Sek);
        assert_eq!(Currency::try_from(" EUR ").unwrap(), Currency::Eur);
        assert_eq!(Currency::try_from("Dkk").unwrap(), Currency::Dkk);
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(
            Currency::try_from("nok").unwrap_err(),
            EngineError::UnsupportedCurrency("NOK".to_string())
        );
    }
}
