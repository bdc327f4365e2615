use std::fmt;

/// Signed SEK amount represented as **integer öre**.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::from_ore(12_34);
/// assert_eq!(amount.ore(), 1234);
/// assert_eq!(amount.to_string(), "12.34 SEK");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer öre.
    #[must_use]
    pub const fn from_ore(ore: i64) -> Self {
        Self(ore)
    }

    /// Returns the raw value in öre.
    #[must_use]
    pub const fn ore(self) -> i64 {
        self.0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02} SEK", abs / 100, abs % 100)
    }
}
