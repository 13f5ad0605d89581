use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Signed money amount represented as **integer centavos**.
///
/// Every monetary value the engine stores or computes (rates, costs, revenue,
/// payments, balances) goes through this type so that balances never drift the
/// way accumulated floating-point values do.
///
/// The value is signed:
/// - positive = credit / earning
/// - negative = debit / overpayment
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.centavos(), 1234);
/// assert_eq!(amount.to_string(), "R$ 12,34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// more than 2 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("150".parse::<Money>().unwrap().centavos(), 15000);
/// assert_eq!("5,80".parse::<Money>().unwrap().centavos(), 580);
/// assert!("2.505".parse::<Money>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer centavos.
    #[must_use]
    pub const fn new(centavos: i64) -> Self {
        Self(centavos)
    }

    /// Returns the raw value in centavos.
    #[must_use]
    pub const fn centavos(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a dimensionless factor, rounding half away from zero to
    /// whole centavos.
    ///
    /// This is the single place fractional arithmetic enters the engine: the
    /// costing boundary scales rates by distances and bonus fractions, then
    /// immediately lands back on integer centavos.
    #[must_use]
    pub fn scale(self, factor: f64) -> Money {
        Money(((self.0 as f64) * factor).round() as i64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}R$ {},{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string into centavos.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading
    /// `+`/`-`. Rejects empty input and more than two fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidAmount(format!("not a money value: {s:?}"));

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidAmount("empty amount".to_string()));
        }

        let (sign, digits) = if let Some(rest) = trimmed.strip_prefix('-') {
            (-1i64, rest)
        } else if let Some(rest) = trimmed.strip_prefix('+') {
            (1i64, rest)
        } else {
            (1i64, trimmed)
        };

        let digits = digits.replace(',', ".");
        let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let centavos = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            2 => frac.parse::<i64>().map_err(|_| invalid())?,
            _ => {
                return Err(EngineError::InvalidAmount(
                    "too many decimals".to_string(),
                ));
            }
        };

        let total = whole
            .parse::<i64>()
            .ok()
            .and_then(|reais| reais.checked_mul(100))
            .and_then(|v| v.checked_add(centavos))
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?;

        Ok(Money(sign * total))
    }
}
