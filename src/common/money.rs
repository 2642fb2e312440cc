use bigdecimal::{BigDecimal, ParseBigDecimalError, RoundingMode};
use num_traits::ToPrimitive;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

const SCALE: i64 = 100;

#[derive(Debug, Clone, Copy, Default)]
/// A monetary value held in the smallest currency unit (cents).
///
/// Wrapping an `i64` keeps amounts type-safe and free of binary floating-point
/// drift; decimal strings are parsed and formatted through `BigDecimal` at the
/// boundary only, rounding half-up to two decimal places. The value is signed
/// because checking balances may go below zero up to the overdraft limit.
///
/// # Examples
/// ```
/// use bank_ledger::common::money::Money;
///
/// let amount = Money::new(1050); // 10.50 in whatever currency the account holds
/// assert_eq!(amount.as_i64(), 1050);
/// assert_eq!(amount.to_string_2dp(), "10.50");
/// ```
pub struct Money(i64);

impl Money {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Money(0)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn to_string_2dp(&self) -> String {
        let bd = BigDecimal::from(self.0) / BigDecimal::from(SCALE);
        format!("{:.2}", bd)
    }
}

impl std::str::FromStr for Money {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }

        let bd: BigDecimal = t.parse()?;

        // Scale to cents, ties away from zero.
        let scaled = (bd * BigDecimal::from(SCALE)).with_scale_round(0, RoundingMode::HalfUp);
        let value: i64 = scaled
            .to_i64()
            .ok_or_else(|| ParseBigDecimalError::Other("amount overflow".into()))?;

        Ok(Money(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_2dp())
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for Money {}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.0.cmp(&other.0))
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(Money::zero(), Money(0));
    }

    #[test]
    fn test_as_i64() {
        assert_eq!(Money(12345).as_i64(), 12345);
        assert_eq!(Money::zero().as_i64(), 0);
        assert_eq!(Money(-999).as_i64(), -999);
    }

    #[test]
    fn test_is_negative() {
        assert!(Money(-1).is_negative());
        assert!(!Money::zero().is_negative());
        assert!(!Money(1).is_negative());
    }

    #[test]
    fn test_from_str_valid() {
        assert_eq!(Money::from_str("1").unwrap(), Money(100));
        assert_eq!(Money::from_str("1.5").unwrap(), Money(150));
        assert_eq!(Money::from_str("1.23").unwrap(), Money(123));
        assert_eq!(Money::from_str("0.01").unwrap(), Money(1));
        assert_eq!(Money::from_str("  2.00 ").unwrap(), Money(200));
        assert_eq!(Money::from_str("-12.34").unwrap(), Money(-1234));
    }

    #[test]
    fn test_from_str_rounds_half_up() {
        assert_eq!(Money::from_str("1.005").unwrap(), Money(101));
        assert_eq!(Money::from_str("1.004").unwrap(), Money(100));
        // ties round away from zero for negative amounts too
        assert_eq!(Money::from_str("-1.005").unwrap(), Money(-101));
        assert_eq!(Money::from_str("1.9999").unwrap(), Money(200));
        assert_eq!(Money::from_str("0.001").unwrap(), Money(0));
    }

    #[test]
    fn test_from_str_invalid() {
        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("   ").is_err());
        assert!(Money::from_str("abc").is_err());
        assert!(Money::from_str("NaN").is_err());
        assert!(Money::from_str("inf").is_err());
    }

    #[test]
    fn test_to_string_2dp() {
        assert_eq!(Money(100).to_string_2dp(), "1.00");
        assert_eq!(Money(123).to_string_2dp(), "1.23");
        assert_eq!(Money(1).to_string_2dp(), "0.01");
        assert_eq!(Money(0).to_string_2dp(), "0.00");
        assert_eq!(Money(-12345).to_string_2dp(), "-123.45");
    }

    #[test]
    fn test_display() {
        assert_eq!(Money(100).to_string(), "1.00");
        assert_eq!(Money(50).to_string(), "0.50");
    }

    #[test]
    fn test_add() {
        assert_eq!(Money(100) + Money(50), Money(150));
        assert_eq!(Money::zero() + Money(100), Money(100));
    }

    #[test]
    fn test_sub() {
        assert_eq!(Money(150) - Money(50), Money(100));
        assert_eq!(Money(100) - Money(100), Money::zero());
        assert_eq!(Money(50) - Money(100), Money(-50));
    }

    #[test]
    fn test_neg() {
        assert_eq!(-Money(100), Money(-100));
        assert_eq!(-Money(-100), Money(100));
        assert_eq!(-Money::zero(), Money::zero());
    }

    #[test]
    fn test_add_assign() {
        let mut m = Money(100);
        m += Money(50);
        assert_eq!(m, Money(150));
    }

    #[test]
    fn test_sub_assign() {
        let mut m = Money(150);
        m -= Money(50);
        assert_eq!(m, Money(100));
    }

    #[test]
    fn test_ordering() {
        assert!(Money(100) < Money(150));
        assert!(Money(150) > Money(100));
        assert!(Money(-100) < Money::zero());
        assert!(Money(100) <= Money(100));
        assert!(Money(100) >= Money(100));
    }

    #[test]
    fn test_equality() {
        assert_eq!(Money(100), Money(100));
        assert_ne!(Money(100), Money(50));
    }
}
