use std::fmt;
use std::str::FromStr;

use crate::common::money::Money;

/// Rates carry four decimal digits, so they scale by 10^4.
const RATE_SCALE: i128 = 10_000;

/// The fixed currency table. Rates are units per euro and never change at
/// runtime; euro is the base every conversion routes through.
///
/// Conversions round half-up to cents on every hop, so converting twice (as
/// the foreign-currency deposit and withdrawal paths do) may shift the result
/// by a cent against a single ideal conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Eur,
    Escudo,
    Dobra,
    Francs,
}

impl Currency {
    pub const BASE: Currency = Currency::Eur;

    /// Units of this currency per euro, scaled by 10^4.
    fn rate_e4(self) -> i128 {
        match self {
            Currency::Eur => 10_000,
            Currency::Escudo => 1_098_269,
            Currency::Dobra => 243_047_429,
            Currency::Francs => 4_909_200,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Escudo => "ESCUDO",
            Currency::Dobra => "DOBRA",
            Currency::Francs => "FRANCS",
        }
    }

    /// Converts an amount denominated in this currency to euro.
    pub fn to_base(self, amount: Money) -> Money {
        Money::new(div_round_half_up(
            amount.as_i64() as i128 * RATE_SCALE,
            self.rate_e4(),
        ))
    }

    /// Converts an amount denominated in euro to this currency.
    pub fn from_base(self, amount: Money) -> Money {
        Money::new(div_round_half_up(
            amount.as_i64() as i128 * self.rate_e4(),
            RATE_SCALE,
        ))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "ESCUDO" => Ok(Currency::Escudo),
            "DOBRA" => Ok(Currency::Dobra),
            "FRANCS" => Ok(Currency::Francs),
            other => Err(format!("unknown currency: {other}")),
        }
    }
}

/// Integer division rounding half away from zero. `d` is always one of the
/// positive rate constants here.
fn div_round_half_up(n: i128, d: i128) -> i64 {
    let q = (2 * n.unsigned_abs() + d.unsigned_abs()) / (2 * d.unsigned_abs());
    let q = i64::try_from(q).unwrap_or(i64::MAX);
    if n < 0 { -q } else { q }
}
