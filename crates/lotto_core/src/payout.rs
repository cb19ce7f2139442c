//! TerryBucks payout schedule.
//!
//! Tiers are mutually exclusive on `(match_count, power_match)` and checked from
//! the jackpot down; anything not listed pays nothing. Classic mode never consults
//! this table, it only looks at `MatchResult::is_jackpot`.

use crate::draw::MatchResult;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Mul};

/// Non-negative currency amount, held in whole cents.
///
/// Serialized as a plain decimal number (`0.5`, `2`, `100000`) so the persisted
/// blob keeps the shape the host has always written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Money(cents)
    }

    pub const fn from_dollars(dollars: u64) -> Self {
        Money(dollars * 100)
    }

    /// Round a decimal amount to the nearest cent; negative or non-finite input is `None`.
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        Some(Money((amount * 100.0).round() as u64))
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Subtraction floored at zero
    pub const fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Mul<u64> for Money {
    type Output = Money;

    fn mul(self, rhs: u64) -> Money {
        Money(self.0.saturating_mul(rhs))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_u64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.as_decimal())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount).ok_or_else(|| {
            serde::de::Error::custom(format!("money amount must be non-negative, got {amount}"))
        })
    }
}

pub const JACKPOT_PAYOUT: Money = Money::from_dollars(100_000);

/// Paying rows of the schedule, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PayoutTier {
    Jackpot,
    FiveNoPower,
    FourPlusPower,
    Four,
    ThreePlusPower,
    Three,
    TwoPlusPower,
    OnePlusPower,
}

impl PayoutTier {
    pub fn match_count(self) -> u8 {
        match self {
            PayoutTier::Jackpot | PayoutTier::FiveNoPower => 5,
            PayoutTier::FourPlusPower | PayoutTier::Four => 4,
            PayoutTier::ThreePlusPower | PayoutTier::Three => 3,
            PayoutTier::TwoPlusPower => 2,
            PayoutTier::OnePlusPower => 1,
        }
    }

    pub fn power_match(self) -> bool {
        !matches!(self, PayoutTier::FiveNoPower | PayoutTier::Four | PayoutTier::Three)
    }

    pub fn payout(self) -> Money {
        match self {
            PayoutTier::Jackpot => JACKPOT_PAYOUT,
            PayoutTier::FiveNoPower => Money::from_dollars(100),
            PayoutTier::FourPlusPower => Money::from_dollars(50),
            PayoutTier::Four => Money::from_dollars(10),
            PayoutTier::ThreePlusPower => Money::from_dollars(5),
            PayoutTier::Three => Money::from_dollars(2),
            PayoutTier::TwoPlusPower => Money::from_dollars(1),
            PayoutTier::OnePlusPower => Money::from_cents(50),
        }
    }
}

/// Schedule in priority order, for display.
pub const PAYOUT_TABLE: [PayoutTier; 8] = [
    PayoutTier::Jackpot,
    PayoutTier::FiveNoPower,
    PayoutTier::FourPlusPower,
    PayoutTier::Four,
    PayoutTier::ThreePlusPower,
    PayoutTier::Three,
    PayoutTier::TwoPlusPower,
    PayoutTier::OnePlusPower,
];

/// The paying tier for a result, if any.
pub fn tier(result: &MatchResult) -> Option<PayoutTier> {
    PAYOUT_TABLE
        .iter()
        .copied()
        .find(|t| t.match_count() == result.match_count && t.power_match() == result.power_match)
}

/// TerryBucks payout for a result; zero for every non-paying combination.
pub fn grade(result: &MatchResult) -> Money {
    tier(result).map(PayoutTier::payout).unwrap_or(Money::ZERO)
}
