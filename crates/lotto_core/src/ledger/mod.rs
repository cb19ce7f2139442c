//! Per-mode play statistics.
//!
//! `LedgerState` is the whole durable record: one ledger per mode, keyed by the
//! mode name. It is mutated exactly once per play and persisted straight after
//! (see `save::SaveManager`). Display figures are derived in [`metrics`] and are
//! never stored.

pub mod metrics;

use crate::draw::MatchResult;
use crate::payout::{grade, Money};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cost of one TerryBucks play, borrowed and added to the debt.
pub const STAKE: Money = Money::from_dollars(2);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Classic,
    TerryBucks,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Classic, Mode::TerryBucks];

    /// Storage key / wire name
    pub fn key(self) -> &'static str {
        match self {
            Mode::Classic => "classic",
            Mode::TerryBucks => "terrybucks",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Mode::Classic => "Classic Mode",
            Mode::TerryBucks => "TerryBucks Mode",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(Mode::Classic),
            "terrybucks" => Ok(Mode::TerryBucks),
            other => Err(format!("Unknown mode: {other}")),
        }
    }
}

/// Jackpot-only counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassicLedger {
    pub games_played: u64,
    pub wins: u64,
}

/// Counters for the borrowed-stake mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TerryBucksLedger {
    pub games_played: u64,
    /// Jackpots only
    pub wins: u64,
    pub debt: Money,
    pub total_payouts: Money,
    /// Non-jackpot plays that still paid something
    pub partial_wins: u64,
}

impl ClassicLedger {
    pub fn is_consistent(&self) -> bool {
        self.wins <= self.games_played
    }
}

impl TerryBucksLedger {
    /// Everything ever borrowed: one stake per play.
    pub fn total_spent(&self) -> Money {
        STAKE * self.games_played
    }

    pub fn is_consistent(&self) -> bool {
        self.wins.saturating_add(self.partial_wins) <= self.games_played
    }
}

/// The active mode's counters, as handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LedgerSnapshot {
    Classic(ClassicLedger),
    TerryBucks(TerryBucksLedger),
}

impl LedgerSnapshot {
    pub fn mode(&self) -> Mode {
        match self {
            LedgerSnapshot::Classic(_) => Mode::Classic,
            LedgerSnapshot::TerryBucks(_) => Mode::TerryBucks,
        }
    }

    pub fn games_played(&self) -> u64 {
        match self {
            LedgerSnapshot::Classic(l) => l.games_played,
            LedgerSnapshot::TerryBucks(l) => l.games_played,
        }
    }

    pub fn wins(&self) -> u64 {
        match self {
            LedgerSnapshot::Classic(l) => l.wins,
            LedgerSnapshot::TerryBucks(l) => l.wins,
        }
    }
}

/// What a single play did to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayOutcome {
    pub mode: Mode,
    pub jackpot: bool,
    /// Graded payout; always zero in classic mode
    pub payout: Money,
    /// Debt once this play's stake was added
    pub debt_after_stake: Money,
    pub debt_after: Money,
}

impl PlayOutcome {
    pub fn debt_repaid(&self) -> Money {
        self.debt_after_stake.saturating_sub(self.debt_after)
    }

    /// Non-jackpot play with a nonzero payout
    pub fn is_partial_win(&self) -> bool {
        !self.jackpot && !self.payout.is_zero()
    }
}

/// Both ledgers: the single persisted record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    pub classic: ClassicLedger,
    pub terrybucks: TerryBucksLedger,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self, mode: Mode) -> LedgerSnapshot {
        match mode {
            Mode::Classic => LedgerSnapshot::Classic(self.classic),
            Mode::TerryBucks => LedgerSnapshot::TerryBucks(self.terrybucks),
        }
    }

    /// Fold one play into the ledger for `mode`.
    pub fn record_play(&mut self, mode: Mode, result: &MatchResult) -> PlayOutcome {
        match mode {
            Mode::Classic => {
                let ledger = &mut self.classic;
                ledger.games_played += 1;
                if result.is_jackpot {
                    ledger.wins += 1;
                }
                PlayOutcome {
                    mode,
                    jackpot: result.is_jackpot,
                    payout: Money::ZERO,
                    debt_after_stake: Money::ZERO,
                    debt_after: Money::ZERO,
                }
            }
            Mode::TerryBucks => {
                let ledger = &mut self.terrybucks;
                ledger.games_played += 1;
                ledger.debt += STAKE;
                let debt_after_stake = ledger.debt;

                let payout = grade(result);
                if !payout.is_zero() {
                    ledger.total_payouts += payout;
                    ledger.debt = ledger.debt.saturating_sub(payout);
                    if result.is_jackpot {
                        ledger.wins += 1;
                    } else {
                        ledger.partial_wins += 1;
                    }
                }

                PlayOutcome {
                    mode,
                    jackpot: result.is_jackpot,
                    payout,
                    debt_after_stake,
                    debt_after: ledger.debt,
                }
            }
        }
    }

    /// Zero one mode's ledger, leaving the other untouched.
    pub fn reset(&mut self, mode: Mode) {
        match mode {
            Mode::Classic => self.classic = ClassicLedger::default(),
            Mode::TerryBucks => self.terrybucks = TerryBucksLedger::default(),
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.classic.is_consistent() && self.terrybucks.is_consistent()
    }
}
