use super::{LedgerSnapshot, LedgerState, Mode, TerryBucksLedger, STAKE};
use crate::draw::TOTAL_COMBINATIONS;
use crate::payout::{Money, JACKPOT_PAYOUT};
use serde::Serialize;

/// Figures shown next to the active mode's counters. Recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayMetrics {
    pub mode: Mode,
    pub games_played: u64,
    pub wins: u64,
    /// Percent, 0 when nothing has been played
    pub win_rate_pct: f64,
    /// games / 285,012
    pub expected_wins: f64,
    pub money_spent: Money,
    /// wins - expected wins
    pub deviation: f64,
    /// TerryBucks only: total payouts minus money spent
    pub net_position: Option<f64>,
    pub debt: Option<Money>,
    pub warning: Option<DebtWarning>,
}

impl DisplayMetrics {
    pub fn for_mode(state: &LedgerState, mode: Mode) -> Self {
        Self::from_snapshot(&state.snapshot(mode))
    }

    pub fn from_snapshot(snapshot: &LedgerSnapshot) -> Self {
        let games = snapshot.games_played();
        let wins = snapshot.wins();
        let expected_wins = expected_wins(games);

        let (net_position, debt, warning) = match snapshot {
            LedgerSnapshot::Classic(_) => (None, None, None),
            LedgerSnapshot::TerryBucks(tb) => {
                (Some(net_position(tb)), Some(tb.debt), DebtWarning::for_ledger(tb))
            }
        };

        Self {
            mode: snapshot.mode(),
            games_played: games,
            wins,
            win_rate_pct: win_rate_pct(wins, games),
            expected_wins,
            money_spent: STAKE * games,
            deviation: wins as f64 - expected_wins,
            net_position,
            debt,
            warning,
        }
    }
}

/// `wins / games` as a percentage; 0 (never NaN) for zero games.
pub fn win_rate_pct(wins: u64, games: u64) -> f64 {
    if games == 0 {
        0.0
    } else {
        wins as f64 / games as f64 * 100.0
    }
}

/// Jackpots one should expect from `games` independent tickets.
pub fn expected_wins(games: u64) -> f64 {
    games as f64 / TOTAL_COMBINATIONS as f64
}

/// Percent chance of a jackpot on a single ticket.
pub fn theoretical_win_rate_pct() -> f64 {
    100.0 / TOTAL_COMBINATIONS as f64
}

/// Payouts received minus stakes borrowed, in dollars. Negative when behind.
pub fn net_position(ledger: &TerryBucksLedger) -> f64 {
    let cents = ledger.total_payouts.cents() as i128 - ledger.total_spent().cents() as i128;
    cents as f64 / 100.0
}

/// How deep the TerryBucks debt has gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "level")]
pub enum DebtWarning {
    /// 10,000 or more owed
    #[serde(rename_all = "camelCase")]
    Deep { debt: Money, jackpots_to_break_even: u64 },
    /// 1,000 or more owed
    Accumulating { debt: Money },
    /// 100 or more owed
    Borrowed { debt: Money },
    /// Some play, small debt
    Subtle { debt: Money },
}

impl DebtWarning {
    pub fn for_ledger(ledger: &TerryBucksLedger) -> Option<Self> {
        let debt = ledger.debt;
        if debt >= Money::from_dollars(10_000) {
            Some(DebtWarning::Deep { debt, jackpots_to_break_even: jackpots_to_break_even(debt) })
        } else if debt >= Money::from_dollars(1_000) {
            Some(DebtWarning::Accumulating { debt })
        } else if debt >= Money::from_dollars(100) {
            Some(DebtWarning::Borrowed { debt })
        } else if ledger.games_played > 0 {
            Some(DebtWarning::Subtle { debt })
        } else {
            None
        }
    }

    pub fn message(&self) -> String {
        match self {
            DebtWarning::Deep { debt, jackpots_to_break_even } => format!(
                "Deep in debt! You owe {debt} TerryBucks and need {jackpots_to_break_even} \
                 jackpot(s) just to break even."
            ),
            DebtWarning::Accumulating { debt } => {
                format!("Debt accumulating: {debt} TerryBucks owed. Still trying to win it back?")
            }
            DebtWarning::Borrowed { debt } => {
                format!("You've borrowed {debt} TerryBucks. Each play digs deeper.")
            }
            DebtWarning::Subtle { debt } => {
                format!("Current debt: {debt} TerryBucks. The trap is subtle at first.")
            }
        }
    }
}

/// Jackpots needed to clear `debt`, rounded up.
pub fn jackpots_to_break_even(debt: Money) -> u64 {
    debt.cents().div_ceil(JACKPOT_PAYOUT.cents())
}

/// Cost of buying every possible ticket at a given price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostProjection {
    pub cost_per_play: Money,
    pub total_combinations: u64,
    pub total_cost: Money,
    /// Jackpot needed to recover the outlay of a guaranteed win
    pub break_even: Money,
}

impl CostProjection {
    /// Non-finite, negative or zero prices fall back to the $2 stake.
    pub fn for_cost_per_play(cost: f64) -> Self {
        let cost_per_play = Money::from_decimal(cost).filter(|m| !m.is_zero()).unwrap_or(STAKE);
        let total_cost = cost_per_play * TOTAL_COMBINATIONS;
        Self {
            cost_per_play,
            total_combinations: TOTAL_COMBINATIONS,
            total_cost,
            break_even: total_cost,
        }
    }
}

impl Default for CostProjection {
    fn default() -> Self {
        Self::for_cost_per_play(STAKE.as_decimal())
    }
}
