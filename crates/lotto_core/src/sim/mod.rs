//! Bulk simulation.
//!
//! Replays quick-pick + draw + evaluate many times to estimate the jackpot rate.
//! Only jackpots count as wins here; the TerryBucks schedule is not applied and
//! the ledger is never touched.

pub mod config;
pub mod yield_point;

pub use config::{SimConfig, DEFAULT_BATCH_SIZE};
pub use yield_point::{NoYield, YieldPoint};

#[cfg(test)]
pub use yield_point::CountingYield;

use crate::draw::{evaluate, generate_draw, quick_pick, TOTAL_COMBINATIONS};
use crate::ledger::metrics::{expected_wins, theoretical_win_rate_pct, win_rate_pct};
use rand::Rng;
use serde::Serialize;

/// Raw outcome of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub trials: u64,
    pub wins: u64,
}

/// One trial: random ticket against a fresh draw, jackpot or not.
fn run_trial<R: Rng + ?Sized>(rng: &mut R) -> bool {
    let selection = quick_pick(rng);
    let draw = generate_draw(rng);
    evaluate(&selection, &draw).is_jackpot
}

/// Run `trials` independent trials, yielding to the host between batches.
pub fn simulate<R, Y>(
    trials: u64,
    rng: &mut R,
    config: &SimConfig,
    yield_point: &mut Y,
) -> SimulationReport
where
    R: Rng + ?Sized,
    Y: YieldPoint + ?Sized,
{
    let span = tracing::debug_span!("simulate", trials, batch_size = config.batch_size);
    let _guard = span.enter();

    let batch_size = config.effective_batch_size();
    let batches = config.batch_count(trials);
    let mut wins = 0;

    for batch in 0..batches {
        let start = batch * batch_size;
        let in_batch = batch_size.min(trials - start);

        for _ in 0..in_batch {
            if run_trial(rng) {
                wins += 1;
            }
        }

        if batch + 1 < batches {
            yield_point.yield_now(batch + 1, start + in_batch);
        }
    }

    tracing::debug!(wins, batches, "simulation finished");
    SimulationReport { trials, wins }
}

/// How a run compares with the odds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Insight {
    ZeroWins,
    /// More than 1.5x the expected jackpots
    Lucky,
    AlignsWithTheory,
}

/// Caller-side figures derived from a [`SimulationReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub trials: u64,
    pub wins: u64,
    pub expected_wins: f64,
    /// Percent; 0 for an empty run
    pub actual_win_rate_pct: f64,
    pub theoretical_win_rate_pct: f64,
    pub total_combinations: u64,
    pub insight: Insight,
}

impl SimulationSummary {
    pub fn from_report(report: &SimulationReport) -> Self {
        let expected = expected_wins(report.trials);
        let insight = if report.wins == 0 {
            Insight::ZeroWins
        } else if report.wins as f64 > expected * 1.5 {
            Insight::Lucky
        } else {
            Insight::AlignsWithTheory
        };

        Self {
            trials: report.trials,
            wins: report.wins,
            expected_wins: expected,
            actual_win_rate_pct: win_rate_pct(report.wins, report.trials),
            theoretical_win_rate_pct: theoretical_win_rate_pct(),
            total_combinations: TOTAL_COMBINATIONS,
            insight,
        }
    }
}

impl From<SimulationReport> for SimulationSummary {
    fn from(report: SimulationReport) -> Self {
        Self::from_report(&report)
    }
}
