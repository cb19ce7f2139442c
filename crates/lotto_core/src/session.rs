//! Game session
//!
//! `GameSession` owns everything the UI used to keep in loose globals: the pick
//! being assembled, the active mode and both ledgers. Stats are loaded once when
//! the session opens and written through to the store after every change.

use crate::draw::{
    evaluate, generate_draw, matched_numbers, quick_pick, Draw, MatchResult, Selection,
    SelectionBuilder, ToggleOutcome,
};
use crate::error::{PlayError, Result, ValidationError};
use crate::ledger::metrics::DisplayMetrics;
use crate::ledger::{LedgerSnapshot, LedgerState, Mode, PlayOutcome};
use crate::payout::Money;
use crate::save::{KeyValueStore, SaveManager, STATS_KEY};
use crate::sim::{simulate, SimConfig, SimulationSummary, YieldPoint};
use rand::Rng;
use serde::Serialize;

/// Session settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Key of the stats entry in the store
    pub storage_key: String,
    pub sim: SimConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { storage_key: STATS_KEY.to_string(), sim: SimConfig::default() }
    }
}

/// Everything the presentation layer needs after a play.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayReport {
    pub mode: Mode,
    pub selection: Selection,
    pub draw: Draw,
    pub match_result: MatchResult,
    /// Drawn numbers the player also picked
    pub matched_numbers: Vec<u8>,
    /// Graded payout; `None` in classic mode
    pub payout: Option<Money>,
    pub outcome: PlayOutcome,
    pub ledger: LedgerSnapshot,
    pub metrics: DisplayMetrics,
}

pub struct GameSession<S> {
    saves: SaveManager<S>,
    ledgers: LedgerState,
    mode: Mode,
    pick: SelectionBuilder,
    sim_config: SimConfig,
}

impl<S: KeyValueStore> GameSession<S> {
    /// Open a session, loading (and if needed migrating) stored stats.
    pub fn open(store: S) -> Self {
        Self::with_config(store, SessionConfig::default())
    }

    pub fn with_config(store: S, config: SessionConfig) -> Self {
        let saves = SaveManager::with_key(store, &config.storage_key);
        let ledgers = saves.load();
        log::info!(
            "Session opened: classic {} games, terrybucks {} games",
            ledgers.classic.games_played,
            ledgers.terrybucks.games_played
        );

        Self {
            saves,
            ledgers,
            mode: Mode::default(),
            pick: SelectionBuilder::new(),
            sim_config: config.sim,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Change mode; the pick starts over.
    pub fn switch_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            log::debug!("Switching mode {} -> {}", self.mode, mode);
        }
        self.mode = mode;
        self.pick.clear();
    }

    // ========================
    // Selection
    // ========================

    pub fn pick(&self) -> &SelectionBuilder {
        &self.pick
    }

    pub fn toggle_number(
        &mut self,
        number: u8,
    ) -> std::result::Result<ToggleOutcome, ValidationError> {
        self.pick.toggle_number(number)
    }

    pub fn select_power(&mut self, power: u8) -> std::result::Result<(), ValidationError> {
        self.pick.select_power(power)
    }

    pub fn clear_selection(&mut self) {
        self.pick.clear();
    }

    /// Replace the pick with a random ticket.
    pub fn quick_pick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Selection {
        let selection = quick_pick(rng);
        self.pick = SelectionBuilder::from_selection(&selection);
        selection
    }

    // ========================
    // Playing
    // ========================

    /// Play the current pick. Rejected before any draw if the pick is incomplete.
    pub fn play<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<PlayReport> {
        let selection = self.pick.build()?;
        Ok(self.play_selection(&selection, rng))
    }

    /// Play an already-validated ticket in the active mode.
    pub fn play_selection<R: Rng + ?Sized>(
        &mut self,
        selection: &Selection,
        rng: &mut R,
    ) -> PlayReport {
        let draw = generate_draw(rng);
        self.settle(*selection, draw)
    }

    /// Score a ticket against a known draw, update the ledger and persist.
    pub fn settle(&mut self, selection: Selection, draw: Draw) -> PlayReport {
        let match_result = evaluate(&selection, &draw);
        let outcome = self.ledgers.record_play(self.mode, &match_result);
        self.persist();

        if match_result.is_jackpot {
            log::info!("Jackpot in {} mode with {:?}", self.mode, selection.numbers());
        } else if outcome.is_partial_win() {
            log::debug!(
                "{} play: matched {}/5, paid {}, debt now {}",
                self.mode,
                match_result.match_count,
                outcome.payout,
                outcome.debt_after
            );
        } else {
            log::debug!(
                "{} play: matched {}/5, power {}",
                self.mode,
                match_result.match_count,
                if match_result.power_match { "matched" } else { "missed" }
            );
        }

        PlayReport {
            mode: self.mode,
            selection,
            draw,
            match_result,
            matched_numbers: matched_numbers(&selection, &draw),
            payout: match self.mode {
                Mode::Classic => None,
                Mode::TerryBucks => Some(outcome.payout),
            },
            outcome,
            ledger: self.ledgers.snapshot(self.mode),
            metrics: self.metrics(),
        }
    }

    // ========================
    // Stats
    // ========================

    pub fn ledgers(&self) -> &LedgerState {
        &self.ledgers
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledgers.snapshot(self.mode)
    }

    pub fn metrics(&self) -> DisplayMetrics {
        DisplayMetrics::for_mode(&self.ledgers, self.mode)
    }

    /// Zero the active mode's stats. Needs the player's explicit confirmation.
    pub fn reset_active_mode(&mut self, confirmed: bool) -> Result<()> {
        if !confirmed {
            return Err(PlayError::ResetNotConfirmed);
        }

        self.ledgers.reset(self.mode);
        self.persist();
        log::info!("Reset {} statistics", self.mode.display_name());
        Ok(())
    }

    // ========================
    // Simulation
    // ========================

    pub fn sim_config(&self) -> &SimConfig {
        &self.sim_config
    }

    /// Bulk-simulate `trials` jackpot attempts. Leaves the ledgers alone.
    ///
    /// The session stays mutably borrowed for the whole run, so nothing can
    /// start another play or simulation from inside `yield_point`.
    pub fn run_simulation<R, Y>(
        &mut self,
        trials: u64,
        rng: &mut R,
        yield_point: &mut Y,
    ) -> SimulationSummary
    where
        R: Rng + ?Sized,
        Y: YieldPoint + ?Sized,
    {
        let report = simulate(trials, rng, &self.sim_config, yield_point);
        log::info!("Simulated {} games: {} jackpots", report.trials, report.wins);
        SimulationSummary::from_report(&report)
    }

    /// Give the store back, e.g. to inspect what was written.
    pub fn into_store(self) -> S {
        self.saves.into_store()
    }

    fn persist(&mut self) {
        // Write-through; a failed write never fails the play
        match self.saves.save(&self.ledgers) {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => {
                log::warn!(
                    "Failed to save stats to '{}': {}; next play retries",
                    self.saves.key(),
                    e
                );
            }
            Err(e) => {
                log::error!("Stats cannot be saved under '{}': {}", self.saves.key(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{ClassicLedger, TerryBucksLedger};
    use crate::payout::JACKPOT_PAYOUT;
    use crate::save::{FileStore, MemoryStore, SaveError};
    use crate::sim::{CountingYield, NoYield};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ticket(numbers: [u8; 5], power: u8) -> Selection {
        Selection::new(numbers, power).unwrap()
    }

    fn draw(numbers: [u8; 5], power: u8) -> Draw {
        Draw::new(numbers, power).unwrap()
    }

    fn stored(session: GameSession<MemoryStore>) -> LedgerState {
        let store = session.into_store();
        let blob = store.get(STATS_KEY).unwrap().expect("stats written");
        crate::save::decode(&blob).unwrap()
    }

    /// Store whose writes always fail
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> std::result::Result<Option<String>, SaveError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> std::result::Result<(), SaveError> {
            Err(SaveError::Storage("quota exceeded".into()))
        }

        fn remove(&mut self, _key: &str) -> std::result::Result<(), SaveError> {
            Ok(())
        }
    }

    #[test]
    fn test_incomplete_pick_rejected_without_mutation() {
        let mut session = GameSession::open(MemoryStore::new());
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for n in [1, 2, 3] {
            session.toggle_number(n).unwrap();
        }
        let err = session.play(&mut rng).unwrap_err();
        assert!(matches!(
            err,
            PlayError::Validation(ValidationError::WrongNumberCount { expected: 5, found: 3 })
        ));

        session.toggle_number(4).unwrap();
        session.toggle_number(5).unwrap();
        let err = session.play(&mut rng).unwrap_err();
        assert!(matches!(err, PlayError::Validation(ValidationError::PowerNotSelected)));

        assert_eq!(session.ledgers(), &LedgerState::default());
        assert!(session.into_store().is_empty());
    }

    #[test]
    fn test_play_persists_every_time() {
        let mut session = GameSession::open(MemoryStore::new());
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        session.quick_pick(&mut rng);
        assert!(session.pick().is_full());
        let report = session.play(&mut rng).unwrap();

        assert_eq!(report.mode, Mode::Classic);
        assert_eq!(report.payout, None);
        assert_eq!(report.ledger.games_played(), 1);
        assert_eq!(report.matched_numbers.len(), report.match_result.match_count as usize);
        assert_eq!(stored(session).classic.games_played, 1);
    }

    #[test]
    fn test_terrybucks_four_plus_power_scenario() {
        let mut session = GameSession::open(MemoryStore::new());
        session.switch_mode(Mode::TerryBucks);

        let report = session.settle(ticket([1, 2, 3, 4, 5], 1), draw([1, 2, 3, 4, 6], 1));

        assert_eq!(report.match_result, MatchResult::new(4, true));
        assert_eq!(report.payout, Some(Money::from_dollars(50)));
        assert!(report.outcome.is_partial_win());
        assert_eq!(report.outcome.debt_after, Money::ZERO);
        assert_eq!(
            report.ledger,
            LedgerSnapshot::TerryBucks(TerryBucksLedger {
                games_played: 1,
                wins: 0,
                debt: Money::ZERO,
                total_payouts: Money::from_dollars(50),
                partial_wins: 1,
            })
        );
        assert_eq!(report.metrics.net_position, Some(48.0));
    }

    #[test]
    fn test_jackpot_scenario_both_modes() {
        let store = MemoryStore::new();
        let mut session = GameSession::open(store);

        let report = session.settle(ticket([1, 2, 3, 4, 5], 1), draw([1, 2, 3, 4, 5], 1));
        assert!(report.match_result.is_jackpot);
        assert_eq!(session.ledgers().classic, ClassicLedger { games_played: 1, wins: 1 });

        session.switch_mode(Mode::TerryBucks);
        for _ in 0..10 {
            session.settle(ticket([1, 2, 3, 4, 5], 1), draw([26, 27, 28, 29, 30], 2));
        }
        let report = session.settle(ticket([1, 2, 3, 4, 5], 1), draw([1, 2, 3, 4, 5], 1));

        assert_eq!(report.payout, Some(JACKPOT_PAYOUT));
        assert_eq!(report.outcome.debt_after_stake, Money::from_dollars(22));
        assert_eq!(report.outcome.debt_repaid(), Money::from_dollars(22));
        assert_eq!(session.ledgers().terrybucks.wins, 1);
        assert_eq!(session.ledgers().terrybucks.debt, Money::ZERO);
    }

    #[test]
    fn test_switch_mode_clears_pick() {
        let mut session = GameSession::open(MemoryStore::new());
        session.toggle_number(9).unwrap();
        session.select_power(2).unwrap();

        session.switch_mode(Mode::TerryBucks);
        assert_eq!(session.mode(), Mode::TerryBucks);
        assert!(session.pick().numbers().is_empty());
        assert_eq!(session.pick().power(), None);
    }

    #[test]
    fn test_reset_needs_confirmation_and_spares_other_mode() {
        let mut session = GameSession::open(MemoryStore::new());
        session.settle(ticket([1, 2, 3, 4, 5], 1), draw([1, 2, 3, 4, 5], 1));
        session.switch_mode(Mode::TerryBucks);
        session.settle(ticket([1, 2, 3, 4, 5], 1), draw([1, 2, 3, 7, 8], 2));

        assert!(matches!(session.reset_active_mode(false), Err(PlayError::ResetNotConfirmed)));
        assert_eq!(session.ledgers().terrybucks.games_played, 1);

        session.reset_active_mode(true).unwrap();
        let state = stored(session);
        assert_eq!(state.terrybucks, TerryBucksLedger::default());
        assert_eq!(state.classic, ClassicLedger { games_played: 1, wins: 1 });
    }

    #[test]
    fn test_session_loads_legacy_record() {
        let store = MemoryStore::with_entry(STATS_KEY, r#"{"gamesPlayed":7,"wins":1}"#);
        let session = GameSession::open(store);

        assert_eq!(
            session.snapshot(),
            LedgerSnapshot::Classic(ClassicLedger { games_played: 7, wins: 1 })
        );
        assert_eq!(session.ledgers().terrybucks, TerryBucksLedger::default());
    }

    #[test]
    fn test_simulation_leaves_ledger_alone() {
        let mut session = GameSession::open(MemoryStore::new());
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut yields = CountingYield::default();

        let summary = session.run_simulation(2_500, &mut rng, &mut yields);

        assert_eq!(summary.trials, 2_500);
        assert_eq!(yields.count(), 2);
        assert_eq!(session.ledgers(), &LedgerState::default());
        assert!(session.into_store().is_empty());
    }

    #[test]
    fn test_simulation_uses_session_batch_size() {
        let config = SessionConfig { sim: SimConfig::new(100), ..Default::default() };
        let mut session = GameSession::with_config(MemoryStore::new(), config);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut yields = CountingYield::default();

        session.run_simulation(1_000, &mut rng, &mut yields);
        assert_eq!(yields.count(), 9);

        let summary = session.run_simulation(0, &mut rng, &mut NoYield);
        assert_eq!(summary.actual_win_rate_pct, 0.0);
    }

    #[test]
    fn test_failed_write_does_not_fail_play() {
        let mut session = GameSession::open(BrokenStore);
        let report = session.settle(ticket([1, 2, 3, 4, 5], 2), draw([6, 7, 8, 9, 10], 1));
        assert_eq!(report.ledger.games_played(), 1);
        assert_eq!(session.ledgers().classic.games_played, 1);
    }

    #[test]
    fn test_unusable_storage_key_does_not_fail_play() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = SessionConfig { storage_key: "../stats".into(), ..Default::default() };
        let mut session = GameSession::with_config(FileStore::new(temp_dir.path()), config);

        let report = session.settle(ticket([1, 2, 3, 4, 5], 2), draw([6, 7, 8, 9, 10], 1));
        assert_eq!(report.ledger.games_played(), 1);
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_custom_storage_key() {
        let config = SessionConfig { storage_key: "lottoStats".into(), ..Default::default() };
        let mut session = GameSession::with_config(MemoryStore::new(), config);
        session.settle(ticket([1, 2, 3, 4, 5], 2), draw([6, 7, 8, 9, 10], 1));

        let store = session.into_store();
        assert!(store.get("lottoStats").unwrap().is_some());
        assert!(store.get(STATS_KEY).unwrap().is_none());
    }
}
