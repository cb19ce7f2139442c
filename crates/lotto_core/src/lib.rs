//! # lotto_core - 5-of-30 + Power Lottery Engine
//!
//! Core logic for a browser-hosted lottery game with two scoring modes:
//! - **classic**: binary jackpot / no-jackpot outcome
//! - **terrybucks**: graduated payouts against a growing debt, $2 borrowed per play
//!
//! ## Features
//! - Rejection-sampled draws (5 distinct numbers in 1..=30, power in 1..=2)
//! - Match evaluation and payout grading as pure functions
//! - Per-mode statistics ledger with write-through persistence and legacy migration
//! - Batched bulk simulation with a cooperative yield point between batches
//! - JSON API for easy integration with a host UI
//!
//! Rendering, input wiring and number formatting live in the host; this crate only
//! takes and returns plain data.

pub mod api;
pub mod draw;
pub mod error;
pub mod ledger;
pub mod payout;
pub mod save;
pub mod session;
pub mod sim;

// Re-export the draw/match engine
pub use draw::{
    evaluate, generate_draw, quick_pick, Draw, MatchResult, Selection, SelectionBuilder,
    ToggleOutcome, TOTAL_COMBINATIONS,
};
pub use payout::{grade, Money, PayoutTier, JACKPOT_PAYOUT, PAYOUT_TABLE};

// Re-export ledger and metrics
pub use ledger::metrics::{CostProjection, DebtWarning, DisplayMetrics};
pub use ledger::{
    ClassicLedger, LedgerSnapshot, LedgerState, Mode, PlayOutcome, TerryBucksLedger, STAKE,
};

// Re-export persistence
pub use save::{migrate, FileStore, KeyValueStore, MemoryStore, SaveError, SaveManager};

// Re-export simulation and session
pub use error::{PlayError, Result, ValidationError};
pub use session::{GameSession, PlayReport, SessionConfig};
pub use sim::{simulate, Insight, SimConfig, SimulationReport, SimulationSummary, YieldPoint};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
