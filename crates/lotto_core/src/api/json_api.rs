// Lottery JSON API Layer
// Connects the host UI to the game session

use crate::draw::Selection;
use crate::ledger::metrics::{CostProjection, DisplayMetrics};
use crate::ledger::{LedgerSnapshot, Mode};
use crate::save::KeyValueStore;
use crate::session::{GameSession, PlayReport};
use crate::sim::{NoYield, SimulationSummary, YieldPoint};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const SERIALIZATION_FAILED: &str = r#"{"success":false,"error":"Serialization failed"}"#;

// ========== Request/Response Structures ==========

/// Play the ticket given here, or the session's current pick. A `power` sent
/// without `numbers` is applied to the current pick first.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    pub numbers: Option<Vec<u8>>,
    pub power: Option<u8>,
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResponse {
    pub success: bool,
    pub report: Option<PlayReport>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickPickRequest {
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickPickResponse {
    pub success: bool,
    pub selection: Option<Selection>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchModeRequest {
    pub mode: Mode,
}

/// Stats for `mode`, or the active mode when absent.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRequest {
    pub mode: Option<Mode>,
}

/// Shared by mode switches, stats queries and resets.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub success: bool,
    pub mode: Option<Mode>,
    pub ledger: Option<LedgerSnapshot>,
    pub metrics: Option<DisplayMetrics>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateRequest {
    pub trials: u64,
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResponse {
    pub success: bool,
    pub summary: Option<SimulationSummary>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetStatsRequest {
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostProjectionRequest {
    /// Dollars; defaults to the $2 stake
    pub cost_per_play: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostProjectionResponse {
    pub success: bool,
    pub projection: Option<CostProjection>,
    pub error: Option<String>,
}

impl PlayResponse {
    fn failure(error: String) -> Self {
        Self { success: false, report: None, error: Some(error) }
    }
}

impl StatsResponse {
    fn failure(error: String) -> Self {
        Self { success: false, mode: None, ledger: None, metrics: None, error: Some(error) }
    }

    fn for_session<S: KeyValueStore>(session: &GameSession<S>, mode: Mode) -> Self {
        Self {
            success: true,
            mode: Some(mode),
            ledger: Some(session.ledgers().snapshot(mode)),
            metrics: Some(DisplayMetrics::for_mode(session.ledgers(), mode)),
            error: None,
        }
    }
}

// ========== Helpers ==========

/// Parse a request; an empty string counts as `{}`.
fn parse_request<T: DeserializeOwned>(request_json: &str) -> Result<T, String> {
    let json = if request_json.trim().is_empty() { "{}" } else { request_json };
    serde_json::from_str(json).map_err(|e| format!("Invalid request format: {}", e))
}

fn to_json<T: Serialize>(response: &T) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| SERIALIZATION_FAILED.to_string())
}

/// Seeded requests are reproducible; the rest draw from the thread RNG.
fn request_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    }
}

// ========== Public API Functions ==========

/// Play one game in the active mode
pub fn play_json<S: KeyValueStore>(session: &mut GameSession<S>, request_json: &str) -> String {
    let request: PlayRequest = match parse_request(request_json) {
        Ok(req) => req,
        Err(e) => return to_json(&PlayResponse::failure(e)),
    };

    let mut rng = request_rng(request.seed);
    let result = match request.numbers {
        Some(numbers) => Selection::from_slice(&numbers, request.power)
            .map(|selection| session.play_selection(&selection, &mut rng))
            .map_err(Into::into),
        None => match request.power {
            Some(power) => session
                .select_power(power)
                .map_err(Into::into)
                .and_then(|()| session.play(&mut rng)),
            None => session.play(&mut rng),
        },
    };

    match result {
        Ok(report) => to_json(&PlayResponse { success: true, report: Some(report), error: None }),
        Err(e) => to_json(&PlayResponse::failure(e.to_string())),
    }
}

/// Replace the session's pick with a random ticket
pub fn quick_pick_json<S: KeyValueStore>(
    session: &mut GameSession<S>,
    request_json: &str,
) -> String {
    let request: QuickPickRequest = match parse_request(request_json) {
        Ok(req) => req,
        Err(e) => {
            return to_json(&QuickPickResponse { success: false, selection: None, error: Some(e) })
        }
    };

    let mut rng = request_rng(request.seed);
    let selection = session.quick_pick(&mut rng);
    to_json(&QuickPickResponse { success: true, selection: Some(selection), error: None })
}

pub fn switch_mode_json<S: KeyValueStore>(
    session: &mut GameSession<S>,
    request_json: &str,
) -> String {
    let request: SwitchModeRequest = match parse_request(request_json) {
        Ok(req) => req,
        Err(e) => return to_json(&StatsResponse::failure(e)),
    };

    session.switch_mode(request.mode);
    to_json(&StatsResponse::for_session(session, request.mode))
}

/// Ledger snapshot and display metrics
pub fn stats_json<S: KeyValueStore>(session: &GameSession<S>, request_json: &str) -> String {
    let request: StatsRequest = match parse_request(request_json) {
        Ok(req) => req,
        Err(e) => return to_json(&StatsResponse::failure(e)),
    };

    let mode = request.mode.unwrap_or_else(|| session.mode());
    to_json(&StatsResponse::for_session(session, mode))
}

/// Bulk simulation for hosts that can afford to block until it finishes.
/// Hosts sharing one thread with their UI use [`simulate_json_with_yield`].
pub fn simulate_json<S: KeyValueStore>(
    session: &mut GameSession<S>,
    request_json: &str,
) -> String {
    simulate_json_with_yield(session, request_json, &mut NoYield)
}

/// Bulk simulation, handing control to `yield_point` between batches.
pub fn simulate_json_with_yield<S, Y>(
    session: &mut GameSession<S>,
    request_json: &str,
    yield_point: &mut Y,
) -> String
where
    S: KeyValueStore,
    Y: YieldPoint + ?Sized,
{
    let request: SimulateRequest = match parse_request(request_json) {
        Ok(req) => req,
        Err(e) => {
            return to_json(&SimulateResponse { success: false, summary: None, error: Some(e) })
        }
    };

    let mut rng = request_rng(request.seed);
    let summary = session.run_simulation(request.trials, &mut rng, yield_point);
    to_json(&SimulateResponse { success: true, summary: Some(summary), error: None })
}

/// Zero the active mode's stats; requires `"confirmed": true`
pub fn reset_stats_json<S: KeyValueStore>(
    session: &mut GameSession<S>,
    request_json: &str,
) -> String {
    let request: ResetStatsRequest = match parse_request(request_json) {
        Ok(req) => req,
        Err(e) => return to_json(&StatsResponse::failure(e)),
    };

    match session.reset_active_mode(request.confirmed) {
        Ok(()) => to_json(&StatsResponse::for_session(session, session.mode())),
        Err(e) => to_json(&StatsResponse::failure(e.to_string())),
    }
}

/// Cost of covering every combination
pub fn cost_projection_json(request_json: &str) -> String {
    let request: CostProjectionRequest = match parse_request(request_json) {
        Ok(req) => req,
        Err(e) => {
            return to_json(&CostProjectionResponse {
                success: false,
                projection: None,
                error: Some(e),
            })
        }
    };

    let projection = match request.cost_per_play {
        Some(cost) => CostProjection::for_cost_per_play(cost),
        None => CostProjection::default(),
    };
    to_json(&CostProjectionResponse { success: true, projection: Some(projection), error: None })
}
