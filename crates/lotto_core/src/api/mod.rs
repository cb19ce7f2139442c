pub mod json_api;

pub use json_api::{
    cost_projection_json, play_json, quick_pick_json, reset_stats_json, simulate_json,
    simulate_json_with_yield, stats_json, switch_mode_json, CostProjectionRequest, PlayRequest,
    PlayResponse, SimulateRequest, StatsResponse,
};
