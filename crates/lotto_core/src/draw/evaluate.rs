use super::{Draw, Selection};
use serde::{Deserialize, Serialize};

/// How a ticket fared against a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Main numbers in common (0..=5)
    pub match_count: u8,
    pub power_match: bool,
    pub is_jackpot: bool,
}

impl MatchResult {
    pub fn new(match_count: u8, power_match: bool) -> Self {
        Self { match_count, power_match, is_jackpot: match_count == 5 && power_match }
    }
}

/// Compare a player's selection against the drawn numbers.
pub fn evaluate(selection: &Selection, draw: &Draw) -> MatchResult {
    let match_count = selection.numbers().iter().filter(|&&n| draw.contains(n)).count() as u8;
    MatchResult::new(match_count, selection.power() == draw.power())
}

/// Drawn numbers that also appear in the selection, in draw order.
pub fn matched_numbers(selection: &Selection, draw: &Draw) -> Vec<u8> {
    draw.numbers().iter().copied().filter(|&n| selection.contains(n)).collect()
}
