use super::error::SaveError;
use crate::ledger::{ClassicLedger, LedgerState, Mode, TerryBucksLedger};
use serde_json::{Map, Value};

/// Layout of a stored stats record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaShape {
    /// `{classic: {...}, terrybucks: {...}}`
    PerMode,
    /// Flat `{gamesPlayed, wins}` written before modes existed
    Legacy,
}

/// Sniff the layout from the presence of the mode keys.
pub fn detect_shape(raw: &Map<String, Value>) -> SchemaShape {
    let has_mode_key = Mode::ALL.iter().any(|mode| raw.contains_key(mode.key()));
    if has_mode_key {
        SchemaShape::PerMode
    } else {
        SchemaShape::Legacy
    }
}

/// Upgrade any stored record to the current per-mode layout.
///
/// Malformed input is logged and treated as no history.
pub fn migrate(raw: &Value) -> LedgerState {
    match try_migrate(raw) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("Discarding unreadable stats record: {}", e);
            LedgerState::default()
        }
    }
}

/// Like [`migrate`] but surfaces malformed input instead of discarding it.
pub fn try_migrate(raw: &Value) -> Result<LedgerState, SaveError> {
    let object = raw
        .as_object()
        .ok_or_else(|| SaveError::Malformed(format!("expected an object, found {}", kind(raw))))?;

    match detect_shape(object) {
        SchemaShape::PerMode => {
            // A record missing one mode keeps the other and defaults the missing one
            let classic: ClassicLedger = ledger_field(object, Mode::Classic)?;
            let terrybucks: TerryBucksLedger = ledger_field(object, Mode::TerryBucks)?;
            Ok(LedgerState { classic, terrybucks })
        }
        SchemaShape::Legacy => {
            let state = migrate_legacy(object);
            log::info!(
                "Migrated legacy stats record into classic mode ({} games, {} wins)",
                state.classic.games_played,
                state.classic.wins
            );
            Ok(state)
        }
    }
}

/// Flat record: counters move to classic, TerryBucks starts empty.
fn migrate_legacy(object: &Map<String, Value>) -> LedgerState {
    let counter = |name: &str| object.get(name).and_then(Value::as_u64).unwrap_or(0);

    let classic = ClassicLedger { games_played: counter("gamesPlayed"), wins: counter("wins") };
    if !classic.is_consistent() {
        log::warn!(
            "Legacy record has more wins ({}) than games ({})",
            classic.wins,
            classic.games_played
        );
    }

    LedgerState { classic, terrybucks: TerryBucksLedger::default() }
}

fn ledger_field<T>(object: &Map<String, Value>, mode: Mode) -> Result<T, SaveError>
where
    T: serde::de::DeserializeOwned + Default,
{
    match object.get(mode.key()) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| SaveError::Malformed(format!("{} ledger: {}", mode, e))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
