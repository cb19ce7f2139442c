use super::error::SaveError;
use super::migration::try_migrate;
use crate::ledger::LedgerState;

/// Serialize the ledgers to the stored JSON text.
pub fn encode(state: &LedgerState) -> Result<String, SaveError> {
    Ok(serde_json::to_string(state)?)
}

/// Parse stored JSON text, upgrading older layouts on the way.
pub fn decode(blob: &str) -> Result<LedgerState, SaveError> {
    let raw: serde_json::Value = serde_json::from_str(blob)?;
    try_migrate(&raw)
}
