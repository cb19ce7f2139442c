use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed stats record: {0}")]
    Malformed(String),

    #[error("Invalid storage key: {key}")]
    InvalidKey { key: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl SaveError {
    /// Whether falling back to an empty history is a sensible reaction.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SaveError::Io(_) => true,
            SaveError::Serialization(_) => true,
            SaveError::Malformed(_) => true,
            SaveError::InvalidKey { .. } => false,
            SaveError::Storage(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverability() {
        assert!(SaveError::Malformed("not an object".into()).is_recoverable());
        assert!(!SaveError::InvalidKey { key: "../x".into() }.is_recoverable());

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SaveError = json_err.into();
        assert!(matches!(err, SaveError::Serialization(_)));
        assert!(err.is_recoverable());
    }
}
