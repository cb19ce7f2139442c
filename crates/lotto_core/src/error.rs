use thiserror::Error;

/// Reasons a player selection is not playable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select exactly {expected} numbers (found {found})")]
    WrongNumberCount { expected: usize, found: usize },

    #[error("Number {0} is outside 1..=30")]
    NumberOutOfRange(u8),

    #[error("Number {0} was selected more than once")]
    DuplicateNumber(u8),

    #[error("Please select a power number")]
    PowerNotSelected,

    #[error("Power number {0} is outside 1..=2")]
    PowerOutOfRange(u8),
}

#[derive(Error, Debug)]
pub enum PlayError {
    #[error("Invalid selection: {0}")]
    Validation(#[from] ValidationError),

    #[error("Stats reset requires confirmation")]
    ResetNotConfirmed,
}

pub type Result<T> = std::result::Result<T, PlayError>;
