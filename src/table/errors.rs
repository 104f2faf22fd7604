use thiserror::Error;

use super::table_state::Stage;

/// Problems with a `TableConfig`. These are fatal at construction time.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ConfigError {
    #[error("seat_count must be between {min} and {max}, got {actual}", min = super::MIN_SEATS, max = super::MAX_SEATS)]
    InvalidSeatCount { actual: usize },

    #[error("big_blind must be positive, got {0}")]
    InvalidBigBlind(f32),

    #[error("initial_stack must be positive, got {0}")]
    InvalidInitialStack(f32),

    #[error("at most {max} player names are allowed for {seat_count} seats, got {actual}")]
    TooManyPlayerNames {
        actual: usize,
        max: usize,
        seat_count: usize,
    },

    #[error("big_blind is required")]
    MissingBigBlind,

    #[error("initial_stack is required")]
    MissingInitialStack,
}

/// Why a voluntary action was refused.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum IllegalActionReason {
    #[error("seat {0} has already folded")]
    SeatFolded(usize),

    #[error("seat {0} can't check while facing a bet")]
    CheckFacingBet(usize),

    /// The table never lets a round contribution pass the current bet, so
    /// this only shows up on a corrupted betting state.
    #[error("seat {0} has already put in more than the current bet")]
    CallBelowContribution(usize),

    #[error("raise amount must be a finite number")]
    InvalidAmount,
}

#[derive(Error, Debug, PartialEq, Clone)]
pub enum TableError {
    #[error("Invalid table configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("Seat index {idx} is out of range for {num_seats} seats")]
    InvalidSeatIndex { idx: usize, num_seats: usize },

    #[error("Illegal action: {0}")]
    IllegalAction(IllegalActionReason),

    #[error("Raise to {to} is below the minimum raise to {min_to}")]
    IllegalRaiseSize { to: f32, min_to: f32 },

    #[error("Can't leave {stage} while {count} seat(s) still need to act", count = .waiting.len())]
    RoundNotComplete { stage: Stage, waiting: Vec<usize> },
}

impl From<IllegalActionReason> for TableError {
    fn from(reason: IllegalActionReason) -> Self {
        TableError::IllegalAction(reason)
    }
}

/// Errors reading a `TableConfig` from JSON or from disk.
#[cfg(feature = "serde")]
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts_into_table_error() {
        let err: TableError = ConfigError::InvalidSeatCount { actual: 11 }.into();
        assert_eq!(
            TableError::InvalidConfiguration(ConfigError::InvalidSeatCount { actual: 11 }),
            err
        );
        assert_eq!(
            "Invalid table configuration: seat_count must be between 3 and 10, got 11",
            err.to_string()
        );
    }

    #[test]
    fn test_round_not_complete_message() {
        let err = TableError::RoundNotComplete {
            stage: Stage::Flop,
            waiting: vec![1, 4],
        };
        assert_eq!("Can't leave Flop while 2 seat(s) still need to act", err.to_string());
    }
}
