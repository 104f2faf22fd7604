//! # Table Configuration
//!
//! A `TableConfig` is fixed for the whole table session. It can be built in
//! code with [`TableConfigBuilder`] or read from JSON.
//!
//! ```rust
//! use poker_table_state::table::TableConfig;
//!
//! let config = TableConfig::from_json(
//!     r#"{"seatCount": 6, "bigBlind": 2.0, "initialStack": 200.0, "playerNames": ["Ashley"]}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.seat_count, 6);
//! assert_eq!(config.seat_name(1), "Ashley");
//! assert_eq!(config.seat_name(2), "Player 2");
//! ```

#[cfg(feature = "serde")]
use std::{io::ErrorKind, path::Path};

#[cfg(feature = "serde")]
use super::errors::ConfigLoadError;
use super::errors::ConfigError;
use super::{HERO_IDX, MAX_SEATS, MIN_SEATS};

/// Immutable settings for one table session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableConfig {
    /// Number of seats, between 3 and 10.
    #[cfg_attr(feature = "serde", serde(alias = "seatCount"))]
    pub seat_count: usize,
    #[cfg_attr(feature = "serde", serde(alias = "bigBlind"))]
    pub big_blind: f32,
    /// Every seat starts each hand with this stack.
    #[cfg_attr(feature = "serde", serde(alias = "initialStack"))]
    pub initial_stack: f32,
    /// Display names for seats 1.. (seat 0 is always the hero).
    #[cfg_attr(feature = "serde", serde(alias = "playerNames", default))]
    pub player_names: Vec<String>,
}

impl TableConfig {
    pub fn new(seat_count: usize, big_blind: f32, initial_stack: f32) -> Result<Self, ConfigError> {
        TableConfigBuilder::new()
            .seat_count(seat_count)
            .big_blind(big_blind)
            .initial_stack(initial_stack)
            .build()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.seat_count) {
            return Err(ConfigError::InvalidSeatCount {
                actual: self.seat_count,
            });
        }

        if self.big_blind <= 0.0 || !self.big_blind.is_finite() {
            return Err(ConfigError::InvalidBigBlind(self.big_blind));
        }

        if self.initial_stack <= 0.0 || !self.initial_stack.is_finite() {
            return Err(ConfigError::InvalidInitialStack(self.initial_stack));
        }

        let max_names = self.seat_count - 1;
        if self.player_names.len() > max_names {
            return Err(ConfigError::TooManyPlayerNames {
                actual: self.player_names.len(),
                max: max_names,
                seat_count: self.seat_count,
            });
        }

        Ok(())
    }

    pub fn small_blind(&self) -> f32 {
        self.big_blind / 2.0
    }

    /// Display name for a seat. Seat 0 is always "Hero", the rest use the
    /// configured names in order and fall back to "Player {idx}".
    pub fn seat_name(&self, idx: usize) -> String {
        if idx == HERO_IDX {
            return "Hero".to_string();
        }
        self.player_names
            .get(idx - 1)
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Player {idx}"))
    }

    /// Create from a JSON string
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigLoadError> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Create from a file path
    #[cfg(feature = "serde")]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Try to parse as file path first, then as inline JSON
    #[cfg(feature = "serde")]
    pub fn from_str_or_file(input: &str) -> Result<Self, ConfigLoadError> {
        match Self::from_file(input) {
            Ok(config) => Ok(config),
            Err(ConfigLoadError::IoError(err)) if err.kind() == ErrorKind::NotFound => {
                Self::from_json(input)
            }
            Err(err) => Err(err),
        }
    }
}

/// Builder for constructing a `TableConfig` with validation.
///
/// # Example
///
/// ```
/// use poker_table_state::table::TableConfigBuilder;
///
/// let config = TableConfigBuilder::new()
///     .seat_count(9)
///     .big_blind(2.0)
///     .initial_stack(100.0)
///     .player_names(vec!["Ashley".to_string(), "PO1".to_string()])
///     .build()
///     .unwrap();
///
/// assert_eq!(config.seat_count, 9);
/// assert_eq!(config.small_blind(), 1.0);
/// ```
#[derive(Default, Clone, Debug)]
pub struct TableConfigBuilder {
    // Required
    big_blind: Option<f32>,
    initial_stack: Option<f32>,

    // Optional with defaults
    seat_count: Option<usize>,         // Default: 6
    player_names: Option<Vec<String>>, // Default: vec![]
}

impl TableConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of seats. Defaults to `6`.
    pub fn seat_count(mut self, seat_count: usize) -> Self {
        self.seat_count = Some(seat_count);
        self
    }

    /// Set the big blind size. Required.
    pub fn big_blind(mut self, bb: f32) -> Self {
        self.big_blind = Some(bb);
        self
    }

    /// Set the stack every seat starts a hand with. Required.
    pub fn initial_stack(mut self, stack: f32) -> Self {
        self.initial_stack = Some(stack);
        self
    }

    /// Set display names for the non-hero seats.
    pub fn player_names(mut self, names: Vec<String>) -> Self {
        self.player_names = Some(names);
        self
    }

    pub fn build(self) -> Result<TableConfig, ConfigError> {
        let big_blind = self.big_blind.ok_or(ConfigError::MissingBigBlind)?;
        let initial_stack = self
            .initial_stack
            .ok_or(ConfigError::MissingInitialStack)?;

        let config = TableConfig {
            seat_count: self.seat_count.unwrap_or(6),
            big_blind,
            initial_stack,
            player_names: self.player_names.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}
