//! Live state for one hand of no-limit Texas Hold'em at a single table.
//!
//! [`TableState`] owns everything about the hand: seats, blinds, the betting
//! round, every action taken and the pot. Callers drive it through a small
//! set of operations and read it back through [`TableSnapshot`].
//!
//! ```
//! use poker_table_state::table::{PlayerAction, Position, TableConfig, TableState};
//!
//! let config = TableConfig::new(6, 2.0, 200.0).unwrap();
//! let mut table = TableState::new(config).unwrap();
//!
//! table.record_action(2, PlayerAction::RaiseTo(6.0)).unwrap();
//! table.record_action(3, PlayerAction::Fold).unwrap();
//!
//! let snapshot = table.snapshot();
//! assert_eq!(snapshot.pot, 9.0);
//! assert_eq!(snapshot.seats[2].position, Position::UnderTheGun);
//! ```

pub mod action;
pub mod config;
pub mod errors;
pub mod position;
pub mod snapshot;
pub mod table_state;

#[cfg(test)]
pub mod test_util;

pub use action::{Action, ActionHistory, ActionKind, PlayerAction};
pub use config::{TableConfig, TableConfigBuilder};
#[cfg(feature = "serde")]
pub use errors::ConfigLoadError;
pub use errors::{ConfigError, IllegalActionReason, TableError};
pub use position::Position;
pub use snapshot::{SeatSnapshot, TableSnapshot};
pub use table_state::{RoundData, Seat, Stage, TableState};

/// Fewest seats a table can have.
pub const MIN_SEATS: usize = 3;
/// Most seats a table can have.
pub const MAX_SEATS: usize = 10;
/// The hero always sits in seat 0.
pub const HERO_IDX: usize = 0;
