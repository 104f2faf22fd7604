//! # poker_table_state
//!
//! Tracks the live state of one hand of multi-player no-limit Texas Hold'em
//! at a single table: who sits where, where the blinds are, which betting
//! round the hand is in, what every seat did and how much is in the pot.
//!
//! The state is meant to be read by something else, typically a formatter
//! turning a [`table::TableSnapshot`] into a prompt for an advice service or
//! a UI rendering the table. Neither lives in this crate.
//!
//! ## Features
//!
//! - `serde` (default) derives `Serialize`/`Deserialize` for the
//!   configuration, the snapshot and everything inside it, and enables
//!   loading a [`table::TableConfig`] from JSON.
//!
//! ## Example
//!
//! ```
//! use poker_table_state::table::{PlayerAction, Stage, TableConfig, TableState};
//!
//! let config = TableConfig::new(6, 2.0, 200.0).unwrap();
//! let mut table = TableState::new(config).unwrap();
//!
//! // UTG opens, everyone else calls.
//! table.record_action(2, PlayerAction::RaiseTo(6.0)).unwrap();
//! for idx in [3, 4, 5, 0, 1] {
//!     table.record_action(idx, PlayerAction::Call).unwrap();
//! }
//!
//! assert_eq!(table.pot(), 36.0);
//! assert_eq!(table.advance_stage().unwrap(), Stage::Flop);
//! ```

/// Table state, positions, actions and snapshots.
pub mod table;
