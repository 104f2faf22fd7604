use uuid::Uuid;

use super::action::{ActionHistory, ActionKind};
use super::position::Position;
use super::table_state::Stage;

/// Read only view of one seat.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatSnapshot {
    pub idx: usize,
    pub name: String,
    pub stack: f32,
    pub position: Position,
    pub action: Option<ActionKind>,
    pub round_contribution: f32,
    pub folded: bool,
    pub has_acted: bool,
    pub is_small_blind: bool,
}

/// An owned copy of the table for formatters and renderers. Later changes
/// to the table are not reflected here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableSnapshot {
    pub hand_id: Uuid,
    pub hand_number: u64,
    pub stage: Stage,
    pub pot: f32,
    pub big_blind: f32,
    pub small_blind_idx: usize,
    pub current_bet: f32,
    pub last_raise: f32,
    pub min_raise: f32,
    pub seats: Vec<SeatSnapshot>,
    pub hero_position: Position,
    pub hero_stack: f32,
    pub history: ActionHistory,
}

impl TableSnapshot {
    /// Seats that haven't folded.
    pub fn active_seats(&self) -> impl Iterator<Item = &SeatSnapshot> {
        self.seats.iter().filter(|s| !s.folded)
    }

    /// The pot measured in big blinds.
    pub fn pot_in_big_blinds(&self) -> f32 {
        self.pot / self.big_blind
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::table::{PlayerAction, TableConfig, TableState};

    use super::*;

    #[test]
    fn test_snapshot_matches_table() {
        let config = TableConfig::new(6, 2.0, 100.0).unwrap();
        let mut table = TableState::new(config).unwrap();
        table.record_action(2, PlayerAction::RaiseTo(6.0)).unwrap();
        table.record_action(3, PlayerAction::Fold).unwrap();

        let snapshot = table.snapshot();
        assert_eq!(Stage::Preflop, snapshot.stage);
        assert_relative_eq!(9.0, snapshot.pot);
        assert_relative_eq!(4.5, snapshot.pot_in_big_blinds());
        assert_relative_eq!(6.0, snapshot.current_bet);
        assert_relative_eq!(4.0, snapshot.last_raise);
        assert_relative_eq!(4.0, snapshot.min_raise);
        assert_eq!(Position::SmallBlind, snapshot.hero_position);
        assert_relative_eq!(99.0, snapshot.hero_stack);
        assert_eq!(1, snapshot.hand_number);
        assert_eq!(table.hand_id(), snapshot.hand_id);

        assert_eq!(6, snapshot.seats.len());
        assert_eq!(5, snapshot.active_seats().count());

        let utg = &snapshot.seats[2];
        assert_eq!(Position::UnderTheGun, utg.position);
        assert_eq!(Some(ActionKind::Raise), utg.action);
        assert_relative_eq!(6.0, utg.round_contribution);
        assert!(utg.has_acted);
        assert!(snapshot.seats[0].is_small_blind);
        assert!(snapshot.seats[3].folded);
        assert_eq!(4, snapshot.history.len());
    }

    #[test]
    fn test_snapshot_is_a_value() {
        let config = TableConfig::new(3, 2.0, 100.0).unwrap();
        let mut table = TableState::new(config).unwrap();
        let before = table.snapshot();

        table.record_action(2, PlayerAction::Call).unwrap();
        assert_relative_eq!(3.0, before.pot);
        assert_eq!(2, before.history.len());
        assert_ne!(before, table.snapshot());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_snapshot_json() {
        let config = TableConfig::new(3, 2.0, 100.0).unwrap();
        let table = TableState::new(config).unwrap();
        let json = table.snapshot().to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!("preflop", value["stage"]);
        assert_eq!("SB", value["hero_position"]);
        assert_eq!("BIG_BLIND", value["history"]["preflop"][1]["kind"]);
        assert_eq!("BTN", value["seats"][2]["position"]);

        let back: TableSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(table.snapshot(), back);
    }
}
