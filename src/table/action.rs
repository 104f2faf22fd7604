use core::fmt;
use std::fmt::Display;

use chrono::{DateTime, Utc};

use super::position::Position;
use super::table_state::Stage;

/// A voluntary decision a seat can make. Blinds are not in here since the
/// table posts them itself at the start of every hand.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    /// Give up the hand.
    Fold,
    /// Pass without putting in chips. Only legal when nothing is owed.
    Check,
    /// Match the current bet.
    Call,
    /// Raise so that the seat's total contribution this round is the amount.
    RaiseTo(f32),
}

impl PlayerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Check => ActionKind::Check,
            PlayerAction::Call => ActionKind::Call,
            PlayerAction::RaiseTo(_) => ActionKind::Raise,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    SmallBlind,
    BigBlind,
}

impl ActionKind {
    pub fn is_forced(&self) -> bool {
        matches!(self, ActionKind::SmallBlind | ActionKind::BigBlind)
    }
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Fold => write!(f, "FOLD"),
            ActionKind::Check => write!(f, "CHECK"),
            ActionKind::Call => write!(f, "CALL"),
            ActionKind::Raise => write!(f, "RAISE"),
            ActionKind::SmallBlind => write!(f, "SMALL_BLIND"),
            ActionKind::BigBlind => write!(f, "BIG_BLIND"),
        }
    }
}

/// One entry in the hand history. Never modified after it's recorded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub kind: ActionKind,
    /// The seat's total contribution for the round after this action.
    /// This is how much is in, not how much this action added.
    /// `None` for folds.
    pub amount: Option<f32>,
    pub idx: usize,
    pub position: Position,
    pub timestamp: DateTime<Utc>,
}

impl Action {
    pub fn new(kind: ActionKind, amount: Option<f32>, idx: usize, position: Position) -> Self {
        Action {
            kind,
            amount,
            idx,
            position,
            timestamp: Utc::now(),
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount {
            Some(amount) => write!(f, "{} {} {}", self.position, self.kind, amount),
            None => write!(f, "{} {}", self.position, self.kind),
        }
    }
}

/// Append only log of actions, kept per stage in the order they arrived.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionHistory {
    preflop: Vec<Action>,
    flop: Vec<Action>,
    turn: Vec<Action>,
    river: Vec<Action>,
}

impl ActionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stage: Stage, action: Action) {
        self.stage_mut(stage).push(action);
    }

    pub fn for_stage(&self, stage: Stage) -> &[Action] {
        match stage {
            Stage::Preflop => &self.preflop,
            Stage::Flop => &self.flop,
            Stage::Turn => &self.turn,
            Stage::River => &self.river,
        }
    }

    /// Every action in stage order, then in the order it was recorded.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, &Action)> {
        Stage::ALL
            .into_iter()
            .flat_map(move |stage| self.for_stage(stage).iter().map(move |a| (stage, a)))
    }

    pub fn len(&self) -> usize {
        Stage::ALL.iter().map(|s| self.for_stage(*s).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        for stage in Stage::ALL {
            self.stage_mut(stage).clear();
        }
    }

    fn stage_mut(&mut self, stage: Stage) -> &mut Vec<Action> {
        match stage {
            Stage::Preflop => &mut self.preflop,
            Stage::Flop => &mut self.flop,
            Stage::Turn => &mut self.turn,
            Stage::River => &mut self.river,
        }
    }
}
