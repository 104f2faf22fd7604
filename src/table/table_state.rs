use core::fmt;
use std::fmt::Display;

use approx::abs_diff_eq;
use tracing::{debug, event, instrument};
use uuid::Uuid;

use super::action::{Action, ActionHistory, ActionKind, PlayerAction};
use super::config::TableConfig;
use super::errors::{IllegalActionReason, TableError};
use super::position::Position;
use super::snapshot::{SeatSnapshot, TableSnapshot};
use super::HERO_IDX;

/// The betting round of the hand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Stage {
    #[default]
    Preflop,
    Flop,
    Turn,
    River,
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Preflop => write!(f, "Preflop"),
            Stage::Flop => write!(f, "Flop"),
            Stage::Turn => write!(f, "Turn"),
            Stage::River => write!(f, "River"),
        }
    }
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Preflop, Stage::Flop, Stage::Turn, Stage::River];

    /// The next betting round, or `None` once the river is done and the
    /// hand is complete.
    pub fn next(&self) -> Option<Self> {
        match *self {
            Stage::Preflop => Some(Stage::Flop),
            Stage::Flop => Some(Stage::Turn),
            Stage::Turn => Some(Stage::River),
            Stage::River => None,
        }
    }
}

/// One seat at the table. The seat outlives the hand, the fields below are
/// reset whenever a new hand starts.
#[derive(Clone, PartialEq, Debug)]
pub struct Seat {
    pub idx: usize,
    pub name: String,
    pub stack: f32,
    /// Chips put in during the current betting round.
    pub round_contribution: f32,
    /// Chips put in during the whole hand.
    pub hand_contribution: f32,
    pub folded: bool,
    pub has_acted: bool,
    /// The last action this seat took in the current round.
    pub action: Option<ActionKind>,
}

impl Seat {
    fn new(idx: usize, name: String, stack: f32) -> Self {
        Seat {
            idx,
            name,
            stack,
            round_contribution: 0.0,
            hand_contribution: 0.0,
            folded: false,
            has_acted: false,
            action: None,
        }
    }

    fn reset_for_hand(&mut self, stack: f32) {
        self.stack = stack;
        self.round_contribution = 0.0;
        self.hand_contribution = 0.0;
        self.folded = false;
        self.has_acted = false;
        self.action = None;
    }

    fn reset_for_round(&mut self) {
        self.round_contribution = 0.0;
        // A fold is permanent for the hand so keep showing it.
        if !self.folded {
            self.has_acted = false;
            self.action = None;
        }
    }

    /// Move `extra` chips from the stack into the pot. There is no check
    /// against the stack size.
    fn contribute(&mut self, extra: f32) {
        self.stack -= extra;
        self.round_contribution += extra;
        self.hand_contribution += extra;
    }
}

/// Betting state for the current round.
#[derive(Clone, PartialEq, Debug)]
pub struct RoundData {
    // The value to be called.
    pub bet: f32,
    // The size of the last raise this round.
    pub last_raise: f32,
    // The minimum allowed raise.
    pub min_raise: f32,
}

impl RoundData {
    pub fn new(big_blind: f32) -> Self {
        RoundData {
            bet: 0.0,
            last_raise: 0.0,
            min_raise: big_blind,
        }
    }

    /// The smallest total contribution a raise can go to.
    pub fn min_raise_to(&self) -> f32 {
        self.bet + self.min_raise
    }

    fn do_bet(&mut self, new_total: f32, is_forced: bool) {
        let previous_bet = self.bet;
        self.bet = previous_bet.max(new_total);

        if !is_forced && new_total > previous_bet {
            self.last_raise = new_total - previous_bet;
            self.min_raise = self.min_raise.max(self.last_raise);
        }
    }
}

/// Tracks one hand of no-limit hold'em at a single table.
///
/// The table always has a hand in progress: blinds are posted on creation
/// and again every time the hand is reset.
///
/// # Example
///
/// ```
/// use poker_table_state::table::{PlayerAction, Stage, TableConfig, TableState};
///
/// let config = TableConfig::new(3, 2.0, 100.0).unwrap();
/// let mut table = TableState::new(config).unwrap();
/// assert_eq!(table.pot(), 3.0);
///
/// // Button calls, small blind completes, big blind checks its option.
/// table.record_action(2, PlayerAction::Call).unwrap();
/// table.record_action(0, PlayerAction::Call).unwrap();
/// table.record_action(1, PlayerAction::Check).unwrap();
///
/// assert!(table.all_acted());
/// assert_eq!(table.advance_stage().unwrap(), Stage::Flop);
/// assert_eq!(table.pot(), 6.0);
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct TableState {
    config: TableConfig,
    seats: Vec<Seat>,
    small_blind_idx: usize,
    stage: Stage,
    /// The total amount in the pot
    pot: f32,
    round_data: RoundData,
    history: ActionHistory,
    hand_id: Uuid,
    hand_number: u64,
}

impl TableState {
    /// Create a table with the small blind on seat 0 and post the blinds
    /// for the first hand.
    pub fn new(config: TableConfig) -> Result<Self, TableError> {
        Self::with_small_blind_idx(config, 0)
    }

    pub fn with_small_blind_idx(
        config: TableConfig,
        small_blind_idx: usize,
    ) -> Result<Self, TableError> {
        config.validate()?;
        if small_blind_idx >= config.seat_count {
            return Err(TableError::InvalidSeatIndex {
                idx: small_blind_idx,
                num_seats: config.seat_count,
            });
        }

        let seats = (0..config.seat_count)
            .map(|idx| Seat::new(idx, config.seat_name(idx), config.initial_stack))
            .collect();

        let mut table = TableState {
            round_data: RoundData::new(config.big_blind),
            seats,
            small_blind_idx,
            stage: Stage::Preflop,
            pot: 0.0,
            history: ActionHistory::new(),
            hand_id: Uuid::now_v7(),
            hand_number: 1,
            config,
        };
        debug!(
            seat_count = table.config.seat_count,
            big_blind = table.config.big_blind,
            small_blind_idx,
            "Creating table"
        );
        table.post_blinds();
        Ok(table)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn num_seats(&self) -> usize {
        self.seats.len()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, idx: usize) -> Result<&Seat, TableError> {
        self.seats.get(idx).ok_or(TableError::InvalidSeatIndex {
            idx,
            num_seats: self.seats.len(),
        })
    }

    pub fn hero(&self) -> &Seat {
        &self.seats[HERO_IDX]
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn pot(&self) -> f32 {
        self.pot
    }

    pub fn big_blind(&self) -> f32 {
        self.config.big_blind
    }

    pub fn current_bet(&self) -> f32 {
        self.round_data.bet
    }

    pub fn last_raise(&self) -> f32 {
        self.round_data.last_raise
    }

    pub fn min_raise(&self) -> f32 {
        self.round_data.min_raise
    }

    pub fn min_raise_to(&self) -> f32 {
        self.round_data.min_raise_to()
    }

    pub fn round_data(&self) -> &RoundData {
        &self.round_data
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    pub fn hand_id(&self) -> Uuid {
        self.hand_id
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    pub fn small_blind_idx(&self) -> usize {
        self.small_blind_idx
    }

    pub fn big_blind_idx(&self) -> usize {
        (self.small_blind_idx + 1) % self.seats.len()
    }

    pub fn button_idx(&self) -> usize {
        let n = self.seats.len();
        (self.small_blind_idx + n - 1) % n
    }

    pub fn is_small_blind(&self, idx: usize) -> bool {
        idx == self.small_blind_idx
    }

    /// The position label of a seat for the current hand.
    pub fn position(&self, idx: usize) -> Result<Position, TableError> {
        Position::for_seat(idx, self.small_blind_idx, self.seats.len())
    }

    /// How many more chips the seat has to put in to call.
    pub fn amount_to_call(&self, idx: usize) -> Result<f32, TableError> {
        let seat = self.seat(idx)?;
        Ok((self.round_data.bet - seat.round_contribution).max(0.0))
    }

    /// Voluntary actions the seat could take right now. Raises are listed
    /// but still have to meet `min_raise_to`.
    pub fn legal_actions(&self, idx: usize) -> Result<Vec<ActionKind>, TableError> {
        let seat = self.seat(idx)?;
        if seat.folded {
            return Ok(vec![]);
        }
        let check_kind = if amounts_match(seat.round_contribution, self.round_data.bet) {
            ActionKind::Check
        } else {
            ActionKind::Call
        };
        Ok(vec![ActionKind::Fold, check_kind, ActionKind::Raise])
    }

    /// Seats that are still in the hand and owe a decision this round.
    pub fn waiting_on(&self) -> Vec<usize> {
        self.seats
            .iter()
            .filter(|s| !s.folded && !s.has_acted)
            .map(|s| s.idx)
            .collect()
    }

    /// True once every seat still in the hand has made a voluntary decision
    /// this round. Posting a blind doesn't count, so the big blind always
    /// gets its option.
    pub fn all_acted(&self) -> bool {
        self.seats.iter().all(|s| s.folded || s.has_acted)
    }

    /// Record a voluntary action for a seat.
    ///
    /// Everything is validated before anything changes, so an error leaves
    /// the table exactly as it was.
    ///
    /// Returns the chips this action added to the pot.
    #[instrument(level = "trace", skip(self), fields(stage = %self.stage))]
    pub fn record_action(&mut self, idx: usize, action: PlayerAction) -> Result<f32, TableError> {
        let position = self.position(idx)?;
        let seat = self.seat(idx)?;
        if seat.folded {
            return Err(IllegalActionReason::SeatFolded(idx).into());
        }
        let contribution = seat.round_contribution;
        let bet = self.round_data.bet;

        let extra_amount = match action {
            PlayerAction::Fold => None,
            PlayerAction::Check => {
                if !amounts_match(contribution, bet) {
                    return Err(IllegalActionReason::CheckFacingBet(idx).into());
                }
                Some(0.0)
            }
            PlayerAction::Call => {
                let to_call = bet - contribution;
                if to_call < 0.0 && !amounts_match(contribution, bet) {
                    return Err(IllegalActionReason::CallBelowContribution(idx).into());
                }
                Some(to_call.max(0.0))
            }
            PlayerAction::RaiseTo(to) => {
                if !to.is_finite() || to.is_sign_negative() {
                    return Err(IllegalActionReason::InvalidAmount.into());
                }
                let min_to = self.round_data.min_raise_to();
                if to < min_to && !amounts_match(to, min_to) {
                    return Err(TableError::IllegalRaiseSize { to, min_to });
                }
                Some(to - contribution)
            }
        };

        // At this point we start making changes.
        let kind = action.kind();
        let recorded = match extra_amount {
            None => {
                let seat = &mut self.seats[idx];
                seat.folded = true;
                None
            }
            Some(extra) => Some(self.apply_contribution(idx, extra, false)),
        };

        if kind == ActionKind::Raise {
            // A raise reopens the action for everyone else still in.
            for other in self.seats.iter_mut().filter(|s| s.idx != idx && !s.folded) {
                other.has_acted = false;
            }
        }

        let seat = &mut self.seats[idx];
        seat.has_acted = true;
        seat.action = Some(kind);

        let entry = Action::new(kind, recorded, idx, position);
        event!(
            tracing::Level::TRACE,
            hand_number = self.hand_number,
            action = %entry,
            pot = self.pot,
            "Recorded action"
        );
        self.history.push(self.stage, entry);

        Ok(extra_amount.unwrap_or(0.0))
    }

    /// Move to the next betting round. Leaving the river completes the hand
    /// and starts a new one with the same small blind.
    ///
    /// Returns the stage the table is now in.
    #[instrument(level = "trace", skip(self), fields(stage = %self.stage))]
    pub fn advance_stage(&mut self) -> Result<Stage, TableError> {
        if !self.all_acted() {
            return Err(TableError::RoundNotComplete {
                stage: self.stage,
                waiting: self.waiting_on(),
            });
        }

        match self.stage.next() {
            Some(next) => {
                debug!(from = %self.stage, to = %next, pot = self.pot, "Advancing stage");
                self.stage = next;
                for seat in self.seats.iter_mut() {
                    seat.reset_for_round();
                }
                self.round_data = RoundData::new(self.config.big_blind);
            }
            None => {
                debug!(
                    hand_number = self.hand_number,
                    pot = self.pot,
                    "Hand complete"
                );
                self.reset_hand();
            }
        }
        Ok(self.stage)
    }

    /// Throw away everything about the current hand and start a new one
    /// with the blinds re-posted at the current small blind.
    pub fn reset_hand(&mut self) {
        self.pot = 0.0;
        self.stage = Stage::Preflop;
        self.history.clear();
        for seat in self.seats.iter_mut() {
            seat.reset_for_hand(self.config.initial_stack);
        }
        self.round_data = RoundData::new(self.config.big_blind);
        self.hand_id = Uuid::now_v7();
        self.hand_number += 1;
        debug!(
            hand_number = self.hand_number,
            small_blind_idx = self.small_blind_idx,
            "Starting new hand"
        );
        self.post_blinds();
    }

    /// Move the small blind (and with it the button) one seat clockwise and
    /// start a new hand. This is the only place the small blind moves.
    pub fn rotate_button(&mut self) {
        self.small_blind_idx = (self.small_blind_idx + 1) % self.seats.len();
        debug!(small_blind_idx = self.small_blind_idx, "Rotating button");
        self.reset_hand();
    }

    /// An owned copy of everything an outside consumer needs.
    pub fn snapshot(&self) -> TableSnapshot {
        let n = self.seats.len();
        let seats: Vec<SeatSnapshot> = self
            .seats
            .iter()
            .map(|seat| SeatSnapshot {
                idx: seat.idx,
                name: seat.name.clone(),
                stack: seat.stack,
                position: position_of(seat.idx, self.small_blind_idx, n),
                action: seat.action,
                round_contribution: seat.round_contribution,
                folded: seat.folded,
                has_acted: seat.has_acted,
                is_small_blind: self.is_small_blind(seat.idx),
            })
            .collect();

        TableSnapshot {
            hand_id: self.hand_id,
            hand_number: self.hand_number,
            stage: self.stage,
            pot: self.pot,
            big_blind: self.config.big_blind,
            small_blind_idx: self.small_blind_idx,
            current_bet: self.round_data.bet,
            last_raise: self.round_data.last_raise,
            min_raise: self.round_data.min_raise,
            hero_position: seats[HERO_IDX].position,
            hero_stack: seats[HERO_IDX].stack,
            seats,
            history: self.history.clone(),
        }
    }

    fn post_blinds(&mut self) {
        let sb_idx = self.small_blind_idx;
        let bb_idx = self.big_blind_idx();
        let n = self.seats.len();

        for (idx, kind, amount) in [
            (sb_idx, ActionKind::SmallBlind, self.config.small_blind()),
            (bb_idx, ActionKind::BigBlind, self.config.big_blind),
        ] {
            let total = self.apply_contribution(idx, amount, true);
            self.seats[idx].action = Some(kind);
            self.history.push(
                Stage::Preflop,
                Action::new(kind, Some(total), idx, position_of(idx, sb_idx, n)),
            );
        }
        // The big blind sets the floor for the first raise.
        self.round_data.min_raise = self.config.big_blind;

        debug!(
            hand_number = self.hand_number,
            sb_idx,
            bb_idx,
            pot = self.pot,
            "Posted blinds"
        );
    }

    /// Put chips in for a seat and return its new round contribution.
    fn apply_contribution(&mut self, idx: usize, extra: f32, is_forced: bool) -> f32 {
        let seat = &mut self.seats[idx];
        seat.contribute(extra);
        let total = seat.round_contribution;

        self.pot += extra;
        self.round_data.do_bet(total, is_forced);
        total
    }
}

/// Seat indices and the small blind index are kept in range by the table, so
/// the lookup only fails on a broken invariant.
fn position_of(idx: usize, small_blind_idx: usize, seat_count: usize) -> Position {
    let position = Position::for_seat(idx, small_blind_idx, seat_count);
    debug_assert!(
        position.is_ok(),
        "seat {idx} has no position with small blind {small_blind_idx} of {seat_count}"
    );
    position.unwrap_or(Position::Button)
}

/// Compare chip amounts allowing only a few ulps of rounding error, so a
/// shortfall of a single chip is never treated as equal.
fn amounts_match(a: f32, b: f32) -> bool {
    let magnitude = a.abs().max(b.abs()).max(1.0);
    abs_diff_eq!(a, b, epsilon = magnitude * f32::EPSILON * 4.0)
}
