use approx::assert_abs_diff_eq;

use super::{Stage, TableState};

/// Check the accounting invariants that have to hold after any sequence of
/// operations.
pub fn assert_valid_table_state(table: &TableState) {
    let seats = table.seats();

    // The pot is exactly what the seats have put in this hand.
    let total_in: f32 = seats.iter().map(|s| s.hand_contribution).sum();
    // A few ulps of the pot, well under a chip even for big stakes.
    let scale = total_in.max(table.config().initial_stack).max(1.0);
    let epsilon = scale * f32::EPSILON * 16.0;
    assert_abs_diff_eq!(total_in, table.pot(), epsilon = epsilon);

    for seat in seats {
        assert_abs_diff_eq!(
            table.config().initial_stack - seat.hand_contribution,
            seat.stack,
            epsilon = epsilon
        );
        assert!(seat.round_contribution <= seat.hand_contribution + epsilon);
    }

    // The bet to call is the biggest contribution made this round. Seats
    // that folded may have put in the most.
    let max_any = seats
        .iter()
        .map(|s| s.round_contribution)
        .fold(0.0_f32, f32::max);
    assert_abs_diff_eq!(max_any, table.current_bet(), epsilon = epsilon);

    let max_active = seats
        .iter()
        .filter(|s| !s.folded)
        .map(|s| s.round_contribution)
        .fold(0.0_f32, f32::max);
    assert!(max_active <= table.current_bet() + epsilon);

    assert!(table.min_raise() >= table.big_blind());
    assert!(table.small_blind_idx() < table.num_seats());

    // Blinds are always the first two entries of the hand.
    let preflop = table.history().for_stage(Stage::Preflop);
    assert!(preflop.len() >= 2);
    assert!(preflop[0].kind.is_forced());
    assert!(preflop[1].kind.is_forced());
    assert_eq!(table.small_blind_idx(), preflop[0].idx);
    assert_eq!(table.big_blind_idx(), preflop[1].idx);

    // Once everyone has acted every seat still in has matched the bet.
    if table.all_acted() {
        for seat in seats.iter().filter(|s| !s.folded) {
            assert_abs_diff_eq!(seat.round_contribution, table.current_bet(), epsilon = epsilon);
        }
    }
}
