use core::fmt;
use std::fmt::Display;

use super::errors::{ConfigError, TableError};
use super::{MAX_SEATS, MIN_SEATS};

/// The poker-standard name for a seat's relation to the button.
///
/// Positions are never stored on a seat. They are derived from the small
/// blind index and the seat count every time they are needed since the small
/// blind moves every hand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    #[cfg_attr(feature = "serde", serde(rename = "BTN"))]
    Button,
    #[cfg_attr(feature = "serde", serde(rename = "SB"))]
    SmallBlind,
    #[cfg_attr(feature = "serde", serde(rename = "BB"))]
    BigBlind,
    #[cfg_attr(feature = "serde", serde(rename = "UTG"))]
    UnderTheGun,
    #[cfg_attr(feature = "serde", serde(rename = "UTG+1"))]
    UnderTheGun1,
    #[cfg_attr(feature = "serde", serde(rename = "UTG+2"))]
    UnderTheGun2,
    #[cfg_attr(feature = "serde", serde(rename = "MP"))]
    Middle,
    #[cfg_attr(feature = "serde", serde(rename = "MP+1"))]
    Middle1,
    #[cfg_attr(feature = "serde", serde(rename = "MP+2"))]
    Middle2,
    #[cfg_attr(feature = "serde", serde(rename = "HJ"))]
    Hijack,
    #[cfg_attr(feature = "serde", serde(rename = "CO"))]
    Cutoff,
    #[cfg_attr(feature = "serde", serde(rename = "LJ"))]
    Lojack,
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl Position {
    /// Every label in clockwise order starting from the button.
    pub const CANONICAL_ORDER: [Position; 12] = [
        Position::Button,
        Position::SmallBlind,
        Position::BigBlind,
        Position::UnderTheGun,
        Position::UnderTheGun1,
        Position::UnderTheGun2,
        Position::Middle,
        Position::Middle1,
        Position::Middle2,
        Position::Hijack,
        Position::Cutoff,
        Position::Lojack,
    ];

    /// Labels added on top of BTN/SB/BB as the table grows. The fourth seat
    /// adds UTG, the fifth CO and so on.
    const INSERTION_ORDER: [Position; MAX_SEATS - MIN_SEATS] = [
        Position::UnderTheGun,
        Position::Cutoff,
        Position::Hijack,
        Position::UnderTheGun1,
        Position::Middle,
        Position::Middle1,
        Position::UnderTheGun2,
    ];

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Position::Button => "BTN",
            Position::SmallBlind => "SB",
            Position::BigBlind => "BB",
            Position::UnderTheGun => "UTG",
            Position::UnderTheGun1 => "UTG+1",
            Position::UnderTheGun2 => "UTG+2",
            Position::Middle => "MP",
            Position::Middle1 => "MP+1",
            Position::Middle2 => "MP+2",
            Position::Hijack => "HJ",
            Position::Cutoff => "CO",
            Position::Lojack => "LJ",
        }
    }

    fn is_used_at(&self, seat_count: usize) -> bool {
        match self {
            Position::Button | Position::SmallBlind | Position::BigBlind => true,
            _ => Self::INSERTION_ORDER[..seat_count - MIN_SEATS].contains(self),
        }
    }

    /// The labels in play for a table of `seat_count`, clockwise from the
    /// button.
    ///
    /// # Example
    ///
    /// ```
    /// use poker_table_state::table::Position;
    ///
    /// let labels: Vec<String> = Position::labels_for(6)
    ///     .unwrap()
    ///     .iter()
    ///     .map(|p| p.to_string())
    ///     .collect();
    /// assert_eq!(labels, vec!["BTN", "SB", "BB", "UTG", "HJ", "CO"]);
    /// ```
    pub fn labels_for(seat_count: usize) -> Result<Vec<Position>, TableError> {
        check_seat_count(seat_count)?;
        Ok(Self::CANONICAL_ORDER
            .iter()
            .copied()
            .filter(|p| p.is_used_at(seat_count))
            .collect())
    }

    /// Label for seat `idx` when the small blind sits at `small_blind_idx`.
    ///
    /// The small blind seat is SB, the seat after it BB, and the seat right
    /// before it is the button.
    pub fn for_seat(
        idx: usize,
        small_blind_idx: usize,
        seat_count: usize,
    ) -> Result<Position, TableError> {
        check_seat_count(seat_count)?;
        for seat in [idx, small_blind_idx] {
            if seat >= seat_count {
                return Err(TableError::InvalidSeatIndex {
                    idx: seat,
                    num_seats: seat_count,
                });
            }
        }

        // Distance clockwise from the small blind, then shifted by one since
        // the template starts at the button.
        let relative = (idx + seat_count - small_blind_idx) % seat_count;
        let template_idx = (relative + 1) % seat_count;

        Self::CANONICAL_ORDER
            .iter()
            .copied()
            .filter(|p| p.is_used_at(seat_count))
            .nth(template_idx)
            .ok_or(TableError::InvalidSeatIndex {
                idx,
                num_seats: seat_count,
            })
    }
}

fn check_seat_count(seat_count: usize) -> Result<(), TableError> {
    if (MIN_SEATS..=MAX_SEATS).contains(&seat_count) {
        Ok(())
    } else {
        Err(ConfigError::InvalidSeatCount { actual: seat_count }.into())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_labels_grow_with_seat_count() {
        let expected: [&[&str]; 8] = [
            &["BTN", "SB", "BB"],
            &["BTN", "SB", "BB", "UTG"],
            &["BTN", "SB", "BB", "UTG", "CO"],
            &["BTN", "SB", "BB", "UTG", "HJ", "CO"],
            &["BTN", "SB", "BB", "UTG", "UTG+1", "HJ", "CO"],
            &["BTN", "SB", "BB", "UTG", "UTG+1", "MP", "HJ", "CO"],
            &["BTN", "SB", "BB", "UTG", "UTG+1", "MP", "MP+1", "HJ", "CO"],
            &[
                "BTN", "SB", "BB", "UTG", "UTG+1", "UTG+2", "MP", "MP+1", "HJ", "CO",
            ],
        ];
        for (offset, labels) in expected.iter().enumerate() {
            let seat_count = MIN_SEATS + offset;
            let actual: Vec<&str> = Position::labels_for(seat_count)
                .unwrap()
                .iter()
                .map(|p| p.abbreviation())
                .collect();
            assert_eq!(*labels, actual.as_slice(), "seat_count {}", seat_count);
        }
    }

    #[test]
    fn test_every_seat_count_and_rotation_is_a_bijection() {
        for seat_count in MIN_SEATS..=MAX_SEATS {
            for sb in 0..seat_count {
                let positions: Vec<Position> = (0..seat_count)
                    .map(|idx| Position::for_seat(idx, sb, seat_count).unwrap())
                    .collect();
                let unique: HashSet<Position> = positions.iter().copied().collect();
                assert_eq!(seat_count, unique.len());

                for anchor in [Position::Button, Position::SmallBlind, Position::BigBlind] {
                    assert_eq!(1, positions.iter().filter(|p| **p == anchor).count());
                }
                assert_eq!(Position::SmallBlind, positions[sb]);
                assert_eq!(Position::BigBlind, positions[(sb + 1) % seat_count]);
                assert_eq!(
                    Position::Button,
                    positions[(sb + seat_count - 1) % seat_count]
                );
            }
        }
    }

    #[test]
    fn test_six_max_from_seat_zero() {
        let labels: Vec<Position> = (0..6)
            .map(|idx| Position::for_seat(idx, 0, 6).unwrap())
            .collect();
        assert_eq!(
            vec![
                Position::SmallBlind,
                Position::BigBlind,
                Position::UnderTheGun,
                Position::Hijack,
                Position::Cutoff,
                Position::Button,
            ],
            labels
        );
    }

    #[test]
    fn test_rotation_shifts_labels_by_one_seat() {
        for seat_count in MIN_SEATS..=MAX_SEATS {
            for idx in 0..seat_count {
                let before = Position::for_seat(idx, 0, seat_count).unwrap();
                let after = Position::for_seat((idx + 1) % seat_count, 1, seat_count).unwrap();
                assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn test_bad_seat_count() {
        assert_eq!(
            Err(TableError::InvalidConfiguration(
                ConfigError::InvalidSeatCount { actual: 2 }
            )),
            Position::for_seat(0, 0, 2)
        );
        assert!(Position::labels_for(11).is_err());
    }

    #[test]
    fn test_bad_seat_index() {
        assert_eq!(
            Err(TableError::InvalidSeatIndex {
                idx: 4,
                num_seats: 4
            }),
            Position::for_seat(4, 0, 4)
        );
        assert_eq!(
            Err(TableError::InvalidSeatIndex {
                idx: 7,
                num_seats: 4
            }),
            Position::for_seat(0, 7, 4)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serializes_as_abbreviation() {
        let json = serde_json::to_string(&Position::UnderTheGun1).unwrap();
        assert_eq!("\"UTG+1\"", json);
        let back: Position = serde_json::from_str("\"CO\"").unwrap();
        assert_eq!(Position::Cutoff, back);
    }
}
