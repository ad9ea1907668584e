//! Card indices, card kinds and the round-winning relation.

use serde::{Deserialize, Serialize};

/// Cards in a session deck.
pub const DECK_SIZE: usize = 25;
/// Two cards per round, card 24 only drawn if it lands in the first 24 slots.
pub const MAX_ROUNDS: usize = 12;
/// First player to this score wins outright.
pub const TARGET_SCORE: u32 = 3;
/// The losing card.
pub const BLACK_SPOT_CARD: u8 = 24;
/// Domain index hashed with the combined seed for the tiebreak coin.
pub const COIN_INDEX: u64 = 25;

/// The four card kinds. Indices 0-7 are Rum, 8-15 Skull, 16-23 Backstabber
/// and index 24 the lone Black Spot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum CardKind {
    Rum = 0,
    Skull = 1,
    Backstabber = 2,
    BlackSpot = 3,
}

impl CardKind {
    /// Kind of a card index in `[0, 25)`; equivalently `index >> 3`.
    pub fn of(card: u8) -> CardKind {
        debug_assert!((card as usize) < DECK_SIZE);
        match card >> 3 {
            0 => CardKind::Rum,
            1 => CardKind::Skull,
            2 => CardKind::Backstabber,
            _ => CardKind::BlackSpot,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Winner of a non-black-spot round: 0 tie, 1 player one, 2 player two.
/// Rum takes Skull, Skull takes Backstabber, Backstabber takes Rum.
pub fn round_winner(kind1: CardKind, kind2: CardKind) -> u8 {
    debug_assert!(kind1 != CardKind::BlackSpot && kind2 != CardKind::BlackSpot);
    let (t1, t2) = (kind1.as_u8(), kind2.as_u8());
    if t1 == t2 {
        0
    } else if (t1 + 1) % 3 == t2 {
        1
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_boundaries() {
        assert_eq!(CardKind::of(0), CardKind::Rum);
        assert_eq!(CardKind::of(7), CardKind::Rum);
        assert_eq!(CardKind::of(8), CardKind::Skull);
        assert_eq!(CardKind::of(15), CardKind::Skull);
        assert_eq!(CardKind::of(16), CardKind::Backstabber);
        assert_eq!(CardKind::of(23), CardKind::Backstabber);
        assert_eq!(CardKind::of(24), CardKind::BlackSpot);
    }

    #[test]
    fn winner_relation_is_cyclic() {
        use CardKind::*;
        assert_eq!(round_winner(Rum, Skull), 1);
        assert_eq!(round_winner(Skull, Backstabber), 1);
        assert_eq!(round_winner(Backstabber, Rum), 1);
        assert_eq!(round_winner(Skull, Rum), 2);
        assert_eq!(round_winner(Backstabber, Skull), 2);
        assert_eq!(round_winner(Rum, Backstabber), 2);
        for k in [Rum, Skull, Backstabber] {
            assert_eq!(round_winner(k, k), 0);
        }
    }
}
