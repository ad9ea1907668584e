//! The deterministic game simulator.
//!
//! `simulate` is a pure function from `(seed1, seed2, session_id)` to the
//! deck, the per-round records, the winner and the reason the game ended.
//! The circuit enforces exactly these rules; the two are tested against
//! each other in `blackspot-circuit`.

use ark_bn254::Fr;
use serde::{Deserialize, Serialize};

use crate::cards::{round_winner, CardKind, COIN_INDEX, MAX_ROUNDS, TARGET_SCORE};
use crate::deck::{derive_deck, DeckDerivation};
use crate::encode::low_128;
use crate::hash::poseidon2;
use crate::CoreError;

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Someone drew card 24.
    BlackSpot,
    /// Someone reached the target score.
    Score,
    /// Deck ran out with distinct scores.
    Exhausted,
    /// Deck ran out tied; the combined seed decided.
    CoinFlip,
}

/// One played round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u8,
    pub card_p1: u8,
    pub card_p2: u8,
    pub kind_p1: CardKind,
    pub kind_p2: CardKind,
    /// 0 tie, 1 player one, 2 player two.
    pub round_winner: u8,
    pub black_spot: bool,
    /// Cumulative scores after this round.
    pub score_p1: u32,
    pub score_p2: u32,
    pub game_over: bool,
}

/// Full simulation outcome.
#[derive(Clone, Debug, Serialize)]
pub struct Simulation {
    #[serde(skip)]
    pub derivation: DeckDerivation,
    pub deck: [u8; 25],
    pub rounds: Vec<RoundRecord>,
    /// 1 or 2; a game never ends undecided.
    pub winner: u8,
    pub end_reason: EndReason,
}

/// Plays a session out. Fails only if deck derivation refuses a truncated
/// weight collision.
pub fn simulate(seed1: &Fr, seed2: &Fr, session_id: u32) -> Result<Simulation, CoreError> {
    let derivation = derive_deck(seed1, seed2, session_id)?;
    let deck = derivation.deck;

    let mut rounds = Vec::with_capacity(MAX_ROUNDS);
    let mut score1 = 0u32;
    let mut score2 = 0u32;
    let mut winner = 0u8;
    let mut end_reason = EndReason::Exhausted;
    let mut active = true;

    for i in 0..MAX_ROUNDS {
        if !active {
            break;
        }
        let card_p1 = deck[2 * i];
        let card_p2 = deck[2 * i + 1];
        let kind_p1 = CardKind::of(card_p1);
        let kind_p2 = CardKind::of(card_p2);
        let mut black_spot = false;
        let this_round: u8;

        if kind_p1 == CardKind::BlackSpot {
            winner = 2;
            this_round = 2;
            black_spot = true;
            active = false;
            end_reason = EndReason::BlackSpot;
        } else if kind_p2 == CardKind::BlackSpot {
            winner = 1;
            this_round = 1;
            black_spot = true;
            active = false;
            end_reason = EndReason::BlackSpot;
        } else {
            this_round = round_winner(kind_p1, kind_p2);
            match this_round {
                1 => score1 += 1,
                2 => score2 += 1,
                _ => {}
            }
            // Player one takes priority on the (unreachable) double hit.
            if score1 >= TARGET_SCORE {
                winner = 1;
                active = false;
                end_reason = EndReason::Score;
            } else if score2 >= TARGET_SCORE {
                winner = 2;
                active = false;
                end_reason = EndReason::Score;
            }
        }

        rounds.push(RoundRecord {
            round: i as u8,
            card_p1,
            card_p2,
            kind_p1,
            kind_p2,
            round_winner: this_round,
            black_spot,
            score_p1: score1,
            score_p2: score2,
            game_over: !active,
        });
    }

    if active {
        if score1 > score2 {
            winner = 1;
            end_reason = EndReason::Exhausted;
        } else if score2 > score1 {
            winner = 2;
            end_reason = EndReason::Exhausted;
        } else {
            let coin = poseidon2(&derivation.combined_seed, &Fr::from(COIN_INDEX));
            winner = (low_128(&coin) % 2) as u8 + 1;
            end_reason = EndReason::CoinFlip;
        }
    }

    tracing::debug!(session_id, winner, ?end_reason, "simulation complete");
    Ok(Simulation {
        deck,
        derivation,
        rounds,
        winner,
        end_reason,
    })
}
