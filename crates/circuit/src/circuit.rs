//! The settlement constraint system.
//!
//! Public inputs, in allocation order (the verifier feeds scalars in the
//! same order): `commit1, commit2, seed1, seed2, session_id, winner`.
//! Private witnesses: the deck permutation and the truncated/high parts of
//! every deck weight. The constraints replay the simulator's rules exactly;
//! any deviation between the two is a protocol break, so the integration
//! tests drive both from the same seeds and compare.

use ark_bn254::Fr;
use ark_ff::Field;
use ark_r1cs_std::alloc::AllocVar;
use ark_r1cs_std::boolean::Boolean;
use ark_r1cs_std::eq::EqGadget;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::fields::FieldVar;
use ark_r1cs_std::ToBitsGadget;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};

use blackspot_core::cards::{round_winner, CardKind, COIN_INDEX, DECK_SIZE, MAX_ROUNDS, TARGET_SCORE};

use crate::gadgets::{bool_to_fp, enforce_bits, poseidon_gadget, PoseidonSuite};

/// One card's kind as mutually-exclusive flags, decoded from bits 3 and 4
/// of the card index (valid because indices are range-checked to `[0, 25)`).
struct CardFlags {
    rum: Boolean<Fr>,
    skull: Boolean<Fr>,
    backstabber: Boolean<Fr>,
    black_spot: Boolean<Fr>,
}

impl CardFlags {
    fn from_bits(b3: &Boolean<Fr>, b4: &Boolean<Fr>) -> Result<CardFlags, SynthesisError> {
        let not_b3 = b3.not();
        let not_b4 = b4.not();
        Ok(CardFlags {
            rum: not_b3.and(&not_b4)?,
            skull: b3.and(&not_b4)?,
            backstabber: not_b3.and(b4)?,
            black_spot: b3.and(b4)?,
        })
    }
}

/// The Groth16 settlement circuit. `None` assignments synthesize the bare
/// topology for key generation.
#[derive(Clone)]
pub struct SettlementCircuit {
    pub suite: PoseidonSuite,

    // Public inputs.
    pub commit1: Option<Fr>,
    pub commit2: Option<Fr>,
    pub seed1: Option<Fr>,
    pub seed2: Option<Fr>,
    pub session_id: Option<Fr>,
    pub winner: Option<Fr>,

    // Private witnesses, all in draw order.
    pub deck: Option<[u8; DECK_SIZE]>,
    pub trunc: Option<[u128; DECK_SIZE]>,
    pub high: Option<[Fr; DECK_SIZE]>,
}

impl SettlementCircuit {
    /// Unassigned instance for `Groth16::circuit_specific_setup`.
    pub fn blank() -> SettlementCircuit {
        SettlementCircuit {
            suite: PoseidonSuite::circom(),
            commit1: None,
            commit2: None,
            seed1: None,
            seed2: None,
            session_id: None,
            winner: None,
            deck: None,
            trunc: None,
            high: None,
        }
    }

    /// Final scores of the native replay, used to assign the exhaustion
    /// comparator's bits. Follows the same rules as the round gadgets so
    /// the witness stays consistent for any deck assignment.
    fn native_final_scores(&self) -> Option<(u32, u32)> {
        self.deck.map(|deck| {
            let (mut s1, mut s2, mut active) = (0u32, 0u32, true);
            for i in 0..MAX_ROUNDS {
                if !active {
                    break;
                }
                let k1 = CardKind::of(deck[2 * i]);
                let k2 = CardKind::of(deck[2 * i + 1]);
                if k1 == CardKind::BlackSpot || k2 == CardKind::BlackSpot {
                    active = false;
                } else {
                    match round_winner(k1, k2) {
                        1 => s1 += 1,
                        2 => s2 += 1,
                        _ => {}
                    }
                    if s1 >= TARGET_SCORE || s2 >= TARGET_SCORE {
                        active = false;
                    }
                }
            }
            (s1, s2)
        })
    }
}

impl ConstraintSynthesizer<Fr> for SettlementCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let commit1 = FpVar::new_input(cs.clone(), || {
            self.commit1.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let commit2 = FpVar::new_input(cs.clone(), || {
            self.commit2.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let seed1 = FpVar::new_input(cs.clone(), || {
            self.seed1.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let seed2 = FpVar::new_input(cs.clone(), || {
            self.seed2.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let session_id = FpVar::new_input(cs.clone(), || {
            self.session_id.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let winner = FpVar::new_input(cs.clone(), || {
            self.winner.ok_or(SynthesisError::AssignmentMissing)
        })?;

        // Commitment openings.
        poseidon_gadget(&self.suite.t2, &[seed1.clone()])?.enforce_equal(&commit1)?;
        poseidon_gadget(&self.suite.t2, &[seed2.clone()])?.enforce_equal(&commit2)?;

        // Combined seed.
        let combined = poseidon_gadget(
            &self.suite.t4,
            &[seed1.clone(), seed2.clone(), session_id.clone()],
        )?;

        // Deck cards: 5 bits each, at most 24.
        let mut cards = Vec::with_capacity(DECK_SIZE);
        let mut kinds = Vec::with_capacity(DECK_SIZE);
        for k in 0..DECK_SIZE {
            let native = self.deck.map(|d| Fr::from(d[k] as u64));
            let card = FpVar::new_witness(cs.clone(), || {
                native.ok_or(SynthesisError::AssignmentMissing)
            })?;
            let bits = enforce_bits(cs.clone(), &card, native, 5)?;
            // 25..31 would read as black spot plus a low bit; forbid them.
            let low_any = bits[0].or(&bits[1])?.or(&bits[2])?;
            let spot = bits[3].and(&bits[4])?;
            let overflow = spot.and(&low_any)?;
            overflow.enforce_equal(&Boolean::constant(false))?;
            kinds.push(CardFlags::from_bits(&bits[3], &bits[4])?);
            cards.push(card);
        }

        // Pairwise distinctness: an inverse witness per pair. Duplicates
        // leave the product at zero and the system unsatisfiable.
        let one = FpVar::<Fr>::one();
        for i in 0..DECK_SIZE {
            for j in (i + 1)..DECK_SIZE {
                let inv = FpVar::new_witness(cs.clone(), || {
                    let deck = self.deck.ok_or(SynthesisError::AssignmentMissing)?;
                    let diff = Fr::from(deck[i] as u64) - Fr::from(deck[j] as u64);
                    Ok(diff.inverse().unwrap_or(Fr::from(0u64)))
                })?;
                let diff = &cards[i] - &cards[j];
                diff.mul_equals(&inv, &one)?;
            }
        }

        // Weight decomposition: Poseidon2(combined, card) = trunc + high * 2^128.
        let shift128 = FpVar::constant(Fr::from(2u64).pow([128u64]));
        let mut trunc_vars = Vec::with_capacity(DECK_SIZE);
        for k in 0..DECK_SIZE {
            let weight = poseidon_gadget(&self.suite.t3, &[combined.clone(), cards[k].clone()])?;
            let trunc_native = self.trunc.map(|t| Fr::from(t[k]));
            let high_native = self.high.map(|h| h[k]);
            let trunc = FpVar::new_witness(cs.clone(), || {
                trunc_native.ok_or(SynthesisError::AssignmentMissing)
            })?;
            let high = FpVar::new_witness(cs.clone(), || {
                high_native.ok_or(SynthesisError::AssignmentMissing)
            })?;
            enforce_bits(cs.clone(), &trunc, trunc_native, 128)?;
            enforce_bits(cs.clone(), &high, high_native, 126)?;
            (&trunc + &high * &shift128).enforce_equal(&weight)?;
            trunc_vars.push(trunc);
        }

        // Sort order on the truncated weights.
        for k in 0..DECK_SIZE - 1 {
            let gap_native = self.trunc.map(|t| Fr::from(t[k + 1]) - Fr::from(t[k]));
            let gap = &trunc_vars[k + 1] - &trunc_vars[k];
            enforce_bits(cs.clone(), &gap, gap_native, 128)?;
        }

        // Twelve chained rounds.
        let two = FpVar::constant(Fr::from(2u64));
        let three = FpVar::constant(Fr::from(3u64));
        let target = FpVar::constant(Fr::from(TARGET_SCORE as u64));
        let mut score1 = FpVar::<Fr>::zero();
        let mut score2 = FpVar::<Fr>::zero();
        let mut winner_acc = FpVar::<Fr>::zero();
        let mut active = Boolean::constant(true);

        for i in 0..MAX_ROUNDS {
            let f1 = &kinds[2 * i];
            let f2 = &kinds[2 * i + 1];

            let bs1 = &f1.black_spot;
            let bs2 = &f2.black_spot;
            let any_bs = bs1.or(bs2)?;
            let no_bs = any_bs.not();

            let p1_takes = f1
                .rum
                .and(&f2.skull)?
                .or(&f1.skull.and(&f2.backstabber)?)?
                .or(&f1.backstabber.and(&f2.rum)?)?;
            let p2_takes = f2
                .rum
                .and(&f1.skull)?
                .or(&f2.skull.and(&f1.backstabber)?)?
                .or(&f2.backstabber.and(&f1.rum)?)?;

            let live = active.and(&no_bs)?;
            let p1_point = live.and(&p1_takes)?;
            let p2_point = live.and(&p2_takes)?;
            score1 = &score1 + bool_to_fp(&p1_point);
            score2 = &score2 + bool_to_fp(&p2_point);

            // Scores only move by one while active, so "reached three" is
            // an equality, and it can only fire on the incrementing round.
            let hit1 = score1.is_eq(&target)?;
            let hit2 = score2.is_eq(&target)?;

            let active_f = bool_to_fp(&active);
            let bs1_f = bool_to_fp(bs1);
            let bs2_f = bool_to_fp(bs2);
            let hit1_f = bool_to_fp(&hit1);
            let hit2_f = bool_to_fp(&hit2);

            // Drawing the spot loses. The correction term keeps the code in
            // range if an adversarial witness spots both sides, and the
            // score term gives player one priority on a double hit.
            let spot_term =
                bs1_f.clone() * &two + bs2_f.clone() - bs1_f * bs2_f * &three;
            let score_term = hit1_f.clone() + hit2_f * &two * (FpVar::one() - &hit1_f);
            winner_acc = winner_acc + active_f * (spot_term + score_term);

            let hit_any = hit1.or(&hit2)?;
            let ended = any_bs.or(&hit_any)?;
            let still = ended.not();
            active = active.and(&still)?;
        }

        // Deck exhausted: compare scores through d = 4 + s1 - s2 in [1, 7].
        let four = FpVar::constant(Fr::from(4u64));
        let d = &four + &score1 - &score2;
        let d_native = self
            .native_final_scores()
            .map(|(s1, s2)| Fr::from((4 + s1 as i64 - s2 as i64) as u64));
        let d_bits = enforce_bits(cs.clone(), &d, d_native, 3)?;
        let high_half = &d_bits[2];
        let low_any = d_bits[1].or(&d_bits[0])?;
        let p1_ahead = high_half.and(&low_any)?; // 5, 6, 7
        let p2_ahead = high_half.not(); // 1, 2, 3
        let level = high_half.and(&d_bits[1].not())?.and(&d_bits[0].not())?; // exactly 4

        // Tied decks fall to the seed-derived coin.
        let coin = poseidon_gadget(
            &self.suite.t3,
            &[combined.clone(), FpVar::constant(Fr::from(COIN_INDEX))],
        )?;
        let coin_bits = coin.to_bits_le()?;
        let coin_winner = FpVar::one() + bool_to_fp(&coin_bits[0]);

        let tiebreak = bool_to_fp(&p1_ahead)
            + bool_to_fp(&p2_ahead) * &two
            + bool_to_fp(&level) * coin_winner;
        let final_winner = winner_acc + bool_to_fp(&active) * tiebreak;
        final_winner.enforce_equal(&winner)?;

        Ok(())
    }
}
