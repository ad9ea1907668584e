//! End-to-end settlement proofs: the literal scenarios every
//! implementation of the protocol must reproduce.

use std::sync::OnceLock;

use ark_bn254::{Bn254, Fr};
use ark_groth16::{ProvingKey, VerifyingKey};
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem};
use rand::rngs::StdRng;
use rand::SeedableRng;

use blackspot_circuit::prover;
use blackspot_circuit::serialize::{ProofJson, WireProof};
use blackspot_circuit::witness::{build_circuit, PublicValues};
use blackspot_core::encode::fr_from_hex;
use blackspot_core::hash::poseidon2;
use blackspot_core::sim::simulate;

fn keys() -> &'static (ProvingKey<Bn254>, VerifyingKey<Bn254>) {
    static KEYS: OnceLock<(ProvingKey<Bn254>, VerifyingKey<Bn254>)> = OnceLock::new();
    KEYS.get_or_init(|| {
        let mut rng = StdRng::seed_from_u64(0x0b5e55ed);
        prover::setup(&mut rng).expect("setup")
    })
}

#[test]
fn assigned_circuit_is_satisfied() {
    let (circuit, _, _) = build_circuit(&Fr::from(1u64), &Fr::from(2u64), 1).unwrap();
    let cs = ConstraintSystem::<Fr>::new_ref();
    circuit.generate_constraints(cs.clone()).unwrap();
    assert!(cs.is_satisfied().unwrap());
    // The powers-of-tau ceremony is sized at 2^15; stay inside it.
    assert!(cs.num_constraints() < (1 << 15), "{}", cs.num_constraints());
}

#[test]
fn scenario_small_seeds_proves_and_matches_simulator() {
    let (pk, vk) = keys();
    let (seed1, seed2, sid) = (Fr::from(1u64), Fr::from(2u64), 1u32);

    let sim = simulate(&seed1, &seed2, sid).unwrap();
    let (proof, public) = prover::prove(pk, &seed1, &seed2, sid).unwrap();

    assert_eq!(public.winner, sim.winner);
    assert!(prover::verify(vk, &public, &proof).unwrap());
}

#[test]
fn scenario_literal_seeds_winner_tamper_fails() {
    let (pk, vk) = keys();
    let seed1 = fr_from_hex("0x1111111111111111111111111111111111111111111111111111111111111111")
        .unwrap();
    let seed2 = fr_from_hex("0x2222222222222222222222222222222222222222222222222222222222222222")
        .unwrap();

    let (proof, public) = prover::prove(pk, &seed1, &seed2, 42).unwrap();
    assert!(prover::verify(vk, &public, &proof).unwrap());

    // Claiming the other winner with the same proof must fail.
    let flipped = PublicValues {
        winner: 3 - public.winner,
        ..public
    };
    assert!(!prover::verify(vk, &flipped, &proof).unwrap());
}

#[test]
fn tampered_proof_bytes_fail() {
    let (pk, vk) = keys();
    let (proof, public) = prover::prove(pk, &Fr::from(1u64), &Fr::from(2u64), 1).unwrap();
    let wire = WireProof::encode(&proof);

    // A flipped bit in any point either breaks decoding or the pairing.
    for (label, tamper) in [
        ("pi_a", {
            let mut w = wire.clone();
            w.pi_a[17] ^= 0x04;
            w
        }),
        ("pi_b", {
            let mut w = wire.clone();
            w.pi_b[63] ^= 0x80;
            w
        }),
        ("pi_c", {
            let mut w = wire.clone();
            w.pi_c[50] ^= 0x01;
            w
        }),
    ] {
        match tamper.decode() {
            Ok(bad) => assert!(
                !prover::verify(vk, &public, &bad).unwrap(),
                "{label} tamper verified"
            ),
            Err(_) => {} // refused at the decoding boundary
        }
    }

    // A shifted public input fails verification too.
    for i in 0..6 {
        let mut scalars = public.to_field_elements();
        scalars[i] += Fr::from(1u64);
        assert!(
            !prover::verify_scalars(vk, &scalars, &proof).unwrap(),
            "public input {i} tamper verified"
        );
    }
}

#[test]
fn proofs_are_deterministic() {
    let (pk, _) = keys();
    let (a, _) = prover::prove(pk, &Fr::from(5u64), &Fr::from(6u64), 9).unwrap();
    let (b, _) = prover::prove(pk, &Fr::from(5u64), &Fr::from(6u64), 9).unwrap();
    assert_eq!(WireProof::encode(&a), WireProof::encode(&b));
}

#[test]
fn duplicated_deck_witness_is_unsatisfiable() {
    let (mut circuit, _, sim) = build_circuit(&Fr::from(1u64), &Fr::from(2u64), 1).unwrap();

    // Duplicate card 3 over card 7's slot and refresh that slot's weight
    // witness; witness generation still succeeds, the pairwise-inverse
    // constraint does not.
    let mut deck = sim.derivation.deck;
    let dup_source = deck.iter().position(|&c| c == 3).unwrap();
    let dup_target = deck.iter().position(|&c| c == 7).unwrap();
    deck[dup_target] = 3;

    let mut trunc = sim.derivation.trunc;
    let mut high = sim.derivation.high;
    trunc[dup_target] = trunc[dup_source];
    high[dup_target] = high[dup_source];

    circuit.deck = Some(deck);
    circuit.trunc = Some(trunc);
    circuit.high = Some(high);

    let cs = ConstraintSystem::<Fr>::new_ref();
    circuit.generate_constraints(cs.clone()).unwrap();
    assert!(!cs.is_satisfied().unwrap());
}

#[test]
fn coin_flip_branch_proves() {
    // Find an exhausted, tied session and take it through the full prover.
    let (pk, vk) = keys();
    let (seed1, seed2) = (Fr::from(9u64), Fr::from(10u64));
    let sid = (0..100_000u32)
        .find(|sid| {
            simulate(&seed1, &seed2, *sid)
                .map(|s| s.end_reason == blackspot_core::sim::EndReason::CoinFlip)
                .unwrap_or(false)
        })
        .expect("no coin-flip session in scan range");

    let sim = simulate(&seed1, &seed2, sid).unwrap();
    let coin = poseidon2(
        &sim.derivation.combined_seed,
        &Fr::from(blackspot_core::cards::COIN_INDEX),
    );
    assert_eq!(
        sim.winner,
        (blackspot_core::encode::low_128(&coin) % 2) as u8 + 1
    );

    let (proof, public) = prover::prove(pk, &seed1, &seed2, sid).unwrap();
    assert_eq!(public.winner, sim.winner);
    assert!(prover::verify(vk, &public, &proof).unwrap());
}

#[test]
fn proof_json_round_trips() {
    let (pk, vk) = keys();
    let (proof, public) = prover::prove(pk, &Fr::from(1u64), &Fr::from(2u64), 1).unwrap();

    let artifact = ProofJson::from_parts(&proof, &public);
    let text = serde_json::to_string_pretty(&artifact).unwrap();
    let parsed: ProofJson = serde_json::from_str(&text).unwrap();
    let (decoded, scalars) = parsed.to_parts().unwrap();

    assert_eq!(WireProof::encode(&decoded), WireProof::encode(&proof));
    assert_eq!(scalars, public.to_field_elements());
    assert!(prover::verify_scalars(vk, &scalars, &decoded).unwrap());
}
