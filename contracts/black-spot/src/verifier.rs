use soroban_sdk::crypto::bn254::{Bn254G1Affine, Bn254G2Affine, Fr};
use soroban_sdk::{vec, Env, Vec};

use crate::types::{Groth16Proof, PublicInputs, VerificationKey};

/// BN254 base-field modulus p, big-endian. G1 negation is `(x, p - y)`.
const BASE_MODULUS_BE: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58,
    0x5d, 0x97, 0x81, 0x6a, 0x91, 0x68, 0x71, 0xca, 0x8d, 0x3c, 0x20, 0x8c, 0x16, 0xd8, 0x7c,
    0xfd, 0x47,
];

/// Number of public inputs; the IC vector carries one more entry.
const N_PUBLIC: u32 = 6;

/// Groth16 verification as one multi-pairing over the host functions:
///
///   e(A, B) * e(-alpha, beta) * e(-acc, gamma) * e(-C, delta) == 1
///
/// where `acc = IC[0] + sum(pub_i * IC[i+1])` and the scalars are fed in
/// the circuit's allocation order: commit1, commit2, seed1, seed2,
/// session_id, winner.
pub fn verify(
    env: &Env,
    proof: &Groth16Proof,
    vk: &VerificationKey,
    pub_inputs: &PublicInputs,
) -> bool {
    if vk.ic.len() != N_PUBLIC + 1 {
        return false;
    }

    let bn254 = env.crypto().bn254();

    let scalars: [Fr; 6] = [
        Fr::from_bytes(pub_inputs.seed_commit1.clone()),
        Fr::from_bytes(pub_inputs.seed_commit2.clone()),
        Fr::from_bytes(pub_inputs.seed1.clone()),
        Fr::from_bytes(pub_inputs.seed2.clone()),
        Fr::from_bytes(pub_inputs.session_id.clone()),
        Fr::from_bytes(pub_inputs.winner.clone()),
    ];

    let mut acc = Bn254G1Affine::from_bytes(vk.ic.get_unchecked(0));
    for (i, scalar) in scalars.iter().enumerate() {
        let base = Bn254G1Affine::from_bytes(vk.ic.get_unchecked(i as u32 + 1));
        acc = bn254.g1_add(&acc, &bn254.g1_mul(&base, scalar));
    }

    let g1: Vec<Bn254G1Affine> = vec![
        env,
        Bn254G1Affine::from_bytes(proof.pi_a.clone()),
        negate_g1(env, &Bn254G1Affine::from_bytes(vk.alpha_g1.clone())),
        negate_g1(env, &acc),
        negate_g1(env, &Bn254G1Affine::from_bytes(proof.pi_c.clone())),
    ];
    let g2: Vec<Bn254G2Affine> = vec![
        env,
        Bn254G2Affine::from_bytes(proof.pi_b.clone()),
        Bn254G2Affine::from_bytes(vk.beta_g2.clone()),
        Bn254G2Affine::from_bytes(vk.gamma_g2.clone()),
        Bn254G2Affine::from_bytes(vk.delta_g2.clone()),
    ];

    bn254.pairing_check(g1, g2)
}

/// `(x, y) -> (x, p - y)`; an all-zero y marks the point at infinity,
/// which is its own negation.
fn negate_g1(env: &Env, point: &Bn254G1Affine) -> Bn254G1Affine {
    let raw = point.to_array();

    let mut y = [0u8; 32];
    y.copy_from_slice(&raw[32..64]);
    if y == [0u8; 32] {
        return Bn254G1Affine::from_array(env, &[0u8; 64]);
    }

    let mut out = [0u8; 64];
    out[..32].copy_from_slice(&raw[..32]);

    // p - y over big-endian bytes; y < p always holds for a valid point.
    let mut borrow = 0u16;
    for i in (0..32).rev() {
        let lhs = BASE_MODULUS_BE[i] as i32 - y[i] as i32 - borrow as i32;
        if lhs < 0 {
            out[32 + i] = (lhs + 256) as u8;
            borrow = 1;
        } else {
            out[32 + i] = lhs as u8;
            borrow = 0;
        }
    }

    Bn254G1Affine::from_array(env, &out)
}
