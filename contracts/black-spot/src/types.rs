use soroban_sdk::{contracttype, Address, BytesN, Vec};

/// Per-session state, kept in temporary storage with a ~30-day TTL.
///
/// `phase` is 0 Open, 1 Committed, 2 Revealed, 3 Settled. An all-zero
/// `seed1`/`seed2` means "not yet revealed"; `player2 == player1` is the
/// open-session sentinel.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Session {
    pub player1: Address,
    pub player2: Address,
    pub commit1: BytesN<32>,
    pub commit2: BytesN<32>,
    pub seed1: BytesN<32>,
    pub seed2: BytesN<32>,
    pub phase: u32,
    pub winner: u32, // 0 unsettled, 1 player one, 2 player two
}

/// Groth16 proof over BN254.
/// G1 points: 64 bytes, `be(X) || be(Y)`.
/// G2 points: 128 bytes, `be(X.c1) || be(X.c0) || be(Y.c1) || be(Y.c0)`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Groth16Proof {
    pub pi_a: BytesN<64>,
    pub pi_b: BytesN<128>,
    pub pi_c: BytesN<64>,
}

/// Groth16 verification key, embedded at deploy time.
/// `ic` carries `n_public + 1 = 7` entries.
#[contracttype]
#[derive(Clone, Debug)]
pub struct VerificationKey {
    pub alpha_g1: BytesN<64>,
    pub beta_g2: BytesN<128>,
    pub gamma_g2: BytesN<128>,
    pub delta_g2: BytesN<128>,
    pub ic: Vec<BytesN<64>>,
}

/// The six public inputs of the settlement circuit, each a 32-byte
/// big-endian field element. Field order follows the schema's sorted
/// (alphabetical) key order.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PublicInputs {
    pub seed1: BytesN<32>,
    pub seed2: BytesN<32>,
    pub seed_commit1: BytesN<32>,
    pub seed_commit2: BytesN<32>,
    pub session_id: BytesN<32>,
    pub winner: BytesN<32>,
}
