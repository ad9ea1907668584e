#![no_std]

mod events;
mod storage;
pub mod types;
mod verifier;


use soroban_sdk::{contract, contractclient, contracterror, contractimpl, Address, BytesN, Env};

use blackspot_field::{poseidon1, Fp};
use types::{Groth16Proof, PublicInputs, Session, VerificationKey};

// Session lifecycle. Transitions are monotone; nothing ever moves back.
pub const PHASE_OPEN: u32 = 0;
pub const PHASE_COMMITTED: u32 = 1;
pub const PHASE_REVEALED: u32 = 2;
pub const PHASE_SETTLED: u32 = 3;

/// Settlement gate. The quartermaster contract tracks matches and handles
/// whatever sits on the outcome (ratings, payouts); this contract only
/// calls in at join and settle time and never depends on it otherwise.
#[contractclient(name = "QuartermasterClient")]
pub trait Quartermaster {
    fn begin_match(
        env: Env,
        table: Address,
        session_id: u32,
        player1: Address,
        player2: Address,
    );

    fn record_result(env: Env, session_id: u32, player1_won: bool);
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    SessionNotFound = 1,
    SessionExists = 2,
    NotOpen = 3,
    SelfJoin = 4,
    NotCommitted = 5,
    AlreadyRevealed = 6,
    NotRevealed = 7,
    BadOpening = 8,
    InputMismatch = 9,
    InvalidProof = 10,
    AlreadySettled = 11,
    NotPlayer = 12,
    NoVerificationKey = 13,
}

#[contract]
pub struct BlackSpotContract;

fn zero32(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[0u8; 32])
}

/// `Poseidon1(seed) == commit`. Non-canonical seed bytes can never open a
/// commitment.
fn opening_matches(seed: &BytesN<32>, commit: &BytesN<32>) -> bool {
    match Fp::from_be_bytes(&seed.to_array()) {
        Some(seed) => poseidon1(seed).to_be_bytes() == commit.to_array(),
        None => false,
    }
}

#[contractimpl]
impl BlackSpotContract {
    /// Deploy: record the admin and the quartermaster address.
    pub fn __constructor(env: Env, admin: Address, quartermaster: Address) {
        storage::set_admin(&env, &admin);
        storage::set_quartermaster(&env, &quartermaster);
    }

    /// Admin: install the Groth16 verification key.
    pub fn set_vk(env: Env, vk: VerificationKey) {
        storage::get_admin(&env).require_auth();
        storage::set_vk(&env, &vk);
    }

    /// Player one opens a session with their seed commitment.
    pub fn create(
        env: Env,
        session_id: u32,
        player1: Address,
        commit1: BytesN<32>,
    ) -> Result<(), Error> {
        if storage::has_session(&env, session_id) {
            return Err(Error::SessionExists);
        }

        player1.require_auth();

        let z = zero32(&env);
        let session = Session {
            player1: player1.clone(),
            player2: player1.clone(), // sentinel until someone joins
            commit1,
            commit2: z.clone(),
            seed1: z.clone(),
            seed2: z,
            phase: PHASE_OPEN,
            winner: 0,
        };
        storage::set_session(&env, session_id, &session);
        events::session_opened(&env, session_id, &player1);

        Ok(())
    }

    /// Player two joins an open session with their commitment. Both sides
    /// are then committed and the match is registered with the
    /// quartermaster.
    pub fn join(
        env: Env,
        session_id: u32,
        player2: Address,
        commit2: BytesN<32>,
    ) -> Result<(), Error> {
        let mut session =
            storage::get_session(&env, session_id).ok_or(Error::SessionNotFound)?;
        if session.phase != PHASE_OPEN {
            return Err(Error::NotOpen);
        }
        if player2 == session.player1 {
            return Err(Error::SelfJoin);
        }

        player2.require_auth();

        session.player2 = player2.clone();
        session.commit2 = commit2;
        session.phase = PHASE_COMMITTED;

        let quartermaster =
            QuartermasterClient::new(&env, &storage::get_quartermaster(&env));
        quartermaster.begin_match(
            &env.current_contract_address(),
            &session_id,
            &session.player1,
            &player2,
        );

        storage::set_session(&env, session_id, &session);
        events::session_joined(&env, session_id, &player2);

        Ok(())
    }

    /// A player reveals their seed. The Poseidon digest must open the
    /// stored commitment; the session advances once both seeds are in.
    /// Reveals may arrive in either order.
    pub fn reveal(
        env: Env,
        session_id: u32,
        player: Address,
        seed: BytesN<32>,
    ) -> Result<(), Error> {
        let mut session =
            storage::get_session(&env, session_id).ok_or(Error::SessionNotFound)?;
        if session.phase != PHASE_COMMITTED {
            return Err(Error::NotCommitted);
        }

        player.require_auth();

        let z = zero32(&env);
        if player == session.player1 {
            if session.seed1 != z {
                return Err(Error::AlreadyRevealed);
            }
            if !opening_matches(&seed, &session.commit1) {
                return Err(Error::BadOpening);
            }
            session.seed1 = seed;
        } else if player == session.player2 {
            if session.seed2 != z {
                return Err(Error::AlreadyRevealed);
            }
            if !opening_matches(&seed, &session.commit2) {
                return Err(Error::BadOpening);
            }
            session.seed2 = seed;
        } else {
            return Err(Error::NotPlayer);
        }

        if session.seed1 != z && session.seed2 != z {
            session.phase = PHASE_REVEALED;
        }

        let p = player.clone();
        storage::set_session(&env, session_id, &session);
        events::seed_revealed(&env, session_id, &p);

        Ok(())
    }

    /// Anyone may settle a revealed session with a valid proof. The first
    /// valid settlement wins the race; later attempts see
    /// `AlreadySettled`. Reports the result to the quartermaster.
    pub fn settle(
        env: Env,
        session_id: u32,
        proof: Groth16Proof,
        pub_inputs: PublicInputs,
    ) -> Result<Address, Error> {
        let session =
            storage::get_session(&env, session_id).ok_or(Error::SessionNotFound)?;
        if session.phase >= PHASE_SETTLED {
            return Err(Error::AlreadySettled);
        }
        if session.phase < PHASE_REVEALED {
            return Err(Error::NotRevealed);
        }
        if !storage::has_vk(&env) {
            return Err(Error::NoVerificationKey);
        }

        // The submitted statement must be about this session's stored
        // state, byte for byte.
        if pub_inputs.seed_commit1 != session.commit1
            || pub_inputs.seed_commit2 != session.commit2
            || pub_inputs.seed1 != session.seed1
            || pub_inputs.seed2 != session.seed2
        {
            return Err(Error::InputMismatch);
        }

        let mut sid_bytes = [0u8; 32];
        sid_bytes[28..32].copy_from_slice(&session_id.to_be_bytes());
        if pub_inputs.session_id != BytesN::from_array(&env, &sid_bytes) {
            return Err(Error::InputMismatch);
        }

        let mut w1 = [0u8; 32];
        w1[31] = 1;
        let mut w2 = [0u8; 32];
        w2[31] = 2;
        let player1_won = if pub_inputs.winner == BytesN::from_array(&env, &w1) {
            true
        } else if pub_inputs.winner == BytesN::from_array(&env, &w2) {
            false
        } else {
            return Err(Error::InputMismatch);
        };

        // The pairing is the expensive step; everything above is cheap.
        let vk = storage::get_vk(&env);
        if !verifier::verify(&env, &proof, &vk, &pub_inputs) {
            return Err(Error::InvalidProof);
        }

        let winner_addr = if player1_won {
            session.player1.clone()
        } else {
            session.player2.clone()
        };

        let mut settled = session;
        settled.winner = if player1_won { 1 } else { 2 };
        settled.phase = PHASE_SETTLED;
        storage::set_session(&env, session_id, &settled);

        let quartermaster =
            QuartermasterClient::new(&env, &storage::get_quartermaster(&env));
        quartermaster.record_result(&session_id, &player1_won);

        events::session_settled(&env, session_id, &winner_addr);

        Ok(winner_addr)
    }

    /// Snapshot of a session.
    pub fn get(env: Env, session_id: u32) -> Option<Session> {
        storage::get_session(&env, session_id)
    }
}
