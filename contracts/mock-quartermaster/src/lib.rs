#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

/// What the gate saw for one session.
#[contracttype]
#[derive(Clone, Debug)]
pub struct MatchRecord {
    pub table: Address,
    pub player1: Address,
    pub player2: Address,
    pub settled: bool,
    pub player1_won: bool,
}

#[contracttype]
pub enum DataKey {
    Match(u32),
}

/// Test double for the settlement gate. Instead of paying anything out it
/// remembers every callback, so the game contract's tests can assert that
/// the hand-off actually happened and carried the right result. A result
/// for a match that was never begun panics: the game contract must always
/// call `begin_match` at join time first.
#[contract]
pub struct MockQuartermaster;

#[contractimpl]
impl MockQuartermaster {
    pub fn begin_match(
        env: Env,
        table: Address,
        session_id: u32,
        player1: Address,
        player2: Address,
    ) {
        let record = MatchRecord {
            table,
            player1,
            player2,
            settled: false,
            player1_won: false,
        };
        env.storage()
            .instance()
            .set(&DataKey::Match(session_id), &record);
    }

    pub fn record_result(env: Env, session_id: u32, player1_won: bool) {
        let mut record: MatchRecord = env
            .storage()
            .instance()
            .get(&DataKey::Match(session_id))
            .expect("result reported for a match that was never begun");
        record.settled = true;
        record.player1_won = player1_won;
        env.storage()
            .instance()
            .set(&DataKey::Match(session_id), &record);
    }

    /// What this gate has seen for a session, if anything.
    pub fn get_match(env: Env, session_id: u32) -> Option<MatchRecord> {
        env.storage().instance().get(&DataKey::Match(session_id))
    }
}
