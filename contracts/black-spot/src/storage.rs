use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Session, VerificationKey};

// ~30 days at 5s/ledger.
const SESSION_TTL_LEDGERS: u32 = 535_680;

#[contracttype]
pub enum DataKey {
    Admin,
    Quartermaster,
    VerificationKey,
    Session(u32),
}

pub fn get_admin(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Admin).unwrap()
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn get_quartermaster(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Quartermaster)
        .unwrap()
}

pub fn set_quartermaster(env: &Env, quartermaster: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::Quartermaster, quartermaster);
}

pub fn get_vk(env: &Env) -> VerificationKey {
    env.storage()
        .instance()
        .get(&DataKey::VerificationKey)
        .unwrap()
}

pub fn set_vk(env: &Env, vk: &VerificationKey) {
    env.storage().instance().set(&DataKey::VerificationKey, vk);
}

pub fn has_vk(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::VerificationKey)
}

pub fn get_session(env: &Env, session_id: u32) -> Option<Session> {
    env.storage().temporary().get(&DataKey::Session(session_id))
}

pub fn set_session(env: &Env, session_id: u32, session: &Session) {
    let key = DataKey::Session(session_id);
    env.storage().temporary().set(&key, session);
    env.storage()
        .temporary()
        .extend_ttl(&key, SESSION_TTL_LEDGERS, SESSION_TTL_LEDGERS);
}

pub fn has_session(env: &Env, session_id: u32) -> bool {
    env.storage().temporary().has(&DataKey::Session(session_id))
}
