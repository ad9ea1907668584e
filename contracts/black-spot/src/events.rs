use soroban_sdk::{contractevent, Address, Env};

#[contractevent]
pub struct SessionOpened {
    pub session_id: u32,
    pub player1: Address,
}

#[contractevent]
pub struct SessionJoined {
    pub session_id: u32,
    pub player2: Address,
}

#[contractevent]
pub struct SeedRevealed {
    pub session_id: u32,
    pub player: Address,
}

#[contractevent]
pub struct SessionSettled {
    pub session_id: u32,
    pub winner: Address,
}

pub fn session_opened(env: &Env, session_id: u32, player1: &Address) {
    SessionOpened {
        session_id,
        player1: player1.clone(),
    }
    .publish(env);
}

pub fn session_joined(env: &Env, session_id: u32, player2: &Address) {
    SessionJoined {
        session_id,
        player2: player2.clone(),
    }
    .publish(env);
}

pub fn seed_revealed(env: &Env, session_id: u32, player: &Address) {
    SeedRevealed {
        session_id,
        player: player.clone(),
    }
    .publish(env);
}

pub fn session_settled(env: &Env, session_id: u32, winner: &Address) {
    SessionSettled {
        session_id,
        winner: winner.clone(),
    }
    .publish(env);
}
