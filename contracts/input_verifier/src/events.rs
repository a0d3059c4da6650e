use soroban_sdk::{symbol_short, Address, Env};

/// Fired when a batch of encrypted inputs is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InputVerifiedEvent {
    pub registry: Address,
    pub subject: Address,
    pub handle_count: u32,
    pub timestamp: u64,
}

pub fn publish_input_verified(env: &Env, registry: Address, subject: Address, handle_count: u32) {
    env.events().publish(
        (symbol_short!("IN_VER"), registry.clone()),
        InputVerifiedEvent {
            registry,
            subject,
            handle_count,
            timestamp: env.ledger().timestamp(),
        },
    );
}
