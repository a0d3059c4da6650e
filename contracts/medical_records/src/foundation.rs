//! Owner-controlled set of foundations allowed to register patients and
//! append disease records. The owner is always treated as authorized.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::errors::{self, ContractError};

const FOUNDATION: Symbol = symbol_short!("FOUND");

pub fn set_authorized(env: &Env, foundation: &Address, authorized: bool) {
    let key = (FOUNDATION, foundation.clone());
    env.storage().persistent().set(&key, &authorized);
    crate::extend_ttl(env, &key);
}

pub fn is_authorized(env: &Env, foundation: &Address) -> bool {
    if let Ok(owner) = crate::load_owner(env) {
        if &owner == foundation {
            return true;
        }
    }
    env.storage()
        .persistent()
        .get(&(FOUNDATION, foundation.clone()))
        .unwrap_or(false)
}

/// Fails with `PermissionDenied` unless `caller` is the owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
    let owner = crate::load_owner(env)?;
    if caller != &owner {
        return Err(errors::report(
            env,
            ContractError::PermissionDenied,
            Some(caller.clone()),
            "require_owner",
        ));
    }
    Ok(())
}

/// Fails with `PermissionDenied` unless `caller` may write to the registry.
pub fn require_authorized(env: &Env, caller: &Address) -> Result<(), ContractError> {
    crate::load_owner(env)?;
    if !is_authorized(env, caller) {
        return Err(errors::report(
            env,
            ContractError::PermissionDenied,
            Some(caller.clone()),
            "require_authorized",
        ));
    }
    Ok(())
}
