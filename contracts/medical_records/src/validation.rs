use soroban_sdk::{BytesN, Env, String, Vec};

use crate::errors::{self, ContractError};

/// Longest accepted public patient name, in bytes.
pub const MAX_NAME_LEN: u32 = 128;

/// Most handles a single encrypted payload may carry.
pub const MAX_PAYLOAD_HANDLES: u32 = 256;

pub fn validate_name(env: &Env, name: &String) -> Result<(), ContractError> {
    if name.len() == 0 || name.len() > MAX_NAME_LEN {
        return Err(errors::report(env, ContractError::InvalidArgument, None, "validate_name"));
    }
    Ok(())
}

/// Most handles an encrypted name may carry. The registration proof covers
/// the name handles plus the encrypted identifier, and that combined list
/// has to stay within `MAX_PAYLOAD_HANDLES`.
pub const MAX_NAME_HANDLES: u32 = MAX_PAYLOAD_HANDLES - 1;

/// An encrypted byte string needs at least one handle, at most
/// `MAX_PAYLOAD_HANDLES`, and a plaintext length that fits in the handles.
pub fn validate_payload(
    env: &Env,
    handles: &Vec<BytesN<32>>,
    clear_len: u32,
) -> Result<(), ContractError> {
    check_payload(env, handles, clear_len, MAX_PAYLOAD_HANDLES, "validate_payload")
}

/// Same rules as [`validate_payload`], bounded by `MAX_NAME_HANDLES`.
pub fn validate_encrypted_name(
    env: &Env,
    handles: &Vec<BytesN<32>>,
    clear_len: u32,
) -> Result<(), ContractError> {
    check_payload(env, handles, clear_len, MAX_NAME_HANDLES, "validate_encrypted_name")
}

fn check_payload(
    env: &Env,
    handles: &Vec<BytesN<32>>,
    clear_len: u32,
    max_handles: u32,
    operation: &str,
) -> Result<(), ContractError> {
    if handles.is_empty()
        || handles.len() > max_handles
        || clear_len == 0
        || clear_len > handles.len()
    {
        return Err(errors::report(env, ContractError::InvalidArgument, None, operation));
    }
    Ok(())
}
