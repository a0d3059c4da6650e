//! # Ciphertext boundary
//!
//! The registry stores ciphertext handles but never interprets them. New
//! encrypted material is accepted only after the configured verifier
//! contract has vetted the handles against the producer's input proof.
//! Decryption happens out of band, by parties holding the backend
//! credentials, using the handles this contract returns.
//!
//! Verification goes through a cross-contract call to `verify`. A typed
//! error, a trap inside the verifier, or an accepted list that differs from
//! the submitted one all surface as `InvalidCiphertext`, before any
//! storage write of the calling operation.

use soroban_sdk::{contractclient, contracttype, symbol_short, Address, Bytes, BytesN, Env, Symbol, Vec};

use crate::errors::{self, ContractError};

const VERIFIER: Symbol = symbol_short!("CT_VER");

/// Context the submitted input proof must be bound to.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InputBinding {
    /// This registry.
    pub registry: Address,
    /// The foundation submitting the handles.
    pub submitter: Address,
    /// The patient the handles will be stored under.
    pub subject: Address,
}

/// Interface of the ciphertext backend.
#[contractclient(name = "CiphertextVerifierClient")]
pub trait CiphertextVerifier {
    /// Returns the accepted handles, or fails when the proof does not hold.
    fn verify(
        env: Env,
        handles: Vec<BytesN<32>>,
        proof: Bytes,
        binding: InputBinding,
    ) -> Vec<BytesN<32>>;
}

pub fn set_verifier(env: &Env, verifier: &Address) {
    env.storage().instance().set(&VERIFIER, verifier);
}

pub fn get_verifier(env: &Env) -> Option<Address> {
    env.storage().instance().get(&VERIFIER)
}

/// Vet `handles` submitted by `submitter` for `subject`.
pub fn verify_inputs(
    env: &Env,
    submitter: &Address,
    subject: &Address,
    handles: &Vec<BytesN<32>>,
    proof: &Bytes,
) -> Result<Vec<BytesN<32>>, ContractError> {
    let verifier = get_verifier(env).ok_or(ContractError::NotInitialized)?;

    let binding = InputBinding {
        registry: env.current_contract_address(),
        submitter: submitter.clone(),
        subject: subject.clone(),
    };

    let client = CiphertextVerifierClient::new(env, &verifier);
    match client.try_verify(handles, proof, &binding) {
        Ok(Ok(accepted)) if &accepted == handles => Ok(accepted),
        _ => Err(errors::report(
            env,
            ContractError::InvalidCiphertext,
            Some(submitter.clone()),
            "verify_inputs",
        )),
    }
}
