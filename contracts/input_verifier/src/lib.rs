//! # Input Verifier
//!
//! Reference backend for encrypted inputs submitted to the medical records
//! registry. The registry never interprets ciphertext handles itself; it
//! forwards every new batch of handles together with the producer's input
//! proof to a contract exposing `verify`, and stores the handles only once
//! they have been accepted.
//!
//! This contract accepts a batch when the proof is the keccak256 commitment
//! over the binding context and the exact handle sequence (see
//! [`InputProof`]). It holds no state and never decrypts anything.

#![no_std]

pub mod events;
mod proof;

pub use crate::proof::{InputProof, ProofValidationError, MAX_HANDLES, PROOF_LEN};

use soroban_sdk::{contract, contracterror, contractimpl, contracttype, Address, Bytes, BytesN, Env, Vec};

/// Context an input proof is bound to.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InputBinding {
    /// The contract that will store the handles.
    pub registry: Address,
    /// The authenticated identity submitting the handles.
    pub submitter: Address,
    /// The record owner the handles are stored under.
    pub subject: Address,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VerifierError {
    /// No handles were submitted.
    EmptyHandles = 1,
    /// More than [`MAX_HANDLES`] handles were submitted.
    TooManyHandles = 2,
    /// A handle is all zeros and cannot reference a ciphertext.
    ZeroedHandle = 3,
    /// The proof is not a 32-byte digest.
    MalformedProof = 4,
    /// The proof does not commit to these handles under this binding.
    ProofMismatch = 5,
}

impl From<ProofValidationError> for VerifierError {
    fn from(e: ProofValidationError) -> Self {
        match e {
            ProofValidationError::EmptyHandles => VerifierError::EmptyHandles,
            ProofValidationError::TooManyHandles => VerifierError::TooManyHandles,
            ProofValidationError::ZeroedHandle => VerifierError::ZeroedHandle,
            ProofValidationError::MalformedProof => VerifierError::MalformedProof,
        }
    }
}

#[contract]
pub struct InputVerifierContract;

#[contractimpl]
impl InputVerifierContract {
    /// Verifies an input proof and returns the accepted handles.
    ///
    /// Checks, in order:
    /// 1. The handle list is non-empty, bounded and free of zeroed handles.
    /// 2. The proof is a 32-byte digest.
    /// 3. The digest commits to `handles` under `binding`.
    pub fn verify(
        env: Env,
        handles: Vec<BytesN<32>>,
        proof: Bytes,
        binding: InputBinding,
    ) -> Result<Vec<BytesN<32>>, VerifierError> {
        InputProof::validate_handles(&handles)?;
        InputProof::validate_shape(&proof)?;

        if !InputProof::matches(&env, &handles, &binding, &proof) {
            return Err(VerifierError::ProofMismatch);
        }

        events::publish_input_verified(&env, binding.registry, binding.subject, handles.len());

        Ok(handles)
    }

    /// Computes the proof an input producer attaches to `handles`.
    pub fn compute_proof(env: Env, handles: Vec<BytesN<32>>, binding: InputBinding) -> Bytes {
        InputProof::compute(&env, &handles, &binding).into()
    }

    pub fn max_handles() -> u32 {
        MAX_HANDLES
    }
}
