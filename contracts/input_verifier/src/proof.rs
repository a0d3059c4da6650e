use soroban_sdk::{xdr::ToXdr, Bytes, BytesN, Env, Vec};

use crate::InputBinding;

/// Maximum number of encrypted handles accepted under a single input proof.
pub const MAX_HANDLES: u32 = 256;

/// Length in bytes of an input proof digest.
pub const PROOF_LEN: u32 = 32;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProofValidationError {
    EmptyHandles,
    TooManyHandles,
    ZeroedHandle,
    MalformedProof,
}

fn bytes_all_zero(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == 0)
}

/// Commitment scheme binding a batch of ciphertext handles to the context
/// they were produced for.
///
/// The proof is `keccak256(xdr(registry) || xdr(submitter) || xdr(subject) ||
/// handle_0 || .. || handle_n)`. A handle accepted for one registry, one
/// submitter or one subject is therefore rejected for any other.
pub struct InputProof;

impl InputProof {
    /// Structural checks on the submitted handle list.
    pub fn validate_handles(handles: &Vec<BytesN<32>>) -> Result<(), ProofValidationError> {
        if handles.is_empty() {
            return Err(ProofValidationError::EmptyHandles);
        }
        if handles.len() > MAX_HANDLES {
            return Err(ProofValidationError::TooManyHandles);
        }
        for handle in handles.iter() {
            if bytes_all_zero(&handle.to_array()) {
                return Err(ProofValidationError::ZeroedHandle);
            }
        }
        Ok(())
    }

    pub fn validate_shape(proof: &Bytes) -> Result<(), ProofValidationError> {
        if proof.len() != PROOF_LEN {
            return Err(ProofValidationError::MalformedProof);
        }
        Ok(())
    }

    /// Compute the digest an input producer must attach to `handles`.
    pub fn compute(env: &Env, handles: &Vec<BytesN<32>>, binding: &InputBinding) -> BytesN<32> {
        let mut buf = Bytes::new(env);
        buf.append(&binding.registry.clone().to_xdr(env));
        buf.append(&binding.submitter.clone().to_xdr(env));
        buf.append(&binding.subject.clone().to_xdr(env));
        for handle in handles.iter() {
            buf.extend_from_array(&handle.to_array());
        }
        env.crypto().keccak256(&buf).into()
    }

    /// Returns `true` when `proof` is exactly the commitment for `handles`
    /// under `binding`.
    pub fn matches(
        env: &Env,
        handles: &Vec<BytesN<32>>,
        binding: &InputBinding,
        proof: &Bytes,
    ) -> bool {
        let expected: Bytes = Self::compute(env, handles, binding).into();
        &expected == proof
    }
}
