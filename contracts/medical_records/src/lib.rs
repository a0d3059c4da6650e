#![no_std]

pub mod access;
pub mod ciphertext;
pub mod errors;
pub mod events;
pub mod foundation;
pub mod ledger;
pub mod registry;
pub mod stats;
pub mod validation;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Bytes, BytesN, Env, IntoVal,
    String, Symbol, Val, Vec,
};

pub use ciphertext::{CiphertextVerifier, CiphertextVerifierClient, InputBinding};
pub use errors::{create_error_context, ContractError, ErrorCategory, ErrorContext, ErrorSeverity};

/// Storage keys for the contract
const OWNER: Symbol = symbol_short!("OWNER");
const INITIALIZED: Symbol = symbol_short!("INIT");

/// TTL bounds in ledgers (~5s each): refresh below one month, extend to four.
const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 2_073_600;

/// Extends the time-to-live (TTL) for a persistent storage key.
pub(crate) fn extend_ttl<K: IntoVal<Env, Val>>(env: &Env, key: &K) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live (TTL) for instance storage.
/// Instance storage TTL applies to all instance keys (owner, verifier, counters).
pub(crate) fn extend_ttl_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load_owner(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&OWNER)
        .ok_or(ContractError::NotInitialized)
}

/// A byte string encrypted one byte per handle.
///
/// `clear_len` is the plaintext length; it may be shorter than the handle
/// list when the producer pads its input.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncryptedBytes {
    pub handles: Vec<BytesN<32>>,
    pub clear_len: u32,
}

/// How a patient's name is held.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PatientName {
    /// Cleartext name, readable by statistics consumers.
    Public(String),
    /// Legacy registrations: byte-wise encrypted name.
    Encrypted(EncryptedBytes),
}

/// Patient record
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Patient {
    pub patient: Address,
    pub foundation: Address,
    pub name: PatientName,
    pub encrypted_id: BytesN<32>,
    pub registered_at: u64,
    pub disease_count: u32,
    /// Position in registration order, starting at 0.
    pub index: u32,
}

/// Protected summary returned by `get_patient_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientInfo {
    pub name: PatientName,
    pub foundation: Address,
    pub registered_at: u64,
    pub disease_count: u32,
}

/// One entry of a patient's append-only disease ledger.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiseaseRecord {
    pub index: u32,
    pub payload: EncryptedBytes,
    pub foundation: Address,
    /// Public category label, the only cleartext attached to a disease.
    pub category: Option<Symbol>,
    pub added_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SystemStatistics {
    pub total_patients: u64,
    pub total_diseases: u64,
    /// `floor(total_diseases * 100 / total_patients)`, 0 when empty.
    pub avg_diseases_per_patient: u64,
}

/// Parallel columns for a slice of the registration order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistrationBatch {
    pub names: Vec<PatientName>,
    pub timestamps: Vec<u64>,
    pub foundations: Vec<Address>,
    pub disease_counts: Vec<u32>,
}

#[contract]
pub struct MedicalRecordsContract;

#[contractimpl]
impl MedicalRecordsContract {
    /// Initialize the registry with its owner and the ciphertext verifier
    /// contract that vets every encrypted input.
    pub fn initialize(env: Env, owner: Address, verifier: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&INITIALIZED, &true);
        ciphertext::set_verifier(&env, &verifier);
        extend_ttl_instance(&env);

        events::publish_initialized(&env, owner, verifier);

        Ok(())
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        load_owner(&env)
    }

    pub fn get_ciphertext_verifier(env: Env) -> Result<Address, ContractError> {
        ciphertext::get_verifier(&env).ok_or(ContractError::NotInitialized)
    }

    /// Contract version
    pub fn version() -> u32 {
        2
    }

    // ======================== Foundations ========================

    /// Authorize a foundation to register patients and add diseases.
    /// Only the owner may call this; re-authorizing is a no-op success.
    pub fn authorize_foundation(
        env: Env,
        caller: Address,
        foundation: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        foundation::require_owner(&env, &caller)?;

        foundation::set_authorized(&env, &foundation, true);
        extend_ttl_instance(&env);

        events::publish_foundation_authorized(&env, foundation);

        Ok(())
    }

    /// Revoke a foundation. Patients it already registered keep it as their
    /// registering foundation, and with it the foundation's read access.
    pub fn revoke_foundation(
        env: Env,
        caller: Address,
        foundation: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        foundation::require_owner(&env, &caller)?;

        foundation::set_authorized(&env, &foundation, false);
        extend_ttl_instance(&env);

        events::publish_foundation_revoked(&env, foundation);

        Ok(())
    }

    pub fn is_foundation_authorized(env: Env, foundation: Address) -> bool {
        foundation::is_authorized(&env, &foundation)
    }

    // ======================== Registry ========================

    /// Register a patient with a public name and an encrypted identifier.
    ///
    /// `encrypted_id` and `proof` must be accepted by the ciphertext verifier
    /// for this registry, this foundation and this patient. Returns the
    /// registration index.
    pub fn register_patient(
        env: Env,
        foundation: Address,
        patient: Address,
        name: String,
        encrypted_id: BytesN<32>,
        proof: Bytes,
    ) -> Result<u32, ContractError> {
        foundation.require_auth();
        foundation::require_authorized(&env, &foundation)?;

        validation::validate_name(&env, &name)?;

        let mut inputs = Vec::new(&env);
        inputs.push_back(encrypted_id.clone());

        let index = registry::register(
            &env,
            &foundation,
            &patient,
            PatientName::Public(name.clone()),
            encrypted_id,
            &inputs,
            &proof,
        )?;

        events::publish_patient_registered(&env, patient, foundation, Some(name), index);

        Ok(index)
    }

    /// Register a patient whose name is itself encrypted byte by byte.
    ///
    /// Kept for producers that still submit the older input layout: a single
    /// proof covers `name_handles` followed by `encrypted_id`.
    pub fn register_patient_encrypted_name(
        env: Env,
        foundation: Address,
        patient: Address,
        name_handles: Vec<BytesN<32>>,
        name_len: u32,
        encrypted_id: BytesN<32>,
        proof: Bytes,
    ) -> Result<u32, ContractError> {
        foundation.require_auth();
        foundation::require_authorized(&env, &foundation)?;

        validation::validate_encrypted_name(&env, &name_handles, name_len)?;

        let mut inputs = name_handles.clone();
        inputs.push_back(encrypted_id.clone());

        let name = PatientName::Encrypted(EncryptedBytes {
            handles: name_handles,
            clear_len: name_len,
        });

        let index =
            registry::register(&env, &foundation, &patient, name, encrypted_id, &inputs, &proof)?;

        events::publish_patient_registered(&env, patient, foundation, None, index);

        Ok(index)
    }

    pub fn is_patient_registered(env: Env, patient: Address) -> bool {
        registry::is_registered(&env, &patient)
    }

    /// Address of the patient at `index` in registration order.
    pub fn get_patient_at(env: Env, index: u32) -> Result<Address, ContractError> {
        registry::patient_at(&env, index).ok_or(ContractError::NotFound)
    }

    pub fn get_patient_info(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<PatientInfo, ContractError> {
        let record = access::require_read_access(&env, &caller, &patient)?;
        Ok(PatientInfo {
            name: record.name,
            foundation: record.foundation,
            registered_at: record.registered_at,
            disease_count: record.disease_count,
        })
    }

    pub fn get_patient_name(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<PatientName, ContractError> {
        let record = access::require_read_access(&env, &caller, &patient)?;
        Ok(record.name)
    }

    /// Encrypted identifier handle; decryption happens out of band.
    pub fn get_patient_id(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<BytesN<32>, ContractError> {
        let record = access::require_read_access(&env, &caller, &patient)?;
        Ok(record.encrypted_id)
    }

    // ======================== Disease ledger ========================

    /// Append an encrypted disease to a registered patient.
    ///
    /// `handles` hold one ciphertext per plaintext byte and `clear_len` is the
    /// plaintext length. `category` is an optional public label counted in
    /// the category statistics. Returns the index assigned to the entry.
    pub fn add_disease(
        env: Env,
        foundation: Address,
        patient: Address,
        handles: Vec<BytesN<32>>,
        clear_len: u32,
        category: Option<Symbol>,
        proof: Bytes,
    ) -> Result<u32, ContractError> {
        foundation.require_auth();
        foundation::require_authorized(&env, &foundation)?;

        validation::validate_payload(&env, &handles, clear_len)?;

        let mut record = registry::get(&env, &patient).ok_or_else(|| {
            errors::report(&env, ContractError::NotFound, Some(patient.clone()), "add_disease")
        })?;

        let accepted = ciphertext::verify_inputs(&env, &foundation, &patient, &handles, &proof)?;

        let payload = EncryptedBytes {
            handles: accepted,
            clear_len,
        };
        let index = ledger::append(&env, &mut record, &foundation, payload, category.clone());
        extend_ttl_instance(&env);

        events::publish_disease_added(&env, patient, foundation, index, category);

        Ok(index)
    }

    pub fn get_patient_disease_count(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<u32, ContractError> {
        let record = access::require_read_access(&env, &caller, &patient)?;
        Ok(record.disease_count)
    }

    pub fn get_patient_disease(
        env: Env,
        caller: Address,
        patient: Address,
        index: u32,
    ) -> Result<DiseaseRecord, ContractError> {
        let record = access::require_read_access(&env, &caller, &patient)?;
        match ledger::get(&env, &patient, index) {
            Some(disease) if index < record.disease_count => Ok(disease),
            _ => Err(errors::report(
                &env,
                ContractError::NotFound,
                Some(caller),
                "get_patient_disease",
            )),
        }
    }

    // ======================== Access control ========================

    /// Allow `grantee` to read the calling patient's protected fields.
    pub fn grant_access(env: Env, patient: Address, grantee: Address) -> Result<(), ContractError> {
        patient.require_auth();
        access::require_patient(&env, &patient)?;

        if grantee == patient {
            return Err(ContractError::InvalidArgument);
        }

        access::set_grant(&env, &patient, &grantee);

        events::publish_access_granted(&env, patient, grantee);

        Ok(())
    }

    /// Withdraw a grant made with `grant_access`. Revoking a grant that does
    /// not exist succeeds.
    pub fn revoke_access(env: Env, patient: Address, grantee: Address) -> Result<(), ContractError> {
        patient.require_auth();
        access::require_patient(&env, &patient)?;

        access::clear_grant(&env, &patient, &grantee);

        events::publish_access_revoked(&env, patient, grantee);

        Ok(())
    }

    pub fn authorized_access(env: Env, patient: Address, grantee: Address) -> bool {
        access::has_grant(&env, &patient, &grantee)
    }

    // ======================== Statistics ========================

    pub fn get_total_patients(env: Env) -> u32 {
        registry::total_patients(&env)
    }

    pub fn get_total_registrations(env: Env) -> u32 {
        registry::total_registrations(&env)
    }

    pub fn get_system_statistics(env: Env) -> SystemStatistics {
        stats::system_statistics(&env)
    }

    pub fn get_all_patient_names(env: Env) -> Vec<PatientName> {
        stats::all_patient_names(&env)
    }

    pub fn get_foundation_patient_count(env: Env, foundation: Address) -> u32 {
        registry::foundation_patient_count(&env, &foundation)
    }

    pub fn get_patients_by_foundation(env: Env, foundation: Address) -> Vec<Address> {
        registry::patients_by_foundation(&env, &foundation)
    }

    pub fn get_patient_registration_batch(
        env: Env,
        start: u32,
        count: u32,
    ) -> Result<RegistrationBatch, ContractError> {
        stats::registration_batch(&env, start, count)
    }

    /// Registration counts per `period_seconds` bucket, from the earliest
    /// registration up to the current ledger time.
    ///
    /// Fails with `InvalidArgument` when `period_seconds` is zero or when the
    /// span would need more than [`stats::MAX_TIMELINE_BUCKETS`] buckets.
    pub fn get_registration_timeline(
        env: Env,
        period_seconds: u64,
    ) -> Result<Vec<u32>, ContractError> {
        stats::registration_timeline(&env, period_seconds)
    }

    pub fn get_category_count(env: Env, category: Symbol) -> u32 {
        stats::category_count(&env, &category)
    }

    /// Category labels in the order they were first seen.
    pub fn get_disease_categories(env: Env) -> Vec<Symbol> {
        stats::categories(&env)
    }
}


#[cfg(test)]
mod test_access;

#[cfg(test)]
mod test_stats;
