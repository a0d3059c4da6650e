//! Patient table, registration order and per-foundation index.
//!
//! Patients are keyed by address. Each registration also writes the
//! patient's address under its registration index, so ordered queries
//! (batches, timelines, name listings) walk `0..total_patients` without
//! scanning storage. The per-foundation index follows the same layout:
//! `(FND_PAT, foundation, n)` holds the foundation's n-th patient and
//! `(FND_CNT, foundation)` holds how many there are.

use soroban_sdk::{symbol_short, Address, Bytes, BytesN, Env, Symbol, Vec};

use crate::errors::{self, ContractError};
use crate::{ciphertext, Patient, PatientName};

const PATIENT: Symbol = symbol_short!("PATIENT");
const PAT_INDEX: Symbol = symbol_short!("PAT_IDX");
const FND_PATIENTS: Symbol = symbol_short!("FND_PAT");
const FND_COUNT: Symbol = symbol_short!("FND_CNT");
const TOTAL_PATIENTS: Symbol = symbol_short!("TOT_PAT");
const TOTAL_REGISTRATIONS: Symbol = symbol_short!("TOT_REG");

pub fn get(env: &Env, patient: &Address) -> Option<Patient> {
    env.storage()
        .persistent()
        .get(&(PATIENT, patient.clone()))
}

pub fn is_registered(env: &Env, patient: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&(PATIENT, patient.clone()))
}

pub fn save(env: &Env, record: &Patient) {
    let key = (PATIENT, record.patient.clone());
    env.storage().persistent().set(&key, record);
    crate::extend_ttl(env, &key);
}

/// Creates the patient record once `inputs` have been accepted by the
/// ciphertext verifier. Nothing is written unless every check passes.
pub fn register(
    env: &Env,
    foundation: &Address,
    patient: &Address,
    name: PatientName,
    encrypted_id: BytesN<32>,
    inputs: &Vec<BytesN<32>>,
    proof: &Bytes,
) -> Result<u32, ContractError> {
    if is_registered(env, patient) {
        return Err(errors::report(
            env,
            ContractError::DuplicateEntry,
            Some(patient.clone()),
            "register_patient",
        ));
    }

    ciphertext::verify_inputs(env, foundation, patient, inputs, proof)?;

    let index = total_patients(env);
    let record = Patient {
        patient: patient.clone(),
        foundation: foundation.clone(),
        name,
        encrypted_id,
        registered_at: env.ledger().timestamp(),
        disease_count: 0,
        index,
    };
    save(env, &record);

    let index_key = (PAT_INDEX, index);
    env.storage().persistent().set(&index_key, patient);
    crate::extend_ttl(env, &index_key);

    let slot = foundation_patient_count(env, foundation);
    let slot_key = (FND_PATIENTS, foundation.clone(), slot);
    env.storage().persistent().set(&slot_key, patient);
    crate::extend_ttl(env, &slot_key);

    let count_key = (FND_COUNT, foundation.clone());
    env.storage()
        .persistent()
        .set(&count_key, &slot.saturating_add(1));
    crate::extend_ttl(env, &count_key);

    env.storage()
        .instance()
        .set(&TOTAL_PATIENTS, &index.saturating_add(1));
    env.storage().instance().set(
        &TOTAL_REGISTRATIONS,
        &total_registrations(env).saturating_add(1),
    );
    crate::extend_ttl_instance(env);

    Ok(index)
}

/// Address registered at `index`, if any.
pub fn patient_at(env: &Env, index: u32) -> Option<Address> {
    env.storage().persistent().get(&(PAT_INDEX, index))
}

/// Patient record registered at `index`, if any.
pub fn record_at(env: &Env, index: u32) -> Option<Patient> {
    patient_at(env, index).and_then(|patient| get(env, &patient))
}

pub fn foundation_patient_count(env: &Env, foundation: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&(FND_COUNT, foundation.clone()))
        .unwrap_or(0)
}

/// Patients registered through `foundation`, in registration order.
pub fn patients_by_foundation(env: &Env, foundation: &Address) -> Vec<Address> {
    let mut patients = Vec::new(env);
    for slot in 0..foundation_patient_count(env, foundation) {
        if let Some(patient) = env
            .storage()
            .persistent()
            .get(&(FND_PATIENTS, foundation.clone(), slot))
        {
            patients.push_back(patient);
        }
    }
    patients
}

pub fn total_patients(env: &Env) -> u32 {
    env.storage().instance().get(&TOTAL_PATIENTS).unwrap_or(0)
}

pub fn total_registrations(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&TOTAL_REGISTRATIONS)
        .unwrap_or(0)
}
