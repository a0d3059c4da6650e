//! Patient-controlled read grants and the gate in front of every protected
//! read.
//!
//! A caller may read a patient's protected fields when it is the patient,
//! the foundation that registered the patient, or a grantee the patient has
//! approved. The same check backs `get_patient_info`, `get_patient_name`,
//! `get_patient_id`, `get_patient_disease_count` and `get_patient_disease`.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::errors::{self, ContractError};
use crate::{registry, Patient};

const GRANT: Symbol = symbol_short!("GRANT");

pub fn set_grant(env: &Env, patient: &Address, grantee: &Address) {
    let key = (GRANT, patient.clone(), grantee.clone());
    env.storage().persistent().set(&key, &true);
    crate::extend_ttl(env, &key);
}

pub fn clear_grant(env: &Env, patient: &Address, grantee: &Address) {
    let key = (GRANT, patient.clone(), grantee.clone());
    env.storage().persistent().remove(&key);
}

pub fn has_grant(env: &Env, patient: &Address, grantee: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&(GRANT, patient.clone(), grantee.clone()))
        .unwrap_or(false)
}

/// Only registered patients manage grants, and only their own.
pub fn require_patient(env: &Env, patient: &Address) -> Result<(), ContractError> {
    crate::load_owner(env)?;
    if !registry::is_registered(env, patient) {
        return Err(errors::report(
            env,
            ContractError::PermissionDenied,
            Some(patient.clone()),
            "manage_access",
        ));
    }
    Ok(())
}

/// Self, registering foundation, or explicit grant.
pub fn can_read(env: &Env, caller: &Address, patient: &Address, record: Option<&Patient>) -> bool {
    caller == patient
        || record.is_some_and(|r| &r.foundation == caller)
        || has_grant(env, patient, caller)
}

/// Authenticates `caller`, checks it may read `patient`, then loads the
/// record. Denial is reported before the patient's existence is revealed.
pub fn require_read_access(
    env: &Env,
    caller: &Address,
    patient: &Address,
) -> Result<Patient, ContractError> {
    caller.require_auth();

    let record = registry::get(env, patient);
    if !can_read(env, caller, patient, record.as_ref()) {
        return Err(errors::report(
            env,
            ContractError::PermissionDenied,
            Some(caller.clone()),
            "read_patient",
        ));
    }

    record.ok_or(ContractError::NotFound)
}
