use crate::errors::ErrorContext;
use soroban_sdk::{symbol_short, Address, Env, String, Symbol};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub verifier: Address,
    pub timestamp: u64,
}

/// Event published when the owner authorizes a foundation.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FoundationAuthorizedEvent {
    pub foundation: Address,
    pub timestamp: u64,
}

/// Event published when the owner revokes a foundation.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FoundationRevokedEvent {
    pub foundation: Address,
    pub timestamp: u64,
}

/// Event published when a patient is registered.
///
/// `name` is only set for patients registered with a public name.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientRegisteredEvent {
    pub patient: Address,
    pub foundation: Address,
    pub name: Option<String>,
    pub index: u32,
    pub timestamp: u64,
}

/// Event published when an encrypted disease record is appended.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiseaseAddedEvent {
    pub patient: Address,
    pub foundation: Address,
    pub index: u32,
    pub category: Option<Symbol>,
    pub timestamp: u64,
}

/// Event published when a patient grants read access.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessGrantedEvent {
    pub patient: Address,
    pub grantee: Address,
    pub timestamp: u64,
}

/// Event published when a patient revokes read access.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRevokedEvent {
    pub patient: Address,
    pub grantee: Address,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, owner: Address, verifier: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        owner,
        verifier,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_foundation_authorized(env: &Env, foundation: Address) {
    let topics = (symbol_short!("FND_AUTH"), foundation.clone());
    let data = FoundationAuthorizedEvent {
        foundation,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_foundation_revoked(env: &Env, foundation: Address) {
    let topics = (symbol_short!("FND_REV"), foundation.clone());
    let data = FoundationRevokedEvent {
        foundation,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a new patient is registered.
/// Topics carry the patient and the registering foundation so indexers can
/// filter per foundation without decoding the payload.
pub fn publish_patient_registered(
    env: &Env,
    patient: Address,
    foundation: Address,
    name: Option<String>,
    index: u32,
) {
    let topics = (symbol_short!("PAT_REG"), patient.clone(), foundation.clone());
    let data = PatientRegisteredEvent {
        patient,
        foundation,
        name,
        index,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_disease_added(
    env: &Env,
    patient: Address,
    foundation: Address,
    index: u32,
    category: Option<Symbol>,
) {
    let topics = (symbol_short!("DIS_ADD"), patient.clone(), foundation.clone());
    let data = DiseaseAddedEvent {
        patient,
        foundation,
        index,
        category,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_access_granted(env: &Env, patient: Address, grantee: Address) {
    let topics = (symbol_short!("ACC_GRT"), patient.clone(), grantee.clone());
    let data = AccessGrantedEvent {
        patient,
        grantee,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_access_revoked(env: &Env, patient: Address, grantee: Address) {
    let topics = (symbol_short!("ACC_REV"), patient.clone(), grantee.clone());
    let data = AccessRevokedEvent {
        patient,
        grantee,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an error event for monitoring and indexing.
pub fn publish_error(env: &Env, error_code: u32, context: ErrorContext) {
    let topics = (
        symbol_short!("ERROR"),
        context.category.clone(),
        context.severity.clone(),
    );
    let data = (
        error_code,
        context.message,
        context.user,
        context.resource_id,
        context.retryable,
        context.timestamp,
    );
    env.events().publish(topics, data);
}
