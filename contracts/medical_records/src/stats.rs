//! Aggregate queries over the registry.
//!
//! Nothing here reads ciphertext. Counters come from instance storage, and
//! ordered queries walk the registration index.

use soroban_sdk::{symbol_short, Env, Symbol, Vec};

use crate::errors::{self, ContractError};
use crate::{ledger, registry, PatientName, RegistrationBatch, SystemStatistics};

const CATEGORY: Symbol = symbol_short!("CAT");
const CATEGORIES: Symbol = symbol_short!("CATS");
const CATEGORY_TOTAL: Symbol = symbol_short!("CAT_TOT");

/// Upper bound on the number of buckets a timeline query may return.
pub const MAX_TIMELINE_BUCKETS: u64 = 1024;

/// Counts one more disease under `category`, remembering the label the
/// first time it appears. Labels live in `(CATS, n)` entries so the set of
/// categories can grow without bound.
pub fn record_category(env: &Env, category: &Symbol) {
    let key = (CATEGORY, category.clone());
    let current = category_count(env, category);
    if current == 0 {
        let slot = distinct_categories(env);
        let slot_key = (CATEGORIES, slot);
        env.storage().persistent().set(&slot_key, category);
        crate::extend_ttl(env, &slot_key);
        env.storage()
            .instance()
            .set(&CATEGORY_TOTAL, &slot.saturating_add(1));
        crate::extend_ttl_instance(env);
    }
    env.storage()
        .persistent()
        .set(&key, &current.saturating_add(1));
    crate::extend_ttl(env, &key);
}

pub fn category_count(env: &Env, category: &Symbol) -> u32 {
    env.storage()
        .persistent()
        .get(&(CATEGORY, category.clone()))
        .unwrap_or(0)
}

pub fn distinct_categories(env: &Env) -> u32 {
    env.storage().instance().get(&CATEGORY_TOTAL).unwrap_or(0)
}

/// Category labels in the order they first appeared.
pub fn categories(env: &Env) -> Vec<Symbol> {
    let mut labels = Vec::new(env);
    for slot in 0..distinct_categories(env) {
        if let Some(label) = env.storage().persistent().get(&(CATEGORIES, slot)) {
            labels.push_back(label);
        }
    }
    labels
}

pub fn system_statistics(env: &Env) -> SystemStatistics {
    let total_patients = registry::total_patients(env) as u64;
    let total_diseases = ledger::total_diseases(env) as u64;

    // Two implied decimals: 150 reads as 1.50 diseases per patient.
    let avg_diseases_per_patient = if total_patients == 0 {
        0
    } else {
        total_diseases.saturating_mul(100) / total_patients
    };

    SystemStatistics {
        total_patients,
        total_diseases,
        avg_diseases_per_patient,
    }
}

pub fn all_patient_names(env: &Env) -> Vec<PatientName> {
    let mut names = Vec::new(env);
    for index in 0..registry::total_patients(env) {
        if let Some(record) = registry::record_at(env, index) {
            names.push_back(record.name);
        }
    }
    names
}

/// Columns for registration indices `start..start + count`.
pub fn registration_batch(
    env: &Env,
    start: u32,
    count: u32,
) -> Result<RegistrationBatch, ContractError> {
    let end = start.checked_add(count).ok_or(ContractError::InvalidArgument)?;
    if end > registry::total_patients(env) {
        return Err(errors::report(
            env,
            ContractError::InvalidArgument,
            None,
            "registration_batch",
        ));
    }

    let mut batch = RegistrationBatch {
        names: Vec::new(env),
        timestamps: Vec::new(env),
        foundations: Vec::new(env),
        disease_counts: Vec::new(env),
    };

    for index in start..end {
        let record = registry::record_at(env, index).ok_or(ContractError::NotFound)?;
        batch.names.push_back(record.name);
        batch.timestamps.push_back(record.registered_at);
        batch.foundations.push_back(record.foundation);
        batch.disease_counts.push_back(record.disease_count);
    }

    Ok(batch)
}

/// Number of registrations per `period` seconds, starting at the first
/// registration and ending with the bucket that contains the current ledger
/// time. Spans needing more than `MAX_TIMELINE_BUCKETS` buckets are rejected.
pub fn registration_timeline(env: &Env, period: u64) -> Result<Vec<u32>, ContractError> {
    if period == 0 {
        return Err(errors::report(
            env,
            ContractError::InvalidArgument,
            None,
            "registration_timeline",
        ));
    }

    let mut timeline = Vec::new(env);
    let earliest = match registry::record_at(env, 0) {
        Some(first) => first.registered_at,
        None => return Ok(timeline),
    };

    let total = registry::total_patients(env);
    let mut latest = env.ledger().timestamp();
    for index in 0..total {
        if let Some(record) = registry::record_at(env, index) {
            latest = latest.max(record.registered_at);
        }
    }
    let span = latest.saturating_sub(earliest);
    let buckets = span / period + 1;
    if buckets > MAX_TIMELINE_BUCKETS {
        return Err(errors::report(
            env,
            ContractError::InvalidArgument,
            None,
            "registration_timeline",
        ));
    }

    for _ in 0..buckets {
        timeline.push_back(0u32);
    }

    for index in 0..total {
        if let Some(record) = registry::record_at(env, index) {
            let bucket = ((record.registered_at.saturating_sub(earliest)) / period) as u32;
            let current = timeline.get(bucket).unwrap_or(0);
            timeline.set(bucket, current.saturating_add(1));
        }
    }

    Ok(timeline)
}
