//! Per-patient append-only disease ledger.
//!
//! Entries are addressed by `(patient, index)` where `index` runs from 0 to
//! the patient's `disease_count - 1`. Entries are never rewritten or removed.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::{registry, stats, DiseaseRecord, EncryptedBytes, Patient};

const DISEASE: Symbol = symbol_short!("DISEASE");
const TOTAL_DISEASES: Symbol = symbol_short!("TOT_DIS");

/// Appends `payload` to `record`'s ledger and bumps every counter that
/// depends on it. Returns the index of the new entry.
pub fn append(
    env: &Env,
    record: &mut Patient,
    foundation: &Address,
    payload: EncryptedBytes,
    category: Option<Symbol>,
) -> u32 {
    let index = record.disease_count;

    let entry = DiseaseRecord {
        index,
        payload,
        foundation: foundation.clone(),
        category: category.clone(),
        added_at: env.ledger().timestamp(),
    };
    let key = (DISEASE, record.patient.clone(), index);
    env.storage().persistent().set(&key, &entry);
    crate::extend_ttl(env, &key);

    record.disease_count = index.saturating_add(1);
    registry::save(env, record);

    env.storage()
        .instance()
        .set(&TOTAL_DISEASES, &total_diseases(env).saturating_add(1));

    if let Some(label) = category {
        stats::record_category(env, &label);
    }

    index
}

pub fn get(env: &Env, patient: &Address, index: u32) -> Option<DiseaseRecord> {
    env.storage()
        .persistent()
        .get(&(DISEASE, patient.clone(), index))
}

pub fn total_diseases(env: &Env) -> u32 {
    env.storage().instance().get(&TOTAL_DISEASES).unwrap_or(0)
}
