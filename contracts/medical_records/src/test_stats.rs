#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
extern crate std;

use super::test::{setup, Setup, GENESIS};
use super::{stats, ContractError, PatientName, SystemStatistics};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{symbol_short, Address, String, Symbol};

const DAY: u64 = 86_400;

/// Three patients, two of them with one disease each.
fn three_patients(s: &Setup) -> (Address, Address, Address) {
    let juan = s.register("Juan", 1);
    let ana = s.register("Ana", 2);
    let luis = s.register("Luis", 3);
    s.add_disease(&juan, "Diabetes");
    s.add_disease(&ana, "Asthma");
    (juan, ana, luis)
}

#[test]
fn test_empty_statistics() {
    let s = setup();
    assert_eq!(
        s.client.get_system_statistics(),
        SystemStatistics {
            total_patients: 0,
            total_diseases: 0,
            avg_diseases_per_patient: 0,
        }
    );
    assert!(s.client.get_all_patient_names().is_empty());
    assert!(s.client.get_registration_timeline(&DAY).is_empty());
    assert!(s.client.get_disease_categories().is_empty());
}

#[test]
fn test_system_statistics() {
    let s = setup();
    three_patients(&s);

    assert_eq!(
        s.client.get_system_statistics(),
        SystemStatistics {
            total_patients: 3,
            total_diseases: 2,
            avg_diseases_per_patient: 66,
        }
    );
    assert_eq!(s.client.get_total_registrations(), 3);
}

#[test]
fn test_all_patient_names_in_order() {
    let s = setup();
    three_patients(&s);

    let names = s.client.get_all_patient_names();
    assert_eq!(names.len(), 3);
    assert_eq!(
        names.get(0).unwrap(),
        PatientName::Public(String::from_str(&s.env, "Juan"))
    );
    assert_eq!(
        names.get(2).unwrap(),
        PatientName::Public(String::from_str(&s.env, "Luis"))
    );
}

#[test]
fn test_registration_batch() {
    let s = setup();
    let (juan, ana, _) = three_patients(&s);

    let batch = s.client.get_patient_registration_batch(&0, &2);
    assert_eq!(batch.names.len(), 2);
    assert_eq!(batch.timestamps.len(), 2);
    assert_eq!(batch.foundations.len(), 2);
    assert_eq!(batch.disease_counts.len(), 2);

    assert_eq!(
        batch.names.get(0).unwrap(),
        PatientName::Public(String::from_str(&s.env, "Juan"))
    );
    assert_eq!(
        batch.names.get(1).unwrap(),
        PatientName::Public(String::from_str(&s.env, "Ana"))
    );
    assert_eq!(batch.foundations.get(0).unwrap(), s.foundation);
    assert_eq!(batch.timestamps.get(1).unwrap(), GENESIS);
    assert_eq!(batch.disease_counts.get(0).unwrap(), 1);
    assert_eq!(batch.disease_counts.get(1).unwrap(), 1);
    assert_eq!(s.client.get_patient_at(&0), juan);
    assert_eq!(s.client.get_patient_at(&1), ana);

    let tail = s.client.get_patient_registration_batch(&2, &1);
    assert_eq!(tail.disease_counts.get(0).unwrap(), 0);

    let empty = s.client.get_patient_registration_batch(&3, &0);
    assert!(empty.names.is_empty());
}

#[test]
fn test_registration_batch_out_of_range() {
    let s = setup();
    three_patients(&s);

    assert_eq!(
        s.client.try_get_patient_registration_batch(&0, &10),
        Err(Ok(ContractError::InvalidArgument))
    );
    assert_eq!(
        s.client.try_get_patient_registration_batch(&u32::MAX, &2),
        Err(Ok(ContractError::InvalidArgument))
    );
}

#[test]
fn test_foundation_patient_lists() {
    let s = setup();
    let (juan, ana, luis) = three_patients(&s);

    let other = Address::generate(&s.env);
    s.client.authorize_foundation(&s.owner, &other);
    let maria = Address::generate(&s.env);
    s.register_with(&other, &maria, "Maria", 4);

    assert_eq!(s.client.get_foundation_patient_count(&s.foundation), 3);
    assert_eq!(s.client.get_foundation_patient_count(&other), 1);

    let mine = s.client.get_patients_by_foundation(&s.foundation);
    assert_eq!(mine.get(0).unwrap(), juan);
    assert_eq!(mine.get(1).unwrap(), ana);
    assert_eq!(mine.get(2).unwrap(), luis);
    assert_eq!(s.client.get_patients_by_foundation(&other).get(0).unwrap(), maria);

    let nobody = Address::generate(&s.env);
    assert_eq!(s.client.get_foundation_patient_count(&nobody), 0);
}

#[test]
fn test_large_foundation_keeps_registering() {
    let s = setup();
    let mut first = None;
    let mut last = None;
    for id in 0..1_800u32 {
        let patient = s.register("Patient", id);
        if id == 0 {
            first = Some(patient.clone());
        }
        last = Some(patient);
    }

    assert_eq!(s.client.get_foundation_patient_count(&s.foundation), 1_800);
    assert_eq!(s.client.get_total_patients(), 1_800);

    s.env.cost_estimate().budget().reset_unlimited();
    let patients = s.client.get_patients_by_foundation(&s.foundation);
    assert_eq!(patients.len(), 1_800);
    assert_eq!(patients.get(0), first);
    assert_eq!(patients.get(1_799), last);
}

#[test]
fn test_registration_timeline() {
    let s = setup();
    s.register("Juan", 1);
    s.register("Ana", 2);

    s.env.ledger().set_timestamp(GENESIS + DAY + 10);
    s.register("Luis", 3);

    s.env.ledger().set_timestamp(GENESIS + 3 * DAY);

    let timeline = s.client.get_registration_timeline(&DAY);
    assert_eq!(timeline.len(), 4);
    assert_eq!(timeline.get(0).unwrap(), 2);
    assert_eq!(timeline.get(1).unwrap(), 1);
    assert_eq!(timeline.get(2).unwrap(), 0);
    assert_eq!(timeline.get(3).unwrap(), 0);

    let total: u32 = timeline.iter().sum();
    assert_eq!(total, s.client.get_total_patients());
}

#[test]
fn test_registration_timeline_rejects_bad_periods() {
    let s = setup();
    s.register("Juan", 1);

    assert_eq!(
        s.client.try_get_registration_timeline(&0),
        Err(Ok(ContractError::InvalidArgument))
    );

    s.env
        .ledger()
        .set_timestamp(GENESIS + (stats::MAX_TIMELINE_BUCKETS - 1) * 60);
    assert_eq!(
        s.client.get_registration_timeline(&60).len() as u64,
        stats::MAX_TIMELINE_BUCKETS
    );

    s.env
        .ledger()
        .set_timestamp(GENESIS + stats::MAX_TIMELINE_BUCKETS * 60);
    assert_eq!(
        s.client.try_get_registration_timeline(&60),
        Err(Ok(ContractError::InvalidArgument))
    );
    assert_eq!(s.client.get_registration_timeline(&DAY).len(), 1);
}

#[test]
fn test_disease_categories() {
    let s = setup();
    let juan = s.register("Juan", 1);
    let ana = s.register("Ana", 2);

    s.add_disease_with(&s.foundation, &juan, "Diabetes", Some(symbol_short!("ENDO")));
    s.add_disease_with(&s.foundation, &juan, "Asthma", Some(symbol_short!("RESP")));
    s.add_disease_with(&s.foundation, &ana, "Hypothyroid", Some(symbol_short!("ENDO")));
    s.add_disease(&ana, "Unlabelled");

    assert_eq!(s.client.get_category_count(&symbol_short!("ENDO")), 2);
    assert_eq!(s.client.get_category_count(&symbol_short!("RESP")), 1);
    assert_eq!(s.client.get_category_count(&symbol_short!("CARD")), 0);

    let categories = s.client.get_disease_categories();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories.get(0).unwrap(), symbol_short!("ENDO"));
    assert_eq!(categories.get(1).unwrap(), symbol_short!("RESP"));

    assert_eq!(s.client.get_system_statistics().total_diseases, 4);
}

#[test]
fn test_many_distinct_categories() {
    let s = setup();
    let patient = s.register("Juan", 1);

    for n in 0..300u32 {
        let label = Symbol::new(&s.env, &std::format!("C{n}"));
        s.add_disease_with(&s.foundation, &patient, "Flu", Some(label));
    }
    s.add_disease_with(&s.foundation, &patient, "Flu", Some(Symbol::new(&s.env, "C0")));

    let categories = s.client.get_disease_categories();
    assert_eq!(categories.len(), 300);
    assert_eq!(categories.get(0).unwrap(), Symbol::new(&s.env, "C0"));
    assert_eq!(categories.get(299).unwrap(), Symbol::new(&s.env, "C299"));
    assert_eq!(s.client.get_category_count(&Symbol::new(&s.env, "C0")), 2);
    assert_eq!(s.client.get_patient_disease_count(&patient, &patient), 301);
}
