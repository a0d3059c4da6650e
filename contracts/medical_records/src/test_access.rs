#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]

use super::test::{decrypt_id, decrypt_text, last_event, setup, topics};
use super::{events, ContractError, PatientName};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{symbol_short, Address, String, TryIntoVal};

#[test]
fn test_patient_reads_own_record() {
    let s = setup();
    let patient = s.register("Juan", 12345);
    s.add_disease(&patient, "Diabetes");

    assert_eq!(s.client.get_patient_disease_count(&patient, &patient), 1);
    let info = s.client.get_patient_info(&patient, &patient);
    assert_eq!(info.disease_count, 1);
}

#[test]
fn test_registering_foundation_reads_record() {
    let s = setup();
    let patient = s.register("Juan", 12345);
    s.add_disease(&patient, "Diabetes");

    let name = s.client.get_patient_name(&s.foundation, &patient);
    assert_eq!(name, PatientName::Public(String::from_str(&s.env, "Juan")));
    assert_eq!(
        decrypt_id(&s.client.get_patient_id(&s.foundation, &patient)),
        12345
    );
    let record = s.client.get_patient_disease(&s.foundation, &patient, &0);
    assert_eq!(decrypt_text(&record.payload), "Diabetes");
}

#[test]
fn test_unauthorized_reads_are_denied() {
    let s = setup();
    let patient = s.register("Juan", 12345);
    s.add_disease(&patient, "Diabetes");
    let intruder = Address::generate(&s.env);

    assert_eq!(
        s.client.try_get_patient_name(&intruder, &patient),
        Err(Ok(ContractError::PermissionDenied))
    );
    assert_eq!(
        s.client.try_get_patient_info(&intruder, &patient),
        Err(Ok(ContractError::PermissionDenied))
    );
    assert_eq!(
        s.client.try_get_patient_id(&intruder, &patient),
        Err(Ok(ContractError::PermissionDenied))
    );
    assert_eq!(
        s.client.try_get_patient_disease_count(&intruder, &patient),
        Err(Ok(ContractError::PermissionDenied))
    );
    assert_eq!(
        s.client.try_get_patient_disease(&intruder, &patient, &0),
        Err(Ok(ContractError::PermissionDenied))
    );
}

#[test]
fn test_owner_has_no_implicit_read_access() {
    let s = setup();
    let patient = s.register("Juan", 12345);

    assert_eq!(
        s.client.try_get_patient_name(&s.owner, &patient),
        Err(Ok(ContractError::PermissionDenied))
    );
}

#[test]
fn test_unknown_patient_is_not_revealed() {
    let s = setup();
    let unknown = Address::generate(&s.env);
    let stranger = Address::generate(&s.env);

    // Strangers learn nothing about whether the address is registered.
    assert_eq!(
        s.client.try_get_patient_info(&stranger, &unknown),
        Err(Ok(ContractError::PermissionDenied))
    );
    // The address itself is told the truth.
    assert_eq!(
        s.client.try_get_patient_info(&unknown, &unknown),
        Err(Ok(ContractError::NotFound))
    );
}

#[test]
fn test_grant_access() {
    let s = setup();
    let patient = s.register("Juan", 12345);
    s.add_disease(&patient, "Diabetes");
    let doctor = Address::generate(&s.env);

    assert!(!s.client.authorized_access(&patient, &doctor));
    s.client.grant_access(&patient, &doctor);
    assert!(s.client.authorized_access(&patient, &doctor));

    let record = s.client.get_patient_disease(&doctor, &patient, &0);
    assert_eq!(decrypt_text(&record.payload), "Diabetes");
    assert_eq!(s.client.get_patient_disease_count(&doctor, &patient), 1);

    // Granting again is idempotent.
    s.client.grant_access(&patient, &doctor);
    assert!(s.client.authorized_access(&patient, &doctor));
}

#[test]
fn test_grant_is_scoped_to_patient() {
    let s = setup();
    let first = s.register("Juan", 1);
    let second = s.register("Ana", 2);
    let doctor = Address::generate(&s.env);

    s.client.grant_access(&first, &doctor);

    assert!(s.client.try_get_patient_name(&doctor, &first).is_ok());
    assert_eq!(
        s.client.try_get_patient_name(&doctor, &second),
        Err(Ok(ContractError::PermissionDenied))
    );
}

#[test]
fn test_revoke_access() {
    let s = setup();
    let patient = s.register("Juan", 12345);
    let doctor = Address::generate(&s.env);

    s.client.grant_access(&patient, &doctor);
    s.client.revoke_access(&patient, &doctor);

    assert!(!s.client.authorized_access(&patient, &doctor));
    assert_eq!(
        s.client.try_get_patient_name(&doctor, &patient),
        Err(Ok(ContractError::PermissionDenied))
    );

    // Revoking an absent grant succeeds.
    s.client.revoke_access(&patient, &doctor);
    assert!(!s.client.authorized_access(&patient, &doctor));
}

#[test]
fn test_revoke_does_not_affect_foundation() {
    let s = setup();
    let patient = s.register("Juan", 12345);

    s.client.revoke_access(&patient, &s.foundation);
    assert!(s.client.try_get_patient_name(&s.foundation, &patient).is_ok());
}

#[test]
fn test_revoked_foundation_keeps_read_access() {
    let s = setup();
    let patient = s.register("Juan", 12345);

    s.client.revoke_foundation(&s.owner, &s.foundation);
    assert!(s.client.try_get_patient_info(&s.foundation, &patient).is_ok());
}

#[test]
fn test_non_patient_cannot_grant() {
    let s = setup();
    let stranger = Address::generate(&s.env);
    let doctor = Address::generate(&s.env);

    assert_eq!(
        s.client.try_grant_access(&stranger, &doctor),
        Err(Ok(ContractError::PermissionDenied))
    );
    assert_eq!(
        s.client.try_revoke_access(&stranger, &doctor),
        Err(Ok(ContractError::PermissionDenied))
    );
    assert!(!s.client.authorized_access(&stranger, &doctor));
}

#[test]
fn test_self_grant_is_rejected() {
    let s = setup();
    let patient = s.register("Juan", 12345);

    assert_eq!(
        s.client.try_grant_access(&patient, &patient),
        Err(Ok(ContractError::InvalidArgument))
    );
    assert!(!s.client.authorized_access(&patient, &patient));
}

#[test]
fn test_access_events() {
    let s = setup();
    let patient = s.register("Juan", 12345);
    let doctor = Address::generate(&s.env);

    s.client.grant_access(&patient, &doctor);
    let (event_topics, data) = last_event(&s.env, &s.client.address);
    assert_eq!(
        event_topics,
        topics(&s.env, (symbol_short!("ACC_GRT"), patient.clone(), doctor.clone()))
    );
    let payload: events::AccessGrantedEvent = data.try_into_val(&s.env).unwrap();
    assert_eq!(payload.grantee, doctor);

    s.client.revoke_access(&patient, &doctor);
    let (event_topics, _) = last_event(&s.env, &s.client.address);
    assert_eq!(
        event_topics,
        topics(&s.env, (symbol_short!("ACC_REV"), patient.clone(), doctor.clone()))
    );
}
