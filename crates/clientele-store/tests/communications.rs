use clientele_core::domain::{
    CallOutcome, Communication, CommunicationChannel, CommunicationId, CommunicationNew,
    CommunicationType, CustomerId,
};
use clientele_core::Violation;
use clientele_store::error::{StoreError, StoreErrorKind};
use clientele_store::Store;

const NOW: i64 = 1_700_000_000;

fn store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
}

fn call(customer_id: CustomerId, created_at: i64) -> Communication {
    Communication::new(
        created_at,
        CommunicationNew {
            customer_id,
            subject: "Renewal".to_string(),
            message: Some("Discussed pricing.".to_string()),
            channel: CommunicationChannel::Call {
                duration_seconds: 245,
                outcome: CallOutcome::Answered,
            },
        },
    )
}

fn email(customer_id: CustomerId, created_at: i64) -> Communication {
    Communication::new(
        created_at,
        CommunicationNew {
            customer_id,
            subject: "Quote".to_string(),
            message: None,
            channel: CommunicationChannel::Email {
                recipient_email: Some("ada@example.com".to_string()),
                attachment_name: Some("quote.pdf".to_string()),
            },
        },
    )
}

#[test]
fn call_and_email_roundtrip_with_payload() {
    let store = store();
    let customer_id = CustomerId::new();
    let call = call(customer_id, NOW);
    let email = email(customer_id, NOW + 1);
    store.communications().add(&call).expect("add call");
    store.communications().add(&email).expect("add email");

    let fetched_call = store
        .communications()
        .get(call.id())
        .expect("get")
        .expect("exists");
    assert_eq!(fetched_call.kind(), CommunicationType::Call);
    assert_eq!(fetched_call.channel, call.channel);
    assert_eq!(fetched_call.message.as_deref(), Some("Discussed pricing."));
    assert_eq!(fetched_call.created_at(), NOW);

    let fetched_email = store
        .communications()
        .get(email.id())
        .expect("get")
        .expect("exists");
    assert_eq!(fetched_email.channel, email.channel);
    assert!(fetched_email.message.is_none());

    let history = store
        .communications()
        .list_for_customer(customer_id)
        .expect("list");
    assert_eq!(history, vec![email.clone(), call.clone()]);

    let calls = store
        .communications()
        .list_by_type(CommunicationType::Call)
        .expect("calls");
    assert_eq!(calls, vec![call]);
}

#[test]
fn update_can_switch_channel() {
    let store = store();
    let mut item = call(CustomerId::new(), NOW);
    store.communications().add(&item).expect("add");

    item.subject = "Renewal follow-up".to_string();
    item.channel = CommunicationChannel::Email {
        recipient_email: None,
        attachment_name: None,
    };
    store.communications().update(&item).expect("update");

    let stored = store
        .communications()
        .get(item.id())
        .expect("get")
        .expect("exists");
    assert_eq!(stored.subject, "Renewal follow-up");
    assert_eq!(stored.kind(), CommunicationType::Email);
    let outcome: Option<String> = store
        .connection()
        .query_row(
            "SELECT call_outcome FROM communications WHERE id = ?1;",
            [item.id().to_string()],
            |row| row.get(0),
        )
        .expect("raw select");
    assert!(outcome.is_none());
}

#[test]
fn long_subject_is_rejected() {
    let store = store();
    let mut item = email(CustomerId::new(), NOW);
    item.subject = "s".repeat(151);
    let err = store.communications().add(&item).unwrap_err();
    assert_eq!(err.violations(), &[Violation::SubjectTooLong]);
}

#[test]
fn call_row_without_outcome_fails_mapping() {
    let store = store();
    let id = CommunicationId::new();
    store
        .connection()
        .execute(
            "INSERT INTO communications (id, customer_id, type, subject, message, call_duration_seconds, call_outcome, recipient_email, attachment_name, created_at)
             VALUES (?1, ?2, 'CALL', 'Hello', NULL, 30, NULL, NULL, NULL, 1);",
            [id.to_string(), CustomerId::new().to_string()],
        )
        .expect("raw insert");
    let err = store.communications().get(id).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::InvalidRow);
}

#[test]
fn unknown_type_fails_mapping() {
    let store = store();
    let id = CommunicationId::new();
    store
        .connection()
        .execute(
            "INSERT INTO communications (id, customer_id, type, subject, created_at)
             VALUES (?1, ?2, 'SMS', 'Hello', 1);",
            [id.to_string(), CustomerId::new().to_string()],
        )
        .expect("raw insert");
    let err = store.communications().list_all().unwrap_err();
    assert!(matches!(
        err,
        StoreError::InvalidEnum { column: "communications.type", .. }
    ));
}

#[test]
fn missing_ids_behave() {
    let store = store();
    let ghost = call(CustomerId::new(), NOW);
    assert!(matches!(
        store.communications().update(&ghost).unwrap_err(),
        StoreError::NotFound(_)
    ));
    let id = CommunicationId::new();
    store.communications().delete(id).expect("delete missing");
    assert!(store.communications().get(id).expect("get").is_none());
}
