//! Validation specs.
//!
//! Invalid events are rejected before any subscriber runs.

use crate::prelude::*;

#[tokio::test]
async fn malformed_event_is_rejected_before_delivery() {
    let (bus, logger) = bus_with_logger(BusConfig::default());
    let inbox = Inbox::new();
    inbox.subscribe(&bus, "*");

    let err = bus
        .publish(PartialEvent::new("lowercase", "app").with_data(json!([1, 2])))
        .await
        .unwrap_err();

    match err {
        BusError::Validation { errors, .. } => {
            assert_eq!(errors.len(), 2, "{:?}", errors);
            assert!(errors.iter().any(|e| e.contains("data must be an object")));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(inbox.len(), 0);
    assert_eq!(logger.count(LogLevel::Warn), 1);
}

#[tokio::test]
async fn custom_validator_decides() {
    let validator = FakeValidator::new();
    let bus = EventBus::new(BusConfig::default())
        .unwrap()
        .with_validator(Arc::new(TracedValidator::new(validator.clone())));
    let inbox = Inbox::new();
    inbox.subscribe(&bus, "Order.*");

    validator.reject_with(vec!["unknown tenant".to_string()]);
    let err = bus.publish(PartialEvent::new("Order.Paid", "billing")).await.unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("unknown tenant"));

    validator.accept();
    bus.publish(PartialEvent::new("Order.Paid", "billing")).await.unwrap();

    assert_eq!(inbox.len(), 1);
    assert_eq!(validator.calls().len(), 2);
    assert_eq!(validator.calls()[0].event_type, "Order.Paid");
}

#[tokio::test]
async fn accept_all_validator_lets_anything_through() {
    let bus = EventBus::new(BusConfig::default())
        .unwrap()
        .with_validator(Arc::new(AcceptAllValidator::new()));
    let inbox = Inbox::new();
    inbox.subscribe(&bus, "*");

    let result = bus
        .publish(PartialEvent::new("NotDotted", "").with_data(json!("raw")))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(inbox.len(), 1);
}

#[tokio::test]
async fn blank_strings_and_empty_tags_are_valid() {
    let bus = EventBus::new(BusConfig::default()).unwrap();
    let inbox = Inbox::new();
    inbox.subscribe(&bus, "User.*");

    bus.publish(PartialEvent::new("User.Created", "S").with_tags(vec![""]))
        .await
        .unwrap();
    bus.publish(PartialEvent::new("User.Created", " ")).await.unwrap();
    let result = bus
        .publish(PartialEvent::new("User.Created", "S").with_event_id(" "))
        .await
        .unwrap();

    assert_eq!(result.event_id, " ");
    assert_eq!(inbox.len(), 3);
}
