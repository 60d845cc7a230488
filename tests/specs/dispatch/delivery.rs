//! Delivery specs.
//!
//! Which subscribers see a published event, and what the event looks like
//! once the bus has filled in its defaults.

use crate::prelude::*;

#[tokio::test]
async fn wildcard_subscriber_receives_enriched_event() {
    let bus = EventBus::new(BusConfig::default()).unwrap();
    let inbox = Inbox::new();
    inbox.subscribe(&bus, "User.*");

    let result = bus
        .publish(PartialEvent::new("User.Created", "S").with_data(json!({})))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(inbox.len(), 1);
    let (event, ctx) = inbox.first();
    assert_eq!(event.event_id, result.event_id);
    assert_eq!(event.event_id.len(), 36);
    assert_eq!(event.event_id.chars().nth(14), Some('4'));
    assert_eq!(event.version, "1.0");
    assert_eq!(ctx.attempt, 1);
}

#[tokio::test]
async fn global_and_exact_subscribers_both_notified() {
    let bus = EventBus::new(BusConfig::default()).unwrap();
    let global = Inbox::new();
    let exact = Inbox::new();
    global.subscribe(&bus, "*");
    exact.subscribe(&bus, "Order.Paid");

    let result = bus
        .publish(PartialEvent::new("Order.Paid", "billing"))
        .await
        .unwrap();

    assert_eq!(result.subscribers_notified, 2);
    assert_eq!(global.len(), 1);
    assert_eq!(exact.len(), 1);
}

#[tokio::test]
async fn routing_follows_patterns() {
    let bus = EventBus::new(BusConfig::default()).unwrap();
    let users = Inbox::new();
    let created = Inbox::new();
    let everything = Inbox::new();
    users.subscribe(&bus, "User.*");
    created.subscribe(&bus, "*.Created");
    everything.subscribe(&bus, "*");

    for event_type in ["User.Created", "User.Profile.Updated", "Order.Created", "Order.Paid"] {
        bus.publish(PartialEvent::new(event_type, "app")).await.unwrap();
    }

    similar_asserts::assert_eq!(
        users.event_types(),
        vec!["User.Created".to_string(), "User.Profile.Updated".to_string()]
    );
    similar_asserts::assert_eq!(
        created.event_types(),
        vec!["User.Created".to_string(), "Order.Created".to_string()]
    );
    assert_eq!(everything.len(), 4);
}

#[tokio::test]
async fn supplied_fields_are_kept() {
    let bus = EventBus::new(BusConfig::default()).unwrap();
    let inbox = Inbox::new();
    inbox.subscribe(&bus, "Order.Shipped");

    let partial = PartialEvent::from_json(json!({
        "eventId": "evt-123",
        "eventType": "Order.Shipped",
        "timestamp": "2024-06-01T12:00:00.000Z",
        "source": "fulfilment",
        "version": "2.1",
        "data": {"carrier": "ups"},
        "correlationId": "req-9",
        "metadata": {"priority": "critical", "tags": ["express"]}
    }))
    .unwrap();
    let result = bus.publish(partial).await.unwrap();

    assert_eq!(result.event_id, "evt-123");
    let (event, _) = inbox.first();
    assert_eq!(event.timestamp, "2024-06-01T12:00:00.000Z");
    assert_eq!(event.version, "2.1");
    assert_eq!(event.correlation_id.as_deref(), Some("req-9"));
    assert_eq!(event.metadata.priority.as_str(), "critical");
    assert_eq!(event.data, json!({"carrier": "ups"}));
}

#[tokio::test]
async fn unsubscribed_handler_stops_receiving() {
    let bus = EventBus::new(BusConfig::default()).unwrap();
    let inbox = Inbox::new();
    let sub = inbox.subscribe(&bus, "Tick.*");

    bus.publish(PartialEvent::new("Tick.Second", "clock")).await.unwrap();
    assert!(bus.unsubscribe(&sub));
    assert!(!bus.unsubscribe(&sub));
    let result = bus.publish(PartialEvent::new("Tick.Second", "clock")).await.unwrap();

    assert_eq!(inbox.len(), 1);
    assert_eq!(result.subscribers_notified, 0);
    assert!(result.success);
}
