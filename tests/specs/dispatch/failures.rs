//! Failure handling specs.
//!
//! Retries, partial failure, and the publish timeout.

use crate::prelude::*;

#[tokio::test(start_paused = true)]
async fn failing_handler_is_retried_then_reported() {
    let config = BusConfig::new()
        .with_max_retries(1)
        .with_retry_delay(Duration::from_millis(10));
    let bus = EventBus::new(config).unwrap();
    let attempts = Arc::new(AtomicU32::new(0));
    let failing = subscribe_failing(&bus, "Order.*", &attempts);

    let result = bus
        .publish(PartialEvent::new("Order.Paid", "billing"))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.failed_handlers, vec![failing.id.clone()]);
    assert!(result.total_retries >= 1);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn one_failure_does_not_block_peers() {
    let config = BusConfig::new()
        .with_max_retries(2)
        .with_retry_delay(Duration::from_millis(10));
    let bus = EventBus::new(config).unwrap();
    let attempts = Arc::new(AtomicU32::new(0));
    let healthy = Inbox::new();
    subscribe_failing(&bus, "Order.*", &attempts);
    healthy.subscribe(&bus, "Order.*");

    let result = bus
        .publish(PartialEvent::new("Order.Paid", "billing"))
        .await
        .unwrap();

    assert!(result.is_partial());
    assert_eq!(result.failed_handlers.len(), 1);
    assert_eq!(result.total_retries, 2);
    assert_eq!(healthy.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_handler_times_out_publish() {
    let bus = EventBus::new(BusConfig::default()).unwrap();
    bus.subscribe("Report.*", |_event, _ctx| async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(())
    })
    .unwrap();

    let err = bus
        .publish_with(
            PartialEvent::new("Report.Generated", "reports").with_event_id("evt-42"),
            PublishOptions::with_timeout(Duration::from_millis(50)),
        )
        .await
        .unwrap_err();

    match err {
        BusError::Timeout {
            event_id,
            total_handlers,
            ..
        } => {
            assert_eq!(event_id, "evt-42");
            assert_eq!(total_handlers, 1);
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn generous_timeout_returns_normally() {
    let bus = EventBus::new(BusConfig::default()).unwrap();
    bus.subscribe("Report.*", |_event, _ctx| async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok(())
    })
    .unwrap();

    let result = bus
        .publish_with(
            PartialEvent::new("Report.Generated", "reports"),
            PublishOptions::with_timeout(Duration::from_secs(1)),
        )
        .await
        .unwrap();

    assert!(result.success);
}
