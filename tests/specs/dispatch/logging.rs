//! Logging specs.
//!
//! What the injected logger sees for retries and timeouts.

use crate::prelude::*;

#[tokio::test(start_paused = true)]
async fn retries_are_logged_per_attempt() {
    let config = BusConfig::new()
        .with_max_retries(2)
        .with_retry_delay(Duration::from_millis(5));
    let (bus, logger) = bus_with_logger(config);
    let attempts = Arc::new(AtomicU32::new(0));
    let failing = subscribe_failing(&bus, "Job.*", &attempts);

    bus.publish(PartialEvent::new("Job.Failed", "worker")).await.unwrap();

    let warnings = logger.at(LogLevel::Warn);
    assert_eq!(warnings.len(), 3);
    assert_eq!(warnings[2].field("attempt"), Some("3"));

    let errors = logger.at(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].field("subscription_id"),
        Some(failing.id.to_string().as_str())
    );
    assert_eq!(errors[0].error.as_deref(), Some("always fails"));
}

#[tokio::test(start_paused = true)]
async fn disabled_logging_is_silent() {
    let config = BusConfig::new().with_max_retries(1).with_logging(false);
    let (bus, logger) = bus_with_logger(config);
    let attempts = Arc::new(AtomicU32::new(0));
    subscribe_failing(&bus, "Job.*", &attempts);

    let result = bus.publish(PartialEvent::new("Job.Failed", "worker")).await.unwrap();

    assert!(!result.success);
    assert!(logger.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn timeout_is_logged_as_error() {
    let (bus, logger) = bus_with_logger(BusConfig::default());
    bus.subscribe("Slow.*", |_event, _ctx| async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        Ok(())
    })
    .unwrap();

    let err = bus
        .publish_with(
            PartialEvent::new("Slow.Op", "svc"),
            PublishOptions::with_timeout(Duration::from_millis(10)),
        )
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    let errors = logger.at(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("timeout_ms"), Some("10"));
    assert_eq!(errors[0].field("completed_handlers"), Some("0"));
}
