use crate::{BroadcastHub, HubConfig, StreamError, StreamEvent};

use googletest::assert_that;
use googletest::prelude::eq;

fn hub(max_clients: usize) -> BroadcastHub {
    BroadcastHub::new(HubConfig::new("Test").with_max_clients(max_clients))
}

// =========================================================================
// Capacity
// =========================================================================

#[test]
fn given_hub_at_capacity_when_subscribe_then_rejected_until_slot_frees() {
    let hub = hub(2);

    let a = hub.subscribe();
    let b = hub.subscribe();
    assert!(a.is_ok());
    assert!(b.is_ok());

    let c = hub.subscribe();
    assert!(matches!(c, Err(StreamError::CapacityExceeded { current: 2, max: 2, .. })));
    assert_that!(hub.subscriber_count(), eq(2));

    let a = a.unwrap();
    assert!(hub.unsubscribe(a.id()));

    assert!(hub.subscribe().is_ok());
}

#[test]
fn given_rejected_subscribe_when_counted_then_count_unchanged() {
    let hub = hub(1);
    let _a = hub.subscribe().unwrap();

    let _ = hub.subscribe();
    let _ = hub.subscribe();

    assert_that!(hub.subscriber_count(), eq(1));
}

#[test]
fn given_dropped_subscription_when_counted_then_unregistered() {
    let hub = hub(5);
    let subscription = hub.subscribe().unwrap();
    assert_that!(hub.subscriber_count(), eq(1));

    drop(subscription);

    assert_that!(hub.subscriber_count(), eq(0));
}

#[test]
fn given_removed_subscriber_when_unsubscribed_again_then_noop() {
    let hub = hub(5);
    let subscription = hub.subscribe().unwrap();
    let id = subscription.id();

    assert!(hub.unsubscribe(id));
    assert!(!hub.unsubscribe(id));
    drop(subscription);

    assert_that!(hub.subscriber_count(), eq(0));
}

// =========================================================================
// Publish
// =========================================================================

#[test]
fn given_no_subscribers_when_publish_then_zero_deliveries() {
    let hub = hub(5);

    assert_that!(hub.publish("MapUpdated", "{}"), eq(0));
}

#[test]
fn given_subscribers_when_publish_then_each_receives_the_event() {
    let hub = hub(5);
    let mut a = hub.subscribe().unwrap();
    let mut b = hub.subscribe().unwrap();

    let delivered = hub.publish("StateUpdated", r#"{"a":1}"#);

    assert_that!(delivered, eq(2));
    let expected = StreamEvent::new("StateUpdated", r#"{"a":1}"#);
    assert_eq!(a.try_recv(), Some(expected.clone()));
    assert_eq!(b.try_recv(), Some(expected));
}

#[test]
fn given_map_topic_when_two_payloads_published_then_observed_in_order() {
    let hub = hub(5);
    let mut subscriber = hub.subscribe().unwrap();

    hub.publish("MapUpdated", "P1");
    hub.publish("MapUpdated", "P2");

    assert_eq!(subscriber.try_recv().unwrap().payload, "P1");
    assert_eq!(subscriber.try_recv().unwrap().payload, "P2");
    assert_eq!(subscriber.try_recv(), None);
}

#[test]
fn given_closed_connection_when_publish_then_others_still_receive_and_dead_one_removed() {
    let hub = hub(5);
    let mut alive = hub.subscribe().unwrap();
    let mut dead = hub.subscribe().unwrap();
    dead.close();

    let delivered = hub.publish("StateUpdated", "1");

    assert_that!(delivered, eq(1));
    assert_that!(hub.subscriber_count(), eq(1));
    assert!(alive.try_recv().is_some());
    assert!(!hub.unsubscribe(dead.id()));

    let delivered = hub.publish("StateUpdated", "2");
    assert_that!(delivered, eq(1));
}

#[test]
fn given_slow_subscriber_when_buffer_full_then_event_missed_but_still_registered() {
    let hub = BroadcastHub::new(
        HubConfig::new("Slow")
            .with_max_clients(5)
            .with_send_buffer_size(1),
    );
    let mut slow = hub.subscribe().unwrap();

    assert_that!(hub.publish("StateUpdated", "first"), eq(1));
    assert_that!(hub.publish("StateUpdated", "second"), eq(0));

    assert_that!(hub.subscriber_count(), eq(1));
    assert_eq!(slow.try_recv().unwrap().payload, "first");
    assert_eq!(slow.try_recv(), None);

    assert_that!(hub.publish("StateUpdated", "third"), eq(1));
    assert_eq!(slow.try_recv().unwrap().payload, "third");
}

// =========================================================================
// Shutdown
// =========================================================================

#[tokio::test]
async fn given_open_subscriptions_when_shutdown_then_streams_end_and_registry_empty() {
    let hub = hub(5);
    let mut a = hub.subscribe().unwrap();
    let mut b = hub.subscribe().unwrap();

    hub.shutdown();

    assert_that!(hub.subscriber_count(), eq(0));
    assert!(hub.is_closed());
    assert_eq!(a.recv().await, None);
    assert_eq!(b.recv().await, None);
}

#[tokio::test]
async fn given_queued_events_when_shutdown_then_subscription_yields_nothing() {
    let hub = hub(5);
    let mut subscription = hub.subscribe().unwrap();
    hub.publish("StateUpdated", "queued");

    hub.shutdown();

    assert_eq!(subscription.try_recv(), None);
    assert_eq!(subscription.recv().await, None);
}

#[test]
fn given_shut_down_hub_when_publish_then_zero_deliveries_without_error() {
    let hub = hub(5);
    let _subscription = hub.subscribe().unwrap();
    hub.shutdown();

    assert_that!(hub.publish("StateUpdated", "{}"), eq(0));
}

#[test]
fn given_shut_down_hub_when_subscribe_then_hub_closed() {
    let hub = hub(5);
    hub.shutdown();

    let result = hub.subscribe();

    assert!(matches!(result, Err(StreamError::HubClosed { .. })));
}

#[test]
fn given_shut_down_hub_when_shutdown_again_then_noop() {
    let hub = hub(5);
    hub.shutdown();
    hub.shutdown();

    assert!(hub.is_closed());
}

// =========================================================================
// Concurrency
// =========================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_concurrent_subscribers_and_publishers_when_interleaved_then_cap_holds() {
    let hub = hub(3);
    let mut tasks = Vec::new();

    for i in 0..16 {
        let hub = hub.clone();
        tasks.push(tokio::spawn(async move {
            if i % 2 == 0 {
                hub.publish("StateUpdated", format!("{i}"));
                None
            } else {
                hub.subscribe().ok()
            }
        }));
    }

    let mut held = Vec::new();
    for task in tasks {
        if let Some(subscription) = task.await.unwrap() {
            held.push(subscription);
        }
    }

    assert_that!(held.len(), eq(3));
    assert_that!(hub.subscriber_count(), eq(3));
}
