//! Concurrent subscribe, notify and disconnect
//!
//! Runs handshakes and pushes from many tasks on a multi-threaded runtime and
//! checks that the registry only ever ends up holding open channels.

use std::sync::Arc;

use mingle_push::backend::auth::StaticTokenValidator;
use mingle_push::backend::notification::{
    ChannelRegistry, Notifier, SubscriptionHandshake,
};
use mingle_push::shared::UserId;

const EMPLOYEES: usize = 4;

fn handshake() -> (SubscriptionHandshake, Notifier) {
    let validator = StaticTokenValidator::new(
        (0..EMPLOYEES).map(|i| (format!("tok{}", i), format!("E{}", i))),
    );
    let registry = ChannelRegistry::new();
    let notifier = Notifier::new(registry.clone());
    (
        SubscriptionHandshake::new(registry, Arc::new(validator)),
        notifier,
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_subscriptions_leave_only_open_channels() {
    let (handshake, notifier) = handshake();
    let registry = handshake.registry().clone();

    let mut tasks = Vec::new();
    for task in 0..16usize {
        let handshake = handshake.clone();
        let notifier = notifier.clone();
        tasks.push(tokio::spawn(async move {
            let mut kept = Vec::new();
            for round in 0..50usize {
                let employee = (task + round) % EMPLOYEES;
                let subscription = handshake
                    .subscribe(&format!("tok{}", employee))
                    .expect("known token");

                // A channel completing on another task can race the lookup
                let _ = notifier.notify(
                    &UserId::new(format!("E{}", (employee + 1) % EMPLOYEES)),
                    "newMessage",
                    format!("msg from E{}", employee),
                );

                if round % 3 == 0 {
                    drop(subscription);
                } else {
                    kept.push(subscription);
                }
                tokio::task::yield_now().await;
            }
            kept
        }));
    }

    let mut kept = Vec::new();
    for task in tasks {
        kept.extend(task.await.unwrap());
    }

    assert!(registry.len() <= EMPLOYEES);
    for i in 0..EMPLOYEES {
        if let Some(channel) = registry.lookup(&UserId::new(format!("E{}", i))) {
            assert!(channel.is_open());
            assert!(kept.iter().any(|s| s.channel().id() == channel.id()));
        }
    }

    drop(kept);
    assert!(registry.is_empty());
}
