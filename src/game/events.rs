//! Channel-keyed publish/subscribe
//!
//! The [`EventBus`] delivers payloads synchronously, in subscription order,
//! to every subscriber registered on a channel. It is how the position model
//! announces a move before committing it (channel [`MOVE_BEFORE`]).
//!
//! # Failure Isolation
//!
//! A subscriber that returns an error or panics is logged and skipped; the
//! remaining subscribers on the same channel still receive the payload.
//!
//! ```rust,ignore
//! let mut bus = EventBus::<MoveOutcome>::new();
//! let id = bus.subscribe(Some(MOVE_BEFORE), |outcome| {
//!     println!("{} played {}-{}", outcome.mover, outcome.from, outcome.to);
//!     Ok(())
//! });
//! bus.unsubscribe(id, Some(MOVE_BEFORE));
//! ```

use board_rules::{Color, Square};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{trace, warn};

/// Channel used when a subscriber does not name one
pub const DEFAULT_CHANNEL: &str = "any";

/// Channel the position model publishes on before committing a move
pub const MOVE_BEFORE: &str = "move_before";

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

/// Callback invoked with a borrowed payload
pub type Callback<P> = Box<dyn FnMut(&P) -> anyhow::Result<()> + Send>;

struct Subscriber<P> {
    id: SubscriberId,
    callback: Callback<P>,
}

/// Describes one accepted move attempt, published before the commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Position before the move
    pub fen: String,
    pub mover: Color,
    pub from: Square,
    pub to: Square,
    /// A pawn reached the last rank
    pub promote: bool,
    pub mate: bool,
    pub stalemate: bool,
}

/// Ordered per-channel subscriber lists
pub struct EventBus<P> {
    channels: HashMap<String, Vec<Subscriber<P>>>,
    next_id: u64,
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> EventBus<P> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
            next_id: 0,
        }
    }

    /// Append `callback` to the channel's list (`any` when `channel` is `None`)
    pub fn subscribe<F>(&mut self, channel: Option<&str>, callback: F) -> SubscriberId
    where
        F: FnMut(&P) -> anyhow::Result<()> + Send + 'static,
    {
        let channel = channel.unwrap_or(DEFAULT_CHANNEL);
        let id = SubscriberId(self.next_id);
        self.next_id += 1;

        self.channels
            .entry(channel.to_string())
            .or_default()
            .push(Subscriber {
                id,
                callback: Box::new(callback),
            });
        trace!("[EVENTS] Subscriber {:?} added to '{}'", id, channel);
        id
    }

    /// Remove a subscriber by identity. Returns `false` if it was not registered
    /// on that channel.
    pub fn unsubscribe(&mut self, id: SubscriberId, channel: Option<&str>) -> bool {
        let channel = channel.unwrap_or(DEFAULT_CHANNEL);
        let Some(subscribers) = self.channels.get_mut(channel) else {
            return false;
        };

        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        let removed = subscribers.len() != before;
        if subscribers.is_empty() {
            self.channels.remove(channel);
        }
        removed
    }

    /// Deliver `payload` to every subscriber on `channel`.
    ///
    /// Returns how many subscribers completed without error.
    pub fn publish(&mut self, channel: &str, payload: &P) -> usize {
        let Some(subscribers) = self.channels.get_mut(channel) else {
            return 0;
        };

        let mut delivered = 0;
        for subscriber in subscribers.iter_mut() {
            let result = catch_unwind(AssertUnwindSafe(|| (subscriber.callback)(payload)));
            match result {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => warn!(
                    "[EVENTS] Subscriber {:?} on '{}' failed: {:#} - continuing",
                    subscriber.id, channel, e
                ),
                Err(_) => warn!(
                    "[EVENTS] Subscriber {:?} on '{}' panicked - continuing",
                    subscriber.id, channel
                ),
            }
        }
        delivered
    }

    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.channels.get(channel).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&'static str) -> Callback<u32>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_for_make = Arc::clone(&log);
        let make = move |name: &'static str| -> Callback<u32> {
            let log = Arc::clone(&log_for_make);
            Box::new(move |payload: &u32| {
                log.lock().unwrap().push(format!("{name}:{payload}"));
                Ok(())
            })
        };
        (log, make)
    }

    #[test]
    fn test_delivery_in_subscription_order() {
        let (log, make) = recorder();
        let mut bus = EventBus::new();
        bus.subscribe(Some("ch"), make("a"));
        bus.subscribe(Some("ch"), make("b"));
        bus.subscribe(Some("other"), make("c"));

        assert_eq!(bus.publish("ch", &7), 2);
        assert_eq!(*log.lock().unwrap(), vec!["a:7", "b:7"]);
    }

    #[test]
    fn test_default_channel_is_any() {
        let (log, make) = recorder();
        let mut bus = EventBus::new();
        bus.subscribe(None, make("a"));

        assert_eq!(bus.subscriber_count(DEFAULT_CHANNEL), 1);
        bus.publish(DEFAULT_CHANNEL, &1);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_unsubscribe_by_identity() {
        let (log, make) = recorder();
        let mut bus = EventBus::new();
        let a = bus.subscribe(Some("ch"), make("a"));
        bus.subscribe(Some("ch"), make("b"));

        assert!(!bus.unsubscribe(a, Some("elsewhere")), "wrong channel must not remove");
        assert!(bus.unsubscribe(a, Some("ch")));
        assert!(!bus.unsubscribe(a, Some("ch")), "second removal is a no-op");

        bus.publish("ch", &3);
        assert_eq!(*log.lock().unwrap(), vec!["b:3"]);
    }

    #[test]
    fn test_failing_subscribers_are_isolated() {
        let (log, make) = recorder();
        let mut bus = EventBus::new();
        bus.subscribe(Some("ch"), |_: &u32| Err(anyhow::anyhow!("boom")));
        bus.subscribe(Some("ch"), |_: &u32| -> anyhow::Result<()> { panic!("subscriber panic") });
        bus.subscribe(Some("ch"), make("last"));

        assert_eq!(bus.publish("ch", &9), 1);
        assert_eq!(*log.lock().unwrap(), vec!["last:9"]);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let mut bus: EventBus<u32> = EventBus::new();
        assert_eq!(bus.publish(MOVE_BEFORE, &0), 0);
    }
}
