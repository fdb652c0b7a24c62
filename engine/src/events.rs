//! Event Bus
//!
//! Broadcast channels connecting the health system to damage sources and to
//! any number of listeners (HUD, audio, tests). The bus is an explicit object
//! shared through `Rc`; components subscribe when they activate and release
//! their [`Subscription`] token when they are torn down.
//!
//! Publishing is synchronous: every subscriber registered at the moment of the
//! call runs before `publish` returns. The subscriber list is snapshotted first,
//! so a callback may subscribe, unsubscribe or publish without invalidating the
//! fan-out in progress.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use firstperson_engine::EventBus;
//!
//! let bus = Rc::new(EventBus::new());
//! let token = bus.damage_applied.subscribe(|health| println!("health now {health}"));
//! bus.damage_applied.publish(60.0);
//! bus.damage_applied.unsubscribe(token);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

type Handler<T> = Rc<RefCell<dyn FnMut(T)>>;

/// Token identifying one subscription on one channel.
///
/// Hand it back to [`Channel::unsubscribe`] to stop receiving events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "dropping the token leaks the subscription until the channel is cleared"]
pub struct Subscription {
    channel: &'static str,
    id: u64,
}

impl Subscription {
    /// Name of the channel this token belongs to.
    pub fn channel(&self) -> &'static str {
        self.channel
    }
}

/// A named broadcast path carrying one value type to zero or more subscribers.
pub struct Channel<T> {
    name: &'static str,
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(u64, Handler<T>)>>,
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<T> Channel<T> {
    /// Channel name, used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Drop every subscription.
    pub fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }
}

impl<T: Copy + fmt::Debug + 'static> Channel<T> {
    /// Create an empty channel.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            next_id: Cell::new(0),
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Register a callback. It runs on every later `publish` until unsubscribed.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(T) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let handler: Handler<T> = Rc::new(RefCell::new(handler));
        self.handlers.borrow_mut().push((id, handler));
        log::debug!("{}: subscriber {} added", self.name, id);
        Subscription {
            channel: self.name,
            id,
        }
    }

    /// Remove a subscription. Returns `false` if the token was not registered here.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        if subscription.channel != self.name {
            return false;
        }
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(id, _)| *id != subscription.id);
        let removed = handlers.len() != before;
        if removed {
            log::debug!("{}: subscriber {} removed", self.name, subscription.id);
        }
        removed
    }

    /// Deliver `value` to every current subscriber, in subscription order.
    ///
    /// Publishing with no subscribers is a no-op.
    pub fn publish(&self, value: T) {
        let snapshot: Vec<Handler<T>> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        log::trace!(
            "{}: publish {:?} to {} subscriber(s)",
            self.name,
            value,
            snapshot.len()
        );
        for handler in snapshot {
            // A handler that re-enters its own channel is already borrowed; skip it
            // rather than panic.
            if let Ok(mut callback) = handler.try_borrow_mut() {
                (&mut *callback)(value);
            }
        }
    }
}

/// Process-wide broadcast channels for the damage/health lifecycle.
#[derive(Debug)]
pub struct EventBus {
    /// Input: damage sources publish an amount here.
    pub damage_taken: Channel<f32>,
    /// Output: health after damage was applied.
    pub damage_applied: Channel<f32>,
    /// Output: health after a regeneration step.
    pub healing_applied: Channel<f32>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            damage_taken: Channel::new("damage_taken"),
            damage_applied: Channel::new("damage_applied"),
            healing_applied: Channel::new("healing_applied"),
        }
    }
}
