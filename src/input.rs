//! Tap input binding: action lookup and the subscribe/unsubscribe lifecycle.
//!
//! The engine resolves one named action at construction. A missing action is
//! a startup error that leaves the engine inert instead of crashing. While
//! enabled the engine holds a [`Subscription`] token; tap events carrying any
//! other token are dropped, so a handler detached on teardown can never be
//! invoked late.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use glam::DVec2;
use serde::Serialize;

/// Identifier of a named input action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActionId(pub u32);

/// Registration token returned by [`InputSource::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Subscription(pub u64);

/// One confirmed tap, fired once per physical tap-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapEvent {
    /// Subscription the event was delivered to.
    pub subscription: Subscription,
    /// Screen-space position of the touch, in pixels.
    pub screen: DVec2,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("input action not found: {name}")]
    MissingAction { name: String },
}

/// Delivers confirmed taps for named actions.
pub trait InputSource {
    fn find_action(&self, name: &str) -> Option<ActionId>;
    fn subscribe(&mut self, action: ActionId) -> Subscription;
    fn unsubscribe(&mut self, subscription: Subscription);
}

/// Lifecycle of the engine's tap binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TapBinding {
    /// The action was not found; taps are never accepted.
    #[default]
    Unbound,
    /// Action resolved but no handler attached.
    Bound { action: ActionId },
    /// Handler attached; events must carry `subscription`.
    Subscribed { action: ActionId, subscription: Subscription },
}

impl TapBinding {
    /// Look up `name` on `source`.
    pub fn resolve(source: &dyn InputSource, name: &str) -> Result<Self, BindingError> {
        source
            .find_action(name)
            .map(|action| Self::Bound { action })
            .ok_or_else(|| BindingError::MissingAction { name: name.to_string() })
    }

    /// Attach the handler. Returns true if a new subscription was made.
    pub fn enable(&mut self, source: &mut dyn InputSource) -> bool {
        let Self::Bound { action } = *self else {
            return false;
        };
        let subscription = source.subscribe(action);
        *self = Self::Subscribed { action, subscription };
        true
    }

    /// Detach the handler. Returns true if a subscription was released.
    pub fn disable(&mut self, source: &mut dyn InputSource) -> bool {
        let Self::Subscribed { action, subscription } = *self else {
            return false;
        };
        source.unsubscribe(subscription);
        *self = Self::Bound { action };
        true
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        !matches!(self, Self::Unbound)
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        matches!(self, Self::Subscribed { .. })
    }

    /// Whether `event` was delivered to the live subscription.
    #[must_use]
    pub fn accepts(&self, event: &TapEvent) -> bool {
        matches!(*self, Self::Subscribed { subscription, .. } if subscription == event.subscription)
    }
}

/// In-memory [`InputSource`]: a table of named actions and live subscriptions.
#[derive(Debug, Default)]
pub struct ActionMap {
    actions: Vec<(String, ActionId)>,
    subscriptions: Vec<(Subscription, ActionId)>,
    next_action: u32,
    next_token: u64,
}

impl ActionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`add_action`](Self::add_action).
    #[must_use]
    pub fn with_action(mut self, name: &str) -> Self {
        self.add_action(name);
        self
    }

    /// Register a named action, returning its id. Re-adding a name returns the existing id.
    pub fn add_action(&mut self, name: &str) -> ActionId {
        if let Some(id) = self.find_action(name) {
            return id;
        }
        let id = ActionId(self.next_action);
        self.next_action += 1;
        self.actions.push((name.to_string(), id));
        id
    }

    /// One event per live subscription to `action`.
    #[must_use]
    pub fn dispatch(&self, action: ActionId, screen: DVec2) -> Vec<TapEvent> {
        self.subscriptions
            .iter()
            .filter(|(_, a)| *a == action)
            .map(|(subscription, _)| TapEvent { subscription: *subscription, screen })
            .collect()
    }

    /// Number of live subscriptions to `action`.
    #[must_use]
    pub fn subscriber_count(&self, action: ActionId) -> usize {
        self.subscriptions.iter().filter(|(_, a)| *a == action).count()
    }
}

impl InputSource for ActionMap {
    fn find_action(&self, name: &str) -> Option<ActionId> {
        self.actions.iter().find(|(n, _)| n == name).map(|(_, id)| *id)
    }

    fn subscribe(&mut self, action: ActionId) -> Subscription {
        let subscription = Subscription(self.next_token);
        self.next_token += 1;
        self.subscriptions.push((subscription, action));
        subscription
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        self.subscriptions.retain(|(s, _)| *s != subscription);
    }
}
