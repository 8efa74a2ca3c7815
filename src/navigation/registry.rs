use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::{NavigationError, ObserverError, Result};

/// No-argument change notification. Observers read the new state from the
/// object they subscribed to.
pub type Observer = Rc<dyn Fn() -> std::result::Result<(), ObserverError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Ordered id -> observer mapping. Ids are assigned monotonically and never
/// reused, so iteration order is subscription order.
#[derive(Default)]
pub struct SubscriptionRegistry {
    observers: RefCell<BTreeMap<SubscriptionId, Observer>>,
    next_id: Cell<u64>,
}

impl fmt::Debug for SubscriptionRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SubscriptionRegistry")
            .field("subscribers", &self.len())
            .field("next_id", &self.next_id.get())
            .finish()
    }
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn() -> std::result::Result<(), ObserverError> + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.observers.borrow_mut().insert(id, Rc::new(observer));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<()> {
        self.observers
            .borrow_mut()
            .remove(&id)
            .map(|_| ())
            .ok_or(NavigationError::UnknownSubscription(id))
    }

    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.observers.borrow().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.borrow().is_empty()
    }

    pub fn snapshot(&self) -> Vec<(SubscriptionId, Observer)> {
        self.observers
            .borrow()
            .iter()
            .map(|(id, observer)| (*id, Rc::clone(observer)))
            .collect()
    }

    /// Delivers to the observers registered when the call starts, in
    /// subscription order, stopping at the first failure. The registry is
    /// not borrowed while observers run, so they may subscribe, unsubscribe
    /// or trigger nested notifications.
    pub fn notify_all(&self) -> Result<()> {
        for (id, observer) in self.snapshot() {
            observer().map_err(|source| NavigationError::Observer { id, source })?;
        }
        Ok(())
    }
}
