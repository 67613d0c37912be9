//! Listener registry shared by observable core aggregates.
//!
//! # Invariants
//! - Tokens are never reused within one registry.
//! - Iteration order equals subscription order.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionToken(u64);

impl Display for SubscriptionToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Ordered listener table keyed by monotonically increasing tokens.
pub(crate) struct ListenerSet<L: ?Sized> {
    listeners: BTreeMap<SubscriptionToken, Box<L>>,
    next_token: u64,
}

impl<L: ?Sized> Default for ListenerSet<L> {
    fn default() -> Self {
        Self {
            listeners: BTreeMap::new(),
            next_token: 1,
        }
    }
}

impl<L: ?Sized> ListenerSet<L> {
    pub(crate) fn insert(&mut self, listener: Box<L>) -> SubscriptionToken {
        let token = SubscriptionToken(self.next_token);
        self.next_token += 1;
        self.listeners.insert(token, listener);
        token
    }

    pub(crate) fn remove(&mut self, token: SubscriptionToken) -> bool {
        self.listeners.remove(&token).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut Box<L>> {
        self.listeners.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::ListenerSet;

    #[test]
    fn tokens_are_not_reused_after_remove() {
        let mut set: ListenerSet<dyn FnMut()> = ListenerSet::default();
        let first = set.insert(Box::new(|| {}));
        assert!(set.remove(first));
        let second = set.insert(Box::new(|| {}));
        assert_ne!(first, second);
        assert!(!set.remove(first));
        assert_eq!(set.len(), 1);
    }
}
