//! Lifetime of the session gate's change subscription.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gate registers its subscription from an async startup task, while
//! teardown runs from `on_cleanup`. Either can happen first. The link makes
//! sure the subscription is released exactly once in both orders, and tells
//! background loops when to stop.

#[cfg(test)]
#[path = "session_link_test.rs"]
mod session_link_test;

use std::sync::{Arc, Mutex, PoisonError};

use frontdesk::Subscription;

#[derive(Default)]
struct LinkInner {
    released: bool,
    subscription: Option<Subscription>,
}

/// Shared slot for the gate's one subscription.
#[derive(Clone, Default)]
pub struct SessionLink {
    inner: Arc<Mutex<LinkInner>>,
}

impl SessionLink {
    /// Hold `subscription` until release. Returns `false` (and unsubscribes
    /// immediately) if the gate was already torn down.
    pub fn attach(&self, subscription: Subscription) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.released {
            drop(inner);
            subscription.unsubscribe();
            return false;
        }
        if let Some(previous) = inner.subscription.replace(subscription) {
            previous.unsubscribe();
        }
        true
    }

    /// Tear down: unsubscribe if attached and refuse later attachments.
    pub fn release(&self) {
        let taken = {
            let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.released = true;
            inner.subscription.take()
        };
        if let Some(subscription) = taken {
            subscription.unsubscribe();
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.inner.lock().unwrap_or_else(PoisonError::into_inner).released
    }
}
