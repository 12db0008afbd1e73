use crate::EventSubscription;
use oval_types::PendingEvent;
use tracing::debug;

/// Owns an [`EventSubscription`] and releases it exactly once.
///
/// Release happens on the first call to [`SubscriptionGuard::release`], or on
/// drop if it was never called. Panics unwinding through the owner release it
/// too.
#[derive(Debug)]
pub struct SubscriptionGuard<S: EventSubscription> {
    inner: Option<S>,
}

impl<S: EventSubscription> SubscriptionGuard<S> {
    /// Take ownership of a subscription.
    pub const fn new(subscription: S) -> Self {
        Self { inner: Some(subscription) }
    }

    /// True once the subscription has been released.
    pub const fn is_released(&self) -> bool {
        self.inner.is_none()
    }

    /// Wait for the next event. Returns `None` once released.
    pub async fn next_event(&mut self) -> Option<Result<PendingEvent, S::Error>> {
        match self.inner.as_mut() {
            Some(subscription) => subscription.next_event().await,
            None => None,
        }
    }

    /// Release the subscription. Returns `false` if it was already released.
    pub fn release(&mut self) -> bool {
        match self.inner.take() {
            Some(mut subscription) => {
                subscription.unsubscribe();
                debug!("released event subscription");
                true
            }
            None => false,
        }
    }
}

impl<S: EventSubscription> Drop for SubscriptionGuard<S> {
    fn drop(&mut self) {
        self.release();
    }
}
