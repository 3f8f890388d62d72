//! The seam between controllers and whatever drives them.
//!
//! A [`Host`] hands out timers, paint-synchronized frames and input
//! subscriptions. Each one comes back as a [`Subscription`], which releases the
//! underlying resource exactly once: on [`Subscription::cancel`] or on drop.

use crate::geometry::{Point, Viewport};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Callback a controller uses to hand its own inputs back to the owner.
pub type Notify<T> = Rc<dyn Fn(T)>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved(Point),
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

pub trait Host {
    fn now(&self) -> Instant;

    /// Current size of the tracked surface. Not cached by callers.
    fn viewport(&self) -> Viewport;

    fn every(&self, period: Duration, task: Box<dyn FnMut()>) -> Subscription;

    /// Runs `task` once before the next paint. Cancelling after it ran must be
    /// a no-op.
    fn next_frame(&self, task: Box<dyn FnOnce()>) -> Subscription;

    fn pointer_events(&self, handler: Box<dyn FnMut(PointerEvent)>) -> Subscription;

    fn visibility_events(&self, handler: Box<dyn FnMut(Visibility)>) -> Subscription;
}

#[must_use = "dropping a Subscription releases it"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    pub fn cancel(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Subscriptions that live and die together.
#[derive(Debug, Default)]
pub struct Scope {
    held: Vec<Subscription>,
}

impl Scope {
    pub fn hold(&mut self, subscription: Subscription) {
        self.held.push(subscription);
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Releases in reverse acquisition order.
    pub fn release(&mut self) {
        while let Some(mut subscription) = self.held.pop() {
            subscription.cancel();
        }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.release();
    }
}
