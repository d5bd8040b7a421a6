//! Slots for free functions and closures.

use std::fmt;
use std::rc::Rc;

use super::callback::Callback;
use super::listener::Listener;
use crate::id::SlotId;
use crate::signal::Signal;

/// A listener calling a free function or closure.
///
/// A slot listens to at most one signal at a time and detaches itself when
/// dropped. `T` defaults to `()`, matching `Signal<()>`.
///
/// # Example
///
/// ```rust
/// use siglot_core::{Signal, Slot};
///
/// fn ping() {
///     println!("ping");
/// }
///
/// let signal: Signal = Signal::default();
/// let slot = Slot::notify(ping);
///
/// slot.subscribe_to(&signal);
/// assert!(slot.is_active());
///
/// drop(signal);
/// assert!(!slot.is_active());
/// ```
pub struct Slot<T: 'static = ()> {
    listener: Rc<Listener<T>>,
}

impl<T: 'static> Slot<T> {
    /// Create a slot calling `callback` with the payload.
    pub fn new(callback: fn(&T)) -> Self {
        Self::with_callback(Some(Callback::Function(callback)))
    }

    /// Create a slot calling `callback` without the payload.
    pub fn notify(callback: fn()) -> Self {
        Self::with_callback(Some(Callback::Notify(callback)))
    }

    /// Create a slot calling a closure with the payload.
    pub fn from_closure<F>(callback: F) -> Self
    where
        F: Fn(&T) + 'static,
    {
        Self::with_callback(Some(Callback::Closure(Rc::new(callback))))
    }

    /// Create a slot with no callback. It can attach, but stays inactive
    /// until something is bound.
    pub fn unbound() -> Self {
        Self::with_callback(None)
    }

    fn with_callback(callback: Option<Callback<T>>) -> Self {
        Self {
            listener: Listener::new(callback),
        }
    }

    /// Get the slot's unique ID.
    pub fn id(&self) -> SlotId {
        self.listener.id()
    }

    /// Replace the callback with a function taking the payload.
    pub fn bind(&self, callback: fn(&T)) {
        self.listener.bind(Callback::Function(callback));
    }

    /// Replace the callback with a function ignoring the payload.
    pub fn bind_notify(&self, callback: fn()) {
        self.listener.bind(Callback::Notify(callback));
    }

    /// Replace the callback with a closure. Attachment is unaffected.
    pub fn bind_closure<F>(&self, callback: F)
    where
        F: Fn(&T) + 'static,
    {
        self.listener.bind(Callback::Closure(Rc::new(callback)));
    }

    /// Remove the callback. Returns `true` if one was bound.
    pub fn unbind(&self) -> bool {
        self.listener.unbind().is_some()
    }

    /// Attach to `signal`, leaving any other signal first.
    pub fn subscribe_to(&self, signal: &Signal<T>) {
        self.listener.subscribe_to(signal.slot_set());
    }

    /// Detach from the current signal. Does nothing when detached.
    pub fn unsubscribe(&self) {
        self.listener.unsubscribe();
    }

    /// Whether a callback is bound and the slot is attached to a live signal.
    pub fn is_active(&self) -> bool {
        self.listener.is_active()
    }

    /// Whether the slot is attached to `signal`.
    pub fn is_subscribed_to(&self, signal: &Signal<T>) -> bool {
        self.listener.is_attached_to(signal.slot_set())
    }
}

impl<T: 'static> Default for Slot<T> {
    fn default() -> Self {
        Self::unbound()
    }
}

/// A copy gets its own ID and the same callback. If the source is active,
/// the copy listens to the same signal.
impl<T: 'static> Clone for Slot<T> {
    fn clone(&self) -> Self {
        let copy = Self::with_callback(self.listener.callback());
        if self.listener.is_active() {
            if let Some(signal) = self.listener.signal() {
                copy.listener.subscribe_to(&signal);
            }
        }
        copy
    }
}

impl<T: 'static> Drop for Slot<T> {
    fn drop(&mut self) {
        self.listener.unsubscribe();
    }
}

impl<T: 'static> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("id", &self.id())
            .field("callback", &self.listener.callback())
            .field("signal", &self.listener.signal().map(|set| set.id()))
            .finish()
    }
}
