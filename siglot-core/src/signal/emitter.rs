//! Signal Implementation
//!
//! A Signal holds a payload and the set of slots listening to it. Invoking
//! the signal calls every attached slot with the current payload.
//!
//! # How Signals Work
//!
//! 1. Slots attach themselves with `subscribe_to(&signal)`. The signal's
//!    set records the slot and the slot records the signal.
//!
//! 2. The owner writes `signal.payload`, then calls `invoke()`.
//!
//! 3. When the signal is dropped (or `clear()`ed), every attached slot is
//!    told it is detached. Slots never touch a signal after that.
//!
//! # Dispatch
//!
//! `invoke()` snapshots the attached slots before calling any of them, then
//! checks each slot again right before its call:
//!
//! - a slot that detached, moved to another signal, was cleared or was
//!   dropped earlier in the same dispatch is skipped;
//! - a slot without a live callback is skipped;
//! - a slot attached during the dispatch waits for the next `invoke()`.
//!
//! No borrow is held across a callback, so callbacks may subscribe,
//! unsubscribe, drop slots, clear the signal or invoke it again.
//!
//! # Threading
//!
//! Signals are single-threaded (`!Send`, `!Sync`). Every call runs to
//! completion on the caller's thread.

use std::fmt::Debug;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use super::slot_set::SlotSet;
use crate::id::{SignalId, SlotId};

/// An event source broadcasting a payload of type `T` to its slots.
///
/// `T` defaults to `()` for signals that carry no data.
///
/// # Example
///
/// ```rust
/// use siglot_core::{Signal, Slot};
///
/// fn on_value(value: &i32) {
///     println!("got {value}");
/// }
///
/// let mut signal = Signal::new(0);
/// let slot = Slot::new(on_value);
/// slot.subscribe_to(&signal);
///
/// signal.payload = 42;
/// assert_eq!(signal.invoke(), 1);
/// ```
pub struct Signal<T: 'static = ()> {
    /// The value handed to every slot on `invoke()`.
    pub payload: T,

    slots: Rc<SlotSet<T>>,
}

impl<T: 'static> Signal<T> {
    /// Create a signal with no slots attached.
    pub fn new(payload: T) -> Self {
        Self {
            payload,
            slots: SlotSet::new(),
        }
    }

    /// Get the signal's unique ID.
    pub fn id(&self) -> SignalId {
        self.slots.id()
    }

    /// Number of attached slots.
    pub fn count(&self) -> usize {
        self.slots.count()
    }

    /// Whether no slot is attached.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Whether the slot with `id` is attached to this signal.
    pub fn contains(&self, id: SlotId) -> bool {
        self.slots.contains(id)
    }

    /// IDs of the attached slots, in attachment order.
    pub fn subscribers(&self) -> Vec<SlotId> {
        self.slots.ids()
    }

    /// Call every attached, bound slot with the current payload.
    ///
    /// Returns the number of callbacks that ran.
    pub fn invoke(&self) -> usize {
        let snapshot = self.slots.snapshot();
        let mut delivered = 0;

        for listener in snapshot.iter().filter_map(Weak::upgrade) {
            if !listener.is_attached_to(&self.slots) {
                trace!(signal = %self.id(), slot = %listener.id(), "skipping slot detached during dispatch");
                continue;
            }
            if !listener.is_bound() {
                trace!(signal = %self.id(), slot = %listener.id(), "skipping slot without live callback");
                continue;
            }

            match listener.call(&self.payload) {
                Ok(()) => delivered += 1,
                Err(error) => warn!(signal = %self.id(), slot = %error.slot(), %error, "slot skipped during dispatch"),
            }
        }

        trace!(signal = %self.id(), delivered, "signal invoked");
        delivered
    }

    /// Detach every slot.
    ///
    /// Slots are only marked detached; none of them is asked to unsubscribe,
    /// since that would reach back into the set being emptied.
    pub fn clear(&self) {
        let detached = self.slots.drain();
        for listener in detached.iter().filter_map(Weak::upgrade) {
            listener.disconnect(&self.slots);
        }
        if !detached.is_empty() {
            debug!(signal = %self.id(), count = detached.len(), "signal cleared");
        }
    }

    /// Attach every slot of `other` to this signal.
    ///
    /// The slots move rather than duplicate: `other` ends up with no slots
    /// attached. Keeping them on both signals would break the rule that a
    /// slot listens to one signal at a time. Copying a signal onto itself is
    /// a no-op.
    ///
    /// Returns the number of slots that moved.
    pub fn copy_subscribers_from(&self, other: &Signal<T>) -> usize {
        if Rc::ptr_eq(&self.slots, &other.slots) {
            return 0;
        }

        let mut moved = 0;
        for listener in other.slots.snapshot().iter().filter_map(Weak::upgrade) {
            listener.subscribe_to(&self.slots);
            moved += 1;
        }

        debug!(signal = %self.id(), from = %other.id(), moved, "copied subscribers");
        moved
    }

    pub(crate) fn slot_set(&self) -> &Rc<SlotSet<T>> {
        &self.slots
    }
}

impl<T: Default + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Cloning copies the payload only. The clone is a new signal with no slots,
/// so nothing is delivered twice by accident.
impl<T: Clone + 'static> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self::new(self.payload.clone())
    }

    /// Assignment overwrites the payload and leaves both signals'
    /// subscriptions alone.
    fn clone_from(&mut self, source: &Self) {
        self.payload.clone_from(&source.payload);
    }
}

impl<T: 'static> Drop for Signal<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Debug + 'static> Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("id", &self.id())
            .field("payload", &self.payload)
            .field("subscriber_count", &self.count())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
