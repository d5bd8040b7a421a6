//! Listener state shared by every slot kind.
//!
//! A listener owns the callback and the back-reference to the one slot set
//! it is attached to. The public slot types are thin owners of an
//! `Rc<Listener<T>>`; the slot set only ever sees it through a `Weak`.
//!
//! The attachment invariant lives here: after every method below returns,
//! `signal` points at a set if and only if that set holds this listener's ID.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace;

use super::callback::Callback;
use crate::error::{Result, SlotError};
use crate::id::SlotId;
use crate::signal::SlotSet;

pub(crate) struct Listener<T> {
    id: SlotId,
    callback: RefCell<Option<Callback<T>>>,
    signal: RefCell<Option<Weak<SlotSet<T>>>>,
}

impl<T> Listener<T> {
    /// Create a detached listener.
    pub(crate) fn new(callback: Option<Callback<T>>) -> Rc<Self> {
        Rc::new(Self {
            id: SlotId::new(),
            callback: RefCell::new(callback),
            signal: RefCell::new(None),
        })
    }

    pub(crate) fn id(&self) -> SlotId {
        self.id
    }

    /// Replace the callback. Attachment is unaffected.
    pub(crate) fn bind(&self, callback: Callback<T>) {
        trace!(slot = %self.id, kind = callback.kind(), "slot bound");
        *self.callback.borrow_mut() = Some(callback);
    }

    /// Remove the callback, returning it. Attachment is unaffected.
    pub(crate) fn unbind(&self) -> Option<Callback<T>> {
        self.callback.borrow_mut().take()
    }

    pub(crate) fn callback(&self) -> Option<Callback<T>> {
        self.callback.borrow().clone()
    }

    /// Whether a callback is bound and can still reach user code.
    pub(crate) fn is_bound(&self) -> bool {
        self.callback.borrow().as_ref().is_some_and(Callback::is_live)
    }

    /// The set this listener is attached to, if it is still alive.
    pub(crate) fn signal(&self) -> Option<Rc<SlotSet<T>>> {
        self.signal.borrow().as_ref().and_then(Weak::upgrade)
    }

    pub(crate) fn is_attached(&self) -> bool {
        self.signal().is_some()
    }

    pub(crate) fn is_attached_to(&self, set: &SlotSet<T>) -> bool {
        self.signal()
            .is_some_and(|current| std::ptr::eq(Rc::as_ptr(&current), set))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.is_bound() && self.is_attached()
    }

    /// Attach to `set`, leaving any previously attached set first.
    ///
    /// Attaching to the set this listener is already on is a no-op.
    pub(crate) fn subscribe_to(self: &Rc<Self>, set: &Rc<SlotSet<T>>) {
        if self.is_attached_to(set) {
            return;
        }
        self.unsubscribe();

        set.subscribe(self.id, Rc::downgrade(self));
        *self.signal.borrow_mut() = Some(Rc::downgrade(set));
        trace!(slot = %self.id, signal = %set.id(), "slot attached");
    }

    /// Leave the attached set, if any. Calling this while detached is a
    /// no-op.
    pub(crate) fn unsubscribe(&self) {
        let previous = self.signal.borrow_mut().take();
        if let Some(set) = previous.as_ref().and_then(Weak::upgrade) {
            set.unsubscribe(self.id);
            trace!(slot = %self.id, signal = %set.id(), "slot detached");
        }
    }

    /// Forget `set` without touching it. Used by a signal tearing itself
    /// down, after it has already dropped this listener from the set.
    pub(crate) fn disconnect(&self, set: &SlotSet<T>) {
        if self.is_attached_to(set) {
            self.signal.borrow_mut().take();
            trace!(slot = %self.id, signal = %set.id(), "slot disconnected by signal");
        }
    }

    /// Run the callback with `payload`.
    ///
    /// No borrow of the listener is held while user code runs, so the
    /// callback may rebind, unsubscribe or drop this very slot.
    pub(crate) fn call(&self, payload: &T) -> Result<()> {
        let callback = self.callback().ok_or(SlotError::Unbound(self.id))?;
        callback.call(self.id, payload)
    }
}
