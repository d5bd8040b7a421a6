//! Slot Set
//!
//! The subscriber set behind every signal. It records which listeners are
//! attached, keyed by [`SlotId`], and holds them only weakly.
//!
//! The set never updates a listener's back-reference by itself. Attachment
//! goes through the listener, which inserts itself here and then records the
//! set; the only place the set reaches back into listeners is teardown,
//! driven by the owning [`Signal`](super::Signal).
//!
//! # Ordering
//!
//! Entries live in an insertion-ordered map, so iteration follows the order
//! in which slots attached. Removal shifts later entries down, keeping that
//! order intact for the ones that remain.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::id::{SignalId, SlotId};
use crate::slot::Listener;

/// A copy of the set's entries, taken so callers can walk them without
/// holding a borrow of the set.
pub(crate) type Snapshot<T> = SmallVec<[Weak<Listener<T>>; 8]>;

/// The listeners currently attached to one signal.
pub(crate) struct SlotSet<T> {
    id: SignalId,
    slots: RefCell<IndexMap<SlotId, Weak<Listener<T>>>>,
}

impl<T> SlotSet<T> {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self {
            id: SignalId::new(),
            slots: RefCell::new(IndexMap::new()),
        })
    }

    /// ID of the signal owning this set.
    pub(crate) fn id(&self) -> SignalId {
        self.id
    }

    /// Add a listener. Adding one that is already present is a no-op.
    ///
    /// Returns `true` if the listener was not present before.
    pub(crate) fn subscribe(&self, id: SlotId, listener: Weak<Listener<T>>) -> bool {
        let mut slots = self.slots.borrow_mut();
        if slots.contains_key(&id) {
            return false;
        }
        slots.insert(id, listener);
        true
    }

    /// Remove a listener. Removing one that is absent is a no-op.
    ///
    /// Returns `true` if the listener was present.
    pub(crate) fn unsubscribe(&self, id: SlotId) -> bool {
        self.slots.borrow_mut().shift_remove(&id).is_some()
    }

    pub(crate) fn contains(&self, id: SlotId) -> bool {
        self.slots.borrow().contains_key(&id)
    }

    pub(crate) fn count(&self) -> usize {
        self.slots.borrow().len()
    }

    /// IDs of the attached listeners, in attachment order.
    pub(crate) fn ids(&self) -> Vec<SlotId> {
        self.slots.borrow().keys().copied().collect()
    }

    /// Copy out every entry, in attachment order.
    pub(crate) fn snapshot(&self) -> Snapshot<T> {
        self.slots.borrow().values().cloned().collect()
    }

    /// Empty the set, handing back what it held.
    pub(crate) fn drain(&self) -> Snapshot<T> {
        self.slots.borrow_mut().drain(..).map(|(_, listener)| listener).collect()
    }
}
