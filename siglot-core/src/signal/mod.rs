//! Signals
//!
//! This module implements the event source side: a payload plus the set of
//! slots listening to it.
//!
//! # Concepts
//!
//! ## Signal
//!
//! A [`Signal`] owns a public `payload` and a subscriber set. `invoke()`
//! hands the payload to every attached slot. Dropping the signal detaches
//! all of its slots.
//!
//! ## Slot Set
//!
//! The subscriber set records attached slots by [`SlotId`](crate::SlotId)
//! and holds them weakly. It is never edited directly by callers: slots
//! add and remove themselves, which keeps both sides of every subscription
//! in agreement.

mod emitter;
mod slot_set;

pub use emitter::Signal;
pub(crate) use slot_set::SlotSet;
