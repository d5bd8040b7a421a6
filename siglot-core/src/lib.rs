//! Siglot Core
//!
//! This crate provides a typed, single-threaded signal/slot primitive.
//! It implements:
//!
//! - Signals carrying a public payload that fan out to their slots
//! - Slots for free functions, closures and methods bound to an object
//! - Subscriptions that stay consistent on both sides, whichever side is
//!   dropped first
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - `signal`: the event source and its subscriber set
//! - `slot`: the listeners and the callbacks they carry
//!
//! A signal holds its slots weakly and a slot holds its signal weakly.
//! Neither keeps the other alive; each only updates the other's bookkeeping.
//!
//! # Example
//!
//! ```rust
//! use siglot_core::{Signal, Slot};
//!
//! #[derive(Default)]
//! struct EventData {
//!     s: String,
//! }
//!
//! fn plain_callback(data: &EventData) {
//!     println!("[Plain]: {}", data.s);
//! }
//!
//! let mut signal = Signal::<EventData>::default();
//! let slot = Slot::new(plain_callback);
//! slot.subscribe_to(&signal);
//!
//! signal.payload.s = "Plain only".into();
//! signal.invoke();
//!
//! slot.unsubscribe();
//! assert_eq!(signal.count(), 0);
//! ```

mod error;
mod id;
pub mod signal;
pub mod slot;

pub use id::{SignalId, SlotId};
pub use signal::Signal;
pub use slot::{IntoTarget, MemberSlot, Slot};
