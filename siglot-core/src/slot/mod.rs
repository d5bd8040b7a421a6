//! Slots
//!
//! This module implements the listener side of a subscription.
//!
//! # Kinds
//!
//! - [`Slot`] calls a free function (with or without the payload) or a
//!   closure.
//! - [`MemberSlot`] calls a method on a target object held through
//!   `Rc<RefCell<H>>`.
//!
//! # Lifecycle
//!
//! Every slot starts detached. `subscribe_to(&signal)` attaches it,
//! leaving any previous signal first; `unsubscribe()` detaches it. Dropping
//! the slot detaches it as well, and dropping the signal detaches every
//! slot listening to it. A slot is active when it has a live callback and
//! is attached.

mod callback;
mod listener;
mod member;
mod plain;

pub use member::{IntoTarget, MemberSlot};
pub use plain::Slot;
pub(crate) use listener::Listener;
