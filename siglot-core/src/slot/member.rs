//! Slots for methods bound to a target object.
//!
//! The target is shared as `Rc<RefCell<H>>` and held weakly, so a slot can
//! live inside the very object it calls into:
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use siglot_core::{MemberSlot, Signal};
//!
//! struct Counter {
//!     slot: MemberSlot<Counter, u32>,
//!     total: u32,
//! }
//!
//! impl Counter {
//!     fn add(&mut self, value: &u32) {
//!         self.total += value;
//!     }
//! }
//!
//! let mut signal = Signal::new(0);
//! let counter = Rc::new_cyclic(|this| {
//!     RefCell::new(Counter { slot: MemberSlot::new(this, Counter::add), total: 0 })
//! });
//! counter.borrow().slot.subscribe_to(&signal);
//!
//! signal.payload = 5;
//! signal.invoke();
//! assert_eq!(counter.borrow().total, 5);
//!
//! // Dropping the object drops its slot, which detaches it.
//! drop(counter);
//! assert_eq!(signal.count(), 0);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::callback::{BoundMethod, Callback, Method, MethodFn};
use super::listener::Listener;
use crate::id::SlotId;
use crate::signal::Signal;

/// Anything a [`MemberSlot`] can take as its target.
pub trait IntoTarget<H> {
    fn into_target(self) -> Weak<RefCell<H>>;
}

impl<H> IntoTarget<H> for &Rc<RefCell<H>> {
    fn into_target(self) -> Weak<RefCell<H>> {
        Rc::downgrade(self)
    }
}

impl<H> IntoTarget<H> for Weak<RefCell<H>> {
    fn into_target(self) -> Weak<RefCell<H>> {
        self
    }
}

impl<H> IntoTarget<H> for &Weak<RefCell<H>> {
    fn into_target(self) -> Weak<RefCell<H>> {
        self.clone()
    }
}

/// A listener calling a method of `H` with the payload of a `Signal<T>`.
///
/// Like [`Slot`](super::Slot), it listens to at most one signal and detaches
/// itself when dropped. It is only active while its target is alive.
///
/// A bound method cannot be copied to another object implicitly, so there is
/// no `Clone`; use [`copy_with_target`](Self::copy_with_target).
pub struct MemberSlot<H: 'static, T: 'static = ()> {
    listener: Rc<Listener<T>>,
    binding: RefCell<Option<Rc<Method<H, T>>>>,
}

impl<H: 'static, T: 'static> MemberSlot<H, T> {
    /// Create a slot calling `method` on `target` with the payload.
    pub fn new(target: impl IntoTarget<H>, method: fn(&mut H, &T)) -> Self {
        Self::with_binding(Some(Method::new(target.into_target(), MethodFn::Payload(method))))
    }

    /// Create a slot calling `method` on `target` without the payload.
    pub fn notify(target: impl IntoTarget<H>, method: fn(&mut H)) -> Self {
        Self::with_binding(Some(Method::new(target.into_target(), MethodFn::Notify(method))))
    }

    /// Create a slot with no target or method.
    pub fn unbound() -> Self {
        Self::with_binding(None)
    }

    fn with_binding(binding: Option<Method<H, T>>) -> Self {
        let slot = Self {
            listener: Listener::new(None),
            binding: RefCell::new(None),
        };
        if let Some(binding) = binding {
            slot.install(binding);
        }
        slot
    }

    fn install(&self, binding: Method<H, T>) {
        let binding = Rc::new(binding);
        let erased: Rc<dyn BoundMethod<T>> = binding.clone();
        self.listener.bind(Callback::Method(erased));
        *self.binding.borrow_mut() = Some(binding);
    }

    /// Get the slot's unique ID.
    pub fn id(&self) -> SlotId {
        self.listener.id()
    }

    /// Replace the target and method. Attachment is unaffected.
    pub fn bind(&self, target: impl IntoTarget<H>, method: fn(&mut H, &T)) {
        self.install(Method::new(target.into_target(), MethodFn::Payload(method)));
    }

    /// Replace the target and method with a payload-less one.
    pub fn bind_notify(&self, target: impl IntoTarget<H>, method: fn(&mut H)) {
        self.install(Method::new(target.into_target(), MethodFn::Notify(method)));
    }

    /// Attach to `signal`, leaving any other signal first.
    pub fn subscribe_to(&self, signal: &Signal<T>) {
        self.listener.subscribe_to(signal.slot_set());
    }

    /// Detach from the current signal. Does nothing when detached.
    pub fn unsubscribe(&self) {
        self.listener.unsubscribe();
    }

    /// Detach and forget the target and method.
    pub fn clear(&self) {
        self.listener.unsubscribe();
        self.listener.unbind();
        self.binding.borrow_mut().take();
    }

    /// Whether the target is still alive.
    pub fn has_target(&self) -> bool {
        self.binding
            .borrow()
            .as_ref()
            .is_some_and(|binding| binding.has_target())
    }

    /// Whether a method is bound, its target is alive, and the slot is
    /// attached to a live signal.
    pub fn is_active(&self) -> bool {
        self.listener.is_active()
    }

    /// Whether the slot is attached to `signal`.
    pub fn is_subscribed_to(&self, signal: &Signal<T>) -> bool {
        self.listener.is_attached_to(signal.slot_set())
    }

    /// Copy this slot onto another target.
    ///
    /// The copy calls the same method on `target`. If this slot is active,
    /// the copy listens to the same signal.
    pub fn copy_with_target(&self, target: impl IntoTarget<H>) -> Self {
        let method = self.binding.borrow().as_ref().map(|binding| binding.method());
        let copy = Self::with_binding(method.map(|method| Method::new(target.into_target(), method)));

        if self.listener.is_active() {
            if let Some(signal) = self.listener.signal() {
                copy.listener.subscribe_to(&signal);
            }
        }
        copy
    }
}

impl<H: 'static, T: 'static> Default for MemberSlot<H, T> {
    fn default() -> Self {
        Self::unbound()
    }
}

impl<H: 'static, T: 'static> Drop for MemberSlot<H, T> {
    fn drop(&mut self) {
        self.listener.unsubscribe();
    }
}

impl<H: 'static, T: 'static> fmt::Debug for MemberSlot<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberSlot")
            .field("id", &self.id())
            .field("has_target", &self.has_target())
            .field("signal", &self.listener.signal().map(|set| set.id()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Tally {
        values: Vec<i32>,
        pings: u32,
    }

    impl Tally {
        fn record(&mut self, value: &i32) {
            self.values.push(*value);
        }

        fn ping(&mut self) {
            self.pings += 1;
        }
    }

    fn tally() -> Rc<RefCell<Tally>> {
        Rc::new(RefCell::new(Tally::default()))
    }

    #[test]
    fn method_slot_receives_payload() {
        let target = tally();
        let mut signal = Signal::new(0);
        let slot = MemberSlot::new(&target, Tally::record);
        slot.subscribe_to(&signal);

        signal.payload = 4;
        signal.invoke();
        signal.payload = 8;
        signal.invoke();
        assert_eq!(target.borrow().values, vec![4, 8]);
    }

    #[test]
    fn notify_method_on_unit_signal() {
        let target = tally();
        let signal: Signal = Signal::default();
        let slot: MemberSlot<Tally> = MemberSlot::notify(&target, Tally::ping);
        slot.subscribe_to(&signal);

        signal.invoke();
        assert_eq!(target.borrow().pings, 1);
    }

    #[test]
    fn dropped_target_makes_slot_inactive() {
        let target = tally();
        let signal = Signal::new(1);
        let slot = MemberSlot::new(&target, Tally::record);
        slot.subscribe_to(&signal);
        assert!(slot.is_active());

        drop(target);
        assert!(!slot.has_target());
        assert!(!slot.is_active());
        // Still attached, but dispatch skips it.
        assert!(slot.is_subscribed_to(&signal));
        assert_eq!(signal.invoke(), 0);
    }

    #[test]
    fn busy_target_is_skipped() {
        let target = tally();
        let signal = Signal::new(1);
        let slot = MemberSlot::new(&target, Tally::record);
        slot.subscribe_to(&signal);

        let held = target.borrow_mut();
        assert_eq!(signal.invoke(), 0);
        drop(held);

        assert_eq!(signal.invoke(), 1);
        assert_eq!(target.borrow().values, vec![1]);
    }

    #[test]
    fn unbound_slot_is_gated_until_bound() {
        let target = tally();
        let signal = Signal::new(7);
        let slot = MemberSlot::<Tally, i32>::unbound();
        slot.subscribe_to(&signal);

        assert_eq!(signal.count(), 1);
        assert!(!slot.has_target());
        assert!(!slot.is_active());
        assert_eq!(signal.invoke(), 0);

        slot.bind(&target, Tally::record);
        assert!(slot.is_active());
        assert_eq!(signal.invoke(), 1);
        assert_eq!(target.borrow().values, vec![7]);
    }

    #[test]
    fn default_member_slot_is_unbound() {
        let signal = Signal::new(0);
        let slot: MemberSlot<Tally, i32> = MemberSlot::default();
        slot.subscribe_to(&signal);

        assert!(slot.is_subscribed_to(&signal));
        assert!(!slot.is_active());
        assert_eq!(signal.invoke(), 0);
    }

    #[test]
    fn clear_detaches_and_forgets_target() {
        let target = tally();
        let signal = Signal::new(1);
        let slot = MemberSlot::new(&target, Tally::record);
        slot.subscribe_to(&signal);

        slot.clear();
        assert_eq!(signal.count(), 0);
        assert!(!slot.has_target());

        slot.subscribe_to(&signal);
        assert!(!slot.is_active());
        assert_eq!(signal.invoke(), 0);
    }

    #[test]
    fn copy_with_target_rebinds_and_resubscribes() {
        let first = tally();
        let second = tally();
        let mut signal = Signal::new(0);
        let slot = MemberSlot::new(&first, Tally::record);
        slot.subscribe_to(&signal);

        let copy = slot.copy_with_target(&second);
        assert_ne!(copy.id(), slot.id());
        assert!(copy.is_subscribed_to(&signal));
        assert_eq!(signal.count(), 2);

        signal.payload = 3;
        signal.invoke();
        assert_eq!(first.borrow().values, vec![3]);
        assert_eq!(second.borrow().values, vec![3]);
    }

    #[test]
    fn copy_of_detached_slot_stays_detached() {
        let first = tally();
        let second = tally();
        let slot = MemberSlot::<Tally, i32>::new(&first, Tally::record);

        let copy = slot.copy_with_target(&second);
        assert!(copy.has_target());
        assert!(!copy.is_active());
    }

    #[test]
    fn method_may_unsubscribe_its_own_slot() {
        struct OneShot {
            slot: MemberSlot<OneShot, i32>,
            fired: u32,
        }

        impl OneShot {
            fn fire(&mut self, _: &i32) {
                self.fired += 1;
                self.slot.unsubscribe();
            }
        }

        let signal = Signal::new(0);
        let one_shot = Rc::new_cyclic(|this| {
            RefCell::new(OneShot {
                slot: MemberSlot::new(this, OneShot::fire),
                fired: 0,
            })
        });
        one_shot.borrow().slot.subscribe_to(&signal);

        assert_eq!(signal.invoke(), 1);
        assert_eq!(signal.invoke(), 0);
        assert_eq!(one_shot.borrow().fired, 1);
        assert!(!one_shot.borrow().slot.is_active());
    }

    #[test]
    fn rebinding_moves_to_a_new_target() {
        let first = tally();
        let second = tally();
        let signal = Signal::new(6);
        let slot = MemberSlot::new(&first, Tally::record);
        slot.subscribe_to(&signal);

        slot.bind(&second, Tally::record);
        signal.invoke();
        assert!(first.borrow().values.is_empty());
        assert_eq!(second.borrow().values, vec![6]);

        slot.bind_notify(Rc::downgrade(&first), Tally::ping);
        signal.invoke();
        assert_eq!(first.borrow().pings, 1);
    }
}
