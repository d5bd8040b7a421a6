//! The callback capability stored inside a slot.
//!
//! Callbacks form a closed set: a free function taking the payload, a
//! payload-less free function, a capturing closure, or an object-method
//! pair. Only the method case needs type erasure, because the target type
//! `H` is not part of the signal's type.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::{Result, SlotError};
use crate::id::SlotId;

/// Something a slot can call with the signal's payload.
pub(crate) enum Callback<T> {
    /// Free function receiving the payload.
    Function(fn(&T)),
    /// Free function that ignores the payload.
    Notify(fn()),
    /// Capturing closure receiving the payload.
    Closure(Rc<dyn Fn(&T)>),
    /// Method bound to a target object.
    Method(Rc<dyn BoundMethod<T>>),
}

impl<T> Clone for Callback<T> {
    fn clone(&self) -> Self {
        match self {
            Callback::Function(f) => Callback::Function(*f),
            Callback::Notify(f) => Callback::Notify(*f),
            Callback::Closure(f) => Callback::Closure(Rc::clone(f)),
            Callback::Method(m) => Callback::Method(Rc::clone(m)),
        }
    }
}

impl<T> Callback<T> {
    /// Short name of the variant, for log fields.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Callback::Function(_) => "function",
            Callback::Notify(_) => "notify",
            Callback::Closure(_) => "closure",
            Callback::Method(_) => "method",
        }
    }

    /// Whether calling this callback can reach user code.
    ///
    /// Only a method whose target has been dropped is dead.
    pub(crate) fn is_live(&self) -> bool {
        match self {
            Callback::Method(m) => m.has_target(),
            _ => true,
        }
    }

    /// Run the callback with `payload` on behalf of `slot`.
    pub(crate) fn call(&self, slot: SlotId, payload: &T) -> Result<()> {
        match self {
            Callback::Function(f) => f(payload),
            Callback::Notify(f) => f(),
            Callback::Closure(f) => f(payload),
            Callback::Method(m) => return m.call(slot, payload),
        }
        Ok(())
    }
}

impl<T> std::fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Callback").field(&self.kind()).finish()
    }
}

/// A method bound to a target, seen without the target's type.
pub(crate) trait BoundMethod<T> {
    /// Whether the target is still alive.
    fn has_target(&self) -> bool;

    /// Call the method on the target.
    fn call(&self, slot: SlotId, payload: &T) -> Result<()>;
}

/// The method half of an object-method pair.
pub(crate) enum MethodFn<H, T> {
    Payload(fn(&mut H, &T)),
    Notify(fn(&mut H)),
}

impl<H, T> Clone for MethodFn<H, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H, T> Copy for MethodFn<H, T> {}

/// An object-method pair. The target is held weakly: a slot never keeps
/// the object it calls into alive.
pub(crate) struct Method<H, T> {
    target: Weak<RefCell<H>>,
    method: MethodFn<H, T>,
}

impl<H, T> Method<H, T> {
    pub(crate) fn new(target: Weak<RefCell<H>>, method: MethodFn<H, T>) -> Self {
        Self { target, method }
    }

    pub(crate) fn method(&self) -> MethodFn<H, T> {
        self.method
    }
}

impl<H, T> BoundMethod<T> for Method<H, T> {
    fn has_target(&self) -> bool {
        self.target.strong_count() > 0
    }

    fn call(&self, slot: SlotId, payload: &T) -> Result<()> {
        let target = self.target.upgrade().ok_or(SlotError::TargetDropped(slot))?;
        let mut guard = target.try_borrow_mut().map_err(|_| SlotError::TargetBusy(slot))?;
        match self.method {
            MethodFn::Payload(method) => method(&mut *guard, payload),
            MethodFn::Notify(method) => method(&mut *guard),
        }
        Ok(())
    }
}
