//! Walks a signal through its subscription states, printing what each slot
//! receives.
//!
//! Run with `RUST_LOG=siglot_core=trace` to see attach/detach events.

use std::cell::RefCell;
use std::rc::Rc;

use siglot_core::{MemberSlot, Signal, Slot};
use tracing_subscriber::EnvFilter;

/// The data handed to every slot. Slots and signals only connect when they
/// agree on this type.
#[derive(Debug, Default)]
struct EventData {
    s: String,
}

fn plain_callback(data: &EventData) {
    println!("[Plain]: {}", data.s);
}

/// An object listening through a slot it owns.
struct SomeClass {
    mslot: MemberSlot<SomeClass, EventData>,
}

impl SomeClass {
    fn new() -> Rc<RefCell<Self>> {
        Rc::new_cyclic(|this| {
            RefCell::new(Self {
                mslot: MemberSlot::new(this, SomeClass::member_callback),
            })
        })
    }

    fn attach(&self, signal: &Signal<EventData>) {
        self.mslot.subscribe_to(signal);
    }

    fn member_callback(&mut self, data: &EventData) {
        println!("[Member]: {}", data.s);
    }
}

fn separator() {
    println!("----------");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut signal = Signal::<EventData>::default();
    let slot = Slot::new(plain_callback);
    let object = SomeClass::new();

    // Nothing is attached yet, so nothing prints.
    signal.payload.s = "None".into();
    separator();
    signal.invoke();

    signal.payload.s = "Plain only".into();
    slot.subscribe_to(&signal);
    separator();
    signal.invoke();

    // Both kinds of slot can listen to the same signal.
    signal.payload.s = "Both".into();
    object.borrow().attach(&signal);
    separator();
    signal.invoke();

    signal.payload.s = "Member only".into();
    slot.unsubscribe();
    separator();
    signal.invoke();

    // Dropping the object drops its slot, which detaches itself.
    signal.payload.s = "None".into();
    drop(object);
    separator();
    signal.invoke();

    println!("subscribers left: {}", signal.count());
}
