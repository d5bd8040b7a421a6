//! Dispatch and subscription churn benchmarks.

use std::cell::Cell;
use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use siglot_core::{Signal, Slot};

fn counting_slots(count: usize, total: &Rc<Cell<u64>>) -> Vec<Slot<u64>> {
    (0..count)
        .map(|_| {
            let total = total.clone();
            Slot::from_closure(move |value: &u64| total.set(total.get() + value))
        })
        .collect()
}

fn bench_invoke(c: &mut Criterion) {
    let mut group = c.benchmark_group("invoke");
    for count in [1, 8, 64, 512] {
        let total = Rc::new(Cell::new(0));
        let signal = Signal::new(1_u64);
        let slots = counting_slots(count, &total);
        for slot in &slots {
            slot.subscribe_to(&signal);
        }

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(signal.invoke()));
        });
    }
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let signal = Signal::new(0_u64);
    let total = Rc::new(Cell::new(0));
    let slots = counting_slots(64, &total);

    c.bench_function("subscribe_unsubscribe_64", |b| {
        b.iter(|| {
            for slot in &slots {
                slot.subscribe_to(&signal);
            }
            for slot in &slots {
                slot.unsubscribe();
            }
            black_box(signal.count())
        });
    });
}

fn bench_teardown(c: &mut Criterion) {
    let total = Rc::new(Cell::new(0));
    let slots = counting_slots(64, &total);

    c.bench_function("signal_drop_64", |b| {
        b.iter(|| {
            let signal = Signal::new(0_u64);
            for slot in &slots {
                slot.subscribe_to(&signal);
            }
            drop(signal);
        });
    });
}

criterion_group!(benches, bench_invoke, bench_churn, bench_teardown);
criterion_main!(benches);
