use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ringqueue_rs::RingQueue;
use std::collections::VecDeque;

const OPS: u64 = 100_000;
const PREFILL: u64 = 10_000;

fn bench_enqueue(c: &mut Criterion) {
    let mut group = c.benchmark_group("enqueue");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("single_from_capacity_1", |b| {
        b.iter(|| {
            let mut queue = RingQueue::new();
            for i in 0..OPS {
                queue.enqueue(black_box(i));
            }
            queue
        });
    });

    group.bench_function("vecdeque_baseline", |b| {
        b.iter(|| {
            let mut queue = VecDeque::new();
            for i in 0..OPS {
                queue.push_back(black_box(i));
            }
            queue
        });
    });

    group.finish();
}

fn bench_dequeue(c: &mut Criterion) {
    let mut group = c.benchmark_group("dequeue");
    group.throughput(Throughput::Elements(PREFILL));

    group.bench_function("drain_prefilled", |b| {
        b.iter_batched(
            || {
                let mut queue = RingQueue::new();
                queue.enqueue_batch((0..PREFILL as usize).map(|i| i as u64));
                queue
            },
            |mut queue| {
                while let Ok(item) = queue.dequeue() {
                    black_box(item);
                }
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_batches(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");

    for batch_size in [16usize, 256, 4096] {
        group.throughput(Throughput::Elements(batch_size as u64));

        group.bench_with_input(
            BenchmarkId::new("enqueue_batch", batch_size),
            &batch_size,
            |b, &n| {
                let items: Vec<u64> = (0..n as u64).collect();
                b.iter(|| {
                    let mut queue = RingQueue::new();
                    queue.enqueue_batch(items.iter().copied());
                    queue
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("enqueue_loop", batch_size),
            &batch_size,
            |b, &n| {
                let items: Vec<u64> = (0..n as u64).collect();
                b.iter(|| {
                    let mut queue = RingQueue::new();
                    for &item in &items {
                        queue.enqueue(item);
                    }
                    queue
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("dequeue_batch", batch_size),
            &batch_size,
            |b, &n| {
                b.iter_batched(
                    || {
                        let mut queue = RingQueue::new();
                        queue.enqueue_batch((0..n).map(|i| i as u64));
                        queue
                    },
                    |mut queue| black_box(queue.dequeue_batch(n)),
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_random_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    group.throughput(Throughput::Elements(OPS));

    // Same seeded operation mix for every iteration
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let ops: Vec<bool> = (0..OPS).map(|_| rng.gen_bool(0.55)).collect();

    group.bench_function("random_enqueue_dequeue", |b| {
        b.iter(|| {
            let mut queue = RingQueue::new();
            for (i, &enqueue) in ops.iter().enumerate() {
                if enqueue {
                    queue.enqueue(i);
                } else {
                    let _ = black_box(queue.dequeue());
                }
            }
            queue.len()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_enqueue,
    bench_dequeue,
    bench_batches,
    bench_random_churn
);
criterion_main!(benches);
