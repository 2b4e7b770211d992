use std::hint::black_box;

use acon::{DataStream, DataStreamExt, ReplayDataStream, Signal};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use futures::{stream, StreamExt};
use tokio::runtime::Runtime;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn bench_notify_without_subscribers(c: &mut Criterion) {
    let channel = ReplayDataStream::new("bench");
    c.bench_function("notify_0_subs", |b| {
        b.iter(|| channel.notify_data_changed());
    });
}

fn bench_notify_with_idle_subscribers(c: &mut Criterion) {
    let mut group = c.benchmark_group("notify_idle_subs");
    for subs in [1usize, 10, 100] {
        let channel = ReplayDataStream::new("bench");
        let _receivers: Vec<_> = (0..subs).map(|_| channel.signals()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(subs), &subs, |b, _| {
            b.iter(|| channel.notify_data_changed());
        });
    }
    group.finish();
}

fn bench_subscribe_first_item(c: &mut Criterion) {
    let rt = runtime();
    let channel = ReplayDataStream::new("bench");
    c.bench_function("subscribe_first_item", |b| {
        b.to_async(&rt).iter(|| async {
            let mut flow = channel.subscribe(|signal: Signal| stream::iter([signal.generation()]));
            black_box(flow.next().await)
        });
    });
}

fn bench_fan_out_round_trip(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("fan_out_round_trip");
    for subs in [1usize, 10, 100] {
        let channel = ReplayDataStream::new("bench");
        let mut flows: Vec<_> = (0..subs)
            .map(|_| channel.subscribe(|signal: Signal| stream::iter([signal.generation()])))
            .collect();
        rt.block_on(async {
            for flow in &mut flows {
                flow.next().await;
            }
        });

        group.bench_with_input(BenchmarkId::from_parameter(subs), &subs, |b, _| {
            b.iter(|| {
                channel.notify_data_changed();
                rt.block_on(async {
                    for flow in &mut flows {
                        black_box(flow.next().await);
                    }
                });
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_notify_without_subscribers,
    bench_notify_with_idle_subscribers,
    bench_subscribe_first_item,
    bench_fan_out_round_trip,
);
criterion_main!(benches);
