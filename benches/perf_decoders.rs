use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use gc_decode::batch::decode_all;
use gc_decode::simulate::{uniform_sequence, Sampler};
use gc_decode::{Decoder, Model, ObservedSequence, Strategy, ViterbiDecoder};
use rand::{rngs::StdRng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn simulated(len: usize) -> ObservedSequence {
    let model = Model::gc_content(0.01).unwrap();
    let mut rng = StdRng::seed_from_u64(44);
    Sampler::new(&model).unwrap().simulate(len, &mut rng).unwrap().observed
}

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    match get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        Some(p) => p.memory() / 1024,
        None => 0,
    }
}

fn bench_strategies(c: &mut Criterion) {
    let model = Model::gc_content(0.01).unwrap();
    let mut group = c.benchmark_group("decode_simulated");
    group.sample_size(10);
    for &len in &[1_000usize, 10_000] {
        let obs = simulated(len);
        for strategy in Strategy::ALL {
            // Bellman-Ford is quadratic; keep it to the small input.
            if strategy == Strategy::BellmanFord && len > 1_000 {
                continue;
            }
            group.bench_with_input(BenchmarkId::new(strategy.as_str(), len), &obs, |b, obs| {
                b.iter(|| {
                    let decoding = strategy.decode(obs, &model).unwrap();
                    criterion::black_box(decoding.log_prob());
                })
            });
        }
    }
    group.finish();
}

fn bench_viterbi_memory(c: &mut Criterion) {
    let model = Model::gc_content(0.01).unwrap();
    let mut group = c.benchmark_group("viterbi_rss");
    group.sample_size(10);
    for &len in &[100_000usize, 500_000] {
        group.bench_function(format!("viterbi_len_{len}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(44);
                    uniform_sequence(&mut rng, len).unwrap()
                },
                |obs| {
                    let before = rss_kib();
                    let decoding = ViterbiDecoder::new().decode(&obs, &model).unwrap();
                    let after = rss_kib();
                    criterion::black_box(decoding.log_prob());
                    eprintln!("RSS KiB delta (viterbi {len}): {}", after.saturating_sub(before));
                },
                BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let model = Model::gc_content(0.01).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let seqs: Vec<_> = (0..64)
        .map(|_| uniform_sequence(&mut rng, 5_000).unwrap())
        .collect();
    c.bench_function("batch_dijkstra_64x5000", |b| {
        b.iter(|| {
            let results = decode_all(&Strategy::Dijkstra, &model, &seqs);
            criterion::black_box(results.len());
        })
    });
}

criterion_group!(benches, bench_strategies, bench_viterbi_memory, bench_batch);
criterion_main!(benches);
