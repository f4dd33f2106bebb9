use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use denoise_accel_rs::accelerator::{
    AcceleratorConfig, ColorSample, DenoiseBlock, Mask, Window, filter_window,
};
use std::time::Duration;

fn generate_windows(count: usize) -> Vec<Window> {
    (0..count)
        .map(|n| Window::from_samples(std::array::from_fn(|k| ((n * 31 + k * 67) % 256) as u8)))
        .collect()
}

fn benchmark_filter_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_window");
    let windows = generate_windows(1024);

    let cases = vec![
        (Window::from_samples([1, 2, 3, 4, 5, 6, 7, 8, 9]), "sorted"),
        (Window::from_samples([9, 8, 7, 6, 5, 4, 3, 2, 1]), "reversed"),
        (Window::from_samples([40, 40, 40, 40, 255, 40, 40, 40, 40]), "impulse"),
    ];

    for (window, label) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(label), &window, |b, window| {
            let mask = Mask::default();
            b.iter(|| filter_window(black_box(*window), &mask));
        });
    }

    group.bench_function("mixed_1024", |b| {
        let mask = Mask::default();
        b.iter(|| {
            windows
                .iter()
                .map(|w| filter_window(black_box(*w), &mask).result as i64)
                .sum::<i64>()
        });
    });

    group.finish();
}

fn benchmark_block_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_round_trip");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .expect("runtime");

    for depth in [1usize, 16] {
        group.bench_with_input(BenchmarkId::new("fifo_depth", depth), &depth, |b, &depth| {
            b.iter(|| {
                runtime.block_on(async {
                    let config = AcceleratorConfig::builder()
                        .fifo_capacity(depth)
                        .tick(Duration::from_millis(1))
                        .build();
                    let mut block = DenoiseBlock::spawn(config).expect("block");
                    for v in 0..9u8 {
                        block.front().write_pixel(ColorSample::new(v, v, v)).await.expect("write");
                    }
                    let result = block.front().read_result().await.expect("read");
                    block.shutdown().await.expect("shutdown");
                    black_box(result)
                })
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_filter_window, benchmark_block_round_trip);
criterion_main!(benches);
