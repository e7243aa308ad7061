use std::hint::black_box;

use canny_image::{Image, ImageSize};
use canny_imgproc::canny::{canny, CannyConfig};
use canny_imgproc::edges::{edge_strength_with_strategy, non_maximal_suppression_with_strategy};
use canny_imgproc::filter::gaussian_smooth_with_strategy;
use canny_imgproc::gradient::spatial_gradient_with_strategy;
use canny_imgproc::parallel::ExecutionStrategy;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn create_test_image(width: usize, height: usize) -> Image<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    let data: Vec<u8> = (0..(width * height)).map(|_| rng.random()).collect();
    let size = ImageSize { width, height };
    Image::new(size, data).unwrap()
}

const STRATEGIES: [(&str, ExecutionStrategy); 2] = [
    ("serial", ExecutionStrategy::Serial),
    ("parallel_rows", ExecutionStrategy::ParallelRows),
];

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("Canny Stages");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);
        let image = create_test_image(*width, *height);
        let smoothed = gaussian_smooth_with_strategy(&image, 1.4, ExecutionStrategy::Serial).unwrap();
        let gradient = spatial_gradient_with_strategy(&smoothed, ExecutionStrategy::Serial).unwrap();
        let strength = edge_strength_with_strategy(&gradient, ExecutionStrategy::Serial).unwrap();

        for (name, strategy) in STRATEGIES {
            group.bench_with_input(
                BenchmarkId::new(format!("gaussian_smooth_{name}"), &parameter_string),
                &image,
                |b, i| b.iter(|| black_box(gaussian_smooth_with_strategy(i, 1.4, strategy))),
            );

            group.bench_with_input(
                BenchmarkId::new(format!("spatial_gradient_{name}"), &parameter_string),
                &smoothed,
                |b, i| b.iter(|| black_box(spatial_gradient_with_strategy(i, strategy))),
            );

            group.bench_with_input(
                BenchmarkId::new(format!("edge_strength_{name}"), &parameter_string),
                &gradient,
                |b, i| b.iter(|| black_box(edge_strength_with_strategy(i, strategy))),
            );

            group.bench_with_input(
                BenchmarkId::new(format!("non_maximal_suppression_{name}"), &parameter_string),
                &strength,
                |b, i| {
                    b.iter(|| {
                        black_box(non_maximal_suppression_with_strategy(
                            &i.magnitude,
                            &i.direction,
                            strategy,
                        ))
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_canny(c: &mut Criterion) {
    let mut group = c.benchmark_group("Canny");

    for (width, height) in [(512, 448), (1920, 1080)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);
        let image = create_test_image(*width, *height);

        for (name, strategy) in STRATEGIES {
            let config = CannyConfig::new(1.4, 20, 40).with_strategy(strategy);
            group.bench_with_input(
                BenchmarkId::new(format!("canny_{name}"), &parameter_string),
                &image,
                |b, i| b.iter(|| black_box(canny(i, &config))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_stages, bench_canny);
criterion_main!(benches);
