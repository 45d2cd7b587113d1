use criterion::measurement::WallTime;
use criterion::*;

use delaunay_linterp::{DelaunayInterpolator, DelaunayTriangulation, Point2};

use crate::benchmark_utilities::*;

pub fn insert_benchmark(c: &mut Criterion) {
    fn single_insert_benchmark(
        group: &mut BenchmarkGroup<WallTime>,
        name: &'static str,
        is_uniform: bool,
        with_function: bool,
        sizes: &[usize],
    ) {
        for size in sizes {
            group.throughput(Throughput::Elements(*size as u64));
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, &size| {
                let points: Vec<Point2<f64>> = if is_uniform {
                    uniform_f64().take(*size).collect()
                } else {
                    random_walk_distribution(1.0, *SEED).take(*size).collect()
                };

                if with_function {
                    b.iter(|| {
                        let mut interpolator = DelaunayInterpolator::with_function(wave);
                        for point in &points {
                            interpolator.insert(*point).unwrap();
                        }
                    });
                } else {
                    b.iter(|| {
                        let mut triangulation = DelaunayTriangulation::<Point2<f64>>::new();
                        for point in &points {
                            triangulation.insert(*point).unwrap();
                        }
                    });
                }
            });
        }
    }

    let mut group = c.benchmark_group("insert benchmark");
    let sizes = &[200, 1000, 3500, 7000, 20_000];

    single_insert_benchmark(&mut group, "triangulation (uniform)", true, false, sizes);
    single_insert_benchmark(&mut group, "triangulation (local)", false, false, sizes);
    single_insert_benchmark(&mut group, "interpolator (uniform)", true, true, sizes);
    single_insert_benchmark(&mut group, "interpolator (local)", false, true, sizes);

    group.finish();
}
