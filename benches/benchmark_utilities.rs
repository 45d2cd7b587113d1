use delaunay_linterp::{DelaunayInterpolator, Point2};
use rand::{Rng, SeedableRng};

pub const SEED: &[u8; 32] = b"\xfb\xdc\x4e\xa0\x30\xde\x82\xba\x69\x97\x3c\x52\x49\x4d\x00\xca
\x5c\x21\xa3\x8d\x5c\xf2\x34\x4e\x58\x7d\x80\x16\x66\x23\x30";

pub const SEED2: &[u8; 32] = b"\x65\xb8\x8e\x3c\x9f\xd8\xb4\x92\xf2\x2e\xcd\x18\xf7\xbc\x2b\x29
dd\xd2\xf3\xa8\x3b\xf4\xe5\x65\xa0\x10\x60\xb1\xce\x22";

pub const RANGE: f64 = 1.0e3;

pub fn uniform_distribution(seed: [u8; 32], range: f64) -> impl Iterator<Item = Point2<f64>> {
    let range = rand::distributions::Uniform::new_inclusive(-range, range);
    let mut rng = rand::rngs::StdRng::from_seed(seed);
    std::iter::from_fn(move || Some(Point2::new(rng.sample(range), rng.sample(range))))
}

pub fn uniform_f64() -> impl Iterator<Item = Point2<f64>> {
    uniform_distribution(*SEED, RANGE)
}

pub fn random_walk_distribution(step_size: f64, seed: [u8; 32]) -> impl Iterator<Item = Point2<f64>> {
    let range = rand::distributions::Uniform::new_inclusive(-step_size, step_size);
    let mut last_x = 0.0;
    let mut last_y = 1.0;

    let mut rng = rand::rngs::StdRng::from_seed(seed);
    let step_fn = move || {
        last_x += rng.sample(range);
        last_y += rng.sample(range);

        Some(Point2::new(last_x, last_y))
    };
    std::iter::from_fn(step_fn)
}

pub fn wave(p: &[f64]) -> f64 {
    (p[0] / RANGE * 6.0).sin() * (p[1] / RANGE * 6.0).cos()
}

/// An interpolator sampling [wave] whose convex hull is the square `[-RANGE, RANGE]^2`.
pub fn square_interpolator() -> DelaunayInterpolator {
    let mut interpolator = DelaunayInterpolator::with_function(wave);
    for [x, y] in [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]] {
        interpolator
            .insert(Point2::new(x * RANGE, y * RANGE))
            .unwrap();
    }
    interpolator
}
