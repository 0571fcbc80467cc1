//! Normal sampling for dynamic emitters.

use rand::Rng;

/// Draw from `N(mean, dev²)`.
///
/// Returns `mean` without touching the generator when `dev == 0`, so
/// emitters with no variation consume no randomness. Uses Box-Muller to
/// avoid pulling in a distributions crate.
pub fn normal<R: Rng>(rng: &mut R, mean: f32, dev: f32) -> f32 {
    if dev == 0.0 {
        return mean;
    }
    let u1: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
    let u2: f64 = rng.random();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + dev * z as f32
}
