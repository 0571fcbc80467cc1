//! Exponential relaxation towards an equilibrium value.
//!
//! Both variants sweep the whole allocation, ghosts included; decay has
//! no spatial coupling.

/// `x[i] -= rate · dt · (x[i] - eq)`.
pub fn dissipate(x: &mut [f32], eq: f32, rate: f32, dt: f32) {
    let d = rate * dt;
    for xi in x.iter_mut() {
        *xi -= d * (*xi - eq);
    }
}

/// Decay that slows as the local temperature rises above `air_temp`:
///
/// ```text
/// x[i] -= rate · dt · max(0, 1 - falloff · (T[i] - air_temp)) · (x[i] - eq)
/// ```
///
/// The factor is floored at zero so very hot cells hold their value
/// instead of growing.
pub fn dissipate_with_falloff(
    x: &mut [f32],
    temperature: &[f32],
    eq: f32,
    rate: f32,
    falloff: f32,
    air_temp: f32,
    dt: f32,
) {
    debug_assert_eq!(x.len(), temperature.len());
    let d = rate * dt;
    for (xi, &t) in x.iter_mut().zip(temperature) {
        let factor = (1.0 - falloff * (t - air_temp)).max(0.0);
        *xi -= d * factor * (*xi - eq);
    }
}
