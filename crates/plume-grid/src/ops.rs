//! Whole-grid buffer operations.
//!
//! These run over the full allocation, ghost ring included. Both operands
//! must come from the same grid; lengths are checked in debug builds only.

/// Set every cell to `value`.
#[inline]
pub fn fill(x: &mut [f32], value: f32) {
    x.fill(value);
}

/// Cell-wise assignment `dst[i] = src[i]`.
#[inline]
pub fn copy(dst: &mut [f32], src: &[f32]) {
    debug_assert_eq!(dst.len(), src.len());
    dst.copy_from_slice(src);
}

/// Add a scaled source: `dst[i] += dt * src[i]`.
pub fn accumulate(dst: &mut [f32], src: &[f32], dt: f32) {
    debug_assert_eq!(dst.len(), src.len());
    for (d, s) in dst.iter_mut().zip(src) {
        *d += dt * s;
    }
}

/// Keep the larger value: `dst[i] = max(dst[i], src[i])`.
pub fn accumulate_max(dst: &mut [f32], src: &[f32]) {
    debug_assert_eq!(dst.len(), src.len());
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = d.max(s);
    }
}
