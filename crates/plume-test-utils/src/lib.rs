//! Test utilities for Plume development.
//!
//! Grid and parameter fixtures live in [`fixtures`]; this module holds the
//! tolerance assertions shared by unit and integration tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{closed_params, impulse_field, open_params, small_grid, swirl_velocity};

/// Assert `|actual - expected| <= tol`, with a readable failure message.
#[track_caller]
pub fn assert_close(actual: f32, expected: f32, tol: f32) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual} (diff {})",
        (actual - expected).abs()
    );
}

/// Assert `|actual - expected| <= rel · max(|expected|, 1e-12)`.
#[track_caller]
pub fn assert_close_rel(actual: f32, expected: f32, rel: f32) {
    let scale = expected.abs().max(1e-12);
    assert!(
        (actual - expected).abs() <= rel * scale,
        "expected {expected} within {rel} relative, got {actual}"
    );
}

/// Assert every value in `field` is finite.
#[track_caller]
pub fn assert_all_finite(field: &[f32]) {
    if let Some(pos) = field.iter().position(|v| !v.is_finite()) {
        panic!("non-finite value {} at offset {pos}", field[pos]);
    }
}
