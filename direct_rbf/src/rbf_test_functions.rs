/////////////////////////////////////////////////////////////////////////////////////////////
//
// Provides 3D benchmark functions for validating and demonstrating RBF interpolation quality.
//
// Created on: 18 Oct 2026     Author: Daniel Owen
//
// Copyright (c) 2026, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! 3D test functions f1_3d - f8_3d are implemented from [1].
//!
//! Each function maps an `(n x 3)` point matrix to an `(n x 1)` value matrix
//! and is intended for points in the unit cube.
//!
//! # References
//! 1. Bozzini, Mira & Rossini, Milvia. (2002). Testing methods for 3D scattered data
//!    interpolation. 20. 111-135.
use faer::Mat;

/// Namespace for the 3D test functions.
pub struct RBFTestFunctions;

/// Evaluates `f(x, y, z)` for every row of `points`.
///
/// # Panics
/// If `points` does not have three columns.
fn evaluate_rows<F: Fn(f64, f64, f64) -> f64>(points: &Mat<f64>, f: F) -> Mat<f64> {
    assert_eq!(points.ncols(), 3, "test functions take (n x 3) points");

    Mat::from_fn(points.nrows(), 1, |i, _| {
        f(points[(i, 0)], points[(i, 1)], points[(i, 2)])
    })
}

/// Squared distance from the centre of the unit cube.
#[inline(always)]
fn centre_dist_sq(x: f64, y: f64, z: f64) -> f64 {
    (x - 0.5).powi(2) + (y - 0.5).powi(2) + (z - 0.5).powi(2)
}

impl RBFTestFunctions {
    /// Franke's function extended to 3D: a sum of four Gaussian bumps.
    pub fn f1_3d(points: &Mat<f64>) -> Mat<f64> {
        evaluate_rows(points, |x, y, z| {
            let (u, v, w) = (9.0 * x, 9.0 * y, 9.0 * z);

            0.75 * (-((u - 2.0).powi(2) + (v - 2.0).powi(2) + (w - 2.0).powi(2)) / 4.0).exp()
                + 0.75 * (-(u + 1.0).powi(2) / 49.0 - (v + 1.0).powi(2) / 10.0 - (w + 1.0).powi(2) / 10.0).exp()
                + 0.5 * (-((u - 7.0).powi(2) + (v - 3.0).powi(2) + (w - 5.0).powi(2)) / 4.0).exp()
                - 0.2 * (-((u - 4.0).powi(2) + (v - 7.0).powi(2) + (w - 5.0).powi(2))).exp()
        })
    }

    /// Smoothed step across the plane `z = x + y`:
    /// `(tanh(9z - 9x - 9y) + 1) / 9`.
    pub fn f2_3d(points: &Mat<f64>) -> Mat<f64> {
        evaluate_rows(points, |x, y, z| ((9.0 * (z - x - y)).tanh() + 1.0) / 9.0)
    }

    /// Oscillatory: `cos(6z) (1.25 + cos(5.4y)) / (6 + 6 (3x - 1)^2)`.
    pub fn f3_3d(points: &Mat<f64>) -> Mat<f64> {
        evaluate_rows(points, |x, y, z| {
            (6.0 * z).cos() * (1.25 + (5.4 * y).cos()) / (6.0 + 6.0 * (3.0 * x - 1.0).powi(2))
        })
    }

    /// Wide Gaussian at the cube centre: `exp(-81/16 r^2) / 3`.
    pub fn f4_3d(points: &Mat<f64>) -> Mat<f64> {
        evaluate_rows(points, |x, y, z| (-81.0 / 16.0 * centre_dist_sq(x, y, z)).exp() / 3.0)
    }

    /// Narrow Gaussian at the cube centre: `exp(-81/4 r^2) / 3`.
    pub fn f5_3d(points: &Mat<f64>) -> Mat<f64> {
        evaluate_rows(points, |x, y, z| (-81.0 / 4.0 * centre_dist_sq(x, y, z)).exp() / 3.0)
    }

    /// Sphere cap: `sqrt(64 - 81 r^2) / 9 - 0.5`.
    pub fn f6_3d(points: &Mat<f64>) -> Mat<f64> {
        evaluate_rows(points, |x, y, z| (64.0 - 81.0 * centre_dist_sq(x, y, z)).sqrt() / 9.0 - 0.5)
    }

    /// Logistic in the distance from the origin.
    pub fn f7_3d(points: &Mat<f64>) -> Mat<f64> {
        evaluate_rows(points, |x, y, z| {
            let r = (x * x + y * y + z * z).sqrt();
            1.0 / (1.0 + 2.0 * (-3.0 * (r - 6.7)).exp()).sqrt()
        })
    }

    /// Sharp peak at `(0.3, 0.3)` plus a broad bump, independent of `z`.
    pub fn f8_3d(points: &Mat<f64>) -> Mat<f64> {
        evaluate_rows(points, |x, y, _| {
            50.0 * (-200.0 * ((x - 0.3).powi(2) + (y - 0.3).powi(2))).exp()
                + (-50.0 * ((x - 0.5).powi(2) + (y - 0.5).powi(2))).exp()
        })
    }
}
