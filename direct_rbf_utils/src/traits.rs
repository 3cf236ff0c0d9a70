/////////////////////////////////////////////////////////////////////////////////////////////
//
// Declares the kernel evaluation trait consumed by the direct solver and the interpolant.
//
// Created on: 18 Oct 2026     Author: Daniel Owen
//
// Copyright (c) 2026, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::kernel_helpers::KernelParams;
use faer::{Row, RowRef};
use std::fmt::Debug;

/// A radial basis function `phi(r)` together with its nugget.
///
/// Only [`RbfKernel::evaluate`], [`RbfKernel::evaluate_derivative`] and
/// [`RbfKernel::nugget`] are required. Point-pair evaluation and the gradient
/// are derived from them, but may be specialised by implementors (e.g. to
/// avoid a square root).
///
/// Kernels are shared immutably between threads during evaluation, hence the
/// `Send + Sync` bound.
pub trait RbfKernel: Debug + Send + Sync {
    /// Evaluates `phi(r)` at a distance `r >= 0`.
    fn evaluate(&self, r: f64) -> f64;

    /// Evaluates `d phi / d r` at a distance `r >= 0`.
    fn evaluate_derivative(&self, r: f64) -> f64;

    /// Value added to the diagonal of the interpolation matrix.
    fn nugget(&self) -> f64;

    /// Lowest polynomial degree the kernel needs for a well-posed system.
    ///
    /// `-1` for strictly positive definite kernels, otherwise the order of
    /// conditional positive definiteness minus one.
    fn minimum_drift_degree(&self) -> i32 {
        -1
    }

    /// Evaluates the kernel between two points.
    #[inline(always)]
    fn evaluate_points(&self, target: RowRef<f64>, source: RowRef<f64>) -> f64 {
        self.evaluate(crate::get_distance(target, source))
    }

    /// Gradient of `phi(|target - source|)` with respect to `target`.
    ///
    /// Returns the zero vector when the points coincide.
    fn evaluate_gradient(&self, target: RowRef<f64>, source: RowRef<f64>) -> Row<f64> {
        let r = crate::get_distance(target, source);

        if r == 0.0 {
            return Row::zeros(target.ncols());
        }

        let c = self.evaluate_derivative(r) / r;

        Row::from_iter(target.iter().zip(source.iter()).map(|(t, s)| c * (t - s)))
    }
}

/// Converts a shared [`KernelParams`] configuration into a concrete kernel type.
pub trait KernelFromParams: Sized {
    /// Constructs `Self` from a set of uniform kernel parameters.
    fn from_params(p: &KernelParams) -> Self;
}
