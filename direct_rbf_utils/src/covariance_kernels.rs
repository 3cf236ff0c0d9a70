/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements covariance ("variogram") models used as kriging kernels.
//
// Created on: 18 Oct 2026     Author: Daniel Owen
//
// Copyright (c) 2026, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Covariance models written as `C(r) = sill - gamma(r)`, so that fitting with
//! them is simple kriging (or universal kriging when a drift is present).

use crate::{KernelFromParams, KernelParams, RbfKernel};

/// Spherical covariance model.
///
/// `C(r) = psill * (1 - 1.5 r / range + 0.5 (r / range)^3)` for `r < range`,
/// and `0` beyond.
#[derive(Clone, Debug, Copy)]
pub struct SphericalVariogram {
    pub psill: f64,
    pub range: f64,
    pub nugget: f64,
}

impl SphericalVariogram {
    pub fn new(psill: f64, range: f64, nugget: f64) -> Self {
        Self {
            psill,
            range,
            nugget,
        }
    }
}

impl RbfKernel for SphericalVariogram {
    #[inline(always)]
    fn evaluate(&self, r: f64) -> f64 {
        if r < self.range {
            let t = r / self.range;
            self.psill * (1.0 - 1.5 * t + 0.5 * t.powi(3))
        } else {
            0.0
        }
    }

    #[inline(always)]
    fn evaluate_derivative(&self, r: f64) -> f64 {
        if r < self.range {
            self.psill * 1.5 * (-1.0 / self.range + r * r / self.range.powi(3))
        } else {
            0.0
        }
    }

    fn nugget(&self) -> f64 {
        self.nugget
    }
}

impl KernelFromParams for SphericalVariogram {
    fn from_params(p: &KernelParams) -> Self {
        Self::new(p.total_sill, p.base_range, p.nugget)
    }
}

/// Exponential covariance model, `C(r) = psill * exp(-r / range)`.
#[derive(Clone, Debug, Copy)]
pub struct ExponentialVariogram {
    pub psill: f64,
    pub range: f64,
    pub nugget: f64,
}

impl ExponentialVariogram {
    pub fn new(psill: f64, range: f64, nugget: f64) -> Self {
        Self {
            psill,
            range,
            nugget,
        }
    }
}

impl RbfKernel for ExponentialVariogram {
    #[inline(always)]
    fn evaluate(&self, r: f64) -> f64 {
        self.psill * (-r / self.range).exp()
    }

    #[inline(always)]
    fn evaluate_derivative(&self, r: f64) -> f64 {
        -self.evaluate(r) / self.range
    }

    fn nugget(&self) -> f64 {
        self.nugget
    }
}

impl KernelFromParams for ExponentialVariogram {
    fn from_params(p: &KernelParams) -> Self {
        Self::new(p.total_sill, p.base_range, p.nugget)
    }
}

/// Gaussian covariance model, `C(r) = psill * exp(-(r / range)^2)`.
///
/// Very smooth, and the interpolation matrix becomes ill-conditioned quickly
/// for dense data; a small nugget is usually advisable.
#[derive(Clone, Debug, Copy)]
pub struct GaussianVariogram {
    pub psill: f64,
    pub range: f64,
    pub nugget: f64,
}

impl GaussianVariogram {
    pub fn new(psill: f64, range: f64, nugget: f64) -> Self {
        Self {
            psill,
            range,
            nugget,
        }
    }
}

impl RbfKernel for GaussianVariogram {
    #[inline(always)]
    fn evaluate(&self, r: f64) -> f64 {
        let t = r / self.range;
        self.psill * (-t * t).exp()
    }

    #[inline(always)]
    fn evaluate_derivative(&self, r: f64) -> f64 {
        -2.0 * r / (self.range * self.range) * self.evaluate(r)
    }

    fn nugget(&self) -> f64 {
        self.nugget
    }
}

impl KernelFromParams for GaussianVariogram {
    fn from_params(p: &KernelParams) -> Self {
        Self::new(p.total_sill, p.base_range, p.nugget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::mat;

    #[test]
    fn spherical_values() {
        let kernel = SphericalVariogram::new(1.0, 2.0, 0.25);

        assert!(kernel.evaluate(0.0) == 1.0);
        assert!(kernel.evaluate(2.0) == 0.0);
        assert!(kernel.evaluate(5.0) == 0.0);
        assert!(kernel.nugget() == 0.25);

        // r / range = 0.5 -> 1 - 0.75 + 0.0625
        assert!((kernel.evaluate(1.0) - 0.3125).abs() < 1e-15);
    }

    #[test]
    fn spherical_gradient_matches_finite_differences() {
        let kernel = SphericalVariogram::new(0.8, 1.5, 0.0);
        let points = mat![[0.2, 0.1, -0.3], [0.5, 0.4, 0.1f64]];
        let grad = kernel.evaluate_gradient(points.row(0), points.row(1));

        let h = 1e-6;
        for d in 0..3 {
            let mut plus = points.clone();
            let mut minus = points.clone();
            plus[(0, d)] += h;
            minus[(0, d)] -= h;

            let fd = (kernel.evaluate_points(plus.row(0), plus.row(1))
                - kernel.evaluate_points(minus.row(0), minus.row(1)))
                / (2.0 * h);

            assert!((grad[d] - fd).abs() < 1e-7);
        }
    }

    #[test]
    fn spherical_gradient_vanishes_outside_range() {
        let kernel = SphericalVariogram::new(1.0, 0.5, 0.0);
        let points = mat![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0f64]];
        let grad = kernel.evaluate_gradient(points.row(0), points.row(1));

        assert!(grad[0] == 0.0);
        assert!(grad[1] == 0.0);
        assert!(grad[2] == 0.0);
    }

    #[test]
    fn exponential_and_gaussian_decay() {
        let exponential = ExponentialVariogram::new(2.0, 1.0, 0.0);
        let gaussian = GaussianVariogram::new(2.0, 1.0, 0.0);

        assert!(exponential.evaluate(0.0) == 2.0);
        assert!(gaussian.evaluate(0.0) == 2.0);

        assert!((exponential.evaluate(1.0) - 2.0 * (-1.0f64).exp()).abs() < 1e-15);
        assert!((gaussian.evaluate(2.0) - 2.0 * (-4.0f64).exp()).abs() < 1e-15);

        let h = 1e-6;
        let r = 0.7;
        let fd = (gaussian.evaluate(r + h) - gaussian.evaluate(r - h)) / (2.0 * h);
        assert!((gaussian.evaluate_derivative(r) - fd).abs() < 1e-8);
    }
}
