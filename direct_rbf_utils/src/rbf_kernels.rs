/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements the polyharmonic and spheroidal RBF kernels.
//
// Created on: 18 Oct 2026     Author: Daniel Owen
//
// Copyright (c) 2026, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{KernelFromParams, KernelParams, RbfKernel};
use faer::RowRef;
use std::{fmt::Debug, marker::PhantomData};

/// Linear RBF kernel with `phi(r) = -r`.
///
/// Conditionally positive definite of order 1, so it needs at least a
/// constant drift.
#[derive(Clone, Debug, Copy, Default)]
pub struct LinearRbfKernel {
    pub nugget: f64,
}

impl RbfKernel for LinearRbfKernel {
    #[inline(always)]
    fn evaluate(&self, r: f64) -> f64 {
        -r
    }

    #[inline(always)]
    fn evaluate_derivative(&self, _r: f64) -> f64 {
        -1.0
    }

    fn nugget(&self) -> f64 {
        self.nugget
    }

    fn minimum_drift_degree(&self) -> i32 {
        0
    }
}

impl KernelFromParams for LinearRbfKernel {
    #[inline(always)]
    fn from_params(p: &KernelParams) -> Self {
        LinearRbfKernel { nugget: p.nugget }
    }
}

/// Thin plate spline RBF kernel with `phi(r) = r^2 log r`.
#[derive(Clone, Debug, Copy, Default)]
pub struct ThinPlateSplineRbfKernel {
    pub nugget: f64,
}

impl RbfKernel for ThinPlateSplineRbfKernel {
    #[inline(always)]
    fn evaluate(&self, r: f64) -> f64 {
        match r.abs() < f64::EPSILON {
            true => 0.0,
            false => r.powi(2) * r.ln(),
        }
    }

    #[inline(always)]
    fn evaluate_derivative(&self, r: f64) -> f64 {
        match r.abs() < f64::EPSILON {
            true => 0.0,
            false => r * (2.0 * r.ln() + 1.0),
        }
    }

    fn nugget(&self) -> f64 {
        self.nugget
    }

    fn minimum_drift_degree(&self) -> i32 {
        1
    }
}

impl KernelFromParams for ThinPlateSplineRbfKernel {
    #[inline(always)]
    fn from_params(p: &KernelParams) -> Self {
        ThinPlateSplineRbfKernel { nugget: p.nugget }
    }
}

/// Cubic RBF kernel with `phi(r) = r^3`.
#[derive(Clone, Debug, Copy, Default)]
pub struct CubicRbfKernel {
    pub nugget: f64,
}

impl RbfKernel for CubicRbfKernel {
    #[inline(always)]
    fn evaluate(&self, r: f64) -> f64 {
        r.powi(3)
    }

    #[inline(always)]
    fn evaluate_derivative(&self, r: f64) -> f64 {
        3.0 * r * r
    }

    fn nugget(&self) -> f64 {
        self.nugget
    }

    fn minimum_drift_degree(&self) -> i32 {
        1
    }
}

impl KernelFromParams for CubicRbfKernel {
    #[inline(always)]
    fn from_params(p: &KernelParams) -> Self {
        CubicRbfKernel { nugget: p.nugget }
    }
}

/// Tunable parameters that define a particular spheroidal RBF kernel family.
#[derive(Clone, Debug, Copy)]
pub struct SpheroidalConstants {
    pub inflexion_point: f64,
    pub linear_slope: f64,
    pub range_scaling: f64,
    pub inv_y_intercept: f64,
}

/// Compile-time specification for a spheroidal kernel order and its tuned constants.
pub trait SpheroidalSpec: Debug + Send + Sync + 'static {
    /// Integer part of the far-field exponent: `(order - 1) / 2`.
    const POW: i32;
    const CONSTANTS: SpheroidalConstants;
}

#[doc(hidden)]
#[derive(Copy, Clone, Debug)]
pub struct Order3;

#[doc(hidden)]
#[derive(Copy, Clone, Debug)]
pub struct Order5;

#[doc(hidden)]
#[derive(Copy, Clone, Debug)]
pub struct Order7;

#[doc(hidden)]
#[derive(Copy, Clone, Debug)]
pub struct Order9;

impl SpheroidalSpec for Order3 {
    const POW: i32 = 1;
    const CONSTANTS: SpheroidalConstants = SpheroidalConstants {
        inflexion_point: 0.5000000000,
        linear_slope: 0.7500000000,
        range_scaling: 2.6798340586,
        inv_y_intercept: 0.8734640537,
    };
}

impl SpheroidalSpec for Order5 {
    const POW: i32 = 2;
    const CONSTANTS: SpheroidalConstants = SpheroidalConstants {
        inflexion_point: 0.4082482905,
        linear_slope: 1.0206207262,
        range_scaling: 1.5822795750,
        inv_y_intercept: 0.8575980168,
    };
}

impl SpheroidalSpec for Order7 {
    const POW: i32 = 3;
    const CONSTANTS: SpheroidalConstants = SpheroidalConstants {
        inflexion_point: 0.3535533906,
        linear_slope: 1.2374368671,
        range_scaling: 1.2008676644,
        inv_y_intercept: 0.8494862533,
    };
}

impl SpheroidalSpec for Order9 {
    const POW: i32 = 4;
    const CONSTANTS: SpheroidalConstants = SpheroidalConstants {
        inflexion_point: 0.3162277660,
        linear_slope: 1.4230249471,
        range_scaling: 1.0000000000,
        inv_y_intercept: 0.8445585690,
    };
}

/// Spheroidal RBF kernel, parameterised by a compile-time order specification.
///
/// Linear near the origin and algebraically decaying past the inflexion
/// point, which makes it strictly positive definite: no drift is required.
#[derive(Clone, Debug, Copy)]
pub struct SpheroidalRbfKernel<S: SpheroidalSpec> {
    pub base_range: f64,
    pub total_sill: f64,
    pub nugget: f64,

    // derived once in `new`
    s2: f64,         // s^2
    ip2: f64,        // (inflexion_point)^2
    near_slope: f64, // total_sill * linear_slope * s
    far_coef: f64,   // total_sill * inv_y_intercept
    _spec: PhantomData<S>,
}

impl<S: SpheroidalSpec> SpheroidalRbfKernel<S> {
    #[inline(always)]
    pub fn new(base_range: f64, total_sill: f64, nugget: f64) -> Self {
        let c = S::CONSTANTS;
        let s = c.range_scaling / base_range;
        Self {
            base_range,
            total_sill,
            nugget,
            s2: s * s,
            ip2: c.inflexion_point * c.inflexion_point,
            near_slope: total_sill * c.linear_slope * s,
            far_coef: total_sill * c.inv_y_intercept,
            _spec: PhantomData,
        }
    }

    #[inline(always)]
    pub fn eval_r2(&self, r2: f64) -> f64 {
        let sr2 = self.s2 * r2;
        if sr2 <= self.ip2 {
            self.total_sill - self.near_slope * r2.sqrt()
        } else {
            // far_coef / (t^POW * sqrt(t)),  t = 1 + (s r)^2
            let t = 1.0 + sr2;
            self.far_coef / (t.powi(S::POW) * t.sqrt())
        }
    }
}

impl<S: SpheroidalSpec> RbfKernel for SpheroidalRbfKernel<S> {
    #[inline(always)]
    fn evaluate(&self, r: f64) -> f64 {
        self.eval_r2(r * r)
    }

    fn evaluate_derivative(&self, r: f64) -> f64 {
        let sr2 = self.s2 * r * r;
        if sr2 <= self.ip2 {
            -self.near_slope
        } else {
            let t = 1.0 + sr2;
            let exponent = S::POW as f64 + 0.5;
            -exponent * self.far_coef * 2.0 * self.s2 * r / (t.powi(S::POW + 1) * t.sqrt())
        }
    }

    fn nugget(&self) -> f64 {
        self.nugget
    }

    #[inline(always)]
    fn evaluate_points(&self, target: RowRef<f64>, source: RowRef<f64>) -> f64 {
        self.eval_r2(get_distance_sq(target, source))
    }
}

impl<S: SpheroidalSpec> KernelFromParams for SpheroidalRbfKernel<S> {
    #[inline(always)]
    fn from_params(p: &KernelParams) -> Self {
        Self::new(p.base_range, p.total_sill, p.nugget)
    }
}

/// Order-3 spheroidal RBF kernel type alias.
pub type Spheroidal3RbfKernel = SpheroidalRbfKernel<Order3>;
/// Order-5 spheroidal RBF kernel type alias.
pub type Spheroidal5RbfKernel = SpheroidalRbfKernel<Order5>;
/// Order-7 spheroidal RBF kernel type alias.
pub type Spheroidal7RbfKernel = SpheroidalRbfKernel<Order7>;
/// Order-9 spheroidal RBF kernel type alias.
pub type Spheroidal9RbfKernel = SpheroidalRbfKernel<Order9>;

/// Returns the squared Euclidean distance between two points.
#[inline(always)]
pub fn get_distance_sq(target: RowRef<f64>, source: RowRef<f64>) -> f64 {
    let mut dist = 0.0;
    for (t, s) in target.iter().zip(source.iter()) {
        let diff = t - s;
        dist += diff * diff;
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::mat;

    fn central_difference<K: RbfKernel>(kernel: &K, r: f64) -> f64 {
        let h = 1e-6;
        (kernel.evaluate(r + h) - kernel.evaluate(r - h)) / (2.0 * h)
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let radii = [0.05, 0.3, 0.9, 2.5];

        for r in radii {
            let linear = LinearRbfKernel::default();
            assert!((linear.evaluate_derivative(r) - central_difference(&linear, r)).abs() < 1e-6);

            let tps = ThinPlateSplineRbfKernel::default();
            assert!((tps.evaluate_derivative(r) - central_difference(&tps, r)).abs() < 1e-6);

            let cubic = CubicRbfKernel::default();
            assert!((cubic.evaluate_derivative(r) - central_difference(&cubic, r)).abs() < 1e-6);

            let spheroidal = Spheroidal5RbfKernel::new(1.0, 1.0, 0.0);
            assert!(
                (spheroidal.evaluate_derivative(r) - central_difference(&spheroidal, r)).abs()
                    < 1e-5
            );
        }
    }

    #[test]
    fn spheroidal_point_evaluation_matches_radial() {
        let kernel = Spheroidal3RbfKernel::new(2.0, 1.5, 0.0);
        let points = mat![[0.0, 0.0, 0.0], [0.3, 0.4, 1.2f64]];

        let r = crate::get_distance(points.row(0), points.row(1));

        assert!((kernel.evaluate_points(points.row(0), points.row(1)) - kernel.evaluate(r)).abs() < 1e-14);
        assert!(kernel.evaluate(0.0) == 1.5);
    }

    #[test]
    fn gradient_points_along_separation() {
        let kernel = CubicRbfKernel::default();
        let points = mat![[1.0, 2.0, 2.0], [0.0, 0.0, 0.0f64]];

        // |x| = 3, phi'(3) / 3 = 9
        let grad = kernel.evaluate_gradient(points.row(0), points.row(1));

        assert!(grad.ncols() == 3);
        assert!((grad[0] - 9.0).abs() < 1e-12);
        assert!((grad[1] - 18.0).abs() < 1e-12);
        assert!((grad[2] - 18.0).abs() < 1e-12);

        let at_source = kernel.evaluate_gradient(points.row(1), points.row(1));
        assert!(at_source[0] == 0.0);
    }

    #[test]
    fn spheroidal_kernels_are_shareable_trait_objects() {
        let kernels: Vec<Box<dyn RbfKernel>> = vec![
            Box::new(Spheroidal3RbfKernel::new(2.0, 1.0, 0.0)),
            Box::new(Spheroidal5RbfKernel::new(2.0, 1.0, 0.0)),
            Box::new(Spheroidal7RbfKernel::new(2.0, 1.0, 0.0)),
            Box::new(Spheroidal9RbfKernel::new(2.0, 1.0, 0.0)),
        ];

        let values: Vec<f64> = std::thread::scope(|scope| {
            let handles: Vec<_> = kernels
                .iter()
                .map(|kernel| scope.spawn(move || kernel.evaluate(0.0)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for value in values {
            assert!((value - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn minimum_drift_degrees() {
        assert!(LinearRbfKernel::default().minimum_drift_degree() == 0);
        assert!(ThinPlateSplineRbfKernel::default().minimum_drift_degree() == 1);
        assert!(CubicRbfKernel::default().minimum_drift_degree() == 1);
        assert!(Spheroidal9RbfKernel::new(1.0, 1.0, 0.0).minimum_drift_degree() == -1);
    }
}
