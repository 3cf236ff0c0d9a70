/////////////////////////////////////////////////////////////////////////////////////////////
//
// Exposes the public API and high-level documentation for dense direct RBF interpolation.
//
// Created on: 18 Oct 2026     Author: Daniel Owen
//
// Copyright (c) 2026, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # Dense direct Radial Basis Function (RBF) interpolation.
//!
//! Fitting an RBF with a polynomial drift means solving the saddle-point system
//!
//! ```text
//! | A   P | | lambda |   | d |
//! | Pᵀ  0 | |   c    | = | 0 |
//! ```
//!
//! which is symmetric but indefinite. This crate eliminates the polynomial
//! block with a Lagrange basis built on a random, unisolvent subset of the
//! points (following `1`), leaving a smaller system `QᵀAQ` that is positive
//! definite for every kernel that is (conditionally) positive definite of the
//! drift's order. That system is factored once with Cholesky (falling back to
//! a Bunch-Kaufman LBLᵀ when it is not positive definite) and reused for any
//! number of right-hand sides.
//!
//! Dense factorisation costs **O(N²)** memory and **O(N³)** operations, so the
//! solver suits problems up to a few thousand points.
//!
//! # Features
//! - [`DirectSolver`]: `setup` / `solve` / `clear` lifecycle over a borrowed
//!   kernel, with seedable point permutation and `f64` or `f32` factorisation.
//! - [`Interpolant`]: fit, evaluate values and gradients, and save or load
//!   fitted models as versioned JSON.
//! - Covariance and polyharmonic kernels from [`direct_rbf_utils`].
//! - Built on [`faer`](https://docs.rs/faer/latest/faer/) for linear algebra, avoiding complex build dependencies
//!
//! # Examples
//!
//! ```
//! use direct_rbf::{
//!     Interpolant,
//!     interpolant_config::InterpolantSettings,
//!     generate_random_points,
//!     RBFTestFunctions,
//! };
//! use direct_rbf_utils::KernelType;
//!
//! // Generate some random data in the unit cube
//! let source_points = generate_random_points(100, 3, Some(42));
//!
//! // Assign some values to the source points
//! let source_values = RBFTestFunctions::f1_3d(&source_points);
//!
//! // Cubic kernel with its minimum (linear) drift
//! let settings = InterpolantSettings::builder(KernelType::CubicRbf).build();
//!
//! let mut interpolant = Interpolant::builder(settings).build()?;
//! interpolant.fit(source_points, source_values.as_ref())?;
//!
//! // The fit reproduces the input values
//! let fitted = interpolant.evaluate_at_source(true)?;
//!
//! let max_diff: f64 = source_values
//!     .col(0)
//!     .iter()
//!     .zip(fitted.col(0).iter())
//!     .fold(0.0, |acc, (a, b)| acc.max((a - b).abs()));
//!
//! assert!(max_diff < 1e-6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # References
//! 1.  R. K. Beatson, W. A. Light, and S. Billings. Fast solution of the radial basis
//!     function interpolation equations: domain decomposition methods. SIAM J. Sci.
//!     Comput., 22(5):1717–1740 (electronic), 2000.
//! 2.  Fasshauer, G., 2007. Meshfree Approximation Methods with Matlab. World Scientific Publishing Co.
pub mod interpolant_config;

mod common;

mod interpolant;

mod solver;

mod polynomials;

mod linalg;

pub mod progress;

pub mod config;

mod rbf_test_functions;

pub use {
    common::{create_evaluation_grid, generate_random_points},
    interpolant::{
        Interpolant, InterpolantBuilder, InterpolantError, InterpolantResult, ModelIOError,
        ModelIOResult,
    },
    linalg::{FactorisationKind, Floating},
    polynomials::{basis_size, LagrangeBasis, MonomialBasis, PointScaling},
    rbf_test_functions::RBFTestFunctions,
    solver::{
        Coefficients, DirectSolver, DirectSolverBuilder, SolverError, SolverResult, SolverState,
        POINT_DIMENSIONS,
    },
};
