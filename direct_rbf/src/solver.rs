/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements the dense direct RBF solver using a null-space reduction of the drift constraints.
//
// Created on: 18 Oct 2026     Author: Daniel Owen
//
// Copyright (c) 2026, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # solver
//!
//! Direct solution of the RBF interpolation system
//!
//! ```text
//! | A   P | | lambda |   | d |
//! | Pᵀ  0 | |   c    | = | 0 |
//! ```
//!
//! where `A` is the kernel matrix (with the nugget on its diagonal) and `P`
//! holds the drift monomials evaluated at the points.
//!
//! The polynomial unknowns are eliminated following Beatson's "possible
//! choice for Q" in [1]. The first `l` points of a random permutation act as
//! reference points for a Lagrange basis, and
//!
//! ```text
//! Q = | -E |      E[i, j] = L_i(x_{l + j})
//!     |  I |
//! ```
//!
//! spans the null space of `Pᵀ`. Writing `lambda = Q gamma` reduces the
//! system to `QᵀAQ gamma = Qᵀd`, which is symmetric and positive definite for
//! every kernel that is (conditionally) positive definite of the drift's
//! order. The drift coefficients are recovered by interpolating the residual
//! `d - A lambda` at the reference points.
//!
//! Without a drift the full matrix `A` is factored directly.
//!
//! # References
//! 1.  R. K. Beatson, W. A. Light, and S. Billings. Fast solution of the radial basis
//!     function interpolation equations: domain decomposition methods. SIAM J. Sci.
//!     Comput., 22(5):1717–1740 (electronic), 2000.

use crate::{
    common,
    config::NoTrendFactorisation,
    linalg::{self, FactorisationKind, Floating, SystemFactor},
    polynomials::{self, LagrangeBasis},
    progress::{emit_with, ProgressMsg, ProgressSink},
};

use direct_rbf_utils::{self, RbfKernel};
use faer::{
    linalg::{
        matmul,
        solvers::{FullPivLu, Solve},
    },
    reborrow::*,
    Accum, Mat, MatRef,
};
use rand::{rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fmt::{self, Debug},
    marker::PhantomData,
    sync::Arc,
    time::Instant,
};

/// Spatial dimension of the points accepted by [`DirectSolver`].
pub const POINT_DIMENSIONS: usize = 3;

/// Lifecycle of a [`DirectSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// Constructed, `setup` not yet called.
    Uninitialized,

    /// A factorisation is held and `solve` may be called.
    Factored,

    /// The factorisation was released by `clear`.
    Cleared,
}

impl fmt::Display for SolverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverState::Uninitialized => write!(f, "uninitialized"),
            SolverState::Factored => write!(f, "factored"),
            SolverState::Cleared => write!(f, "cleared"),
        }
    }
}

pub type SolverResult<T> = std::result::Result<T, SolverError>;

/// Errors returned by [`DirectSolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// There must be strictly more points than drift basis functions.
    TooFewPoints { num_points: usize, basis_size: usize },

    /// `setup` received a different number of points than the solver was built for.
    PointCountMismatch { expected: usize, found: usize },

    /// `solve` received a different number of values than there are points.
    ValueCountMismatch { expected: usize, found: usize },

    /// Points must have exactly [`POINT_DIMENSIONS`] coordinates.
    UnsupportedDimension { found: usize },

    /// The operation is not valid in the solver's current state.
    InvalidState { state: SolverState },

    /// No subset of the points is unisolvent for the drift polynomial space,
    /// e.g. all points lie on a plane and the drift is linear.
    NotUnisolvent { degree: i32 },

    /// The system is numerically singular: the factorisation has a pivot
    /// ratio below `size * eps`, or a non-finite value appeared. Duplicated
    /// points are the usual cause.
    Singular { stage: &'static str },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::TooFewPoints {
                num_points,
                basis_size,
            } => write!(
                f,
                "{} points is too few for a drift with {} basis functions; need more than {}",
                num_points, basis_size, basis_size
            ),
            SolverError::PointCountMismatch { expected, found } => {
                write!(f, "expected {} points, found {}", expected, found)
            }
            SolverError::ValueCountMismatch { expected, found } => {
                write!(f, "expected {} value rows, found {}", expected, found)
            }
            SolverError::UnsupportedDimension { found } => write!(
                f,
                "points must have {} coordinates, found {}",
                POINT_DIMENSIONS, found
            ),
            SolverError::InvalidState { state } => {
                write!(f, "operation not valid while the solver is {}", state)
            }
            SolverError::NotUnisolvent { degree } => write!(
                f,
                "points are not unisolvent for a degree {} polynomial drift",
                degree
            ),
            SolverError::Singular { stage } => {
                write!(f, "system is numerically singular (detected during {})", stage)
            }
        }
    }
}

impl Error for SolverError {}

/// Coefficients of a solved RBF system.
///
/// After fitting, an RBF interpolator produces a set of coefficients
/// that define the contribution of each basis function. These
/// coefficients are stored in this struct and used during evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    /// Coefficients associated with the RBF centers (data points), one row
    /// per point in the caller's original order and one column per value column.
    pub point_coefficients: Mat<f64>,

    /// Coefficients associated with the polynomial drift term, if present,
    /// in graded monomial order (`1, x, y, z, x^2, ...`) and unscaled coordinates.
    ///
    /// This is `None` when no polynomial component was included in the
    /// system, or `Some(matrix)` otherwise.
    pub poly_coefficients: Option<Mat<f64>>,
}

impl Coefficients {
    /// Creates a new [`Coefficients`] instance from the given RBF and
    /// optional polynomial coefficients.
    pub(crate) fn new(point_coefficients: Mat<f64>, poly_coefficients: Option<Mat<f64>>) -> Self {
        Self {
            point_coefficients,
            poly_coefficients,
        }
    }

    pub fn num_points(&self) -> usize {
        self.point_coefficients.nrows()
    }

    /// Number of drift basis functions (`0` without a drift).
    pub fn basis_size(&self) -> usize {
        self.poly_coefficients.as_ref().map_or(0, |c| c.nrows())
    }

    pub fn num_columns(&self) -> usize {
        self.point_coefficients.ncols()
    }

    /// The full `(num_points + basis_size) x num_columns` solution vector:
    /// point coefficients first, then drift coefficients.
    pub fn stacked(&self) -> Mat<f64> {
        let m = self.num_points();
        let l = self.basis_size();

        let mut stacked = Mat::<f64>::zeros(m + l, self.num_columns());
        stacked.subrows_mut(0, m).copy_from(self.point_coefficients.as_ref());

        if let Some(poly) = &self.poly_coefficients {
            stacked.subrows_mut(m, l).copy_from(poly.as_ref());
        }

        stacked
    }
}

/// State needed to map between point coefficients and the reduced system.
struct DriftReduction<T: Floating> {
    /// `-E`, shape `(l x (m - l))`.
    neg_e: Mat<T>,

    /// The rows of the permuted A matrix that relate to the reference points.
    a_top: Mat<T>,

    /// LU factorisation of the reference point monomials. Used for recovering
    /// the polynomial coefficients.
    poly_factor: FullPivLu<f64>,
}

struct Factorisation<T: Floating> {
    factor: SystemFactor<T>,
    drift: Option<DriftReduction<T>>,
}

/// Dense direct solver for RBF interpolation with an optional polynomial drift.
///
/// Usage is `setup` once per point set, then `solve` for any number of value
/// sets, then optionally `clear`. The kernel is borrowed, never owned.
///
/// `T` is the working precision of the factorisation (`f64` or `f32`).
/// Inputs and results are always `f64`.
///
/// # Examples
/// ```
/// use direct_rbf::DirectSolver;
/// use direct_rbf_utils::kernels::SphericalVariogram;
/// use faer::mat;
///
/// let points = mat![
///     [0.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0],
///     [0.0, 1.0, 0.0],
///     [1.0, 1.0, 0.0],
///     [0.5, 0.5, 0.0f64],
/// ];
/// let values = mat![[0.0], [0.0], [0.0], [0.0], [1.0f64]];
///
/// let kernel = SphericalVariogram::new(1.0, 2.0, 0.0);
/// let mut solver = DirectSolver::builder(&kernel, 0, 5).seed(42).build()?;
///
/// solver.setup(&points)?;
/// let coefficients = solver.solve(values.as_ref())?;
///
/// assert_eq!(coefficients.stacked().nrows(), 6);
/// # Ok::<(), direct_rbf::SolverError>(())
/// ```
pub struct DirectSolver<'k, K: RbfKernel + ?Sized, T: Floating = f64> {
    kernel: &'k K,
    poly_degree: i32,
    num_points: usize,
    basis_size: usize,
    rng: StdRng,
    no_trend_factorisation: NoTrendFactorisation,
    progress_callback: Option<Arc<dyn ProgressSink>>,
    state: SolverState,

    /// `point_indices[i]` is the original index of internal point `i`. The
    /// first `basis_size` entries are the reference points.
    point_indices: Vec<usize>,

    /// `inverse_indices[point_indices[i]] == i`.
    inverse_indices: Vec<usize>,

    factorisation: Option<Factorisation<T>>,
}

impl<K: RbfKernel + ?Sized, T: Floating> Debug for DirectSolver<'_, K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectSolver")
            .field("kernel", &self.kernel)
            .field("poly_degree", &self.poly_degree)
            .field("num_points", &self.num_points)
            .field("basis_size", &self.basis_size)
            .field("precision", &T::NAME)
            .field("state", &self.state)
            .field("factorisation", &self.factorisation_kind())
            .finish()
    }
}

/// A convenience builder for constructing a [`DirectSolver`].
///
/// The builder should be called via the [`DirectSolver::builder`] method.
pub struct DirectSolverBuilder<'k, K: RbfKernel + ?Sized, T: Floating = f64> {
    kernel: &'k K,
    poly_degree: i32,
    num_points: usize,
    seed: Option<u64>,
    no_trend_factorisation: NoTrendFactorisation,
    progress_callback: Option<Arc<dyn ProgressSink>>,
    _precision: PhantomData<T>,
}

impl<'k, K: RbfKernel + ?Sized, T: Floating> DirectSolverBuilder<'k, K, T> {
    /// Fixes the seed of the point permutation.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets an optional seed; `None` draws the permutation from OS randomness.
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the factorisation used when there is no drift.
    pub fn no_trend_factorisation(mut self, no_trend_factorisation: NoTrendFactorisation) -> Self {
        self.no_trend_factorisation = no_trend_factorisation;
        self
    }

    /// Optional callback for reporting solver progress.
    pub fn progress_callback(mut self, progress_callback: Arc<dyn ProgressSink>) -> Self {
        self.progress_callback = Some(progress_callback);
        self
    }

    /// Switches the working precision of the factorisation.
    pub fn precision<U: Floating>(self) -> DirectSolverBuilder<'k, K, U> {
        DirectSolverBuilder {
            kernel: self.kernel,
            poly_degree: self.poly_degree,
            num_points: self.num_points,
            seed: self.seed,
            no_trend_factorisation: self.no_trend_factorisation,
            progress_callback: self.progress_callback,
            _precision: PhantomData,
        }
    }

    /// Builds an uninitialized solver.
    ///
    /// Fails with [`SolverError::TooFewPoints`] unless there are more points
    /// than drift basis functions.
    pub fn build(self) -> SolverResult<DirectSolver<'k, K, T>> {
        let basis_size = polynomials::basis_size(self.poly_degree, POINT_DIMENSIONS);

        if self.num_points <= basis_size {
            return Err(SolverError::TooFewPoints {
                num_points: self.num_points,
                basis_size,
            });
        }

        Ok(DirectSolver {
            kernel: self.kernel,
            poly_degree: self.poly_degree,
            num_points: self.num_points,
            basis_size,
            rng: common::seeded_rng(self.seed),
            no_trend_factorisation: self.no_trend_factorisation,
            progress_callback: self.progress_callback,
            state: SolverState::Uninitialized,
            point_indices: Vec::new(),
            inverse_indices: Vec::new(),
            factorisation: None,
        })
    }

    /// Builds the solver and immediately runs [`DirectSolver::setup`] on `points`.
    pub fn build_with_points(self, points: &Mat<f64>) -> SolverResult<DirectSolver<'k, K, T>> {
        let mut solver = self.build()?;
        solver.setup(points)?;
        Ok(solver)
    }
}

impl<'k, K: RbfKernel + ?Sized> DirectSolver<'k, K, f64> {
    /// Returns a new [`DirectSolverBuilder`] for `num_points` points and a
    /// drift of total degree `poly_degree` (negative for none).
    pub fn builder(kernel: &'k K, poly_degree: i32, num_points: usize) -> DirectSolverBuilder<'k, K, f64> {
        DirectSolverBuilder {
            kernel,
            poly_degree,
            num_points,
            seed: None,
            no_trend_factorisation: NoTrendFactorisation::default(),
            progress_callback: None,
            _precision: PhantomData,
        }
    }

    /// Uninitialized double precision solver with default options.
    pub fn new(kernel: &'k K, poly_degree: i32, num_points: usize) -> SolverResult<Self> {
        Self::builder(kernel, poly_degree, num_points).build()
    }

    /// Double precision solver with default options, already set up on `points`.
    pub fn with_points(kernel: &'k K, poly_degree: i32, points: &Mat<f64>) -> SolverResult<Self> {
        Self::builder(kernel, poly_degree, points.nrows()).build_with_points(points)
    }
}

impl<'k, K: RbfKernel + ?Sized, T: Floating> DirectSolver<'k, K, T> {
    pub fn state(&self) -> SolverState {
        self.state
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn poly_degree(&self) -> i32 {
        self.poly_degree
    }

    /// Number of drift basis functions, `l`.
    pub fn basis_size(&self) -> usize {
        self.basis_size
    }

    pub fn kernel(&self) -> &'k K {
        self.kernel
    }

    /// Forward permutation of the last `setup`: internal index to original index.
    pub fn point_indices(&self) -> &[usize] {
        &self.point_indices
    }

    /// Inverse permutation of the last `setup`: original index to internal index.
    pub fn inverse_indices(&self) -> &[usize] {
        &self.inverse_indices
    }

    /// Original indices of the polynomial reference points.
    pub fn reference_point_indices(&self) -> &[usize] {
        match self.state {
            SolverState::Factored => &self.point_indices[..self.basis_size],
            _ => &[],
        }
    }

    /// The factorisation in use, if factored.
    pub fn factorisation_kind(&self) -> Option<FactorisationKind> {
        self.factorisation.as_ref().map(|f| f.factor.kind())
    }

    /// Permutes the points, builds the (reduced) system and factors it.
    ///
    /// May be called in any state; on success any previous factorisation is
    /// replaced and the solver is [`SolverState::Factored`]. On failure the
    /// solver is left unchanged.
    pub fn setup(&mut self, points: &Mat<f64>) -> SolverResult<()> {
        let start = Instant::now();

        if points.ncols() != POINT_DIMENSIONS {
            return Err(SolverError::UnsupportedDimension {
                found: points.ncols(),
            });
        }

        if points.nrows() != self.num_points {
            return Err(SolverError::PointCountMismatch {
                expected: self.num_points,
                found: points.nrows(),
            });
        }

        let m = self.num_points;
        let l = self.basis_size;

        let mut point_indices: Vec<usize> = (0..m).collect();
        point_indices.shuffle(&mut self.rng);

        let lagrange = match self.poly_degree >= 0 {
            true => Some(self.select_reference_points(points, &mut point_indices)?),
            false => None,
        };

        let permuted_points = direct_rbf_utils::select_mat_rows(points, &point_indices);

        // Construct full kernel matrix in permuted order.
        let a_matrix = direct_rbf_utils::get_a_matrix_symmetric(&permuted_points, self.kernel);

        if !linalg::all_finite(a_matrix.as_ref()) {
            return Err(SolverError::Singular { stage: "assembly" });
        }

        let a_matrix = linalg::to_precision::<T>(a_matrix.as_ref());
        let par = faer::get_global_parallelism();
        let one = T::from_f64(1.0);

        let factorisation = match lagrange {
            Some(lagrange) => {
                let n = m - l;

                // Build the Q matrix.
                // -E maps from non-reference points into the polynomial
                // constraint space, using Lagrange polynomials built on the
                // reference points, so that PᵀQ = 0.
                let other_points = permuted_points.subrows(l, n).to_owned();
                let lagrange_values = lagrange.evaluate_points(&other_points);
                let neg_e = Mat::<T>::from_fn(l, n, |i, j| T::from_f64(-lagrange_values[(j, i)]));

                // Since Q is just an identity matrix below the -E rows, QᵀAQ
                // is built from block products.
                let a_left = a_matrix.subcols(0, l);
                let a_right = a_matrix.subcols(l, n);

                // AQ = A[:, :l] (-E) + A[:, l:]
                let mut aq = a_right.to_owned();
                matmul::matmul(aq.rb_mut(), Accum::Add, a_left, neg_e.rb(), one, par);

                // QᵀAQ = (-E)ᵀ AQ[:l, :] + AQ[l:, :]
                let mut qtaq = aq.subrows(l, n).to_owned();
                matmul::matmul(
                    qtaq.rb_mut(),
                    Accum::Add,
                    neg_e.transpose(),
                    aq.subrows(0, l),
                    one,
                    par,
                );
                drop(aq);

                let reference_points = permuted_points.subrows(0, l).to_owned();

                Factorisation {
                    factor: SystemFactor::symmetric(qtaq.as_ref()),
                    drift: Some(DriftReduction {
                        a_top: a_matrix.subrows(0, l).to_owned(),
                        neg_e,
                        poly_factor: polynomials::monomial_factor(self.poly_degree, &reference_points),
                    }),
                }
            }
            None => Factorisation {
                factor: match self.no_trend_factorisation {
                    NoTrendFactorisation::Lu => SystemFactor::lu(a_matrix.as_ref()),
                    NoTrendFactorisation::Symmetric => SystemFactor::symmetric(a_matrix.as_ref()),
                },
                drift: None,
            },
        };

        if factorisation.factor.is_singular() {
            return Err(SolverError::Singular {
                stage: "factorisation",
            });
        }

        let mut inverse_indices = vec![0usize; m];
        point_indices
            .iter()
            .enumerate()
            .for_each(|(internal, &original)| inverse_indices[original] = internal);

        let method = factorisation.factor.kind();
        let size = factorisation.factor.dim();

        self.point_indices = point_indices;
        self.inverse_indices = inverse_indices;
        self.factorisation = Some(factorisation);
        self.state = SolverState::Factored;

        emit_with(&self.progress_callback, || ProgressMsg::Factorised {
            method,
            size,
            precision: T::NAME,
            elapsed: start.elapsed(),
        });

        Ok(())
    }

    /// Moves a unisolvent set of `l` points to the front of `point_indices`
    /// and builds the Lagrange basis on them.
    ///
    /// The first `l` points of the permutation are used when they are
    /// unisolvent. Otherwise a pivoted QR selection over all points picks
    /// them, and the remaining points keep their permuted order.
    fn select_reference_points(
        &self,
        points: &Mat<f64>,
        point_indices: &mut Vec<usize>,
    ) -> SolverResult<LagrangeBasis> {
        let l = self.basis_size;
        let not_unisolvent = SolverError::NotUnisolvent {
            degree: self.poly_degree,
        };

        let candidates = direct_rbf_utils::select_mat_rows(points, &point_indices[..l]);

        if let Some(lagrange) = LagrangeBasis::new(self.poly_degree, &candidates) {
            emit_with(&self.progress_callback, || ProgressMsg::ReferencePointsSelected {
                num_reference_points: l,
                fallback: false,
            });
            return Ok(lagrange);
        }

        let permuted_points = direct_rbf_utils::select_mat_rows(points, point_indices);
        let selected = polynomials::select_unisolvent_points(self.poly_degree, &permuted_points)
            .ok_or(not_unisolvent.clone())?;

        let mut is_selected = vec![false; point_indices.len()];
        selected.iter().for_each(|&pos| is_selected[pos] = true);

        let reordered: Vec<usize> = selected
            .iter()
            .map(|&pos| point_indices[pos])
            .chain(
                point_indices
                    .iter()
                    .enumerate()
                    .filter(|(pos, _)| !is_selected[*pos])
                    .map(|(_, &original)| original),
            )
            .collect();

        *point_indices = reordered;

        let reference_points = direct_rbf_utils::select_mat_rows(points, &point_indices[..l]);
        let lagrange = LagrangeBasis::new(self.poly_degree, &reference_points).ok_or(not_unisolvent)?;

        emit_with(&self.progress_callback, || ProgressMsg::ReferencePointsSelected {
            num_reference_points: l,
            fallback: true,
        });

        Ok(lagrange)
    }

    /// Solves for the coefficients of every column of `values`.
    ///
    /// `values` has one row per point, in the order the points were given to
    /// `setup`. The returned point coefficients use the same order.
    pub fn solve(&self, values: MatRef<'_, f64>) -> SolverResult<Coefficients> {
        let start = Instant::now();

        let factorisation = match (self.state, &self.factorisation) {
            (SolverState::Factored, Some(factorisation)) => factorisation,
            _ => return Err(SolverError::InvalidState { state: self.state }),
        };

        let m = self.num_points;
        let l = self.basis_size;

        if values.nrows() != m {
            return Err(SolverError::ValueCountMismatch {
                expected: m,
                found: values.nrows(),
            });
        }

        let num_rhs = values.ncols();
        let par = faer::get_global_parallelism();
        let one = T::from_f64(1.0);

        // Gather rhs values in internal order.
        let d = Mat::<T>::from_fn(m, num_rhs, |i, j| {
            T::from_f64(*values.get(self.point_indices[i], j))
        });

        let (lambda, poly_coefficients) = match &factorisation.drift {
            Some(drift) => {
                let n = m - l;

                // Qᵀd = (-E)ᵀ d[:l] + d[l:]
                let mut qtd = d.subrows(l, n).to_owned();
                matmul::matmul(
                    qtd.rb_mut(),
                    Accum::Add,
                    drift.neg_e.transpose(),
                    d.subrows(0, l),
                    one,
                    par,
                );

                let gamma = factorisation.factor.solve(&qtd);

                // lambda = Q gamma
                let mut lambda = Mat::<T>::zeros(m, num_rhs);
                lambda.subrows_mut(l, n).copy_from(gamma.as_ref());
                matmul::matmul(
                    lambda.subrows_mut(0, l),
                    Accum::Replace,
                    drift.neg_e.rb(),
                    gamma.rb(),
                    one,
                    par,
                );

                // Find the polynomial interpolating the residual
                //
                //   r(x) = d(x) - sum_{j=1..m} lambda_j * Phi(x, x_j)
                //
                // at the reference points.
                let mut residual = d.subrows(0, l).to_owned();
                matmul::matmul(
                    residual.rb_mut(),
                    Accum::Add,
                    drift.a_top.rb(),
                    lambda.rb(),
                    T::from_f64(-1.0),
                    par,
                );

                let residual = linalg::to_f64(residual.as_ref());
                let poly = drift.poly_factor.solve(residual.as_ref());

                (lambda, Some(poly))
            }
            None => (factorisation.factor.solve(&d), None),
        };

        let poly_finite = poly_coefficients
            .as_ref()
            .map_or(true, |poly| linalg::all_finite(poly.as_ref()));

        if !linalg::all_finite(lambda.as_ref()) || !poly_finite {
            return Err(SolverError::Singular { stage: "solve" });
        }

        // Scatter back to the caller's point order.
        let point_coefficients = Mat::<f64>::from_fn(m, num_rhs, |i, j| {
            lambda[(self.inverse_indices[i], j)].to_f64()
        });

        emit_with(&self.progress_callback, || ProgressMsg::Solved {
            num_columns: num_rhs,
            elapsed: start.elapsed(),
        });

        Ok(Coefficients::new(point_coefficients, poly_coefficients))
    }

    /// Releases the factorisation. `solve` fails until `setup` is called again.
    pub fn clear(&mut self) {
        self.factorisation = None;
        self.point_indices = Vec::new();
        self.inverse_indices = Vec::new();
        self.state = SolverState::Cleared;
    }
}
