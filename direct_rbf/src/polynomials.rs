/////////////////////////////////////////////////////////////////////////////////////////////
//
// Evaluates monomial and Lagrange polynomial bases used for drift terms in RBF interpolation.
//
// Created on: 18 Oct 2026     Author: Daniel Owen
//
// Copyright (c) 2026, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # polynomials
//!
//! Polynomial bases for the drift term of an RBF interpolant.
//!
//! [`MonomialBasis`] spans all polynomials of total degree `<= degree` in
//! graded order: `1, x, y, z, x^2, xy, xz, y^2, yz, z^2, ...`. The polynomial
//! coefficients returned by the solver are always expressed in this order and
//! in unscaled coordinates.
//!
//! [`LagrangeBasis`] spans the same space, but is built from `l` reference
//! points so that basis function `j` is `1` at reference point `j` and `0` at
//! every other reference point.

use crate::common;
use faer::{
    linalg::solvers::{FullPivLu, Solve},
    Mat,
};
use itertools::Itertools;

/// Relative threshold on the diagonal of a column pivoted QR factor below
/// which a column is treated as linearly dependent.
pub(crate) const RANK_TOLERANCE: f64 = 1E-10;

/// Number of monomials of total degree `<= degree` in `dims` dimensions.
///
/// Equals `C(degree + dims, dims)` for `degree >= 0`, and `0` for a negative
/// degree (no polynomial term).
///
/// # Examples
/// ```
/// use direct_rbf::basis_size;
///
/// assert_eq!(basis_size(-1, 3), 0);
/// assert_eq!(basis_size(0, 3), 1);
/// assert_eq!(basis_size(1, 3), 4);
/// assert_eq!(basis_size(2, 3), 10);
/// ```
pub fn basis_size(degree: i32, dims: usize) -> usize {
    if degree < 0 {
        return 0;
    }

    let degree = degree as usize;

    // C(degree + dims, dims), accumulated so every intermediate is an integer.
    (1..=dims).fold(1usize, |acc, i| acc * (degree + i) / i)
}

/// Affine map of points into the `[-1, 1]^d` hypercube.
///
/// Applied before evaluating monomials to keep the basis well conditioned,
/// regardless of the magnitude of the input coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScaling {
    pub translation_factor: Vec<f64>,
    pub scale_factor: Vec<f64>,
}

impl PointScaling {
    /// Scaling that maps the bounding box of `points` onto `[-1, 1]^d`.
    pub fn from_points(points: &Mat<f64>) -> Self {
        let (translation_factor, scale_factor) = common::get_cheb_cube_scaling_factors(points);
        Self {
            translation_factor,
            scale_factor,
        }
    }

    /// Returns a scaled copy of `points`.
    pub fn apply(&self, points: &Mat<f64>) -> Mat<f64> {
        let mut scaled = points.clone();
        common::scale_points(&mut scaled, &self.translation_factor, &self.scale_factor);
        scaled
    }
}

/// All monomials up to a total degree, in graded order.
#[derive(Debug, Clone)]
pub struct MonomialBasis {
    degree: i32,
    dims: usize,

    /// Per-monomial exponent of each coordinate.
    exponents: Vec<Vec<u32>>,

    scaling: Option<PointScaling>,
}

impl MonomialBasis {
    /// Builds the canonical (unscaled) basis.
    pub fn new(degree: i32, dims: usize) -> Self {
        let mut exponents: Vec<Vec<u32>> = Vec::with_capacity(basis_size(degree, dims));

        for total in 0..=degree {
            if total == 0 {
                exponents.push(vec![0; dims]);
                continue;
            }

            // Nondecreasing variable index tuples give x^2, xy, xz, y^2, ... order.
            for combination in (0..dims).combinations_with_replacement(total as usize) {
                let mut exponent = vec![0u32; dims];
                combination.iter().for_each(|&var| exponent[var] += 1);
                exponents.push(exponent);
            }
        }

        Self {
            degree,
            dims,
            exponents,
            scaling: None,
        }
    }

    /// Evaluates the basis on points mapped through `scaling` first.
    pub fn with_scaling(mut self, scaling: PointScaling) -> Self {
        self.scaling = Some(scaling);
        self
    }

    pub fn degree(&self) -> i32 {
        self.degree
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Number of basis functions.
    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exponents.is_empty()
    }

    fn scaled_points(&self, points: &Mat<f64>) -> Mat<f64> {
        assert_eq!(points.ncols(), self.dims, "point dimension mismatch");
        match &self.scaling {
            Some(scaling) => scaling.apply(points),
            None => points.clone(),
        }
    }

    /// Evaluates every monomial at every point.
    ///
    /// Returns an `(n_points x len)` matrix.
    ///
    /// # Panics
    /// If `points` does not have [`MonomialBasis::dims`] columns. The solver
    /// and [`crate::Interpolant`] check point dimensions before calling this.
    pub fn evaluate_points(&self, points: &Mat<f64>) -> Mat<f64> {
        let scaled_points = self.scaled_points(points);

        Mat::from_fn(scaled_points.nrows(), self.len(), |i, j| {
            self.exponents[j]
                .iter()
                .enumerate()
                .fold(1.0, |acc, (d, &e)| acc * scaled_points[(i, d)].powi(e as i32))
        })
    }

    /// Evaluates the partial derivatives of every monomial at every point.
    ///
    /// Returns one `(n_points x len)` matrix per coordinate axis, holding the
    /// derivatives with respect to the unscaled coordinates.
    ///
    /// # Panics
    /// If `points` does not have [`MonomialBasis::dims`] columns.
    pub fn evaluate_gradients(&self, points: &Mat<f64>) -> Vec<Mat<f64>> {
        let scaled_points = self.scaled_points(points);

        (0..self.dims)
            .map(|axis| {
                let chain = match &self.scaling {
                    Some(scaling) => 1.0 / scaling.scale_factor[axis],
                    None => 1.0,
                };

                Mat::from_fn(scaled_points.nrows(), self.len(), |i, j| {
                    let exponent = &self.exponents[j];
                    if exponent[axis] == 0 {
                        return 0.0;
                    }

                    let value = exponent.iter().enumerate().fold(1.0, |acc, (d, &e)| {
                        let e = if d == axis { e - 1 } else { e };
                        acc * scaled_points[(i, d)].powi(e as i32)
                    });

                    chain * exponent[axis] as f64 * value
                })
            })
            .collect()
    }
}

/// Lagrange basis for the polynomial space of a given degree, built on a
/// unisolvent set of reference points.
#[derive(Debug, Clone)]
pub struct LagrangeBasis {
    monomials: MonomialBasis,

    /// Coefficients of each Lagrange polynomial in the (scaled) monomial basis.
    /// Column `j` holds polynomial `j`.
    coefficients: Mat<f64>,
}

impl LagrangeBasis {
    /// Builds the basis from exactly `basis_size(degree, dims)` reference points.
    ///
    /// Returns `None` when the reference points are not unisolvent for the
    /// polynomial space, i.e. their monomial matrix is numerically singular.
    ///
    /// # Panics
    /// If the number of reference points is not `basis_size(degree, dims)`.
    pub fn new(degree: i32, reference_points: &Mat<f64>) -> Option<Self> {
        let dims = reference_points.ncols();
        let l = basis_size(degree, dims);

        assert_eq!(
            reference_points.nrows(),
            l,
            "a Lagrange basis of degree {} in {}D needs {} reference points",
            degree,
            dims,
            l
        );

        let monomials = MonomialBasis::new(degree, dims)
            .with_scaling(PointScaling::from_points(reference_points));

        let reference_monomials = monomials.evaluate_points(reference_points);

        if numerical_rank(&reference_monomials) < l {
            return None;
        }

        let coefficients = get_lagrange_coefficients(&reference_monomials);

        Some(Self {
            monomials,
            coefficients,
        })
    }

    /// Number of basis functions (equal to the number of reference points).
    pub fn len(&self) -> usize {
        self.coefficients.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.ncols() == 0
    }

    /// Evaluates every Lagrange polynomial at every point.
    ///
    /// Returns an `(n_points x len)` matrix.
    pub fn evaluate_points(&self, points: &Mat<f64>) -> Mat<f64> {
        self.monomials.evaluate_points(points) * &self.coefficients
    }
}

/// Inverse of a square monomial matrix, column `j` being the coefficients of
/// the Lagrange polynomial that is `1` at point `j`.
pub(crate) fn get_lagrange_coefficients(monomials: &Mat<f64>) -> Mat<f64> {
    let (nrows, ncols) = monomials.shape();
    let rhs = Mat::<f64>::identity(nrows, ncols);
    let lu = monomials.full_piv_lu();
    lu.solve(rhs)
}

/// Full pivot LU of the canonical monomial matrix at `points`, used to
/// recover polynomial coefficients in the monomial basis.
pub(crate) fn monomial_factor(degree: i32, points: &Mat<f64>) -> FullPivLu<f64> {
    MonomialBasis::new(degree, points.ncols())
        .evaluate_points(points)
        .full_piv_lu()
}

/// Numerical column rank from the diagonal of a column pivoted QR factor.
pub(crate) fn numerical_rank(matrix: &Mat<f64>) -> usize {
    if matrix.nrows() == 0 || matrix.ncols() == 0 {
        return 0;
    }

    let qr = matrix.col_piv_qr();
    let r = qr.thin_R();

    let largest = r.get(0, 0).abs();
    if largest == 0.0 {
        return 0;
    }

    let thresh = RANK_TOLERANCE * largest;

    r.diagonal()
        .column_vector()
        .iter()
        .filter(|val| val.abs() > thresh)
        .count()
}

/// Picks `basis_size(degree, dims)` rows of `points` on which the polynomial
/// space is unisolvent.
///
/// A rank-revealing QR of the transposed monomial matrix pivots towards rows
/// that are well separated in monomial space. Returns `None` when no such
/// subset exists, e.g. all points lying on a plane with a linear drift in 3D.
/// The returned indices are sorted.
pub(crate) fn select_unisolvent_points(degree: i32, points: &Mat<f64>) -> Option<Vec<usize>> {
    let l = basis_size(degree, points.ncols());

    if points.nrows() < l {
        return None;
    }

    let monomials = MonomialBasis::new(degree, points.ncols())
        .with_scaling(PointScaling::from_points(points))
        .evaluate_points(points);

    if numerical_rank(&monomials) < l {
        return None;
    }

    let qr = monomials.transpose().to_owned().col_piv_qr();
    let (piv_fwd, _) = qr.P().arrays();

    let mut selected: Vec<usize> = piv_fwd[..l].to_vec();
    selected.sort();

    Some(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::{mat, utils::approx::*, Mat};

    fn run_case(points: Mat<f64>, degree: i32, expected: Mat<f64>) {
        let (n, d) = points.shape();
        assert_eq!(n, expected.nrows(), "row mismatch in test setup");

        let basis = MonomialBasis::new(degree, d);
        assert_eq!(basis.len(), expected.ncols());
        assert_eq!(basis.len(), basis_size(degree, d));

        let monomials = basis.evaluate_points(&points);

        let approx_eq = CwiseMat(ApproxEq::eps() * 128.0 * (2 as f64));
        assert!(&monomials ~ &expected);
    }

    #[test]
    fn basis_sizes() {
        assert_eq!(basis_size(-1, 3), 0);
        assert_eq!(basis_size(0, 3), 1);
        assert_eq!(basis_size(1, 3), 4);
        assert_eq!(basis_size(2, 3), 10);
        assert_eq!(basis_size(3, 3), 20);
        assert_eq!(basis_size(2, 2), 6);
        assert_eq!(basis_size(2, 1), 3);
    }

    #[test]
    fn monomials_constant_1d() {
        let points = mat![[1.0], [2.0]];
        let expected = mat![[1.0], [1.0]];
        run_case(points, 0, expected);
    }

    #[test]
    fn monomials_quadratic_1d() {
        let points = mat![[1.0], [2.0]];
        // Basis: [1, x, x^2]
        let expected = mat![[1.0, 1.0, 1.0], [1.0, 2.0, 4.0]];
        run_case(points, 2, expected);
    }

    #[test]
    fn monomials_quadratic_2d() {
        let points = mat![[1.0, 2.0], [3.0, 4.0]];
        // Basis: [1, x, y, x^2, x*y, y^2]
        let expected = mat![
            [1.0, 1.0, 2.0,  1.0,  2.0,  4.0],
            [1.0, 3.0, 4.0,  9.0, 12.0, 16.0],
        ];
        run_case(points, 2, expected);
    }

    #[test]
    fn monomials_constant_3d() {
        let points = mat![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let expected = mat![[1.0], [1.0]];
        run_case(points, 0, expected);
    }

    #[test]
    fn monomials_linear_3d() {
        let points = mat![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        // Basis: [1, x, y, z]
        let expected = mat![[1.0, 1.0, 2.0, 3.0], [1.0, 4.0, 5.0, 6.0]];
        run_case(points, 1, expected);
    }

    #[test]
    fn monomials_quadratic_3d() {
        let points = mat![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        // Basis: [1, x, y, z, x^2, x*y, x*z, y^2, y*z, z^2]
        let expected = mat![
            [1.0, 1.0, 2.0, 3.0,  1.0,  2.0,  3.0,  4.0,  6.0,  9.0],
            [1.0, 4.0, 5.0, 6.0, 16.0, 20.0, 24.0, 25.0, 30.0, 36.0],
        ];
        run_case(points, 2, expected);
    }

    #[test]
    fn monomials_cubic_2d_ordering() {
        let points = mat![[2.0, 3.0]];
        // Basis: [1, x, y, x^2, xy, y^2, x^3, x^2y, xy^2, y^3]
        let expected = mat![[1.0, 2.0, 3.0, 4.0, 6.0, 9.0, 8.0, 12.0, 18.0, 27.0]];
        run_case(points, 3, expected);
    }

    #[test]
    fn scaled_monomials_use_unit_cube() {
        let points = mat![[0.0, 10.0], [4.0, 30.0]];
        let basis = MonomialBasis::new(1, 2).with_scaling(PointScaling::from_points(&points));

        let monomials = basis.evaluate_points(&points);

        let expected = mat![[1.0, -1.0, -1.0], [1.0, 1.0, 1.0]];
        let approx_eq = CwiseMat(ApproxEq::eps() * 128.0);
        assert!(&monomials ~ &expected);
    }

    #[test]
    #[should_panic(expected = "point dimension mismatch")]
    fn evaluate_points_panics_on_wrong_dimension() {
        let basis = MonomialBasis::new(1, 3);
        basis.evaluate_points(&mat![[0.0, 1.0f64]]);
    }

    #[test]
    fn gradients_match_finite_differences() {
        let points = mat![[0.3, -0.7, 1.1], [2.0, 0.5, -0.4f64]];
        let scaled = MonomialBasis::new(2, 3).with_scaling(PointScaling::from_points(&points));
        let canonical = MonomialBasis::new(2, 3);

        let h = 1e-6;

        for basis in [&canonical, &scaled] {
            let gradients = basis.evaluate_gradients(&points);
            assert_eq!(gradients.len(), 3);

            for axis in 0..3 {
                let mut plus = points.clone();
                let mut minus = points.clone();
                for i in 0..points.nrows() {
                    plus[(i, axis)] += h;
                    minus[(i, axis)] -= h;
                }

                let values_plus = basis.evaluate_points(&plus);
                let values_minus = basis.evaluate_points(&minus);

                for i in 0..points.nrows() {
                    for j in 0..basis.len() {
                        let fd = (values_plus[(i, j)] - values_minus[(i, j)]) / (2.0 * h);
                        assert!((gradients[axis][(i, j)] - fd).abs() < 1e-6);
                    }
                }
            }
        }
    }

    #[test]
    fn lagrange_basis_is_kronecker_at_reference_points() {
        let reference_points = mat![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0f64],
        ];

        let lagrange = LagrangeBasis::new(1, &reference_points).unwrap();
        assert_eq!(lagrange.len(), 4);

        let values = lagrange.evaluate_points(&reference_points);
        let identity = Mat::<f64>::identity(4, 4);

        let approx_eq = CwiseMat(ApproxEq::eps() * 128.0 * 4.0);
        assert!(&values ~ &identity);
    }

    #[test]
    fn lagrange_basis_is_partition_of_unity() {
        let reference_points = mat![
            [0.1, 0.2, 0.0],
            [1.3, 0.0, 0.4],
            [0.0, 1.7, 0.2],
            [0.5, 0.1, 1.9f64],
        ];
        let targets = mat![[0.4, 0.4, 0.4], [-2.0, 3.0, 7.5], [10.0, -1.0, 0.0f64]];

        let lagrange = LagrangeBasis::new(1, &reference_points).unwrap();
        let values = lagrange.evaluate_points(&targets);

        // Constants are reproduced, so the basis sums to one everywhere.
        for i in 0..targets.nrows() {
            let sum: f64 = values.row(i).iter().sum();
            assert!((sum - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn lagrange_basis_rejects_coplanar_reference_points() {
        let reference_points = mat![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0f64],
        ];

        assert!(LagrangeBasis::new(1, &reference_points).is_none());
    }

    #[test]
    fn unisolvent_selection_skips_dependent_points() {
        // First four points are coplanar; the fifth lifts the set out of the plane.
        let points = mat![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.5, 0.5, 1.0f64],
        ];

        let selected = select_unisolvent_points(1, &points).unwrap();
        assert_eq!(selected.len(), 4);
        assert!(selected.contains(&4));

        let chosen = direct_rbf_utils::select_mat_rows(&points, &selected);
        assert!(LagrangeBasis::new(1, &chosen).is_some());
    }

    #[test]
    fn unisolvent_selection_fails_on_a_plane() {
        let points = mat![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.5, 0.5, 0.0f64],
        ];

        assert!(select_unisolvent_points(1, &points).is_none());
        assert!(select_unisolvent_points(0, &points).is_some());
    }
}
