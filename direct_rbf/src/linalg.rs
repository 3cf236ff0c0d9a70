/////////////////////////////////////////////////////////////////////////////////////////////
//
// Adds dense factorisation wrappers (LLT, Bunch-Kaufman LBLT, partial pivot LU) and precision helpers.
//
// Created on: 18 Oct 2026     Author: Daniel Owen
//
// Copyright (c) 2026, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # linalg
//!
//! Helper linear algebra functionality for the direct solver.
//!
//! Symmetric systems are factored with a Cholesky LLT first, which is the
//! cheapest option and succeeds whenever the matrix is numerically positive
//! definite. When it fails the Bunch-Kaufman LBLT factorisation is used
//! instead, which only requires symmetry.

use faer::{
    self, Conj, Mat, Par,
    diag::Diag,
    dyn_stack::{MemBuffer, MemStack},
    linalg::{cholesky::llt, solvers::PartialPivLu, solvers::Solve, triangular_solve},
    mat::*,
    perm::Perm,
    prelude::*,
    reborrow::ReborrowMut,
};

use faer_traits::{ComplexField, RealField, math_utils::one};
use std::fmt::{self, Debug};

/// Working precision of the direct solver.
///
/// Inputs are always `f64`; they are narrowed to `Self` before factorisation
/// and results are widened back to `f64`.
pub trait Floating: RealField + Copy + Debug + Send + Sync + 'static {
    /// Human readable name, used in progress messages.
    const NAME: &'static str;

    /// Machine epsilon of the working precision.
    const EPSILON: f64;

    fn from_f64(value: f64) -> Self;

    fn to_f64(self) -> f64;
}

impl Floating for f64 {
    const NAME: &'static str = "f64";
    const EPSILON: f64 = f64::EPSILON;

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }
}

impl Floating for f32 {
    const NAME: &'static str = "f32";
    const EPSILON: f64 = f32::EPSILON as f64;

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// Narrows an `f64` matrix to the working precision.
pub(crate) fn to_precision<T: Floating>(matrix: MatRef<'_, f64>) -> Mat<T> {
    Mat::from_fn(matrix.nrows(), matrix.ncols(), |i, j| {
        T::from_f64(*matrix.get(i, j))
    })
}

/// Widens a working precision matrix back to `f64`.
pub(crate) fn to_f64<T: Floating>(matrix: MatRef<'_, T>) -> Mat<f64> {
    Mat::from_fn(matrix.nrows(), matrix.ncols(), |i, j| matrix.get(i, j).to_f64())
}

/// `true` when no entry is NaN or infinite.
pub(crate) fn all_finite<T: Floating>(matrix: MatRef<'_, T>) -> bool {
    matrix
        .col_iter()
        .all(|col| col.iter().all(|val| val.to_f64().is_finite()))
}

#[derive(Debug)]
pub enum FactorizationError {
    NotSpd, // LLT failed (matrix not SPD or numerically indefinite)
}

/// The factorisation a [`SystemFactor`] ended up using.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorisationKind {
    /// Cholesky, for numerically positive definite systems.
    Llt,

    /// Bunch-Kaufman with symmetric pivoting, for symmetric indefinite systems.
    Lblt,

    /// Partial pivot LU, for general square systems.
    PartialPivLu,
}

impl fmt::Display for FactorisationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactorisationKind::Llt => write!(f, "LLT"),
            FactorisationKind::Lblt => write!(f, "LBLT"),
            FactorisationKind::PartialPivLu => write!(f, "partial pivot LU"),
        }
    }
}

/// Factorisation of a dense system matrix, reused for any number of solves.
pub enum SystemFactor<T: Floating> {
    Llt(Llt<T>),
    Lblt(Lblt<T>),
    Lu { factor: PartialPivLu<T>, dim: usize },
}

impl<T: Floating> Debug for SystemFactor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemFactor")
            .field("kind", &self.kind())
            .field("dim", &self.dim())
            .finish()
    }
}

impl<T: Floating> SystemFactor<T> {
    /// Try LLᵀ first. If it fails (matrix not SPD / numerically indefinite),
    /// fall back to Bunch–Kaufman LBLᵀ. Only the lower triangle of `a` is read.
    pub fn symmetric(a: MatRef<'_, T>) -> Self {
        match Llt::<T>::try_new(a) {
            Ok(llt) => SystemFactor::Llt(llt),
            Err(_) => SystemFactor::Lblt(Lblt::<T>::new(a)),
        }
    }

    /// Partial pivot LU of a general square matrix.
    pub fn lu(a: MatRef<'_, T>) -> Self {
        SystemFactor::Lu {
            factor: a.partial_piv_lu(),
            dim: a.nrows(),
        }
    }

    pub fn kind(&self) -> FactorisationKind {
        match self {
            SystemFactor::Llt(_) => FactorisationKind::Llt,
            SystemFactor::Lblt(_) => FactorisationKind::Lblt,
            SystemFactor::Lu { .. } => FactorisationKind::PartialPivLu,
        }
    }

    /// Order of the factored matrix.
    pub fn dim(&self) -> usize {
        match self {
            SystemFactor::Llt(s) => s.dim(),
            SystemFactor::Lblt(s) => s.dim(),
            SystemFactor::Lu { dim, .. } => *dim,
        }
    }

    /// Ratio of the smallest to the largest pivot magnitude.
    ///
    /// Pivots are the squared diagonal of L for LLT, the eigenvalues of each
    /// 1x1 or 2x2 block of B for LBLT, and the diagonal of U for LU.
    pub fn pivot_ratio(&self) -> f64 {
        let pivots: Vec<f64> = match self {
            SystemFactor::Llt(s) => s
                .L
                .diagonal()
                .column_vector()
                .iter()
                .map(|l| l.to_f64() * l.to_f64())
                .collect(),
            SystemFactor::Lblt(s) => s.block_pivots(),
            SystemFactor::Lu { factor, .. } => factor
                .U()
                .diagonal()
                .column_vector()
                .iter()
                .map(|u| u.to_f64().abs())
                .collect(),
        };

        let (min, max) = pivots
            .iter()
            .fold((f64::INFINITY, 0.0f64), |(min, max), &p| (min.min(p), max.max(p)));

        match pivots.is_empty() {
            true => 1.0,
            false if max > 0.0 && min.is_finite() => min / max,
            false => 0.0,
        }
    }

    /// `true` when the pivot ratio is below `dim * eps` of the working precision.
    pub fn is_singular(&self) -> bool {
        self.pivot_ratio() < self.dim() as f64 * <T as Floating>::EPSILON
    }

    pub fn solve(&self, rhs: &Mat<T>) -> Mat<T> {
        match self {
            SystemFactor::Llt(s) => s.solve(rhs),
            SystemFactor::Lblt(s) => s.solve(rhs),
            SystemFactor::Lu { factor, .. } => factor.solve(rhs.as_ref()),
        }
    }
}

/// Dense Cholesky factor `A = L Lᵀ`, holding only the lower triangle.
#[allow(non_snake_case)]
pub struct Llt<T> {
    L: Mat<T>,
}

#[allow(non_snake_case)]
impl<T: ComplexField> Llt<T> {
    /// Returns the LLT factorization of the lower triangle of A.
    pub fn try_new(A: MatRef<'_, T>) -> Result<Self, FactorizationError> {
        assert!(A.nrows() == A.ncols());

        let n = A.nrows();
        let par = faer::get_global_parallelism();

        let cholesky_memory = llt::factor::cholesky_in_place_scratch::<T>(n, par, default());
        let mut memory = MemBuffer::new(cholesky_memory);
        let stack = MemStack::new(&mut memory);

        let mut L = Mat::<T>::zeros(n, n);
        L.copy_from_triangular_lower(A);

        llt::factor::cholesky_in_place(L.rb_mut(), default(), par, stack, default())
            .map_err(|_| FactorizationError::NotSpd)?;

        Ok(Self { L })
    }

    pub fn dim(&self) -> usize {
        self.L.nrows()
    }

    pub fn solve(&self, rhs: &Mat<T>) -> Mat<T> {
        let par = faer::get_global_parallelism();
        let mut X = rhs.clone();

        // Forward substitution: L Y = B
        triangular_solve::solve_lower_triangular_in_place(self.L.as_ref(), X.rb_mut(), par);

        // Backward substitution: Lᵀ X = Y
        triangular_solve::solve_upper_triangular_in_place(self.L.transpose(), X.rb_mut(), par);

        X
    }
}

/// Bunch-Kaufman factor `P A Pᵀ = L B Lᵀ` with `B` block diagonal (1x1 and
/// 2x2 blocks).
#[allow(non_snake_case)]
pub struct Lblt<T> {
    L: Mat<T>,
    B_diag: Diag<T>,
    B_subdiag: Diag<T>,
    P: Perm<usize>,
}

#[allow(non_snake_case)]
impl<T: ComplexField> Lblt<T> {
    /// Returns the Bunch-Kaufman factorization of the lower triangle of A.
    pub fn new(A: MatRef<'_, T>) -> Self {
        assert!(A.nrows() == A.ncols());

        let n = A.nrows();

        let mut L = Mat::zeros(n, n);
        L.copy_from_triangular_lower(A);

        let par = faer::get_global_parallelism();

        let mut diag = Diag::zeros(n);
        let mut subdiag = Diag::zeros(n);
        let mut perm_fwd = vec![0usize; n];
        let mut perm_bwd = vec![0usize; n];

        let mut mem = MemBuffer::new(
            faer::linalg::cholesky::lblt::factor::cholesky_in_place_scratch::<usize, T>(
                n,
                par,
                default(),
            ),
        );

        let stack = MemStack::new(&mut mem);

        faer::linalg::cholesky::lblt::factor::cholesky_in_place(
            L.as_mut(),
            subdiag.as_mut(),
            &mut perm_fwd,
            &mut perm_bwd,
            par,
            stack,
            default(),
        );

        diag.copy_from(L.diagonal());
        L.diagonal_mut().fill(one());

        Self {
            L,
            B_diag: diag,
            B_subdiag: subdiag,
            P: unsafe {
                Perm::new_unchecked(perm_fwd.into_boxed_slice(), perm_bwd.into_boxed_slice())
            },
        }
    }

    pub fn dim(&self) -> usize {
        self.L.nrows()
    }

    pub fn solve(&self, rhs: &Mat<T>) -> Mat<T> {
        let mut rhs = rhs.cloned();
        self.solve_in_place_with_conj_impl(rhs.as_mut(), Conj::No);
        rhs
    }

    fn solve_in_place_with_conj_impl(&self, rhs: MatMut<'_, T>, conj: Conj) {
        let par: Par = faer::get_global_parallelism();

        let mut mem = MemBuffer::new(
            faer::linalg::cholesky::lblt::solve::solve_in_place_scratch::<usize, T>(
                self.L.nrows(),
                rhs.ncols(),
                par,
            ),
        );
        let stack = MemStack::new(&mut mem);

        faer::linalg::cholesky::lblt::solve::solve_in_place_with_conj(
            self.L.as_ref(),
            self.B_diag.as_ref(),
            self.B_subdiag.as_ref(),
            conj,
            self.P.as_ref(),
            rhs,
            par,
            stack,
        );
    }
}

impl<T: Floating> Lblt<T> {
    /// Eigenvalue magnitudes of the diagonal blocks of B.
    ///
    /// A nonzero subdiagonal entry at `i` marks a 2x2 block over `i, i + 1`.
    fn block_pivots(&self) -> Vec<f64> {
        let diag = self.B_diag.column_vector();
        let subdiag = self.B_subdiag.column_vector();
        let n = diag.nrows();

        let mut pivots = Vec::with_capacity(n);
        let mut i = 0;

        while i < n {
            let a = diag[i].to_f64();
            let b = subdiag[i].to_f64();

            if b != 0.0 && i + 1 < n {
                let c = diag[i + 1].to_f64();
                let mean = 0.5 * (a + c);
                let radius = (0.25 * (a - c) * (a - c) + b * b).sqrt();

                pivots.push((mean + radius).abs());
                pivots.push((mean - radius).abs());
                i += 2;
            } else {
                pivots.push(a.abs());
                i += 1;
            }
        }

        pivots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::{self, Side, prelude::Solve, utils::approx::*};

    /// Deterministic SPD matrix: A = M M^T + alpha I.
    fn make_spd(n: usize, alpha: f64) -> Mat<f64> {
        let mut m = Mat::<f64>::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                let x = (i as f64 + 1.0) * (j as f64 + 2.0);
                m[(i, j)] = (x.sin() + 2.0 * x.cos()) / (1.0 + (i + j + 1) as f64);
            }
        }
        let mut a = &m * m.transpose();
        for i in 0..n {
            a[(i, i)] += alpha.max(1e-3);
        }
        a
    }

    /// Symmetric, diagonally dominant, with alternating signs on the diagonal.
    fn make_indefinite(n: usize) -> Mat<f64> {
        Mat::from_fn(n, n, |i, j| {
            if i == j {
                let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
                sign * (i as f64 + 4.0)
            } else {
                0.1 * ((i + j) as f64).sin()
            }
        })
    }

    #[test]
    fn llt_matches_standard_solve() {
        let n = 7usize;
        let a = make_spd(n, 1e-2);
        let b = Mat::<f64>::from_fn(n, 3, |i, j| ((i + j + 2) as f64).sin());

        let llt = Llt::<f64>::try_new(a.as_ref()).expect("LLᵀ should succeed for SPD");
        let x_llt = llt.solve(&b);

        let x_std = a.llt(Side::Lower).unwrap().solve(&b);

        let approx_eq = CwiseMat(ApproxEq::eps() * 128.0 * (n as f64));

        assert!(&a * &x_llt ~ b);
        assert!(&x_llt ~ &x_std);
    }

    #[test]
    fn llt_rejects_indefinite() {
        let a = make_indefinite(6);
        assert!(Llt::<f64>::try_new(a.as_ref()).is_err());
    }

    #[test]
    fn lblt_solves_indefinite() {
        let n = 6usize;
        let a = make_indefinite(n);
        let b = Mat::<f64>::from_fn(n, 2, |i, j| (i + 1 + 3 * j) as f64 / (1.0 + i as f64));

        let lblt = Lblt::<f64>::new(a.as_ref());
        let x = lblt.solve(&b);

        let approx_eq = CwiseMat(ApproxEq::eps() * 128.0 * (n as f64));
        assert!(&a * &x ~ b);
    }

    #[test]
    fn symmetric_factor_falls_back_to_lblt() {
        let spd = make_spd(5, 1e-2);
        let indefinite = make_indefinite(5);

        let spd_factor = SystemFactor::<f64>::symmetric(spd.as_ref());
        let indefinite_factor = SystemFactor::<f64>::symmetric(indefinite.as_ref());

        assert_eq!(spd_factor.kind(), FactorisationKind::Llt);
        assert_eq!(indefinite_factor.kind(), FactorisationKind::Lblt);
        assert_eq!(indefinite_factor.dim(), 5);
    }

    #[test]
    fn repeated_rows_are_flagged_singular() {
        let spd = make_spd(5, 1e-2);

        // Rows and columns 0 and 1 are both copies of the first row of `spd`.
        let repeated = Mat::<f64>::from_fn(6, 6, |i, j| spd[(i.saturating_sub(1), j.saturating_sub(1))]);

        assert!(SystemFactor::<f64>::symmetric(repeated.as_ref()).is_singular());
        assert!(SystemFactor::<f64>::lu(repeated.as_ref()).is_singular());

        let spd_factor = SystemFactor::<f64>::symmetric(spd.as_ref());
        assert!(!spd_factor.is_singular());
        assert!(spd_factor.pivot_ratio() > 1e-6);

        assert!(!SystemFactor::<f64>::symmetric(make_indefinite(6).as_ref()).is_singular());
        assert!(!SystemFactor::<f64>::lu(spd.as_ref()).is_singular());
    }

    #[test]
    fn lu_factor_solves_nonsymmetric() {
        let n = 5usize;
        let a = Mat::<f64>::from_fn(n, n, |i, j| {
            if i == j { 10.0 } else { (i as f64) - 0.5 * (j as f64) }
        });
        let b = Mat::<f64>::from_fn(n, 1, |i, _| i as f64);

        let factor = SystemFactor::<f64>::lu(a.as_ref());
        assert_eq!(factor.kind(), FactorisationKind::PartialPivLu);

        let x = factor.solve(&b);

        let approx_eq = CwiseMat(ApproxEq::eps() * 128.0 * (n as f64));
        assert!(&a * &x ~ b);
    }

    #[test]
    fn single_precision_factor() {
        let n = 6usize;
        let a = make_spd(n, 1.0);
        let b = Mat::<f64>::from_fn(n, 1, |i, _| 1.0 + i as f64);

        let a32 = to_precision::<f32>(a.as_ref());
        let b32 = to_precision::<f32>(b.as_ref());

        let x32 = SystemFactor::<f32>::symmetric(a32.as_ref()).solve(&b32);
        let x = to_f64(x32.as_ref());

        let x_ref = a.llt(Side::Lower).unwrap().solve(&b);

        for i in 0..n {
            assert!((x[(i, 0)] - x_ref[(i, 0)]).abs() < 1e-3 * (1.0 + x_ref[(i, 0)].abs()));
        }
    }

    #[test]
    fn finiteness_check() {
        let mut a = make_spd(3, 1.0);
        assert!(all_finite(a.as_ref()));

        a[(1, 2)] = f64::NAN;
        assert!(!all_finite(a.as_ref()));

        a[(1, 2)] = f64::INFINITY;
        assert!(!all_finite(a.as_ref()));
    }
}
