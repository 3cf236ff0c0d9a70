/////////////////////////////////////////////////////////////////////////////////////////////
//
// Supplies general-purpose utilities for matrices, distances, kernel matrices and kernel dispatch.
//
// Created on: 18 Oct 2026     Author: Daniel Owen
//
// Copyright (c) 2026, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{KernelFromParams, KernelParams, RbfKernel};
use faer::{Mat, Row, RowRef};
use serde::{Deserialize, Serialize};

/// Returns an owned `Mat<T>` from a subset of row indices.
///
/// # Examples
///
/// ```
/// use faer::mat;
/// use direct_rbf_utils::select_mat_rows;
///
/// let matrix = mat![
///     [0.0, 1.0],
///     [1.0, 1.0],
///     [2.0, 2.0],
///     [3.0, 3.0f64],
/// ];
///
/// let sub_matrix = select_mat_rows(&matrix, &[3usize, 0]);
///
/// assert_eq!(
///     sub_matrix,
///     mat![
///         [3.0, 3.0],
///         [0.0, 1.0f64],
///     ]
/// );
/// ```
#[inline(always)]
pub fn select_mat_rows<T>(existing_mat: &Mat<T>, row_indices: &[usize]) -> Mat<T>
where
    T: Clone,
{
    Mat::from_fn(row_indices.len(), existing_mat.ncols(), |i, j| {
        existing_mat.get(row_indices[i], j).clone()
    })
}

/// Computes the axis aligned bounding box (AABB) extents of a matrix of points.
///
/// The result is arranged as `[min_0, min_1, ..., min_n, max_0, max_1, ..., max_n]`
/// where `n` is the number of columns in the matrix.
///
/// # Examples
///
/// ```
/// use faer::mat;
/// use direct_rbf_utils::get_pointarray_extents;
///
/// let points = mat![
///     [1.0, 2.0],
///     [3.0, -1.0],
///     [0.5, 4.0f64]
/// ];
/// let extents = get_pointarray_extents(&points);
/// assert_eq!(extents, vec![0.5, -1.0, 3.0, 4.0]);
/// ```
#[inline(always)]
pub fn get_pointarray_extents<T>(points: &Mat<T>) -> Vec<T>
where
    T: PartialOrd + Clone,
{
    let ncols = points.ncols();

    let mut extents: Vec<T> = Vec::with_capacity(2 * ncols);
    extents.extend((0..ncols).map(|col| points.get(0, col).clone()));
    extents.extend((0..ncols).map(|col| points.get(0, col).clone()));

    for row in points.row_iter() {
        for (col, item) in row.iter().enumerate() {
            if item < &extents[col] {
                extents[col] = item.clone();
            }
            if item > &extents[col + ncols] {
                extents[col + ncols] = item.clone();
            }
        }
    }

    extents
}

/// Calculates the euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use faer::mat;
/// use direct_rbf_utils::get_distance;
///
/// let points = mat![
///     [1.0, 2.0],
///     [4.0, 6.0],
/// ];
///
/// assert_eq!(get_distance(points.row(0), points.row(1)), 5.0);
/// ```
#[inline(always)]
pub fn get_distance(target: RowRef<f64>, source: RowRef<f64>) -> f64 {
    crate::rbf_kernels::get_distance_sq(target, source).sqrt()
}

/// Builds a dense `(n_targets x n_sources)` kernel matrix. No nugget is added.
pub fn get_a_matrix<K>(target_points: &Mat<f64>, source_points: &Mat<f64>, kernel: &K) -> Mat<f64>
where
    K: RbfKernel + ?Sized,
{
    let m = target_points.nrows();
    let n = source_points.nrows();

    let mut a_matrix = Mat::<f64>::zeros(m, n);

    for j in 0..n {
        let source = source_points.row(j);

        for i in 0..m {
            a_matrix[(i, j)] = kernel.evaluate_points(target_points.row(i), source);
        }
    }

    a_matrix
}

/// Builds the symmetric interpolation matrix of a point set.
///
/// The diagonal is `phi(0) + nugget`. Each off-diagonal pair is evaluated
/// once and mirrored, so the result is exactly symmetric.
pub fn get_a_matrix_symmetric<K>(points: &Mat<f64>, kernel: &K) -> Mat<f64>
where
    K: RbfKernel + ?Sized,
{
    let n = points.nrows();
    let mut a_matrix = Mat::<f64>::zeros(n, n);

    let diagonal = kernel.evaluate(0.0) + kernel.nugget();

    for j in 0..n {
        a_matrix[(j, j)] = diagonal;

        let source = points.row(j);

        for i in j + 1..n {
            let k_val = kernel.evaluate_points(points.row(i), source);
            a_matrix[(i, j)] = k_val;
            a_matrix[(j, i)] = k_val;
        }
    }

    a_matrix
}

// Kernel-free dispatcher generated from the kernel registry below.
// Assumes each kernel type implements `KernelFromParams` and `RbfKernel`.
macro_rules! for_each_kernel {
    ( registry = [ $( ($V:ident, $Kty:path) ),* $(,)? ] ) => {

        /// Runtime kernel selector built from the kernel registry.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum KernelType {
            $( $V, )*
        }

        /// Runtime-erased kernel so callers don't need to be generic over [`KernelType`].
        #[derive(Debug, Clone, Copy)]
        pub enum AnyKernel {
            $( $V($Kty), )*
        }

        impl AnyKernel {
            /// Instantiates the concrete kernel selected by `params.kernel_type`.
            pub fn from_params(params: &KernelParams) -> Self {
                match params.kernel_type {
                    $(
                        KernelType::$V => {
                            AnyKernel::$V(<$Kty as KernelFromParams>::from_params(params))
                        }
                    ),*
                }
            }

            /// Returns the [`KernelType`] of the wrapped kernel.
            pub fn kernel_type(&self) -> KernelType {
                match self {
                    $( Self::$V(_) => KernelType::$V, )*
                }
            }
        }

        impl RbfKernel for AnyKernel {
            #[inline]
            fn evaluate(&self, r: f64) -> f64 {
                match self {
                    $( Self::$V(k) => k.evaluate(r), )*
                }
            }

            #[inline]
            fn evaluate_derivative(&self, r: f64) -> f64 {
                match self {
                    $( Self::$V(k) => k.evaluate_derivative(r), )*
                }
            }

            #[inline]
            fn nugget(&self) -> f64 {
                match self {
                    $( Self::$V(k) => k.nugget(), )*
                }
            }

            #[inline]
            fn minimum_drift_degree(&self) -> i32 {
                match self {
                    $( Self::$V(k) => k.minimum_drift_degree(), )*
                }
            }

            #[inline]
            fn evaluate_points(&self, target: RowRef<f64>, source: RowRef<f64>) -> f64 {
                match self {
                    $( Self::$V(k) => k.evaluate_points(target, source), )*
                }
            }

            #[inline]
            fn evaluate_gradient(&self, target: RowRef<f64>, source: RowRef<f64>) -> Row<f64> {
                match self {
                    $( Self::$V(k) => k.evaluate_gradient(target, source), )*
                }
            }
        }
    };
}

for_each_kernel! {
    registry = [
        (SphericalVariogram,   crate::kernels::SphericalVariogram),
        (ExponentialVariogram, crate::kernels::ExponentialVariogram),
        (GaussianVariogram,    crate::kernels::GaussianVariogram),
        (LinearRbf,            crate::kernels::LinearRbfKernel),
        (ThinPlateSplineRbf,   crate::kernels::ThinPlateSplineRbfKernel),
        (CubicRbf,             crate::kernels::CubicRbfKernel),
        (Spheroidal3Rbf,       crate::kernels::Spheroidal3RbfKernel),
        (Spheroidal5Rbf,       crate::kernels::Spheroidal5RbfKernel),
        (Spheroidal7Rbf,       crate::kernels::Spheroidal7RbfKernel),
        (Spheroidal9Rbf,       crate::kernels::Spheroidal9RbfKernel),
    ]
}
