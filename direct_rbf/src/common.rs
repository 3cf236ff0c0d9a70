/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines shared helpers for random point generation, evaluation grids, and point scaling.
//
// Created on: 18 Oct 2026     Author: Daniel Owen
//
// Copyright (c) 2026, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use faer::Mat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Returns a generator seeded from `seed`, or from the operating system's
/// randomness source when `seed` is `None`.
pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Generate a matrix of random points in the unit hypercube.
///
/// # Parameters
/// - `n`: Number of points to generate (rows in the output matrix).
/// - `d`: Number of spatial dimensions per point (columns in the output matrix).
/// - `seed`: Optional random seed.
///   - If `Some(seed)` is provided, the same sequence of points will be generated
///     deterministically across runs and platforms (useful for reproducible tests).
///   - If `None`, the generator is seeded from the operating system's randomness source.
///
/// # Returns
/// A `Mat<f64>` of shape `(n, d)` where each element lies in `[0.0, 1.0)`.
///
/// # Example
/// ```
/// use direct_rbf::generate_random_points;
///
/// // Generate 100 reproducible 3D points
/// let pts = generate_random_points(100, 3, Some(42));
/// assert_eq!(pts.ncols(), 3);
/// ```
pub fn generate_random_points(n: usize, d: usize, seed: Option<u64>) -> Mat<f64> {
    let mut rng = seeded_rng(seed);

    Mat::from_fn(n, d, |_, _| rng.random_range(0.0..1.0))
}

/// Create a regular evaluation grid from per-dimension ranges and sample counts.
///
/// # Arguments
/// * `ranges` - Inclusive `(min, max)` range for each dimension.
/// * `counts` - Number of grid samples per range; must match `ranges.len()`.
///
/// # Returns
/// A `Mat<f64>` with one row per grid point and one column per dimension. The
/// first dimension varies fastest.
pub fn create_evaluation_grid(ranges: &[(f64, f64)], counts: &[usize]) -> Mat<f64> {
    assert_eq!(ranges.len(), counts.len());

    let total_points: usize = counts.iter().product();
    let num_dimensions = ranges.len();

    Mat::from_fn(total_points, num_dimensions, |row_idx, col_idx| {
        let dim_points = counts[col_idx];
        let (start, end) = ranges[col_idx];

        if dim_points < 2 {
            return start;
        }

        let step = (end - start) / (dim_points as f64 - 1.0);
        let stride: usize = counts[..col_idx].iter().product();

        let index_in_dim = (row_idx / stride) % dim_points;
        start + step * index_in_dim as f64
    })
}

/// Compute translation and scale factors to map points into a Chebyshev cube.
///
/// The translation is the midpoint of each coordinate range and the scale
/// is half the range, with zeros replaced by `1.0` to avoid division by zero.
///
/// # Returns
/// A tuple `(translation, scale)` where each is a per-dimension factor.
pub fn get_cheb_cube_scaling_factors(point_locations: &Mat<f64>) -> (Vec<f64>, Vec<f64>) {
    let dimensions = point_locations.ncols();

    if point_locations.nrows() == 0 {
        return (vec![0.0; dimensions], vec![1.0; dimensions]);
    }

    let extents = direct_rbf_utils::get_pointarray_extents(point_locations);

    let translation_factor: Vec<f64> = (0..dimensions)
        .map(|d| (extents[d + dimensions] + extents[d]) / 2.0)
        .collect();

    let scale_factor: Vec<f64> = (0..dimensions)
        .map(|d| {
            let half_range = (extents[d + dimensions] - extents[d]) / 2.0;
            if half_range == 0.0 { 1.0 } else { half_range }
        })
        .collect();

    (translation_factor, scale_factor)
}

/// Apply translation and scaling to map points into a normalized cube.
///
/// For each coordinate `x`, applies `(x - translation_factor[d]) / scale_factor[d]`.
pub fn scale_points(points: &mut Mat<f64>, translation_factor: &[f64], scale_factor: &[f64]) {
    points.row_iter_mut().for_each(|row| {
        row.iter_mut()
            .enumerate()
            .for_each(|(col_idx, element)| {
                *element = (*element - translation_factor[col_idx]) / scale_factor[col_idx];
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::mat;

    #[test]
    fn random_points_are_reproducible() {
        let a = generate_random_points(20, 3, Some(7));
        let b = generate_random_points(20, 3, Some(7));
        let c = generate_random_points(20, 3, Some(8));

        assert_eq!(a, b);
        assert!(a != c);
        assert!(a.col_iter().all(|col| col.iter().all(|v| (0.0..1.0).contains(v))));
    }

    #[test]
    fn evaluation_grid_varies_first_dimension_fastest() {
        let grid = create_evaluation_grid(&[(0.0, 1.0), (10.0, 12.0)], &[2, 3]);

        assert_eq!(grid.nrows(), 6);
        assert_eq!(
            grid,
            mat![
                [0.0, 10.0],
                [1.0, 10.0],
                [0.0, 11.0],
                [1.0, 11.0],
                [0.0, 12.0],
                [1.0, 12.0],
            ]
        );
    }

    #[test]
    fn scaling_maps_extents_onto_unit_cube() {
        let mut points = mat![[2.0, 5.0, 1.0], [6.0, -5.0, 1.0]];
        let (translation, scale) = get_cheb_cube_scaling_factors(&points);

        assert_eq!(translation, vec![4.0, 0.0, 1.0]);
        // Flat dimension keeps a unit scale.
        assert_eq!(scale, vec![2.0, 5.0, 1.0]);

        scale_points(&mut points, &translation, &scale);
        assert_eq!(points, mat![[-1.0, 1.0, 0.0], [1.0, -1.0, 0.0]]);
    }
}
