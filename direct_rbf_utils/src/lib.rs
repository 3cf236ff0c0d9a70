/////////////////////////////////////////////////////////////////////////////////////////////
//
// Re-exports kernels, kernel parameters and matrix helpers used by the direct_rbf crate.
//
// Created on: 18 Oct 2026     Author: Daniel Owen
//
// Copyright (c) 2026, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # Kernels and matrix utilities for the [`direct_rbf`] crate
//!
//! Every kernel implements [`RbfKernel`], which is all the direct solver
//! needs. [`KernelParams`] plus [`AnyKernel::from_params`] select a kernel at
//! runtime, which is how fitted models are persisted.
mod covariance_kernels;
mod kernel_helpers;
mod rbf_kernels;
mod traits;
mod utils;

/// Implemented kernels for use in the [`direct_rbf`] crate.
pub mod kernels {
    pub use super::covariance_kernels::*;
    pub use super::rbf_kernels::{
        CubicRbfKernel, LinearRbfKernel, Order3, Order5, Order7, Order9, Spheroidal3RbfKernel,
        Spheroidal5RbfKernel, Spheroidal7RbfKernel, Spheroidal9RbfKernel, SpheroidalConstants,
        SpheroidalRbfKernel, SpheroidalSpec, ThinPlateSplineRbfKernel,
    };
}

pub use {
    kernel_helpers::{KernelParams, KernelParamsBuilder},
    rbf_kernels::get_distance_sq,
    traits::{KernelFromParams, RbfKernel},
    utils::{
        AnyKernel, KernelType, get_a_matrix, get_a_matrix_symmetric, get_distance,
        get_pointarray_extents, select_mat_rows,
    },
};
