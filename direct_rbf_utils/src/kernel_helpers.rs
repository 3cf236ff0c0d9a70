/////////////////////////////////////////////////////////////////////////////////////////////
//
// Provides parameter and builder types for configuring RBF kernels.
//
// Created on: 18 Oct 2026     Author: Daniel Owen
//
// Copyright (c) 2026, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::utils::KernelType;
use serde::{Deserialize, Serialize};

/// Defines the [`KernelType`] to use, along with the parameter values shared by
/// the parameterised kernels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KernelParams {
    /// KernelType enum variant to use.
    pub kernel_type: KernelType,

    /// Distance scale of the kernel.
    ///
    /// For covariance models this is the range: the spherical model reaches
    /// zero at `base_range`, the exponential and Gaussian models decay with
    /// `r / base_range`. For spheroidal kernels it controls how quickly the
    /// interpolant decays with distance from each point.
    /// Unused by the linear, thin plate spline and cubic kernels.
    pub base_range: f64,

    /// Value of the kernel at `r = 0` (the partial sill for covariance models).
    /// Unused by the linear, thin plate spline and cubic kernels.
    pub total_sill: f64,

    /// Added to the diagonal of the interpolation matrix. Models measurement
    /// noise and smooths the fit; `0.0` gives exact interpolation.
    pub nugget: f64,
}

impl KernelParams {
    /// Begins building a [`KernelParams`] instance for the given kernel type.
    pub fn builder(kernel_type: KernelType) -> KernelParamsBuilder {
        KernelParamsBuilder {
            kernel_type,
            base_range: 1.0,
            total_sill: 1.0,
            nugget: 0.0,
        }
    }
}

/// Builder for [`KernelParams`] that provides sensible defaults.
#[derive(Debug, Clone, Copy)]
pub struct KernelParamsBuilder {
    kernel_type: KernelType,
    base_range: f64,
    total_sill: f64,
    nugget: f64,
}

impl KernelParamsBuilder {
    /// Sets the `base_range` parameter on the builder.
    pub fn base_range(mut self, v: f64) -> Self {
        self.base_range = v;
        self
    }

    /// Sets the `total_sill` parameter on the builder.
    pub fn total_sill(mut self, v: f64) -> Self {
        self.total_sill = v;
        self
    }

    /// Sets the `nugget` parameter on the builder.
    pub fn nugget(mut self, v: f64) -> Self {
        self.nugget = v;
        self
    }

    /// Finalises the builder into a [`KernelParams`] value.
    pub fn build(self) -> KernelParams {
        assert!(self.base_range > 0.0, "base_range must be positive");
        assert!(self.nugget >= 0.0, "nugget must be non-negative");
        KernelParams {
            kernel_type: self.kernel_type,
            base_range: self.base_range,
            total_sill: self.total_sill,
            nugget: self.nugget,
        }
    }
}
