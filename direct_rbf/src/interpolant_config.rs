/////////////////////////////////////////////////////////////////////////////////////////////
//
// Specifies kernel and drift options for configuring RBF interpolants.
//
// Created on: 18 Oct 2026     Author: Daniel Owen
//
// Copyright (c) 2026, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Specifies kernel and drift options for configuring RBF interpolants.
use direct_rbf_utils::{AnyKernel, KernelParams, KernelType, RbfKernel};
use serde::{Deserialize, Serialize};

/// Polynomial drift added to the RBF sum to capture large-scale trends.
///
/// Conditionally positive definite kernels need at least their minimum
/// drift (see [`get_min_drift`]) for the system to be well posed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Drift {
    /// No polynomial term.
    None,
    /// Degree 0: a constant.
    Constant,
    /// Degree 1: `1, x, y, z`.
    Linear,
    /// Degree 2: all monomials up to `x^2, xy, ...`.
    Quadratic,
}

impl Drift {
    /// Total degree of the drift polynomial, `-1` for [`Drift::None`].
    pub fn polynomial_degree(&self) -> i32 {
        match self {
            Drift::None => -1,
            Drift::Constant => 0,
            Drift::Linear => 1,
            Drift::Quadratic => 2,
        }
    }

    /// Smallest drift of at least the given polynomial degree.
    pub fn from_degree(degree: i32) -> Drift {
        match degree {
            i32::MIN..=-1 => Drift::None,
            0 => Drift::Constant,
            1 => Drift::Linear,
            _ => Drift::Quadratic,
        }
    }
}

/// Returns the minimum required [`Drift`] for the provided [`KernelType`]
pub fn get_min_drift(kernel_type: KernelType) -> Drift {
    let kernel = AnyKernel::from_params(&KernelParams::builder(kernel_type).build());
    Drift::from_degree(kernel.minimum_drift_degree())
}

/// A convenience builder for constructing a [`InterpolantSettings`] instance
/// with parameters tailored to the selected kernel type.
///
/// The builder should be called via the [`InterpolantSettings::builder`] method.
///
/// See [`InterpolantSettings`] for details on each field.
#[derive(Debug, Clone, Copy)]
pub struct InterpolantSettingsBuilder {
    pub kernel_type: KernelType,
    pub drift: Drift,
    pub nugget: f64,
    pub base_range: f64,
    pub total_sill: f64,
}

impl InterpolantSettingsBuilder {
    /// Creates a new instance of the [`InterpolantSettingsBuilder`].
    fn new(kernel_type: KernelType) -> Self {
        Self {
            kernel_type,
            drift: get_min_drift(kernel_type),
            nugget: 0.0,
            base_range: 1.0,
            total_sill: 1.0,
        }
    }

    /// Sets the drift term.
    pub fn drift(mut self, drift: Drift) -> Self {
        self.drift = drift;
        self
    }

    /// Sets the nugget (smoothing) value.
    pub fn nugget(mut self, nugget: f64) -> Self {
        self.nugget = nugget;
        self
    }

    /// Sets the base range (the range for covariance models).
    pub fn base_range(mut self, base_range: f64) -> Self {
        self.base_range = base_range;
        self
    }

    /// Sets the total sill (the partial sill for covariance models).
    pub fn total_sill(mut self, total_sill: f64) -> Self {
        self.total_sill = total_sill;
        self
    }

    /// Builds and returns an instance of [`InterpolantSettings`] from the values
    /// defined in the builder.
    pub fn build(self) -> InterpolantSettings {
        InterpolantSettings {
            kernel_params: KernelParams::builder(self.kernel_type)
                .nugget(self.nugget)
                .base_range(self.base_range)
                .total_sill(self.total_sill)
                .build(),
            drift: self.drift,
        }
    }
}

/// Kernel and drift configuration of an [`Interpolant`](crate::Interpolant).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolantSettings {
    /// The kernel and its parameters.
    ///
    /// A `nugget` of `0.0` (default) enforces an exact fit to all input data.
    /// Larger values soften the fit, which can reduce sensitivity to noisy data.
    pub kernel_params: KernelParams,

    /// The polynomial drift term added to the RBF system.
    pub drift: Drift,
}

impl InterpolantSettings {
    /// Returns a new [`InterpolantSettingsBuilder`] for the given kernel type.
    pub fn builder(kernel_type: KernelType) -> InterpolantSettingsBuilder {
        InterpolantSettingsBuilder::new(kernel_type)
    }

    /// Degree of the drift polynomial, `-1` when there is none.
    pub fn polynomial_degree(&self) -> i32 {
        self.drift.polynomial_degree()
    }

    /// Instantiates the configured kernel.
    pub fn kernel(&self) -> AnyKernel {
        AnyKernel::from_params(&self.kernel_params)
    }
}

impl From<InterpolantSettings> for KernelParams {
    /// Converts a [`InterpolantSettings`] instance into a
    /// [`direct_rbf_utils::KernelParams`].
    fn from(v: InterpolantSettings) -> Self {
        v.kernel_params
    }
}
