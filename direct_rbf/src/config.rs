/////////////////////////////////////////////////////////////////////////////////////////////
//
// Declares configuration types for the direct solver: permutation seeding and factorisation choice.
//
// Created on: 18 Oct 2026     Author: Daniel Owen
//
// Copyright (c) 2026, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Declares configuration types for the direct solver.
use serde::{Deserialize, Serialize};

/// How the system is factored when there is no polynomial drift.
///
/// With a drift term the reduced `QᵀAQ` system is always factored
/// symmetrically (LLT, falling back to LBLT).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoTrendFactorisation {
    /// Partial pivot LU of the full interpolation matrix.
    #[default]
    Lu,

    /// Symmetric factorisation (LLT, falling back to LBLT) of the full
    /// interpolation matrix. Roughly halves the factorisation cost.
    Symmetric,
}

/// Solver parameters.
///
/// ### Default Values
/// - `seed`: `None`, the point permutation is drawn from OS randomness.
/// - `no_trend_factorisation`: [`NoTrendFactorisation::Lu`]
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct Params {
    /// Seed for the random point permutation chosen during setup.
    ///
    /// The permutation decides which points become the polynomial reference
    /// points. Results agree to rounding for any permutation; set a seed
    /// when bit-for-bit reproducibility matters.
    pub seed: Option<u64>,

    /// Factorisation used when the interpolant has no drift.
    pub no_trend_factorisation: NoTrendFactorisation,
}

impl Params {
    /// Returns a new [`ParamsBuilder`] with default values.
    pub fn builder() -> ParamsBuilder {
        ParamsBuilder::default()
    }
}

/// A convenience builder for constructing a [`Params`] instance.
///
/// The builder should be called via the [`Params::builder`] method.
///
/// See [`Params`] for details on each field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamsBuilder {
    pub seed: Option<u64>,
    pub no_trend_factorisation: NoTrendFactorisation,
}

impl ParamsBuilder {
    /// Fixes the permutation seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the factorisation used without a drift term.
    pub fn no_trend_factorisation(mut self, no_trend_factorisation: NoTrendFactorisation) -> Self {
        self.no_trend_factorisation = no_trend_factorisation;
        self
    }

    /// Builds and returns a [`Params`] instance.
    pub fn build(self) -> Params {
        Params {
            seed: self.seed,
            no_trend_factorisation: self.no_trend_factorisation,
        }
    }
}
