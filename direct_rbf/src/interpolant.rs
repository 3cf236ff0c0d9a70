/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements the RBF interpolant: fitting with the direct solver, evaluation and persistence.
//
// Created on: 18 Oct 2026     Author: Daniel Owen
//
// Copyright (c) 2026, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{
    config::Params,
    interpolant_config::{get_min_drift, Drift, InterpolantSettings},
    polynomials::MonomialBasis,
    progress::{emit_with, ProgressMsg, ProgressSink},
    solver::{Coefficients, DirectSolver, SolverError, POINT_DIMENSIONS},
};

use direct_rbf_utils::RbfKernel;
use faer::{Mat, MatRef};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fmt,
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

pub type InterpolantResult<T> = std::result::Result<T, InterpolantError>;

/// Errors returned while configuring, fitting or evaluating an [`Interpolant`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpolantError {
    /// The direct solver rejected the points or values.
    Solver(SolverError),

    /// The drift is below the kernel's minimum, so the system is not well posed.
    DriftTooLow { drift: Drift, minimum: Drift },

    /// Evaluation was requested before [`Interpolant::fit`].
    NotFitted,

    /// Target points have a different number of coordinates than the fitted points.
    TargetDimensionMismatch { expected: usize, found: usize },
}

impl fmt::Display for InterpolantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpolantError::Solver(err) => write!(f, "solver error: {}", err),
            InterpolantError::DriftTooLow { drift, minimum } => write!(
                f,
                "drift {:?} is below the kernel's minimum drift {:?}",
                drift, minimum
            ),
            InterpolantError::NotFitted => write!(f, "interpolant has not been fitted"),
            InterpolantError::TargetDimensionMismatch { expected, found } => write!(
                f,
                "target points have {} coordinates, expected {}",
                found, expected
            ),
        }
    }
}

impl Error for InterpolantError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InterpolantError::Solver(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SolverError> for InterpolantError {
    fn from(err: SolverError) -> Self {
        InterpolantError::Solver(err)
    }
}

/// A convenience builder for constructing an [`Interpolant`].
///
/// The builder should be called via the [`Interpolant::builder`] method.
pub struct InterpolantBuilder {
    settings: InterpolantSettings,
    params: Params,
    progress_callback: Option<Arc<dyn ProgressSink>>,
}

impl InterpolantBuilder {
    /// Sets custom solver parameters.
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Optional callback for reporting solver progress.
    ///
    /// Skipped during serialization.
    pub fn progress_callback(mut self, progress_callback: Arc<dyn ProgressSink>) -> Self {
        self.progress_callback = Some(progress_callback);
        self
    }

    /// Builds an unfitted [`Interpolant`].
    ///
    /// Fails with [`InterpolantError::DriftTooLow`] if the drift is below the
    /// kernel's minimum.
    pub fn build(self) -> InterpolantResult<Interpolant> {
        let minimum = get_min_drift(self.settings.kernel_params.kernel_type);

        if self.settings.drift < minimum {
            return Err(InterpolantError::DriftTooLow {
                drift: self.settings.drift,
                minimum,
            });
        }

        Ok(Interpolant {
            settings: self.settings,
            params: self.params,
            points: None,
            coefficients: None,
            progress_callback: self.progress_callback,
        })
    }
}

/// A global RBF interpolant in three dimensions.
///
/// The value at `x` is
///
/// ```text
/// s(x) = sum_j lambda_j * phi(|x - x_j|) + sum_i c_i * p_i(x)
/// ```
///
/// where the `p_i` are the drift monomials. Coefficients for every value
/// column are found together by [`DirectSolver`] when the interpolant is
/// fitted.
#[derive(Serialize, Deserialize, Debug)]
pub struct Interpolant {
    /// Kernel and drift configuration.
    settings: InterpolantSettings,

    /// Solver parameters.
    pub params: Params,

    /// Coordinates of the fitted points.
    points: Option<Mat<f64>>,

    /// Solved coefficients for the RBF and polynomial terms.
    coefficients: Option<Coefficients>,

    /// Optional callback for reporting solver progress.
    /// Skipped during serialization.
    #[serde(skip, default)]
    progress_callback: Option<Arc<dyn ProgressSink>>,
}

impl Interpolant {
    /// Creates a new [`InterpolantBuilder`] for the given settings with
    /// default [`Params`].
    pub fn builder(settings: InterpolantSettings) -> InterpolantBuilder {
        InterpolantBuilder {
            settings,
            params: Params::default(),
            progress_callback: None,
        }
    }

    pub fn settings(&self) -> &InterpolantSettings {
        &self.settings
    }

    pub fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }

    /// The fitted points, if any.
    pub fn points(&self) -> Option<&Mat<f64>> {
        self.points.as_ref()
    }

    /// The solved coefficients, if fitted.
    pub fn coefficients(&self) -> Option<&Coefficients> {
        self.coefficients.as_ref()
    }

    /// Fits the interpolant to `values` at `points`, one column per value set.
    ///
    /// Replaces any previous fit. On failure the previous fit is kept.
    pub fn fit(&mut self, points: Mat<f64>, values: MatRef<'_, f64>) -> InterpolantResult<()> {
        let start = Instant::now();
        let kernel = self.settings.kernel();

        let mut builder = DirectSolver::builder(&kernel, self.settings.polynomial_degree(), points.nrows())
            .maybe_seed(self.params.seed)
            .no_trend_factorisation(self.params.no_trend_factorisation);

        if let Some(sink) = &self.progress_callback {
            builder = builder.progress_callback(sink.clone());
        }

        let solver = builder.build_with_points(&points)?;
        let coefficients = solver.solve(values)?;

        let num_points = points.nrows();
        self.points = Some(points);
        self.coefficients = Some(coefficients);

        emit_with(&self.progress_callback, || ProgressMsg::Message {
            message: format!(
                "Fitted {} points with {:?} kernel in {:.2?}",
                num_points,
                self.settings.kernel_params.kernel_type,
                start.elapsed()
            ),
        });

        Ok(())
    }

    fn fitted(&self) -> InterpolantResult<(&Mat<f64>, &Coefficients)> {
        match (&self.points, &self.coefficients) {
            (Some(points), Some(coefficients)) => Ok((points, coefficients)),
            _ => Err(InterpolantError::NotFitted),
        }
    }

    fn check_targets(target_points: &Mat<f64>) -> InterpolantResult<()> {
        match target_points.ncols() == POINT_DIMENSIONS {
            true => Ok(()),
            false => Err(InterpolantError::TargetDimensionMismatch {
                expected: POINT_DIMENSIONS,
                found: target_points.ncols(),
            }),
        }
    }

    /// Evaluates the interpolant at `target_points`.
    ///
    /// Returns a `(n_targets x n_value_columns)` matrix. Target rows are
    /// evaluated in parallel.
    pub fn evaluate(&self, target_points: &Mat<f64>) -> InterpolantResult<Mat<f64>> {
        let (points, coefficients) = self.fitted()?;
        Self::check_targets(target_points)?;

        let kernel = self.settings.kernel();
        let lambda = &coefficients.point_coefficients;
        let num_columns = lambda.ncols();

        let rows: Vec<Vec<f64>> = (0..target_points.nrows())
            .into_par_iter()
            .map(|i| {
                let target = target_points.row(i);
                let mut acc = vec![0.0; num_columns];

                for j in 0..points.nrows() {
                    let phi = kernel.evaluate_points(target, points.row(j));
                    acc.iter_mut()
                        .enumerate()
                        .for_each(|(c, v)| *v += phi * lambda[(j, c)]);
                }

                acc
            })
            .collect();

        let mut values = Mat::from_fn(target_points.nrows(), num_columns, |i, c| rows[i][c]);

        if let Some(poly) = &coefficients.poly_coefficients {
            let monomials = MonomialBasis::new(self.settings.polynomial_degree(), POINT_DIMENSIONS)
                .evaluate_points(target_points);
            values += monomials * poly;
        }

        Ok(values)
    }

    /// Evaluates the gradient of the interpolant at `target_points`.
    ///
    /// Returns one `(n_targets x 3)` matrix per value column.
    pub fn evaluate_gradient(&self, target_points: &Mat<f64>) -> InterpolantResult<Vec<Mat<f64>>> {
        let (points, coefficients) = self.fitted()?;
        Self::check_targets(target_points)?;

        let kernel = self.settings.kernel();
        let lambda = &coefficients.point_coefficients;
        let num_columns = lambda.ncols();
        let num_targets = target_points.nrows();

        // Flattened (column, axis) per target row.
        let rows: Vec<Vec<f64>> = (0..num_targets)
            .into_par_iter()
            .map(|i| {
                let target = target_points.row(i);
                let mut acc = vec![0.0; num_columns * POINT_DIMENSIONS];

                for j in 0..points.nrows() {
                    let grad = kernel.evaluate_gradient(target, points.row(j));
                    for c in 0..num_columns {
                        for axis in 0..POINT_DIMENSIONS {
                            acc[c * POINT_DIMENSIONS + axis] += lambda[(j, c)] * grad[axis];
                        }
                    }
                }

                acc
            })
            .collect();

        let mut gradients: Vec<Mat<f64>> = (0..num_columns)
            .map(|c| {
                Mat::from_fn(num_targets, POINT_DIMENSIONS, |i, axis| {
                    rows[i][c * POINT_DIMENSIONS + axis]
                })
            })
            .collect();

        if let Some(poly) = &coefficients.poly_coefficients {
            let monomial_gradients =
                MonomialBasis::new(self.settings.polynomial_degree(), POINT_DIMENSIONS)
                    .evaluate_gradients(target_points);

            for (axis, monomial_gradient) in monomial_gradients.iter().enumerate() {
                let poly_part = monomial_gradient * poly;

                for (c, gradient) in gradients.iter_mut().enumerate() {
                    for i in 0..num_targets {
                        gradient[(i, axis)] += poly_part[(i, c)];
                    }
                }
            }
        }

        Ok(gradients)
    }

    /// Evaluates the interpolant at the fitted points.
    ///
    /// - When `add_nugget = true`, the nugget contribution `nugget * lambda`
    ///   is added back so the result reproduces the input values.
    /// - When `add_nugget = false`, you observe the smoothed fit.
    pub fn evaluate_at_source(&self, add_nugget: bool) -> InterpolantResult<Mat<f64>> {
        let (points, coefficients) = self.fitted()?;
        let mut values = self.evaluate(points)?;

        if add_nugget {
            let nugget = self.settings.kernel_params.nugget;
            values
                .row_iter_mut()
                .zip(coefficients.point_coefficients.row_iter())
                .for_each(|(mut a, b)| a += &b * nugget);
        }

        Ok(values)
    }

    /// Save this interpolant to a **JSON envelope** `{ format, version, model }`.
    ///
    /// Files produced here are intended to be read back with [`Interpolant::load_model`].
    ///
    /// ### Errors
    /// - Returns `ModelIOError::{Create, Serialize, Flush}` on I/O or serialization
    ///   failures.
    pub fn save_model<P: AsRef<Path>>(&self, path: P) -> ModelIOResult<()> {
        let path_ref = path.as_ref();
        let file = File::create(path_ref).map_err(|e| ModelIOError::Create {
            path: path_ref.to_path_buf(),
            source: e,
        })?;
        let mut w = BufWriter::new(file);

        let env = JsonEnvelopeRef {
            format: JSON_FORMAT_NAME,
            version: JSON_VERSION,
            model: self,
        };

        serde_json::to_writer_pretty(&mut w, &env).map_err(|e| ModelIOError::Serialize {
            path: path_ref.to_path_buf(),
            source: e,
        })?;
        w.flush().map_err(|e| ModelIOError::Flush {
            path: path_ref.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }

    /// Load an interpolant from a versioned **JSON envelope**, validating format & version.
    ///
    /// If `progress` is `Some`, the sink is attached to the returned model so
    /// that later fits report progress.
    ///
    /// ### Errors
    /// - Returns `ModelIOError::{Open, Parse, FormatMismatch, VersionMismatch}` as appropriate.
    ///
    /// ### Example
    /// ```no_run
    /// # use direct_rbf::{Interpolant, progress::{closure_sink, ProgressMsg}};
    /// let (sink, _listener) = closure_sink(256, |msg: ProgressMsg| { /* handle */ });
    /// let interpolant = Interpolant::load_model("rbf_model.json", Some(sink))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load_model<P: AsRef<Path>>(
        path: P,
        progress: Option<Arc<dyn ProgressSink>>,
    ) -> ModelIOResult<Self> {
        let path_ref = path.as_ref();

        let file = File::open(path_ref).map_err(|e| ModelIOError::Open {
            path: path_ref.to_path_buf(),
            source: e,
        })?;
        let reader = BufReader::new(file);

        let env: JsonEnvelopeOwned<Self> =
            serde_json::from_reader(reader).map_err(|e| ModelIOError::Parse {
                path: path_ref.to_path_buf(),
                source: e,
            })?;

        if env.format != JSON_FORMAT_NAME {
            return Err(ModelIOError::FormatMismatch {
                path: path_ref.to_path_buf(),
                found: env.format,
                expected: JSON_FORMAT_NAME,
            });
        }

        if env.version != JSON_VERSION {
            return Err(ModelIOError::VersionMismatch {
                path: path_ref.to_path_buf(),
                found: env.version,
                expected: JSON_VERSION,
            });
        }

        let mut model = env.model;
        model.progress_callback = progress;
        Ok(model)
    }
}

const JSON_FORMAT_NAME: &str = "direct_rbf.json";
const JSON_VERSION: u32 = 1;

/// Borrowing envelope for SAVE (no clone of the model).
#[derive(Serialize)]
struct JsonEnvelopeRef<'a, T: ?Sized> {
    format: &'static str,
    version: u32,
    #[serde(flatten)]
    model: &'a T,
}

/// Owning envelope for LOAD (generic over the concrete model).
#[derive(Serialize, Deserialize)]
struct JsonEnvelopeOwned<T> {
    format: String,
    version: u32,
    #[serde(flatten)]
    model: T,
}

pub type ModelIOResult<T> = std::result::Result<T, ModelIOError>;

/// Errors that can occur when saving or loading an [`Interpolant`] model.
#[derive(Debug)]
pub enum ModelIOError {
    /// Failed to create the target file before writing a model.
    Create { path: PathBuf, source: io::Error },
    /// Failed to open an existing model file for reading.
    Open { path: PathBuf, source: io::Error },
    /// Failed to flush buffered output when finishing a write.
    Flush { path: PathBuf, source: io::Error },
    /// Error serializing the in-memory model to JSON.
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Error parsing JSON when reading a model from disk.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The JSON `format` field does not match the expected model format.
    FormatMismatch {
        path: PathBuf,
        found: String,
        expected: &'static str,
    },
    /// The JSON `version` field does not match the supported version.
    VersionMismatch {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
}

impl fmt::Display for ModelIOError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelIOError::Create { path, source } => {
                write!(f, "creating {}: {}", path.display(), source)
            }
            ModelIOError::Open { path, source } => {
                write!(f, "opening {}: {}", path.display(), source)
            }
            ModelIOError::Flush { path, source } => {
                write!(f, "flushing {}: {}", path.display(), source)
            }
            ModelIOError::Serialize { path, source } => {
                write!(f, "serializing JSON to {}: {}", path.display(), source)
            }
            ModelIOError::Parse { path, source } => {
                write!(f, "parsing JSON in {}: {}", path.display(), source)
            }
            ModelIOError::FormatMismatch {
                path,
                found,
                expected,
            } => write!(
                f,
                "unsupported format {:?} (expected {:?}) in {}",
                found,
                expected,
                path.display()
            ),
            ModelIOError::VersionMismatch {
                path,
                found,
                expected,
            } => write!(
                f,
                "unsupported version {} (expected {}) in {}",
                found,
                expected,
                path.display()
            ),
        }
    }
}

impl Error for ModelIOError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ModelIOError::Create { source, .. }
            | ModelIOError::Open { source, .. }
            | ModelIOError::Flush { source, .. } => Some(source),
            ModelIOError::Serialize { source, .. } | ModelIOError::Parse { source, .. } => {
                Some(source)
            }
            ModelIOError::FormatMismatch { .. } | ModelIOError::VersionMismatch { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::NoTrendFactorisation, generate_random_points, RBFTestFunctions};
    use direct_rbf_utils::KernelType;
    use equator::assert;
    use faer::{mat, utils::approx::*};

    fn temp_model_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("direct_rbf_{}_{}.json", name, std::process::id()))
    }

    fn fitted_cubic(num_points: usize, seed: u64) -> (Interpolant, Mat<f64>, Mat<f64>) {
        let points = generate_random_points(num_points, 3, Some(seed));
        let values = RBFTestFunctions::f1_3d(&points);

        let settings = InterpolantSettings::builder(KernelType::CubicRbf).build();
        let mut interpolant = Interpolant::builder(settings)
            .params(Params::builder().seed(seed).build())
            .build()
            .unwrap();

        interpolant.fit(points.clone(), values.as_ref()).unwrap();

        (interpolant, points, values)
    }

    #[test]
    fn reproduces_values_at_source() {
        let (interpolant, _, values) = fitted_cubic(60, 3);

        let fitted = interpolant.evaluate_at_source(true).unwrap();

        let approx_eq = CwiseMat(ApproxEq::eps() * 1e8);
        assert!(&fitted ~ &values);
    }

    #[test]
    fn nugget_smooths_the_fit() {
        let points = generate_random_points(40, 3, Some(8));
        let values = RBFTestFunctions::f2_3d(&points);

        let settings = InterpolantSettings::builder(KernelType::SphericalVariogram)
            .drift(Drift::Linear)
            .base_range(1.5)
            .nugget(0.1)
            .build();
        let mut interpolant = Interpolant::builder(settings).build().unwrap();
        interpolant.fit(points, values.as_ref()).unwrap();

        let restored = interpolant.evaluate_at_source(true).unwrap();
        let smoothed = interpolant.evaluate_at_source(false).unwrap();

        let approx_eq = CwiseMat(ApproxEq::eps() * 1e8);
        assert!(&restored ~ &values);

        let lambda = &interpolant.coefficients().unwrap().point_coefficients;
        for i in 0..values.nrows() {
            let expected = values[(i, 0)] - 0.1 * lambda[(i, 0)];
            assert!((smoothed[(i, 0)] - expected).abs() < 1e-8);
        }
    }

    #[test]
    fn evaluate_matches_source_evaluation() {
        let (interpolant, points, _) = fitted_cubic(30, 4);

        let at_source = interpolant.evaluate_at_source(false).unwrap();
        let at_targets = interpolant.evaluate(&points).unwrap();

        let approx_eq = CwiseMat(ApproxEq::eps() * 128.0 * 30.0);
        assert!(&at_source ~ &at_targets);
    }

    #[test]
    fn gradient_matches_finite_differences() {
        let (interpolant, _, _) = fitted_cubic(40, 6);

        let targets = mat![[0.31, 0.47, 0.52], [0.12, 0.83, 0.27f64]];
        let gradients = interpolant.evaluate_gradient(&targets).unwrap();

        assert_eq!(gradients.len(), 1);
        assert_eq!(gradients[0].shape(), (2, 3));

        let h = 1e-5;
        for axis in 0..3 {
            let mut forward = targets.clone();
            let mut backward = targets.clone();
            for i in 0..targets.nrows() {
                forward[(i, axis)] += h;
                backward[(i, axis)] -= h;
            }

            let f = interpolant.evaluate(&forward).unwrap();
            let b = interpolant.evaluate(&backward).unwrap();

            for i in 0..targets.nrows() {
                let fd = (f[(i, 0)] - b[(i, 0)]) / (2.0 * h);
                assert!((gradients[0][(i, axis)] - fd).abs() < 1e-4 * fd.abs().max(1.0));
            }
        }
    }

    #[test]
    fn linear_data_has_constant_gradient() {
        let points = generate_random_points(25, 3, Some(10));
        let values = Mat::<f64>::from_fn(25, 1, |i, _| {
            2.0 * points[(i, 0)] - 3.0 * points[(i, 1)] + 0.5 * points[(i, 2)]
        });

        let settings = InterpolantSettings::builder(KernelType::ThinPlateSplineRbf).build();
        let mut interpolant = Interpolant::builder(settings).build().unwrap();
        interpolant.fit(points, values.as_ref()).unwrap();

        let targets = generate_random_points(5, 3, Some(11));
        let gradients = interpolant.evaluate_gradient(&targets).unwrap();

        for i in 0..5 {
            assert!((gradients[0][(i, 0)] - 2.0).abs() < 1e-6);
            assert!((gradients[0][(i, 1)] + 3.0).abs() < 1e-6);
            assert!((gradients[0][(i, 2)] - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn fits_several_value_columns() {
        let points = generate_random_points(30, 3, Some(12));
        let first = RBFTestFunctions::f3_3d(&points);
        let second = RBFTestFunctions::f5_3d(&points);
        let values = Mat::<f64>::from_fn(30, 2, |i, j| if j == 0 { first[(i, 0)] } else { second[(i, 0)] });

        let settings = InterpolantSettings::builder(KernelType::Spheroidal3Rbf)
            .base_range(1.0)
            .build();
        let mut interpolant = Interpolant::builder(settings)
            .params(
                Params::builder()
                    .no_trend_factorisation(NoTrendFactorisation::Symmetric)
                    .build(),
            )
            .build()
            .unwrap();
        interpolant.fit(points, values.as_ref()).unwrap();

        let fitted = interpolant.evaluate_at_source(true).unwrap();
        assert_eq!(fitted.ncols(), 2);

        let approx_eq = CwiseMat(ApproxEq::eps() * 1e8);
        assert!(&fitted ~ &values);
        assert!(interpolant.coefficients().unwrap().poly_coefficients.is_none());
    }

    #[test]
    fn configuration_and_usage_errors() {
        let settings = InterpolantSettings::builder(KernelType::CubicRbf)
            .drift(Drift::Constant)
            .build();
        assert_eq!(
            Interpolant::builder(settings).build().unwrap_err(),
            InterpolantError::DriftTooLow {
                drift: Drift::Constant,
                minimum: Drift::Linear
            }
        );

        let settings = InterpolantSettings::builder(KernelType::LinearRbf).build();
        let mut interpolant = Interpolant::builder(settings).build().unwrap();

        let targets = generate_random_points(3, 3, Some(1));
        assert_eq!(interpolant.evaluate(&targets).unwrap_err(), InterpolantError::NotFitted);
        assert_eq!(interpolant.evaluate_at_source(true).unwrap_err(), InterpolantError::NotFitted);
        assert!(!interpolant.is_fitted());

        let points = generate_random_points(10, 3, Some(2));
        let values = RBFTestFunctions::f1_3d(&points);
        interpolant.fit(points.clone(), values.as_ref()).unwrap();
        assert!(interpolant.is_fitted());

        let flat_targets = generate_random_points(3, 2, Some(1));
        assert_eq!(
            interpolant.evaluate(&flat_targets).unwrap_err(),
            InterpolantError::TargetDimensionMismatch {
                expected: 3,
                found: 2
            }
        );

        let short_values = Mat::<f64>::zeros(9, 1);
        assert_eq!(
            interpolant.fit(points, short_values.as_ref()).unwrap_err(),
            InterpolantError::Solver(SolverError::ValueCountMismatch {
                expected: 10,
                found: 9
            })
        );
        // The earlier fit is kept.
        assert!(interpolant.is_fitted());
    }

    #[test]
    fn json_round_trip() {
        let (interpolant, _, _) = fitted_cubic(20, 14);
        let path = temp_model_path("round_trip");

        interpolant.save_model(&path).unwrap();
        let loaded = Interpolant::load_model(&path, None).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.settings(), interpolant.settings());
        assert_eq!(loaded.params, interpolant.params);

        let targets = generate_random_points(10, 3, Some(15));
        let expected = interpolant.evaluate(&targets).unwrap();
        let found = loaded.evaluate(&targets).unwrap();

        let approx_eq = CwiseMat(ApproxEq::eps() * 1e4);
        assert!(&found ~ &expected);
    }

    #[test]
    fn load_rejects_foreign_format() {
        let (interpolant, _, _) = fitted_cubic(10, 16);
        let path = temp_model_path("foreign_format");

        interpolant.save_model(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&path, text.replace(JSON_FORMAT_NAME, "other.json")).unwrap();

        let err = Interpolant::load_model(&path, None).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, ModelIOError::FormatMismatch { .. }));

        let missing = Interpolant::load_model(temp_model_path("missing"), None).unwrap_err();
        assert!(matches!(missing, ModelIOError::Open { .. }));
    }
}
