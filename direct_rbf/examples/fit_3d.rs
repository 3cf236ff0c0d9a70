use direct_rbf::{
    create_evaluation_grid, generate_random_points,
    interpolant_config::{Drift, InterpolantSettings},
    progress::{closure_sink, ProgressMsg},
    Interpolant, RBFTestFunctions,
};
use direct_rbf_utils::KernelType;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Define input source points in [0, 1]^3
    let points = generate_random_points(1000, 3, Some(42));

    // Define some values at the source points using the 3D Franke function
    let point_values = RBFTestFunctions::f1_3d(&points);

    // Print solver progress from a listener thread
    let (sink, listener) = closure_sink(64, |msg| match msg {
        ProgressMsg::Factorised {
            method,
            size,
            precision,
            elapsed,
        } => println!("{method} factorisation of size {size} ({precision}) in {elapsed:.2?}"),
        ProgressMsg::Message { message } => println!("{message}"),
        _ => {}
    });

    // Spherical covariance with a linear drift (universal kriging)
    let settings = InterpolantSettings::builder(KernelType::SphericalVariogram)
        .base_range(0.8)
        .drift(Drift::Linear)
        .build();

    let mut interpolant = Interpolant::builder(settings)
        .progress_callback(sink)
        .build()?;

    interpolant.fit(points, point_values.as_ref())?;

    // Evaluate on a regular grid
    let n = 20;
    let targets = create_evaluation_grid(&[(0.0, 1.0), (0.0, 1.0), (0.0, 1.0)], &[n, n, n]);
    let values = interpolant.evaluate(&targets)?;

    let truth = RBFTestFunctions::f1_3d(&targets);
    let max_error = values
        .col(0)
        .iter()
        .zip(truth.col(0).iter())
        .fold(0.0f64, |acc, (a, b)| acc.max((a - b).abs()));

    println!("max grid error: {max_error:.3e}");

    // Dropping the interpolant releases the last sink so the listener exits
    drop(interpolant);
    let _ = listener.join();

    Ok(())
}
