//! Example: Robust polynomial fitting using RANSAC
//!
//! Points along y = x get Gaussian noise, and roughly half of them an extra
//! wide Gaussian kick. The fitter should recover the line from the rest.
//!
//! Run with `RUST_LOG=debug` to see the trial loop.

use inlier_poly::{PolynomialRansac, RansacSettings};
use rand::Rng;
use rand_distr::{Distribution, Normal};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Robust Polynomial Fitting Example ===\n");

    let (x_min, x_max, n) = (1.0, 50.0, 100);
    let mut rng = rand::thread_rng();
    let noise = Normal::new(0.0, 1.0)?;
    let kick = Normal::new(0.0, 5.0)?;

    let x: Vec<f64> = (0..n)
        .map(|i| x_min + (x_max - x_min) * i as f64 / (n - 1) as f64)
        .collect();
    let y: Vec<f64> = x
        .iter()
        .map(|&x| {
            let kicked = if rng.gen_bool(0.5) { kick.sample(&mut rng) } else { 0.0 };
            x + noise.sample(&mut rng) + kicked
        })
        .collect();

    println!("True curve: y = x");
    println!("Generated {} points in [{}, {}]\n", n, x_min, x_max);

    let settings = RansacSettings::new(100, 3.0, 0.7)?;
    let mut ransac = PolynomialRansac::new(settings)?;
    ransac.set_data(&x, &y)?;

    let result = match ransac.fit(1) {
        Ok(result) => result,
        Err(err) => {
            println!("Nothing to display; no best fit available ({err})");
            return Ok(());
        }
    };

    println!("RANSAC Results:");
    println!(
        "  Found {} inliers out of {} points",
        result.inlier_count(),
        n
    );
    println!(
        "  Inlier ratio: {:.2}%",
        100.0 * result.inlier_count() as f64 / n as f64
    );
    println!("  Trials: {}", result.iterations);
    println!("  Degenerate trials: {}", result.degenerate_trials);

    let c = result.coefficients();
    println!("\nEstimated curve: y = {:.4} + {:.4}x", c[0], c[1]);
    println!("  Error in slope: {:.4}", (c[1] - 1.0).abs());
    println!("  Error in intercept: {:.4}", c[0].abs());

    println!("\n{:>8} {:>10} {:>10}  class", "x", "y", "fit");
    for (i, (&xi, &yi)) in x.iter().zip(&y).enumerate().step_by(10) {
        let class = if result.inlier_mask[i] { "inlier" } else { "outlier" };
        println!(
            "{:>8.2} {:>10.3} {:>10.3}  {}",
            xi,
            yi,
            result.model.evaluate(xi),
            class
        );
    }

    Ok(())
}
