//! Curve inspector: loads a `.cvx` file and prints its measurements.
//!
//! Usage:
//! ```text
//! cargo run --example inspect                           # bundled ease_in_out.cvx
//! cargo run --example inspect -- path/to/curve.cvx
//! RUST_LOG=curvex=debug cargo run --example inspect     # library tracing
//! ```

use std::fs::File;
use std::path::PathBuf;

use curvex::{CurveSerializer, CurvexError};

const BUNDLED: &str = include_str!("assets/ease_in_out.cvx");
const SAMPLES: u16 = 8;

fn main() -> Result<(), CurvexError> {
    // Default: WARN for everything, INFO for curvex.
    // Override with RUST_LOG env var (e.g. RUST_LOG=curvex=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("inspect=info".parse().unwrap_or_default())
        .add_directive("curvex=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut curve = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            if !CurveSerializer::is_curve_file(&path) {
                tracing::warn!(path = %path.display(), "file does not have the .cvx extension");
            }
            CurveSerializer::read(File::open(&path)?)?
        }
        None => CurveSerializer::unserialize(BUNDLED)?,
    };
    curve.ensure_valid()?;

    let length = curve.get_length();
    let bounds = curve.get_extrems()?;
    println!("keys:   {}", curve.get_keys_count());
    println!("points: {}", curve.get_points_count());
    println!("length: {length:.4}");
    println!(
        "bounds: min {} max {} ({:.4} x {:.4})",
        bounds.min,
        bounds.max,
        bounds.width(),
        bounds.height()
    );

    println!();
    println!("{:>6}  {:<28}  {:<28}  {:<28}", "s", "by percent", "by distance", "by time");
    for i in 0..=SAMPLES {
        let s = f32::from(i) / f32::from(SAMPLES);
        let by_percent = curve.evaluate_by_percent(s);
        let by_distance = curve.evaluate_by_distance(s * length);
        let time = bounds.min.x + s * bounds.width();
        let by_time = curve.evaluate_by_time(time);
        println!(
            "{s:>6.3}  {:<28}  {:<28}  {:<28}",
            by_percent.to_string(),
            by_distance.to_string(),
            by_time.to_string()
        );
    }

    for key in curve.keys() {
        let nearest = curve.get_nearest_distance_to(key.control)?;
        tracing::info!(
            control = %key.control,
            distance = key.distance,
            nearest,
            "key"
        );
    }

    Ok(())
}
