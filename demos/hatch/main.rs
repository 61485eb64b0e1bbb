//! Hatches a sample polygon and prints the strokes as a GeoJSON
//! `MultiLineString`.
//!
//! Usage:
//! ```text
//! cargo run --example hatch                          # step 100 m, bearing 0, offset 50 m
//! cargo run --example hatch -- 250 45 20             # step, bearing, offset
//! RUST_LOG=geohatch=trace cargo run --example hatch  # per-pass sweep events
//! ```

use geohatch::{HatchingOptions, ParallelHatching};
use serde_json::json;

/// A small convex field near Zurich, closed ring of `[lon, lat]`.
const FIELD: [[f64; 2]; 6] = [
    [8.5400, 47.3700],
    [8.5440, 47.3695],
    [8.5465, 47.3720],
    [8.5450, 47.3745],
    [8.5405, 47.3735],
    [8.5400, 47.3700],
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Default: WARN for everything, INFO for geohatch.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("geohatch=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let defaults = HatchingOptions::default();
    let mut args = std::env::args().skip(1);
    let mut next_or = |default: f64| -> Result<f64, std::num::ParseFloatError> {
        args.next().map_or(Ok(default), |arg| arg.parse())
    };
    let options = defaults
        .with_step(next_or(defaults.step)?)
        .with_bearing(next_or(defaults.bearing)?)
        .with_offset(next_or(defaults.offset)?);

    let rings = vec![FIELD.to_vec()];
    let lines = ParallelHatching::from_rings(&rings, options)?.execute()?;
    tracing::info!(strokes = lines.len(), ?options, "hatched sample field");

    let coordinates: Vec<_> = lines
        .iter()
        .map(|line| json!([[line.start.lon, line.start.lat], [line.end.lon, line.end.lat]]))
        .collect();
    let feature = json!({
        "type": "Feature",
        "properties": {
            "step": options.step,
            "bearing": options.bearing,
            "offset": options.offset,
        },
        "geometry": {
            "type": "MultiLineString",
            "coordinates": coordinates,
        },
    });
    println!("{}", serde_json::to_string_pretty(&feature)?);
    Ok(())
}
