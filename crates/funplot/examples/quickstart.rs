//! Builds a few scenes and saves them as SVG, PNG and JPEG.
//!
//! ```text
//! RUST_LOG=debug cargo run --example quickstart -- /tmp/plots
//! ```

use std::{f64::consts::PI, path::PathBuf, process};

use log::{error, info};

use funplot::{Curve, Function, FunplotError, Points, SaveOptions, Scene};

fn run(out_dir: PathBuf) -> Result<(), FunplotError> {
    std::fs::create_dir_all(&out_dir)?;

    let sine = Function::parse("sin(x)")?.with_label("sin(x)");
    let damped = Function::parse("exp(-x / 4) * cos(2 * x)")?
        .with_domain((0.0, 10.0, 400))?
        .with_label("damped")
        .style_option("ls", "--")?;

    let t: Vec<f64> = (0..=120).map(|i| i as f64 * 2.0 * PI / 120.0).collect();
    let circle = Curve::new(
        t.iter().map(|t| 3.0 * t.cos()).collect::<Vec<_>>(),
        t.iter().map(|t| 3.0 * t.sin()).collect::<Vec<_>>(),
    )
    .with_label("circle");

    let zeros = Points::new(vec![-PI, 0.0, PI], vec![0.0, 0.0, 0.0])
        .style_option("color", "black")?
        .style_option("marker", "x")?;

    let base = Scene::new()
        .xlabel("x")
        .ylabel("y")
        .grid(true)
        .legend(true);

    let waves = &base + sine.clone() + damped;
    waves.clone().title("Waves").save(out_dir.join("waves.svg"))?;

    let everything = (&base + (sine + zeros) + circle)
        .title("Sine, zeros and a circle")
        .xlim(-5.0, 5.0)
        .ylim(-4.0, 4.0);
    everything.save(out_dir.join("everything.png"))?;
    everything.save_with(
        out_dir.join("everything.jpg"),
        &SaveOptions::new().with_dpi(150.0).with_quality(90),
    )?;

    // Malformed input reports where it went wrong
    if let Err(err) = Function::parse("sin(x *)") {
        info!(err:% = err; "Expected parse failure");
    }

    info!(out_dir:? = out_dir; "Wrote example plots");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let out_dir = std::env::args()
        .nth(1)
        .map_or_else(std::env::temp_dir, PathBuf::from);

    if let Err(err) = run(out_dir) {
        error!(err:% = err; "Example failed");
        process::exit(1);
    }
}
