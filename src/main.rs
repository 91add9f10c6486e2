//! Sweeps a sphere past a rotated box and logs the distance at every step.
use anyhow::{Context, Result};
use clap::Parser;
use proximity::math::{Quat, Transform, Vec3};
use proximity::shapes::ShapeBox;
use proximity::{DistanceCache, Geometry, GjkInitialGuess, QueryConfig, Shape};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// JSON file with solver limits and request defaults
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Number of positions along the sweep
    #[clap(short, long, default_value_t = 20)]
    steps: u32,

    /// Seed each query with the separation found by the previous one
    #[clap(short, long)]
    warm_start: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match &args.config {
        Some(path) => QueryConfig::load(path)
            .with_context(|| format!("loading query config from {}", path.display()))?,
        None => QueryConfig::default(),
    };
    info!(?config, "query config");

    let wall = Geometry::new(ShapeBox::new(Vec3::new(0.5, 2.0, 1.0)));
    let ball = Geometry::new(Shape::make_sphere(0.75));
    let wall_tf = Transform::from_rotation(Quat::from_rotation_z(0.4));

    let cache = DistanceCache::with_solver(&wall, &ball, config.solver)?;
    let mut request = config.request;
    request.enable_nearest_points = true;
    if args.warm_start {
        request.gjk_initial_guess = GjkInitialGuess::CachedGuess;
    }

    let steps = args.steps.max(2);
    let start = Vec3::new(-4.0, -3.0, 0.5);
    let end = Vec3::new(4.0, 3.0, 0.5);
    let mut total_iterations = 0;
    for step in 0..steps {
        let t = step as f64 / (steps - 1) as f64;
        let ball_tf = Transform::from_translation(start.lerp(end, t));

        let result = cache.compute_with_guess(&wall_tf, &ball_tf, &mut request)?;
        total_iterations += result.iterations.unwrap_or(0);
        info!(
            step,
            distance = result.min_distance,
            iterations = ?result.iterations,
            on_wall = ?result.nearest_points[0],
            on_ball = ?result.nearest_points[1],
            "sweep"
        );
    }
    info!(total_iterations, warm_start = args.warm_start, "sweep finished");

    Ok(())
}
