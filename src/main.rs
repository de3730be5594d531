use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use torus_life::config::Params;
use torus_life::render::PngSequence;
use torus_life::{Scheduler, Simulation};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("torus_life=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let defaults = Params::default();

    let params = Params {
        seed: args.get(1).and_then(|s| s.parse().ok()).unwrap_or(defaults.seed),
        width: args.get(2).and_then(|s| s.parse().ok()).unwrap_or(defaults.width),
        height: args.get(3).and_then(|s| s.parse().ok()).unwrap_or(defaults.height),
        generations: args.get(4).and_then(|s| s.parse().ok()).unwrap_or(defaults.generations),
        interval_ms: args.get(5).and_then(|s| s.parse().ok()).unwrap_or(defaults.interval_ms),
        ..defaults
    };
    let out_dir: PathBuf = args
        .get(6)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    info!(
        "Running {}x{} torus with seed={}, chance={}, generations={}",
        params.width, params.height, params.seed, params.chance, params.generations
    );

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut sim = Simulation::seeded(&params, &mut rng)?;
    let mut frames = PngSequence::new(&out_dir)?;

    let summary = Scheduler::from_params(&params).run(&mut sim, &mut frames)?;

    info!(
        "Wrote {} frames to {} ({} generations, final population {})",
        frames.written().len(),
        out_dir.display(),
        summary.generations,
        summary.final_population
    );
    Ok(())
}
