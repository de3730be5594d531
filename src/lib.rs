pub mod config;
pub mod error;
pub mod grid;
pub mod live_set;
pub mod neighbors;
pub mod render;
pub mod schedule;
pub mod seed;
pub mod step;

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

use config::Params;
pub use error::{LifeError, Result};
pub use grid::Bounds;
pub use live_set::LiveSet;
pub use schedule::{RunSummary, Scheduler, Simulation};
pub use step::{par_step, step};

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Seed from `params` and compute `params.generations` generations back to
/// back, ignoring the interval. Returns the seed followed by every
/// generation, stopping early on extinction when requested.
pub fn simulate(params: &Params) -> Result<(Vec<LiveSet>, Vec<Timing>)> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    let t = Instant::now();
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut sim = Simulation::seeded(params, &mut rng)?;
    timings.push(Timing {
        name: "seed",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let t = Instant::now();
    let mut generations = vec![sim.live().clone()];
    for _ in 0..params.generations {
        if params.stop_when_extinct && sim.live().is_empty() {
            break;
        }
        generations.push(sim.advance()?.clone());
    }
    timings.push(Timing {
        name: "step",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    Ok((generations, timings))
}
