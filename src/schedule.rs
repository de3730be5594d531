//! Drives a simulation: holds the current generation and advances it on a
//! fixed interval, handing every generation to a [`Surface`].

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{info, warn};

use crate::config::Params;
use crate::error::Result;
use crate::grid::Bounds;
use crate::live_set::LiveSet;
use crate::render::Surface;
use crate::seed::generate_seed;
use crate::step::{par_step, step};

/// Current state of one run. The live set is replaced, never edited, on
/// each advance; bounds are fixed for the lifetime of the run.
#[derive(Clone, Debug)]
pub struct Simulation {
    bounds: Bounds,
    live: LiveSet,
    generation: u64,
    parallel: bool,
}

impl Simulation {
    pub fn new(bounds: Bounds, live: LiveSet) -> Result<Self> {
        live.validate(bounds)?;
        Ok(Self {
            bounds,
            live,
            generation: 0,
            parallel: false,
        })
    }

    /// Random initial generation from `params`.
    pub fn seeded<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Result<Self> {
        let bounds = params.bounds()?;
        let live = generate_seed(bounds, params.chance, rng)?;
        Self::new(bounds, live)
    }

    /// Evaluate generations with [`par_step`] instead of [`step`].
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn live(&self) -> &LiveSet {
        &self.live
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Compute the next generation. On error the current one is kept.
    pub fn advance(&mut self) -> Result<&LiveSet> {
        let next = if self.parallel {
            par_step(&self.live, self.bounds)
        } else {
            step(&self.live, self.bounds)
        };
        match next {
            Ok(next) => {
                self.live = next;
                self.generation += 1;
                Ok(&self.live)
            }
            Err(e) => {
                warn!(generation = self.generation, error = %e, "step failed");
                Err(e)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub generations: u64,
    pub final_population: usize,
    pub elapsed: Duration,
}

/// Fixed-rate driver. Ticks are spaced from a running deadline, so a slow
/// step or draw shortens the next wait instead of pushing every later tick.
#[derive(Clone, Debug)]
pub struct Scheduler {
    pub interval: Duration,
    pub max_generations: u64,
    pub stop_when_extinct: bool,
}

impl Scheduler {
    pub fn from_params(params: &Params) -> Self {
        Self {
            interval: params.interval(),
            max_generations: params.generations,
            stop_when_extinct: params.stop_when_extinct,
        }
    }

    /// Draw the current generation, then advance and draw once per tick
    /// until `max_generations` ticks have run or the run is stopped.
    pub fn run<S: Surface + ?Sized>(&self, sim: &mut Simulation, surface: &mut S) -> Result<RunSummary> {
        let start = Instant::now();
        info!(
            width = sim.bounds().width(),
            height = sim.bounds().height(),
            population = sim.live().population(),
            interval_ms = self.interval.as_millis() as u64,
            "simulation started"
        );

        let mut ticks = 0u64;
        let mut stopped = surface
            .draw(sim.generation(), sim.live(), sim.bounds())?
            .is_break();
        let mut deadline = start;

        while !stopped && ticks < self.max_generations {
            if self.stop_when_extinct && sim.live().is_empty() {
                info!(generation = sim.generation(), "population extinct");
                break;
            }

            deadline += self.interval;
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }

            sim.advance()?;
            ticks += 1;
            stopped = surface
                .draw(sim.generation(), sim.live(), sim.bounds())?
                .is_break();
        }

        let summary = RunSummary {
            generations: ticks,
            final_population: sim.live().population(),
            elapsed: start.elapsed(),
        };
        info!(
            generations = summary.generations,
            population = summary.final_population,
            ms = summary.elapsed.as_secs_f64() * 1000.0,
            "simulation finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::render::RgbaSurface;

    fn blinker() -> LiveSet {
        [(1, 2), (2, 2), (3, 2)].into_iter().collect()
    }

    fn scheduler(max_generations: u64) -> Scheduler {
        Scheduler {
            interval: Duration::ZERO,
            max_generations,
            stop_when_extinct: true,
        }
    }

    #[test]
    fn advance_replaces_generation() {
        let bounds = Bounds::new(5, 5).unwrap();
        let mut sim = Simulation::new(bounds, blinker()).unwrap();
        let before = sim.live().clone();
        sim.advance().unwrap();
        assert_eq!(sim.generation(), 1);
        assert_ne!(sim.live(), &before);
        sim.advance().unwrap();
        assert_eq!(sim.live(), &before);
    }

    #[test]
    fn out_of_range_seed_is_rejected() {
        let bounds = Bounds::new(3, 3).unwrap();
        assert!(Simulation::new(bounds, blinker()).is_err());
    }

    #[test]
    fn runs_requested_generations() {
        let bounds = Bounds::new(5, 5).unwrap();
        let mut sim = Simulation::new(bounds, blinker()).unwrap();
        let mut surface = RgbaSurface::new();
        let summary = scheduler(6).run(&mut sim, &mut surface).unwrap();
        assert_eq!(summary.generations, 6);
        assert_eq!(summary.final_population, 3);
        assert_eq!(surface.frames, 7);
        assert_eq!(sim.live(), &blinker());
    }

    #[test]
    fn stops_when_extinct() {
        let bounds = Bounds::new(5, 5).unwrap();
        let lonely: LiveSet = [(2, 2)].into_iter().collect();
        let mut sim = Simulation::new(bounds, lonely).unwrap();
        let mut surface = RgbaSurface::new();
        let summary = scheduler(50).run(&mut sim, &mut surface).unwrap();
        assert_eq!(summary.generations, 1);
        assert_eq!(summary.final_population, 0);
    }

    struct StopAfter(u64);

    impl Surface for StopAfter {
        fn draw(&mut self, generation: u64, _live: &LiveSet, _bounds: Bounds) -> Result<ControlFlow<()>> {
            Ok(if generation >= self.0 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            })
        }
    }

    #[test]
    fn surface_can_stop_the_run() {
        let bounds = Bounds::new(5, 5).unwrap();
        let mut sim = Simulation::new(bounds, blinker()).unwrap();
        let summary = scheduler(100).run(&mut sim, &mut StopAfter(3)).unwrap();
        assert_eq!(summary.generations, 3);
        assert_eq!(sim.generation(), 3);
    }

    #[test]
    fn ticks_are_spaced_by_interval() {
        let bounds = Bounds::new(5, 5).unwrap();
        let mut sim = Simulation::new(bounds, blinker()).unwrap();
        let sched = Scheduler {
            interval: Duration::from_millis(10),
            max_generations: 3,
            stop_when_extinct: false,
        };
        let summary = sched.run(&mut sim, &mut RgbaSurface::new()).unwrap();
        assert!(summary.elapsed >= Duration::from_millis(30));
    }

    #[test]
    fn parallel_matches_serial() {
        let params = Params {
            width: 40,
            height: 30,
            chance: 0.3,
            ..Params::default()
        };
        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut serial = Simulation::seeded(&params, &mut rng).unwrap();
        let mut parallel = serial.clone().parallel(true);
        for _ in 0..10 {
            serial.advance().unwrap();
            parallel.advance().unwrap();
            assert_eq!(serial.live(), parallel.live());
        }
    }
}
