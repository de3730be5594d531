use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;
use crate::grid::Bounds;

/// Run parameters. Missing fields fall back to the defaults below.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Params {
    // Grid
    pub width: usize,
    pub height: usize,

    // Seeding
    pub chance: f64,
    pub seed: u64,

    // Scheduling
    pub interval_ms: u64,
    pub generations: u64,
    pub stop_when_extinct: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            chance: 0.1,
            seed: 42,
            interval_ms: 1000,
            generations: 100,
            stop_when_extinct: true,
        }
    }
}

impl Params {
    pub fn bounds(&self) -> Result<Bounds> {
        Bounds::new(self.width, self.height)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
