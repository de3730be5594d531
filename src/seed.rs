use rand::Rng;

use crate::error::{LifeError, Result};
use crate::grid::Bounds;
use crate::live_set::LiveSet;

/// Random initial generation: each of the `width * height` cells is alive
/// independently with probability `chance`.
pub fn generate_seed<R: Rng + ?Sized>(bounds: Bounds, chance: f64, rng: &mut R) -> Result<LiveSet> {
    if !(0.0..=1.0).contains(&chance) {
        return Err(LifeError::InvalidChance(chance));
    }

    let mut live = LiveSet::new();
    for y in 0..bounds.height() {
        for x in 0..bounds.width() {
            // gen_bool panics outside [0, 1]; checked above
            if rng.gen_bool(chance) {
                live.insert(x, y);
            }
        }
    }
    Ok(live)
}
