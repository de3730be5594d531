use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::Result;
use crate::grid::{Bounds, moore_wrap};
use crate::live_set::LiveSet;
use crate::neighbors::count_neighbors;

/// Coordinates worth re-evaluating in one generation.
pub type CandidateSet = FxHashSet<(usize, usize)>;

/// Every live cell together with its 8 toroidal neighbours, deduplicated.
/// A dead cell outside this set has no live neighbour and stays dead.
pub fn build_candidates(live: &LiveSet, bounds: Bounds) -> CandidateSet {
    let mut candidates =
        CandidateSet::with_capacity_and_hasher(live.population() * 9, Default::default());
    for (x, y) in live.cells() {
        candidates.extend(moore_wrap(x, y, bounds));
    }
    candidates
}

/// B3/S23: born on 3, survives on 2 or 3.
#[inline]
pub fn should_live(live: &LiveSet, x: usize, y: usize, bounds: Bounds) -> bool {
    match count_neighbors(live, x, y, bounds) {
        3 => true,
        2 => live.is_alive(x, y),
        _ => false,
    }
}

/// Advance one generation. The input is left untouched.
pub fn step(live: &LiveSet, bounds: Bounds) -> Result<LiveSet> {
    live.validate(bounds)?;

    let candidates = build_candidates(live, bounds);
    let next: LiveSet = candidates
        .iter()
        .copied()
        .filter(|&(x, y)| should_live(live, x, y, bounds))
        .collect();

    debug!(
        candidates = candidates.len(),
        before = live.population(),
        after = next.population(),
        "step"
    );
    Ok(next)
}

/// Same as [`step`], with rule evaluation spread across rayon workers.
/// Each worker reads the shared input and fills its own buffer; buffers are
/// merged once evaluation is done.
pub fn par_step(live: &LiveSet, bounds: Bounds) -> Result<LiveSet> {
    live.validate(bounds)?;

    let candidates: Vec<(usize, usize)> = build_candidates(live, bounds).into_iter().collect();
    let survivors: Vec<Vec<(usize, usize)>> = candidates
        .par_chunks(4096)
        .map(|chunk| {
            chunk
                .iter()
                .copied()
                .filter(|&(x, y)| should_live(live, x, y, bounds))
                .collect()
        })
        .collect();

    let next: LiveSet = survivors.into_iter().flatten().collect();
    debug!(
        candidates = candidates.len(),
        before = live.population(),
        after = next.population(),
        "par_step"
    );
    Ok(next)
}
