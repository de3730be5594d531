use crate::grid::{Bounds, wrap_dec, wrap_inc};
use crate::live_set::{LiveSet, Row};

/// Live cells among columns `x-1`, `x`, `x+1` of one row, wrapping at the
/// row edges.
///
/// When `own_row` is set the row is the one holding the cell under
/// evaluation, so column `x` is the cell itself and is not counted.
#[inline]
pub fn count_row_neighbors(row: &Row, x: usize, own_row: bool, width: usize) -> u8 {
    let mut n = 0;
    if row.contains(&wrap_dec(x, width)) {
        n += 1;
    }
    if !own_row && row.contains(&x) {
        n += 1;
    }
    if row.contains(&wrap_inc(x, width)) {
        n += 1;
    }
    n
}

/// Live cells among the 8 toroidal neighbours of (x, y).
pub fn count_neighbors(live: &LiveSet, x: usize, y: usize, bounds: Bounds) -> u8 {
    let w = bounds.width();
    let h = bounds.height();

    let above = live
        .row(wrap_dec(y, h))
        .map_or(0, |row| count_row_neighbors(row, x, false, w));
    let own = live
        .row(y)
        .map_or(0, |row| count_row_neighbors(row, x, true, w));
    let below = live
        .row(wrap_inc(y, h))
        .map_or(0, |row| count_row_neighbors(row, x, false, w));

    above + own + below
}
