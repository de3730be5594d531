use serde::{Deserialize, Serialize};

use crate::error::{LifeError, Result};

/// Extent of the toroidal grid. Columns are `0..width`, rows `0..height`;
/// both axes wrap (column `width - 1` is adjacent to column 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct Bounds {
    width: usize,
    height: usize,
}

#[derive(Deserialize)]
struct RawBounds {
    width: usize,
    height: usize,
}

impl TryFrom<RawBounds> for Bounds {
    type Error = LifeError;

    fn try_from(raw: RawBounds) -> Result<Self> {
        Bounds::new(raw.width, raw.height)
    }
}

impl Bounds {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells on the grid.
    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Wrap a signed offset from (x, y) onto the torus.
    #[inline]
    pub fn wrap(&self, x: usize, y: usize, dx: i32, dy: i32) -> (usize, usize) {
        (wrap_axis(x, dx, self.width), wrap_axis(y, dy, self.height))
    }
}

#[inline]
fn wrap_axis(v: usize, d: i32, extent: usize) -> usize {
    match d {
        -1 => wrap_dec(v, extent),
        1 => wrap_inc(v, extent),
        0 => v,
        _ => (v as i64 + d as i64).rem_euclid(extent as i64) as usize,
    }
}

/// `v - 1` on an axis of `extent` cells, 0 wraps to `extent - 1`.
#[inline]
pub fn wrap_dec(v: usize, extent: usize) -> usize {
    if v == 0 { extent - 1 } else { v - 1 }
}

/// `v + 1` on an axis of `extent` cells, `extent - 1` wraps to 0.
#[inline]
pub fn wrap_inc(v: usize, extent: usize) -> usize {
    if v + 1 >= extent { 0 } else { v + 1 }
}

const OFFSETS: [(i32, i32); 9] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),  (0, 0),  (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// The cell itself followed by its 8 toroidal neighbours. On grids smaller
/// than 3x3 some of these coincide.
pub fn moore_wrap(x: usize, y: usize, bounds: Bounds) -> impl Iterator<Item = (usize, usize)> {
    OFFSETS.into_iter().map(move |(dx, dy)| bounds.wrap(x, y, dx, dy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(matches!(
            Bounds::new(0, 4),
            Err(LifeError::InvalidBounds { width: 0, height: 4 })
        ));
        assert!(Bounds::new(4, 0).is_err());
        assert!(Bounds::new(1, 1).is_ok());
    }

    #[test]
    fn edges_wrap_to_opposite_side() {
        let b = Bounds::new(5, 3).unwrap();
        assert_eq!(b.wrap(0, 0, -1, -1), (4, 2));
        assert_eq!(b.wrap(4, 2, 1, 1), (0, 0));
        assert_eq!(b.wrap(2, 1, 1, -1), (3, 0));
        assert_eq!(b.wrap(1, 1, -7, 4), (4, 2));
    }

    #[test]
    fn moore_neighbourhood_has_nine_cells_on_large_grid() {
        let b = Bounds::new(10, 10).unwrap();
        let cells: Vec<_> = moore_wrap(0, 9, b).collect();
        assert_eq!(cells.len(), 9);
        assert!(cells.contains(&(9, 8)));
        assert!(cells.contains(&(1, 0)));
        assert!(cells.contains(&(0, 9)));
    }

    #[test]
    fn bounds_deserialize_validates() {
        let ok: Bounds = serde_json::from_str(r#"{"width":3,"height":2}"#).unwrap();
        assert_eq!((ok.width(), ok.height()), (3, 2));
        assert!(serde_json::from_str::<Bounds>(r#"{"width":0,"height":2}"#).is_err());
    }
}
