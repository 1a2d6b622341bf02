// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Map dimensional flipper
//!
//! Swaps a map's width for its height, and every `(x, y)` for `(y,
//! x)`.  A horizontal seam through a map is a vertical seam through its
//! flip, so the carver only ever has to know how to take out columns:
//! flip, carve, and flip back.
//!
//! The flip is a real copy rather than a view.  Seam removal compacts
//! rows in place, which only works when a row is contiguous.

use crate::twodmap::TwoDimensionalMap;

pub trait Transpose {
    /// `flipped[(y, x)] == self[(x, y)]` for every tracked cell.
    fn transpose(&self) -> Self;
}

impl<P: Copy> Transpose for TwoDimensionalMap<P> {
    fn transpose(&self) -> Self {
        let (width, height) = self.dimensions();
        TwoDimensionalMap::from_fn(height, width, |x, y| self[(y, x)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TwoDimensionalMap<u8> {
        TwoDimensionalMap::from_raw(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn swaps_dimensions_and_addresses() {
        let map = sample();
        let flipped = map.transpose();
        assert_eq!(flipped.dimensions(), (2, 3));
        assert_eq!(flipped.into_vec(), vec![1, 4, 2, 5, 3, 6]);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(map.transpose()[(y, x)], map[(x, y)]);
            }
        }
    }

    #[test]
    fn round_trip_is_identity() {
        let map = sample();
        assert_eq!(map.transpose().transpose(), map);
        let tall = TwoDimensionalMap::from_fn(1, 5, |_, y| y);
        assert_eq!(tall.transpose().transpose(), tall);
    }

    #[test]
    fn only_tracked_cells_are_flipped() {
        let mut map = sample();
        map.shrink_width();
        let flipped = map.transpose();
        assert_eq!(flipped.dimensions(), (2, 2));
        assert_eq!(flipped.into_vec(), vec![1, 4, 2, 5]);
    }
}
