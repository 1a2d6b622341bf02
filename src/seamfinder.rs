// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest seam
//!
//! A seam is one column index per row, each within one column of the
//! index in the row above it.  The cheapest seam ends at the leftmost
//! minimum of the cumulative energy map's last row, and is recovered
//! by walking back up the map one row at a time.

use crate::energy::{calculate_energy, cheapest_parent, cumulative_energy};
use crate::flipper::Transpose;
use crate::pixelenergy::CarvePixel;
use crate::twodmap::{CumulativeEnergyMap, PixelBuffer};
use itertools::{Itertools, MinMaxResult};

/// A top-to-bottom connected path: `seam[y]` is the column of the
/// pixel removed from row `y`.  Carries the total energy of the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seam {
    columns: Vec<u32>,
    energy: u64,
}

impl Seam {
    pub fn new(columns: Vec<u32>, energy: u64) -> Self {
        Seam { columns, energy }
    }

    /// A seam whose energy is not known or does not matter.
    pub fn from_columns(columns: Vec<u32>) -> Self {
        Seam::new(columns, 0)
    }

    pub fn columns(&self) -> &[u32] {
        &self.columns
    }

    pub fn energy(&self) -> u64 {
        self.energy
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u32> {
        self.columns.iter()
    }

    /// True if no step between rows moves more than one column.
    pub fn is_connected(&self) -> bool {
        self.columns
            .iter()
            .tuple_windows()
            .all(|(&a, &b)| (i64::from(a) - i64::from(b)).abs() <= 1)
    }

    /// The leftmost and rightmost columns the seam touches.
    pub fn span(&self) -> Option<(u32, u32)> {
        match self.columns.iter().minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(&x) => Some((x, x)),
            MinMaxResult::MinMax(&lo, &hi) => Some((lo, hi)),
        }
    }
}

impl std::ops::Index<usize> for Seam {
    type Output = u32;

    fn index(&self, y: usize) -> &u32 {
        &self.columns[y]
    }
}

/// Given a cumulative energy map, return the cheapest vertical seam.
/// Of several equally cheap seams, the one ending furthest left wins,
/// and on the way up ties go up-left, then up, then up-right.  The map
/// must not be empty.
pub fn select_vertical_seam(cumulative: &CumulativeEnergyMap) -> Seam {
    let (width, height) = cumulative.dimensions();
    assert!(width > 0 && height > 0, "cannot find a seam in an empty map");

    let bottom = height - 1;
    let mut seam_col = cumulative.row(bottom).iter().position_min().unwrap_or(0) as u32;
    let energy = cumulative[(seam_col, bottom)];

    // Working backwards, fill in the column for every row.
    let mut columns = vec![0; height as usize];
    for y in (0..height).rev() {
        columns[y as usize] = seam_col;
        if y > 0 {
            let (step, _) = cheapest_parent(cumulative, seam_col, y);
            seam_col = step.apply(seam_col);
        }
    }
    Seam::new(columns, energy)
}

/// This trait defines how we will return seams from an image.  It's a
/// primitive interface, just enough to make room for more than one
/// energy function.
pub trait SeamFinder {
    /// Request a top-to-bottom seam: one column per row.
    fn find_vertical_seam(&self) -> Seam;

    /// Request a left-to-right seam: one row per column.
    fn find_horizontal_seam(&self) -> Seam;
}

/// Seams by plain backward energy: the local gradient of each pixel,
/// with no look-ahead at the gradients a removal would create.
pub struct BackwardEnergy<'a, P: CarvePixel> {
    image: &'a PixelBuffer<P>,
}

impl<'a, P: CarvePixel> BackwardEnergy<'a, P> {
    /// Takes a reference to an image, and holds onto it.
    pub fn new(image: &'a PixelBuffer<P>) -> Self {
        BackwardEnergy { image }
    }
}

impl<'a, P: CarvePixel> SeamFinder for BackwardEnergy<'a, P> {
    fn find_vertical_seam(&self) -> Seam {
        select_vertical_seam(&cumulative_energy(&calculate_energy(self.image)))
    }

    // A horizontal seam of the image is a vertical seam of its
    // transpose, read back as one row index per column.
    fn find_horizontal_seam(&self) -> Seam {
        let flipped = self.image.transpose();
        select_vertical_seam(&cumulative_energy(&calculate_energy(&flipped)))
    }
}
