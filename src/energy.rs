// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! Given an image, calculate its energy map, and from that the
//! cumulative energy map: for every pixel, the least total energy of
//! any connected path from the top row down to it.  Both maps are
//! rebuilt from scratch after every seam, since a removal shifts the
//! neighbours of every pixel to the right of the seam.

use crate::pixelenergy::{energy_of_pixel, CarvePixel, Neighbours};
use crate::twodmap::{CumulativeEnergyMap, EnergyMap, PixelBuffer};

/// Stands in for a parent that would fall outside the map.  Larger
/// than any real cumulative energy, so it never wins a minimum.
pub const UNREACHABLE: u64 = u64::MAX;

/// Which cell a path moves to on its way up one row.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    UpLeft,
    Up,
    UpRight,
}

impl Step {
    /// The column reached by taking this step from column `x`.
    pub fn apply(self, x: u32) -> u32 {
        match self {
            Step::UpLeft => x - 1,
            Step::Up => x,
            Step::UpRight => x + 1,
        }
    }
}

// Image -> Energy Map

/// Compute the energy of every pixel in an image.  Neighbours past the
/// edge of the image are the pixel itself, so an edge contributes
/// nothing in the direction it faces.  The image must not be empty.
pub fn calculate_energy<P: CarvePixel>(image: &PixelBuffer<P>) -> EnergyMap {
    let (width, height) = image.dimensions();
    let (mw, mh) = (width.saturating_sub(1), height.saturating_sub(1));

    EnergyMap::from_fn(width, height, |x, y| {
        let current = image[(x, y)];
        let around = Neighbours {
            above: cq!(y == 0, current, image[(x, y - 1)]),
            below: cq!(y >= mh, current, image[(x, y + 1)]),
            left: cq!(x == 0, current, image[(x - 1, y)]),
            right: cq!(x >= mw, current, image[(x + 1, y)]),
        };
        energy_of_pixel(&current, &around)
    })
}

/// The cumulative energies of the three cells above `(x, y)`, in
/// up-left, up, up-right order.  Cells off either edge are
/// `UNREACHABLE`.  `y` must be at least 1.
pub fn parents(cumulative: &CumulativeEnergyMap, x: u32, y: u32) -> [(Step, u64); 3] {
    let maxwidth = cumulative.width() - 1;
    [
        (Step::UpLeft, cq!(x == 0, UNREACHABLE, cumulative[(x - 1, y - 1)])),
        (Step::Up, cumulative[(x, y - 1)]),
        (Step::UpRight, cq!(x >= maxwidth, UNREACHABLE, cumulative[(x + 1, y - 1)])),
    ]
}

/// The cheapest of the three parents of `(x, y)`.  Ties go to up-left
/// first, then up.
pub fn cheapest_parent(cumulative: &CumulativeEnergyMap, x: u32, y: u32) -> (Step, u64) {
    let [left, up, right] = parents(cumulative, x, y);
    [up, right]
        .iter()
        .fold(left, |best, &candidate| cq!(candidate.1 < best.1, candidate, best))
}

// Energy Map -> Cumulative Energy Map

/// Build the cumulative energy map.  The first row is the energy map's
/// first row; every later cell adds its own energy to its cheapest
/// parent's cumulative energy.
pub fn cumulative_energy(energy: &EnergyMap) -> CumulativeEnergyMap {
    let (width, height) = energy.dimensions();
    let mut target = CumulativeEnergyMap::filled(width, height, 0);
    if height == 0 {
        return target;
    }

    target.row_mut(0).copy_from_slice(energy.row(0));
    for y in 1..height {
        for x in 0..width {
            let (_, parent) = cheapest_parent(&target, x, y);
            target[(x, y)] = energy[(x, y)] + parent;
        }
    }
    target
}
