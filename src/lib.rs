// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam carving for plain-text portable anymaps
//!
//! Shrinks an image by repeatedly removing the connected line of
//! pixels, one per row or one per column, that carries the least
//! energy.  See `seamcarver::seamcarve` for the entry point and `pnm`
//! for reading and writing `P2` and `P3` files.

// #![deny(missing_docs)]

#[macro_use]
mod ternary;

pub mod errors;
pub use errors::{CarveError, PnmError};

pub mod twodmap;
pub use twodmap::{CumulativeEnergyMap, EnergyMap, PixelBuffer, TwoDimensionalMap};

pub mod pixelenergy;
pub use pixelenergy::CarvePixel;

pub mod energy;
pub use energy::{calculate_energy, cumulative_energy};

pub mod flipper;
pub use flipper::Transpose;

pub mod seamfinder;
pub use seamfinder::{select_vertical_seam, BackwardEnergy, Seam, SeamFinder};

pub mod seamcarver;
pub use seamcarver::{remove_vertical_seam, seamcarve, CarveState, SeamCarver};

pub mod pnm;
pub use pnm::{Pnm, PnmFormat, PnmHeader, PnmImage};
