// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main function
//!
//! The main seamcarver routine.  Every seam starts from nothing: the
//! energy map, the cumulative map and the seam are all rebuilt from the
//! image as it stands after the previous removal.  Vertical seams come
//! out first; then the image is flipped, the horizontal seams come out
//! as vertical seams of the flip, and the image is flipped back.

use crate::errors::CarveError;
use crate::flipper::Transpose;
use crate::pixelenergy::CarvePixel;
use crate::seamfinder::{BackwardEnergy, Seam, SeamFinder};
use crate::twodmap::PixelBuffer;
use tracing::{debug, info, trace};

/// Take one pixel out of every row, at the column the seam names for
/// that row.  Everything to the right of the seam slides one cell left
/// and the image's tracked width drops by one; the allocation is left
/// alone.
///
/// The seam must cover every row and stay inside the image.  Seams
/// from `select_vertical_seam` on this image always do.
pub fn remove_vertical_seam<P: Copy>(image: &mut PixelBuffer<P>, seam: &Seam) {
    let (width, height) = image.dimensions();
    assert_eq!(
        seam.len(),
        height as usize,
        "seam does not cover every row of the image"
    );

    for (y, &x) in seam.iter().enumerate() {
        assert!(x < width, "seam leaves the image at row {}", y);
        let x = x as usize;
        image.row_mut(y as u32).copy_within(x + 1.., x);
    }
    image.shrink_width();
}

/// Where a carve has got to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CarveState {
    Idle,
    VerticalPass,
    HorizontalPass,
    Done,
}

/// A struct for holding the image to be carved.  The carver has the
/// image to itself for as long as it lives, and carves it in place.
pub struct SeamCarver<'a, P: CarvePixel> {
    image: &'a mut PixelBuffer<P>,
    state: CarveState,
}

impl<'a, P: CarvePixel> SeamCarver<'a, P> {
    /// Creates a new SeamCarver with an image to be carved.
    pub fn new(image: &'a mut PixelBuffer<P>) -> Self {
        SeamCarver {
            image,
            state: CarveState::Idle,
        }
    }

    pub fn state(&self) -> CarveState {
        self.state
    }

    pub fn image(&self) -> &PixelBuffer<P> {
        &*self.image
    }

    /// Check that `vertical` columns and `horizontal` rows can come out
    /// of the image while leaving at least one of each behind.
    pub fn check(&self, vertical: u32, horizontal: u32) -> Result<(), CarveError> {
        let (width, height) = self.image.dimensions();
        if self.image.is_empty() {
            return Err(CarveError::EmptyImage);
        }
        if vertical >= width {
            return Err(CarveError::TooManyVerticalSeams {
                requested: vertical,
                width,
            });
        }
        if horizontal >= height {
            return Err(CarveError::TooManyHorizontalSeams {
                requested: horizontal,
                height,
            });
        }
        Ok(())
    }

    /// Remove `vertical` vertical seams and then `horizontal`
    /// horizontal seams, returning the new dimensions.  Both counts are
    /// checked before anything is removed: on error the image is
    /// exactly as it was.
    pub fn carve(&mut self, vertical: u32, horizontal: u32) -> Result<(u32, u32), CarveError> {
        self.state = CarveState::Idle;
        self.check(vertical, horizontal)?;
        let (width, height) = self.image.dimensions();
        info!(width, height, vertical, horizontal, "carving");

        self.state = CarveState::VerticalPass;
        for n in 0..vertical {
            let energy = carveonce(&mut *self.image);
            debug!(seam = n + 1, energy, width = self.image.width(), "removed vertical seam");
        }

        // The flipped image's width is the original's height, so every
        // column taken out of it is a row taken out of the result.
        self.state = CarveState::HorizontalPass;
        let mut flipped = self.image.transpose();
        for n in 0..horizontal {
            let energy = carveonce(&mut flipped);
            debug!(seam = n + 1, energy, height = flipped.width(), "removed horizontal seam");
        }
        *self.image = flipped.transpose();

        self.state = CarveState::Done;
        let (width, height) = self.image.dimensions();
        info!(width, height, "carve complete");
        Ok((width, height))
    }
}

fn carveonce<P: CarvePixel>(image: &mut PixelBuffer<P>) -> u64 {
    let seam = BackwardEnergy::new(image).find_vertical_seam();
    trace!(columns = ?seam.columns(), "seam");
    remove_vertical_seam(image, &seam);
    seam.energy()
}

/// Given an image and the number of vertical and horizontal seams to
/// remove, carve them out and return the smaller image.
pub fn seamcarve<P: CarvePixel>(
    mut image: PixelBuffer<P>,
    vertical: u32,
    horizontal: u32,
) -> Result<PixelBuffer<P>, CarveError> {
    SeamCarver::new(&mut image).carve(vertical, horizontal)?;
    Ok(image)
}
