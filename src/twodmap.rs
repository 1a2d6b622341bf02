// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The two-dimensional map
//!
//! An addressable two-dimensional field holding one of the objects
//! used during carving: a pixel for the image being carved, or a plain
//! `u64` for the energy and cumulative energy maps.
//!
//! The map keeps a physical row length (the stride) separate from its
//! tracked width.  Removing a seam shifts the tail of each row one cell
//! to the left and then shrinks the tracked width, so the allocation
//! never changes during a pass.  Cells at or past the tracked width are
//! never read, written, compared, or exported.

use image::{GenericImageView, Pixel};
use std::ops::{Index, IndexMut};

/// Defines the basic two-dimensional map.  Addressing is always `(x,
/// y)`, column first, the same as the image crate.
#[derive(Debug, Clone)]
pub struct TwoDimensionalMap<P: Copy> {
    width: u32,
    height: u32,
    stride: u32,
    data: Vec<P>,
}

/// The image being carved.
pub type PixelBuffer<P> = TwoDimensionalMap<P>;

/// Per-pixel importance.
pub type EnergyMap = TwoDimensionalMap<u64>;

/// Minimum total energy of any top-to-bottom path ending at each cell.
pub type CumulativeEnergyMap = TwoDimensionalMap<u64>;

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map, every cell holding the content type's default.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, P::default())
    }
}

impl<P: Copy> TwoDimensionalMap<P> {
    /// Define a new map with every cell set to `value`.
    pub fn filled(width: u32, height: u32, value: P) -> Self {
        TwoDimensionalMap {
            width,
            height,
            stride: width,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Wrap a row-major vector of cells.  Returns `None` if the vector
    /// does not hold exactly `width * height` cells.
    pub fn from_raw(width: u32, height: u32, data: Vec<P>) -> Option<Self> {
        if data.len() != width as usize * height as usize {
            return None;
        }
        Some(TwoDimensionalMap {
            width,
            height,
            stride: width,
            data,
        })
    }

    /// Build a map by calling `f(x, y)` for every cell in row-major
    /// order.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> P,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        TwoDimensionalMap {
            width,
            height,
            stride: width,
            data,
        }
    }

    /// Copy the pixels out of anything the image crate can view.
    pub fn from_view<I>(image: &I) -> Self
    where
        I: GenericImageView<Pixel = P>,
        P: Pixel,
    {
        let (width, height) = image.dimensions();
        Self::from_fn(width, height, |x, y| image.get_pixel(x, y))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.  The
    // stride, not the width, is the distance between rows.
    fn get_index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) is outside a {}x{} map",
            x,
            y,
            self.width,
            self.height
        );
        (y as usize) * (self.stride as usize) + (x as usize)
    }

    fn row_range(&self, y: u32) -> std::ops::Range<usize> {
        assert!(y < self.height, "row {} is outside a map of height {}", y, self.height);
        let start = (y as usize) * (self.stride as usize);
        start..start + self.width as usize
    }

    /// Bounds-safe access: `None` outside the tracked dimensions.
    pub fn get(&self, x: u32, y: u32) -> Option<&P> {
        if x < self.width && y < self.height {
            Some(&self[(x, y)])
        } else {
            None
        }
    }

    /// The tracked cells of one row.
    pub fn row(&self, y: u32) -> &[P] {
        let range = self.row_range(y);
        &self.data[range]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [P] {
        let range = self.row_range(y);
        &mut self.data[range]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[P]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Forget the rightmost tracked column.  The storage is not
    /// touched; the cell that falls off the end of each row is simply
    /// never addressed again.
    pub fn shrink_width(&mut self) {
        assert!(self.width > 0, "cannot shrink a map with no columns");
        self.width -= 1;
    }

    /// The tracked cells, row-major, without the dead tail of each row.
    pub fn into_vec(self) -> Vec<P> {
        if self.stride == self.width {
            return self.data;
        }
        self.rows().flat_map(|row| row.iter().copied()).collect()
    }
}

impl<P: Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}

// Two maps are the same picture if they have the same shape and the
// same tracked cells; the stride and dead tails do not matter.
impl<P: Copy + PartialEq> PartialEq for TwoDimensionalMap<P> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions() && self.rows().eq(other.rows())
    }
}

impl<P: Copy + Eq> Eq for TwoDimensionalMap<P> {}
