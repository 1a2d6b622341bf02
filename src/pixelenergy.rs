// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of a single pixel
//!
//! A pixel's energy is the sum of the absolute differences between it
//! and its four neighbours, taken one channel at a time.  Graymaps and
//! pixmaps share that routine and differ only in how a channel's
//! gradient is folded into the total: a graymap's single channel is
//! used as is, while each channel of a pixmap is squared before the
//! three are summed:
//!
//! ```text
//!        g(c) = |v−up| + |v−down| + |v−left| + |v−right|
//!     e(luma) = g(l)
//!      e(rgb) = g(r)² + g(g)² + g(b)²
//! ```
//!
//! The color energy therefore grows quadratically where the gray
//! energy grows linearly.  Carved output depends on that, so it stays.

use image::{Luma, Pixel, Primitive, Rgb};
use num_traits::AsPrimitive;

/// A pixel the carver knows how to weigh.
pub trait CarvePixel: Pixel + Copy {
    /// Channel `c` of this pixel, widened for signed arithmetic.
    fn channel(&self, c: usize) -> i64;

    /// Fold one channel's four-neighbour gradient into the energy.
    fn channel_energy(gradient: u64) -> u64;
}

impl<S> CarvePixel for Luma<S>
where
    S: Primitive + AsPrimitive<i64>,
    Luma<S>: Pixel,
{
    #[inline]
    fn channel(&self, c: usize) -> i64 {
        self.0[c].as_()
    }

    #[inline]
    fn channel_energy(gradient: u64) -> u64 {
        gradient
    }
}

impl<S> CarvePixel for Rgb<S>
where
    S: Primitive + AsPrimitive<i64>,
    Rgb<S>: Pixel,
{
    #[inline]
    fn channel(&self, c: usize) -> i64 {
        self.0[c].as_()
    }

    #[inline]
    fn channel_energy(gradient: u64) -> u64 {
        gradient * gradient
    }
}

/// The four neighbours of a pixel, already clamped at the image edge:
/// a neighbour that would fall outside the image is the pixel itself.
#[derive(Debug, Copy, Clone)]
pub struct Neighbours<P> {
    pub above: P,
    pub below: P,
    pub left: P,
    pub right: P,
}

/// (Pixel, Neighbours) -> Energy
#[inline]
pub fn energy_of_pixel<P: CarvePixel>(pixel: &P, around: &Neighbours<P>) -> u64 {
    (0..P::CHANNEL_COUNT as usize)
        .map(|c| {
            let v = pixel.channel(c);
            let gradient = [&around.above, &around.below, &around.left, &around.right]
                .iter()
                .map(|n| (v - n.channel(c)).unsigned_abs())
                .sum();
            P::channel_energy(gradient)
        })
        .sum()
}
