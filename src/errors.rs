// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors
//!
//! Two families: a carve that cannot start, and a file that cannot be
//! read or written.  Broken invariants inside a carve (a seam that
//! leaves the image, maps of different shapes) are bugs and panic.

use failure::Fail;
use std::io;

/// A carve was refused before any seam was removed.  The image is
/// untouched.
#[derive(Debug, Fail, PartialEq, Eq)]
pub enum CarveError {
    #[fail(display = "cannot carve an image with no pixels")]
    EmptyImage,

    #[fail(
        display = "cannot remove {} vertical seams from an image {} pixels wide",
        requested, width
    )]
    TooManyVerticalSeams { requested: u32, width: u32 },

    #[fail(
        display = "cannot remove {} horizontal seams from an image {} pixels high",
        requested, height
    )]
    TooManyHorizontalSeams { requested: u32, height: u32 },
}

#[derive(Debug, Fail)]
pub enum PnmError {
    #[fail(display = "unsupported format tag {:?}, expected P2 or P3", _0)]
    UnsupportedFormat(String),

    #[fail(display = "{} is not a .pgm or .ppm file", _0)]
    UnsupportedExtension(String),

    #[fail(display = "{} is named as {} but its header says {}", path, expected, found)]
    FormatMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[fail(display = "header is missing the {}", _0)]
    MissingHeader(&'static str),

    #[fail(display = "{:?} is not a non-negative integer", _0)]
    InvalidNumber(String),

    #[fail(display = "image has zero width or height")]
    ZeroDimension,

    #[fail(display = "maximum value {} is outside 1..=65535", _0)]
    MaxValueOutOfRange(u32),

    #[fail(display = "sample {} exceeds the maximum value {}", value, max)]
    SampleOutOfRange { value: u32, max: u32 },

    #[fail(display = "a {}x{} image is too large to hold", width, height)]
    ImageTooLarge { width: u32, height: u32 },

    #[fail(display = "expected {} samples, found {}", expected, found)]
    TruncatedPixelData { expected: usize, found: usize },

    #[fail(display = "{}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for PnmError {
    fn from(err: io::Error) -> Self {
        PnmError::Io(err)
    }
}
