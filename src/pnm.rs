// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plain-text portable anymaps
//!
//! Reads and writes the two plain-text flavours of PNM: the `P2`
//! graymap (`.pgm`) and the `P3` pixmap (`.ppm`).  The layout is a
//! format tag line, one comment line, the width and height, the
//! maximum sample value, and then every sample in row-major order
//! separated by whitespace.
//!
//! The comment and maximum value are carried through a carve untouched
//! and written back out; the width and height always follow the image.

use crate::errors::{CarveError, PnmError};
use crate::seamcarver::SeamCarver;
use crate::twodmap::PixelBuffer;
use image::{Luma, Pixel, Rgb};
use num_traits::NumCast;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::SplitWhitespace;
use tracing::debug;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PnmFormat {
    /// `P2`, one sample per pixel.
    Graymap,
    /// `P3`, red, green and blue samples per pixel.
    Pixmap,
}

impl PnmFormat {
    pub fn tag(self) -> &'static str {
        match self {
            PnmFormat::Graymap => "P2",
            PnmFormat::Pixmap => "P3",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            PnmFormat::Graymap => "pgm",
            PnmFormat::Pixmap => "ppm",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self, PnmError> {
        match tag {
            "P2" => Ok(PnmFormat::Graymap),
            "P3" => Ok(PnmFormat::Pixmap),
            other => Err(PnmError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Pick the format from a file's suffix.
    pub fn from_path(path: &Path) -> Result<Self, PnmError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("pgm") => Ok(PnmFormat::Graymap),
            Some("ppm") => Ok(PnmFormat::Pixmap),
            _ => Err(PnmError::UnsupportedExtension(path.display().to_string())),
        }
    }

    fn channels(self) -> usize {
        match self {
            PnmFormat::Graymap => 1,
            PnmFormat::Pixmap => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PnmHeader {
    pub format: PnmFormat,
    /// The second line of the file exactly as read, `#` included.
    pub comment: String,
    pub width: u32,
    pub height: u32,
    pub max_value: u16,
}

/// The decoded pixels, one variant per format.
#[derive(Debug, Clone, PartialEq)]
pub enum PnmImage {
    Gray(PixelBuffer<Luma<u16>>),
    Color(PixelBuffer<Rgb<u16>>),
}

impl PnmImage {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            PnmImage::Gray(image) => image.dimensions(),
            PnmImage::Color(image) => image.dimensions(),
        }
    }
}

/// A whole file: the header and the image it describes.
#[derive(Debug, Clone, PartialEq)]
pub struct Pnm {
    header: PnmHeader,
    image: PnmImage,
}

impl Pnm {
    pub fn from_gray(comment: &str, max_value: u16, image: PixelBuffer<Luma<u16>>) -> Self {
        Pnm::with_image(PnmFormat::Graymap, comment, max_value, PnmImage::Gray(image))
    }

    pub fn from_color(comment: &str, max_value: u16, image: PixelBuffer<Rgb<u16>>) -> Self {
        Pnm::with_image(PnmFormat::Pixmap, comment, max_value, PnmImage::Color(image))
    }

    fn with_image(format: PnmFormat, comment: &str, max_value: u16, image: PnmImage) -> Self {
        let (width, height) = image.dimensions();
        Pnm {
            header: PnmHeader {
                format,
                comment: cq!(comment.is_empty(), "#", comment).to_string(),
                width,
                height,
                max_value,
            },
            image,
        }
    }

    pub fn header(&self) -> &PnmHeader {
        &self.header
    }

    pub fn image(&self) -> &PnmImage {
        &self.image
    }

    /// Parse the text of a `P2` or `P3` file.
    pub fn decode(text: &str) -> Result<Self, PnmError> {
        let (tag, rest) = split_line(text).ok_or(PnmError::MissingHeader("format tag"))?;
        let format = PnmFormat::from_tag(tag.trim())?;

        // The second line is the comment, whatever it says.
        let (comment, body) = split_line(rest).ok_or(PnmError::MissingHeader("comment"))?;

        let mut tokens = body.split_whitespace();
        let width = next_number(&mut tokens, "width")?;
        let height = next_number(&mut tokens, "height")?;
        let max = next_number(&mut tokens, "maximum value")?;
        if width == 0 || height == 0 {
            return Err(PnmError::ZeroDimension);
        }
        let max_value = match <u16 as NumCast>::from(max) {
            Some(max_value) if max_value > 0 => max_value,
            _ => return Err(PnmError::MaxValueOutOfRange(max)),
        };

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(format.channels()))
            .ok_or(PnmError::ImageTooLarge { width, height })?;
        // Never trust the header for the allocation: every sample takes
        // at least two bytes of text.
        let mut samples = Vec::with_capacity(expected.min(body.len() / 2 + 1));
        for token in tokens.take(expected) {
            let value = parse_number(token)?;
            if value > max {
                return Err(PnmError::SampleOutOfRange { value, max });
            }
            samples.push(value as u16);
        }
        if samples.len() != expected {
            return Err(PnmError::TruncatedPixelData {
                expected,
                found: samples.len(),
            });
        }

        let image = match format {
            PnmFormat::Graymap => {
                PnmImage::Gray(buffer(width, height, samples.iter().map(|&v| Luma([v])))?)
            }
            PnmFormat::Pixmap => {
                let pixels = samples.chunks_exact(3).map(|c| Rgb([c[0], c[1], c[2]]));
                PnmImage::Color(buffer(width, height, pixels)?)
            }
        };
        debug!(tag = format.tag(), width, height, max_value, "decoded image");

        Ok(Pnm {
            header: PnmHeader {
                format,
                comment: comment.to_string(),
                width,
                height,
                max_value,
            },
            image,
        })
    }

    /// Write the file back out: the four header lines, then one line of
    /// samples per row, each sample followed by a single space.
    pub fn encode<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let header = &self.header;
        writeln!(out, "{}", header.format.tag())?;
        writeln!(out, "{}", header.comment)?;
        writeln!(out, "{} {}", header.width, header.height)?;
        writeln!(out, "{}", header.max_value)?;
        match &self.image {
            PnmImage::Gray(image) => write_samples(out, image),
            PnmImage::Color(image) => write_samples(out, image),
        }
    }

    /// Carve the image and bring the header's dimensions along with it.
    /// On error neither the image nor the header changes.
    pub fn carve(&mut self, vertical: u32, horizontal: u32) -> Result<(), CarveError> {
        let (width, height) = match &mut self.image {
            PnmImage::Gray(image) => SeamCarver::new(image).carve(vertical, horizontal)?,
            PnmImage::Color(image) => SeamCarver::new(image).carve(vertical, horizontal)?,
        };
        self.header.width = width;
        self.header.height = height;
        Ok(())
    }
}

fn buffer<P, I>(width: u32, height: u32, pixels: I) -> Result<PixelBuffer<P>, PnmError>
where
    P: Copy,
    I: Iterator<Item = P>,
{
    let pixels: Vec<P> = pixels.collect();
    let found = pixels.len();
    PixelBuffer::from_raw(width, height, pixels).ok_or(PnmError::TruncatedPixelData {
        expected: width as usize * height as usize,
        found,
    })
}

fn write_samples<W, P>(out: &mut W, image: &PixelBuffer<P>) -> io::Result<()>
where
    W: Write,
    P: Pixel<Subpixel = u16>,
{
    for row in image.rows() {
        for pixel in row {
            for sample in pixel.channels() {
                write!(out, "{} ", sample)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

// Split off the first line, dropping the newline and any carriage
// return.  `None` once there is nothing left.
fn split_line(text: &str) -> Option<(&str, &str)> {
    if text.is_empty() {
        return None;
    }
    let (line, rest) = match text.find('\n') {
        Some(end) => (&text[..end], &text[end + 1..]),
        None => (text, ""),
    };
    Some((line.trim_end_matches('\r'), rest))
}

fn parse_number(token: &str) -> Result<u32, PnmError> {
    token
        .parse()
        .map_err(|_| PnmError::InvalidNumber(token.to_string()))
}

fn next_number(tokens: &mut SplitWhitespace, field: &'static str) -> Result<u32, PnmError> {
    tokens
        .next()
        .ok_or(PnmError::MissingHeader(field))
        .and_then(parse_number)
}

/// Read and decode a file, dispatching on its suffix.  A `.pgm` must
/// hold a `P2` graymap and a `.ppm` a `P3` pixmap.
pub fn read_file(path: &Path) -> Result<Pnm, PnmError> {
    let expected = PnmFormat::from_path(path)?;
    let text = fs::read_to_string(path)?;
    let pnm = Pnm::decode(&text)?;
    if pnm.header.format != expected {
        return Err(PnmError::FormatMismatch {
            path: path.display().to_string(),
            expected: expected.tag(),
            found: pnm.header.format.tag(),
        });
    }
    Ok(pnm)
}

pub fn write_file(path: &Path, pnm: &Pnm) -> Result<(), PnmError> {
    let mut out = BufWriter::new(fs::File::create(path)?);
    pnm.encode(&mut out)?;
    out.flush()?;
    Ok(())
}

/// The default output name: `dir/name.pgm` carved by 3 and 2 becomes
/// `dir/name_processed_3_2.pgm`.
pub fn processed_path(input: &Path, format: PnmFormat, vertical: u32, horizontal: u32) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!(
        "{}_processed_{}_{}.{}",
        stem,
        vertical,
        horizontal,
        format.extension()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAY: &str = "P2\n# tiny\n3 2\n15\n0 1 2\n3 4 15\n";
    const COLOR: &str = "P3\n# two pixels\n2 1\n255\n255 0 0 0 0 255\n";

    fn encoded(pnm: &Pnm) -> String {
        let mut out = Vec::new();
        pnm.encode(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn decodes_a_graymap() {
        let pnm = Pnm::decode(GRAY).unwrap();
        assert_eq!(
            pnm.header(),
            &PnmHeader {
                format: PnmFormat::Graymap,
                comment: "# tiny".to_string(),
                width: 3,
                height: 2,
                max_value: 15,
            }
        );
        match pnm.image() {
            PnmImage::Gray(image) => {
                assert_eq!(image[(2, 1)], Luma([15]));
                assert_eq!(image[(1, 0)], Luma([1]));
            }
            other => panic!("expected a graymap, got {:?}", other),
        }
    }

    #[test]
    fn decodes_a_pixmap() {
        let pnm = Pnm::decode(COLOR).unwrap();
        assert_eq!(pnm.header().format, PnmFormat::Pixmap);
        match pnm.image() {
            PnmImage::Color(image) => {
                assert_eq!(image.dimensions(), (2, 1));
                assert_eq!(image[(0, 0)], Rgb([255, 0, 0]));
                assert_eq!(image[(1, 0)], Rgb([0, 0, 255]));
            }
            other => panic!("expected a pixmap, got {:?}", other),
        }
    }

    #[test]
    fn encodes_in_the_same_layout() {
        assert_eq!(
            encoded(&Pnm::decode(GRAY).unwrap()),
            "P2\n# tiny\n3 2\n15\n0 1 2 \n3 4 15 \n"
        );
        assert_eq!(
            encoded(&Pnm::decode(COLOR).unwrap()),
            "P3\n# two pixels\n2 1\n255\n255 0 0 0 0 255 \n"
        );
    }

    #[test]
    fn header_numbers_may_share_lines() {
        let pnm = Pnm::decode("P2\n#\n2 1 9\n4\n5\n").unwrap();
        assert_eq!(pnm.header().max_value, 9);
        assert_eq!(encoded(&pnm), "P2\n#\n2 1\n9\n4 5 \n");
    }

    #[test]
    fn second_line_is_always_the_comment() {
        let pnm = Pnm::decode("P2\nCreated by GIMP\n2 1\n9\n1 2\n").unwrap();
        assert_eq!(pnm.header().comment, "Created by GIMP");
        assert_eq!(pnm.header().width, 2);
        assert_eq!(encoded(&pnm), "P2\nCreated by GIMP\n2 1\n9\n1 2 \n");

        // Even one that looks like the dimensions.
        let pnm = Pnm::decode("P2\n7 7\n1 1\n3\n2\n").unwrap();
        assert_eq!(pnm.header().comment, "7 7");
        assert_eq!(pnm.image().dimensions(), (1, 1));

        let pnm = Pnm::decode("P2\n\n1 1\n3\n2\n").unwrap();
        assert_eq!(pnm.header().comment, "");
        assert!(matches!(
            Pnm::decode("P2\n"),
            Err(PnmError::MissingHeader("comment"))
        ));
    }

    #[test]
    fn huge_headers_fail_without_allocating() {
        assert!(matches!(
            Pnm::decode("P3\n# x\n4294967295 4294967295\n255\n1 2 3\n"),
            Err(PnmError::ImageTooLarge {
                width: 4294967295,
                height: 4294967295
            })
        ));
        assert!(matches!(
            Pnm::decode("P3\n# x\n100000 100000\n255\n1 2 3\n"),
            Err(PnmError::TruncatedPixelData { found: 3, .. })
        ));
    }

    #[test]
    fn builds_from_a_buffer() {
        let image = PixelBuffer::from_fn(2, 2, |x, y| Luma([(x + 2 * y) as u16]));
        let pnm = Pnm::from_gray("", 3, image);
        assert_eq!((pnm.header().width, pnm.header().height), (2, 2));
        assert_eq!(encoded(&pnm), "P2\n#\n2 2\n3\n0 1 \n2 3 \n");
        let pixel = PixelBuffer::filled(1, 1, Rgb([1u16, 2, 3]));
        let pnm = Pnm::from_color("# one", 3, pixel);
        assert_eq!(encoded(&pnm), "P3\n# one\n1 1\n3\n1 2 3 \n");
    }

    #[test]
    fn tolerates_carriage_returns() {
        let pnm = Pnm::decode("P2\r\n# dos\r\n1 1\r\n3\r\n2\r\n").unwrap();
        assert_eq!(pnm.header().comment, "# dos");
    }

    #[test]
    fn rejects_bad_files() {
        assert!(matches!(Pnm::decode(""), Err(PnmError::MissingHeader(_))));
        assert!(matches!(
            Pnm::decode("P6\n# binary\n1 1\n255\n"),
            Err(PnmError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            Pnm::decode("P2\n# x\n2\n"),
            Err(PnmError::MissingHeader("height"))
        ));
        assert!(matches!(
            Pnm::decode("P2\n# x\n2 two\n"),
            Err(PnmError::InvalidNumber(_))
        ));
        assert!(matches!(
            Pnm::decode("P2\n# x\n0 2\n5\n"),
            Err(PnmError::ZeroDimension)
        ));
        assert!(matches!(
            Pnm::decode("P2\n# x\n1 1\n70000\n1\n"),
            Err(PnmError::MaxValueOutOfRange(70000))
        ));
        assert!(matches!(
            Pnm::decode("P2\n# x\n2 1\n5\n1 6\n"),
            Err(PnmError::SampleOutOfRange { value: 6, max: 5 })
        ));
        assert!(matches!(
            Pnm::decode("P3\n# x\n2 1\n5\n1 2 3 4\n"),
            Err(PnmError::TruncatedPixelData {
                expected: 6,
                found: 4
            })
        ));
    }

    #[test]
    fn carving_updates_the_header() {
        let mut pnm = Pnm::decode("P2\n# c\n4 3\n9\n1 1 1 1\n1 9 1 1\n1 1 1 1\n").unwrap();
        pnm.carve(1, 1).unwrap();
        assert_eq!((pnm.header().width, pnm.header().height), (3, 2));
        assert_eq!(pnm.image().dimensions(), (3, 2));
        assert_eq!(pnm.header().comment, "# c");
        assert_eq!(pnm.header().max_value, 9);
    }

    #[test]
    fn refused_carve_changes_nothing() {
        let mut pnm = Pnm::decode(COLOR).unwrap();
        let before = pnm.clone();
        assert_eq!(
            pnm.carve(2, 0),
            Err(CarveError::TooManyVerticalSeams {
                requested: 2,
                width: 2
            })
        );
        assert_eq!(pnm, before);
    }

    #[test]
    fn format_follows_the_suffix() {
        assert_eq!(
            PnmFormat::from_path(Path::new("a/b.pgm")).unwrap(),
            PnmFormat::Graymap
        );
        assert_eq!(
            PnmFormat::from_path(Path::new("b.ppm")).unwrap(),
            PnmFormat::Pixmap
        );
        assert!(matches!(
            PnmFormat::from_path(Path::new("b.png")),
            Err(PnmError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn output_name_carries_the_seam_counts() {
        assert_eq!(
            processed_path(Path::new("pics/cat.pgm"), PnmFormat::Graymap, 3, 2),
            PathBuf::from("pics/cat_processed_3_2.pgm")
        );
    }

    #[test]
    fn files_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.pgm");
        let pnm = Pnm::decode(GRAY).unwrap();
        write_file(&path, &pnm).unwrap();
        assert_eq!(read_file(&path).unwrap(), pnm);
    }

    #[test]
    fn suffix_and_tag_must_agree() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("liar.ppm");
        fs::write(&path, GRAY).unwrap();
        assert!(matches!(
            read_file(&path),
            Err(PnmError::FormatMismatch { .. })
        ));
    }
}
