//! Binary PPM (P6) loader for decorative images
//!
//! Only the win screen uses images. Anything wrong with a file is reported
//! as a `PpmError`; `draw_ppm_scaled` logs it and draws nothing.

use std::path::Path;

use glam::IVec2;

use crate::platform::{Canvas, Rgb};

/// Refuse images above this many pixels
const MAX_PIXELS: usize = 1 << 24;

/// Errors decoding a PPM image
#[derive(Debug, thiserror::Error)]
pub enum PpmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a binary PPM (expected P6 magic)")]
    BadMagic,
    #[error("malformed header: {0}")]
    BadHeader(&'static str),
    #[error("image {width}x{height} is too large")]
    TooLarge { width: usize, height: usize },
    #[error("pixel data truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// Decoded RGB raster
#[derive(Debug, Clone, PartialEq)]
pub struct PpmImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

/// Cursor over the ASCII header
struct Header<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Header<'a> {
    /// Skip whitespace and `#` comments
    fn skip_separators(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.bytes.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn token(&mut self) -> Option<&'a [u8]> {
        self.skip_separators();
        let start = self.pos;
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() || b == b'#' {
                break;
            }
            self.pos += 1;
        }
        (self.pos > start).then(|| &self.bytes[start..self.pos])
    }

    fn number(&mut self, missing: &'static str) -> Result<usize, PpmError> {
        let token = self.token().ok_or(PpmError::BadHeader(missing))?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(PpmError::BadHeader(missing))
    }
}

impl PpmImage {
    /// Decode a P6 image from memory
    pub fn parse(bytes: &[u8]) -> Result<Self, PpmError> {
        let mut header = Header { bytes, pos: 0 };
        if header.token() != Some(b"P6".as_slice()) {
            return Err(PpmError::BadMagic);
        }

        let width = header.number("width")?;
        let height = header.number("height")?;
        let maxval = header.number("maxval")?;
        if width == 0 || height == 0 {
            return Err(PpmError::BadHeader("zero dimension"));
        }
        if maxval == 0 || maxval > 255 {
            return Err(PpmError::BadHeader("maxval must be 1-255"));
        }

        // Exactly one whitespace byte separates the header from the raster
        match bytes.get(header.pos) {
            Some(b) if b.is_ascii_whitespace() => header.pos += 1,
            _ => return Err(PpmError::BadHeader("missing raster separator")),
        }

        let count = width
            .checked_mul(height)
            .filter(|&n| n <= MAX_PIXELS)
            .ok_or(PpmError::TooLarge { width, height })?;
        let data = &bytes[header.pos..];
        let expected = count * 3;
        if data.len() < expected {
            return Err(PpmError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        let pixels = data[..expected]
            .chunks_exact(3)
            .map(|px| Rgb(px[0], px[1], px[2]))
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Read and decode a P6 file
    pub fn load(path: &Path) -> Result<Self, PpmError> {
        let bytes = std::fs::read(path)?;
        let image = Self::parse(&bytes)?;
        log::debug!("Loaded {}x{} image {}", image.width, image.height, path.display());
        Ok(image)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Draw scaled (nearest neighbour) into the rectangle at `dest` of `size` pixels
    pub fn blit_scaled(&self, canvas: &mut impl Canvas, dest: IVec2, size: IVec2) {
        if size.x <= 0 || size.y <= 0 {
            return;
        }
        let scale_x = self.width as f32 / size.x as f32;
        let scale_y = self.height as f32 / size.y as f32;

        for dy in 0..size.y {
            let sy = ((dy as f32 * scale_y) as usize).min(self.height - 1);
            for dx in 0..size.x {
                let sx = ((dx as f32 * scale_x) as usize).min(self.width - 1);
                canvas.color(self.pixels[sy * self.width + sx]);
                canvas.point(dest + IVec2::new(dx, dy));
            }
        }
    }
}

/// Load `path` and blit it into the rectangle. Failures are logged and skipped.
pub fn draw_ppm_scaled(canvas: &mut impl Canvas, path: &Path, dest: IVec2, size: IVec2) -> bool {
    match PpmImage::load(path) {
        Ok(image) => {
            image.blit_scaled(canvas, dest, size);
            true
        }
        Err(e) => {
            log::warn!("Skipping image {}: {e}", path.display());
            false
        }
    }
}
