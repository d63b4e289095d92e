//! [`PixelSource`] / [`PixelSink`] adapters over `imgref` buffers, and selection masks.

use imgref::{ImgRef, ImgRefMut, ImgVec};
use rgb::{RGB8, RGBA8};

use crate::error::RemapError;
use crate::remap::{PixelSample, PixelSink, PixelSource, RemapRegion, Selection};

fn pixel_at<T: Copy>(img: &ImgRef<'_, T>, x: usize, y: usize) -> Option<T> {
    if x >= img.width() || y >= img.height() {
        return None;
    }
    img.buf().get(y * img.stride() + x).copied()
}

impl PixelSource for ImgRef<'_, RGB8> {
    fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    fn read_pixel(&self, x: usize, y: usize) -> Result<PixelSample, RemapError> {
        let px = pixel_at(self, x, y)
            .ok_or_else(|| RemapError::pixel_io(x, y, "read out of bounds"))?;
        Ok(PixelSample::new(px, None))
    }
}

impl PixelSource for ImgRef<'_, RGBA8> {
    fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    fn read_pixel(&self, x: usize, y: usize) -> Result<PixelSample, RemapError> {
        let px = pixel_at(self, x, y)
            .ok_or_else(|| RemapError::pixel_io(x, y, "read out of bounds"))?;
        Ok(PixelSample::new(RGB8::new(px.r, px.g, px.b), Some(px.a)))
    }
}

fn put(
    buf: &mut [RGBA8],
    (width, height, stride): (usize, usize, usize),
    x: usize,
    y: usize,
    rgb: RGB8,
    alpha: u8,
) -> Result<(), RemapError> {
    if x >= width || y >= height {
        return Err(RemapError::pixel_io(x, y, "write out of bounds"));
    }
    let slot = buf
        .get_mut(y * stride + x)
        .ok_or_else(|| RemapError::pixel_io(x, y, "write out of bounds"))?;
    *slot = RGBA8::new(rgb.r, rgb.g, rgb.b, alpha);
    Ok(())
}

impl PixelSink for ImgVec<RGBA8> {
    fn write_pixel(&mut self, x: usize, y: usize, rgb: RGB8, alpha: u8) -> Result<(), RemapError> {
        let dims = (self.width(), self.height(), self.stride());
        put(self.buf_mut(), dims, x, y, rgb, alpha)
    }
}

impl PixelSink for ImgRefMut<'_, RGBA8> {
    fn write_pixel(&mut self, x: usize, y: usize, rgb: RGB8, alpha: u8) -> Result<(), RemapError> {
        let dims = (self.width(), self.height(), self.stride());
        put(self.buf_mut(), dims, x, y, rgb, alpha)
    }
}

/// A selection channel: a pixel is selected when its value is non-zero.
#[derive(Debug, Clone, Copy)]
pub struct SelectionMask<'a> {
    mask: ImgRef<'a, u8>,
}

impl<'a> SelectionMask<'a> {
    pub fn new(mask: ImgRef<'a, u8>) -> Self {
        Self { mask }
    }

    /// Bounding box of the selected pixels, masked by the selection itself.
    /// `None` if nothing is selected.
    pub fn region(&self) -> Option<RemapRegion<'_>> {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for (y, row) in self.mask.rows().enumerate() {
            for (x, _) in row.iter().enumerate().filter(|&(_, &v)| v > 0) {
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }

        let (x0, y0, x1, y1) = bounds?;
        Some(RemapRegion::rect(x0, y0, x1 - x0 + 1, y1 - y0 + 1).with_selection(self))
    }
}

impl Selection for SelectionMask<'_> {
    fn contains(&self, x: usize, y: usize) -> bool {
        pixel_at(&self.mask, x, y).is_some_and(|v| v > 0)
    }
}
