//! Recolor images drawn with one continuous colormap onto another.
//!
//! Pixels are classified against a discretized source ramp (`jet` by
//! default) and replaced by the entry at the same position of a target ramp
//! (`viridis` by default). Repeated colors are memoized, gray pixels can be
//! left untouched, and alpha is carried through.
//!
//! ```
//! use zenrecolor::{RemapConfig, recolor};
//!
//! let pixels = vec![rgb::RGB8::new(0, 0, 255), rgb::RGB8::new(128, 128, 128)];
//! let result = recolor(&pixels, 2, 1, &RemapConfig::new().output_colormap("cividis")).unwrap();
//! assert_eq!(result.pixels()[1], rgb::RGBA8::new(128, 128, 128, 255));
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod cache;
pub mod colormap;
pub mod error;
pub mod image;
pub mod nearest;
mod ramps;
pub mod remap;
pub mod table;

pub use cache::{CacheLimit, MemoizedMapper};
pub use colormap::{ColorFunction, Colormap};
pub use error::RemapError;
pub use image::SelectionMask;
pub use imgref::{ImgRef, ImgVec};
pub use nearest::{TablePair, classify};
pub use remap::{
    PixelSample, PixelSink, PixelSource, ProgressSink, RemapEngine, RemapRegion, RemapStats,
    Selection,
};
pub use table::{ColormapTable, DEFAULT_TABLE_SIZE};

use alloc::string::String;
use alloc::vec::Vec;

use rgb::{RGB8, RGBA8};

/// Configuration for a remap operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapConfig {
    /// Colormap the input image was rendered with.
    pub source_colormap: String,
    /// Colormap to render the output with.
    pub output_colormap: String,
    /// Entries sampled from each colormap (must be > 0).
    pub table_size: usize,
    /// Leave pixels with r == g == b untouched, preserving annotations and gray backgrounds.
    pub ignore_gray: bool,
    /// Bound on memoized colors.
    pub cache_limit: CacheLimit,
}

impl Default for RemapConfig {
    fn default() -> Self {
        Self {
            source_colormap: String::from("jet"),
            output_colormap: String::from("viridis"),
            table_size: DEFAULT_TABLE_SIZE,
            ignore_gray: true,
            cache_limit: CacheLimit::Unbounded,
        }
    }
}

impl RemapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_colormap(mut self, name: impl Into<String>) -> Self {
        self.source_colormap = name.into();
        self
    }

    pub fn output_colormap(mut self, name: impl Into<String>) -> Self {
        self.output_colormap = name.into();
        self
    }

    pub fn table_size(mut self, n: usize) -> Self {
        self.table_size = n;
        self
    }

    pub fn ignore_gray(mut self, ignore: bool) -> Self {
        self.ignore_gray = ignore;
        self
    }

    pub fn cache_limit(mut self, limit: CacheLimit) -> Self {
        self.cache_limit = limit;
        self
    }
}

/// Output of [`recolor`] and friends: a new RGBA layer plus pass statistics.
#[derive(Debug)]
pub struct RecolorResult {
    pixels: ImgVec<RGBA8>,
    stats: RemapStats,
}

impl RecolorResult {
    /// Output pixels, row-major, same dimensions as the input.
    pub fn pixels(&self) -> &[RGBA8] {
        self.pixels.buf()
    }

    pub fn image(&self) -> ImgRef<'_, RGBA8> {
        self.pixels.as_ref()
    }

    pub fn into_pixels(self) -> Vec<RGBA8> {
        self.pixels.into_buf()
    }

    pub fn stats(&self) -> &RemapStats {
        &self.stats
    }
}

/// Recolor an RGB image. The output is opaque; skipped pixels keep their input color.
pub fn recolor(
    pixels: &[RGB8],
    width: usize,
    height: usize,
    config: &RemapConfig,
) -> Result<RecolorResult, RemapError> {
    validate_inputs(pixels.len(), width, height)?;
    let mut engine = RemapEngine::new(config)?;

    let layer: Vec<RGBA8> = pixels
        .iter()
        .map(|p| RGBA8::new(p.r, p.g, p.b, u8::MAX))
        .collect();
    let mut out = ImgVec::new(layer, width, height);
    let src = ImgRef::new(pixels, width, height);

    let stats = engine.remap(&RemapRegion::whole(width, height), &src, &mut out, &mut ())?;
    Ok(RecolorResult { pixels: out, stats })
}

/// Recolor an RGBA image, preserving each pixel's alpha.
pub fn recolor_rgba(
    pixels: &[RGBA8],
    width: usize,
    height: usize,
    config: &RemapConfig,
) -> Result<RecolorResult, RemapError> {
    validate_inputs(pixels.len(), width, height)?;
    let mut engine = RemapEngine::new(config)?;

    let mut out = ImgVec::new(pixels.to_vec(), width, height);
    let src = ImgRef::new(pixels, width, height);

    let stats = engine.remap(&RemapRegion::whole(width, height), &src, &mut out, &mut ())?;
    Ok(RecolorResult { pixels: out, stats })
}

/// Recolor only the selected pixels of an RGBA image.
///
/// `selection` holds one byte per pixel, non-zero meaning selected. An empty
/// selection recolors the whole image.
pub fn recolor_rgba_masked(
    pixels: &[RGBA8],
    width: usize,
    height: usize,
    selection: &[u8],
    config: &RemapConfig,
) -> Result<RecolorResult, RemapError> {
    validate_inputs(pixels.len(), width, height)?;
    validate_inputs(selection.len(), width, height)?;
    let mut engine = RemapEngine::new(config)?;

    let mut out = ImgVec::new(pixels.to_vec(), width, height);
    let src = ImgRef::new(pixels, width, height);
    let mask = SelectionMask::new(ImgRef::new(selection, width, height));
    let region = mask.region().unwrap_or_else(|| {
        log::debug!("empty selection, recoloring the whole image");
        RemapRegion::whole(width, height)
    });

    let stats = engine.remap(&region, &src, &mut out, &mut ())?;
    Ok(RecolorResult { pixels: out, stats })
}

fn validate_inputs(pixel_count: usize, width: usize, height: usize) -> Result<(), RemapError> {
    if width == 0 || height == 0 {
        return Err(RemapError::ZeroDimension);
    }
    if Some(pixel_count) != width.checked_mul(height) {
        return Err(RemapError::DimensionMismatch {
            len: pixel_count,
            width,
            height,
        });
    }
    Ok(())
}
