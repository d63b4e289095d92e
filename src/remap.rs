use rgb::RGB8;

use crate::RemapConfig;
use crate::cache::{CacheLimit, MemoizedMapper};
use crate::error::RemapError;
use crate::nearest::TablePair;

/// One pixel as read from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSample {
    pub rgb: RGB8,
    /// Present only when the source image has an alpha channel.
    pub alpha: Option<u8>,
}

impl PixelSample {
    pub fn new(rgb: RGB8, alpha: Option<u8>) -> Self {
        Self { rgb, alpha }
    }

    /// All channels equal (gray, black or white).
    pub fn is_achromatic(&self) -> bool {
        self.rgb.r == self.rgb.g && self.rgb.g == self.rgb.b
    }
}

/// Where pixels are read from.
pub trait PixelSource {
    /// `(width, height)` of the readable area.
    fn dimensions(&self) -> (usize, usize);

    fn read_pixel(&self, x: usize, y: usize) -> Result<PixelSample, RemapError>;
}

/// Where remapped pixels are written to.
pub trait PixelSink {
    fn write_pixel(&mut self, x: usize, y: usize, rgb: RGB8, alpha: u8) -> Result<(), RemapError>;
}

/// Receives fractional progress in `[0, 1]` after every completed row.
pub trait ProgressSink {
    fn report(&mut self, fraction: f32);
}

impl ProgressSink for () {
    fn report(&mut self, _fraction: f32) {}
}

impl<F: FnMut(f32)> ProgressSink for F {
    fn report(&mut self, fraction: f32) {
        self(fraction)
    }
}

/// Per-coordinate membership test, e.g. an interactive selection.
pub trait Selection {
    fn contains(&self, x: usize, y: usize) -> bool;
}

impl<F: Fn(usize, usize) -> bool> Selection for F {
    fn contains(&self, x: usize, y: usize) -> bool {
        self(x, y)
    }
}

/// Rectangle of coordinates to visit, optionally narrowed by a [`Selection`].
#[derive(Clone, Copy)]
pub struct RemapRegion<'a> {
    pub left: usize,
    pub top: usize,
    pub width: usize,
    pub height: usize,
    selection: Option<&'a dyn Selection>,
}

impl<'a> RemapRegion<'a> {
    /// Every coordinate in `[0, width) x [0, height)`.
    pub fn whole(width: usize, height: usize) -> Self {
        Self::rect(0, 0, width, height)
    }

    pub fn rect(left: usize, top: usize, width: usize, height: usize) -> Self {
        Self {
            left,
            top,
            width,
            height,
            selection: None,
        }
    }

    /// Restrict the region to coordinates the selection contains.
    pub fn with_selection(mut self, selection: &'a dyn Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.selection.is_none_or(|sel| sel.contains(x, y))
    }

    fn check_bounds(&self, (image_width, image_height): (usize, usize)) -> Result<(), RemapError> {
        let fits = self
            .left
            .checked_add(self.width)
            .is_some_and(|right| right <= image_width)
            && self
                .top
                .checked_add(self.height)
                .is_some_and(|bottom| bottom <= image_height);
        if fits {
            Ok(())
        } else {
            Err(RemapError::RegionOutOfBounds {
                left: self.left,
                top: self.top,
                width: self.width,
                height: self.height,
                image_width,
                image_height,
            })
        }
    }
}

impl core::fmt::Debug for RemapRegion<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RemapRegion")
            .field("left", &self.left)
            .field("top", &self.top)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("masked", &self.selection.is_some())
            .finish()
    }
}

/// Counters from one [`RemapEngine::remap`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemapStats {
    /// Rows completed.
    pub rows: usize,
    /// Pixels written to the sink.
    pub written: usize,
    /// Achromatic pixels left alone.
    pub skipped_gray: usize,
    /// Pixels outside the selection.
    pub skipped_unselected: usize,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

/// Drives a remap pass over a region: selection, gray and alpha policy, progress.
#[derive(Debug, Clone)]
pub struct RemapEngine {
    mapper: MemoizedMapper,
    ignore_gray: bool,
}

impl RemapEngine {
    /// Resolve and sample both colormaps. Fails before any pixel is touched.
    pub fn new(config: &RemapConfig) -> Result<Self, RemapError> {
        let pair = TablePair::sample(
            &config.source_colormap,
            &config.output_colormap,
            config.table_size,
        )?;
        Ok(Self::from_tables(pair, config.ignore_gray, config.cache_limit))
    }

    pub fn from_tables(pair: TablePair, ignore_gray: bool, cache_limit: CacheLimit) -> Self {
        Self {
            mapper: MemoizedMapper::with_limit(pair, cache_limit),
            ignore_gray,
        }
    }

    pub fn mapper(&self) -> &MemoizedMapper {
        &self.mapper
    }

    /// Remap every eligible pixel of `region`, row by row.
    ///
    /// Pixels outside the selection and, with `ignore_gray`, achromatic pixels
    /// are never written. Source alpha is preserved; sources without alpha
    /// produce opaque output. The first read or write error aborts the pass.
    pub fn remap<S, W, P>(
        &mut self,
        region: &RemapRegion<'_>,
        source: &S,
        sink: &mut W,
        progress: &mut P,
    ) -> Result<RemapStats, RemapError>
    where
        S: PixelSource + ?Sized,
        W: PixelSink + ?Sized,
        P: ProgressSink + ?Sized,
    {
        region.check_bounds(source.dimensions())?;

        let hits_before = self.mapper.hits();
        let misses_before = self.mapper.misses();
        let mut stats = RemapStats::default();

        for y in region.top..region.top + region.height {
            for x in region.left..region.left + region.width {
                if !region.contains(x, y) {
                    stats.skipped_unselected += 1;
                    continue;
                }

                let sample = source.read_pixel(x, y)?;
                if self.ignore_gray && sample.is_achromatic() {
                    stats.skipped_gray += 1;
                    continue;
                }

                let mapped = self.mapper.map(sample.rgb);
                let alpha = sample.alpha.unwrap_or(u8::MAX);
                sink.write_pixel(x, y, mapped, alpha)?;
                stats.written += 1;
            }

            stats.rows += 1;
            progress.report(stats.rows as f32 / region.height as f32);
        }

        stats.cache_hits = self.mapper.hits() - hits_before;
        stats.cache_misses = self.mapper.misses() - misses_before;

        log::debug!("remapped {region:?}: {stats:?}");
        Ok(stats)
    }
}
