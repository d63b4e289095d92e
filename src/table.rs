use alloc::vec::Vec;

use rgb::RGB8;

use crate::colormap::{ColorFunction, Colormap};
use crate::error::RemapError;

/// Number of entries sampled from each colormap unless configured otherwise.
pub const DEFAULT_TABLE_SIZE: usize = 512;

/// A colormap discretized into `len()` RGB8 entries at evenly spaced parameters over `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColormapTable {
    entries: Vec<RGB8>,
}

impl ColormapTable {
    /// Sample a registered colormap by name.
    pub fn sample(name: &str, count: usize) -> Result<Self, RemapError> {
        let cmap = Colormap::from_name(name)?;
        Self::from_function(&cmap, count)
    }

    /// Sample any color function at `count` evenly spaced parameters, `t = 0` and `t = 1` included.
    ///
    /// Channels are scaled to 0..=255 and rounded half away from zero. Alpha is dropped.
    pub fn from_function(func: &dyn ColorFunction, count: usize) -> Result<Self, RemapError> {
        if count == 0 {
            return Err(RemapError::InvalidTableSize);
        }

        let step = if count > 1 {
            1.0 / (count - 1) as f64
        } else {
            0.0
        };

        let entries = (0..count)
            .map(|i| {
                // Pin the last sample to exactly 1.0
                let t = if i + 1 == count && count > 1 {
                    1.0
                } else {
                    i as f64 * step
                };
                let c = func.eval(t);
                RGB8::new(to_u8(c.r), to_u8(c.g), to_u8(c.b))
            })
            .collect();

        Ok(Self { entries })
    }

    /// Wrap pre-computed entries, e.g. a table loaded by the host.
    pub fn from_entries(entries: Vec<RGB8>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RGB8] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Scale a normalized channel to 0..=255, rounding half away from zero.
fn to_u8(v: f64) -> u8 {
    let scaled = if v > 0.0 { v * 255.0 } else { 0.0 };
    if scaled >= 255.0 {
        return 255;
    }
    // scaled is in [0, 255), truncation is floor
    let whole = scaled as u8;
    if scaled - whole as f64 >= 0.5 {
        whole + 1
    } else {
        whole
    }
}
