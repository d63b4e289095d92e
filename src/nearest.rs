use rgb::RGB8;

use crate::error::RemapError;
use crate::table::ColormapTable;

/// A validated (source, target) table pair: both non-empty and of equal length.
///
/// Colors are classified against `source` and replaced by the `target` entry
/// at the same index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePair {
    source: ColormapTable,
    target: ColormapTable,
}

impl TablePair {
    pub fn new(source: ColormapTable, target: ColormapTable) -> Result<Self, RemapError> {
        if source.is_empty() || source.len() != target.len() {
            return Err(RemapError::TableMismatch {
                source_len: source.len(),
                target_len: target.len(),
            });
        }
        Ok(Self { source, target })
    }

    /// Sample both colormaps by name at `count` entries each.
    pub fn sample(source: &str, target: &str, count: usize) -> Result<Self, RemapError> {
        let pair = Self::new(
            ColormapTable::sample(source, count)?,
            ColormapTable::sample(target, count)?,
        )?;
        log::debug!("sampled colormap tables {source} -> {target} at {count} entries");
        Ok(pair)
    }

    pub fn source(&self) -> &ColormapTable {
        &self.source
    }

    pub fn target(&self) -> &ColormapTable {
        &self.target
    }

    /// Number of entries in each table.
    pub fn table_size(&self) -> usize {
        self.source.len()
    }

    /// Index of the source entry nearest to `color`. Ties go to the lowest index.
    pub fn nearest_index(&self, color: RGB8) -> usize {
        nearest_in(self.source.entries(), color)
    }

    /// Target entry corresponding to the source entry nearest to `color`.
    pub fn classify(&self, color: RGB8) -> RGB8 {
        self.target.entries()[self.nearest_index(color)]
    }
}

/// Classify `color` against `source` and return the matching `target` entry.
///
/// Fails with [`RemapError::TableMismatch`] when the tables are empty or differ in length.
/// Per-pixel callers should validate once with [`TablePair`] instead.
pub fn classify(
    source: &ColormapTable,
    target: &ColormapTable,
    color: RGB8,
) -> Result<RGB8, RemapError> {
    if source.is_empty() || source.len() != target.len() {
        return Err(RemapError::TableMismatch {
            source_len: source.len(),
            target_len: target.len(),
        });
    }

    Ok(target.entries()[nearest_in(source.entries(), color)])
}

/// Brute-force linear scan. Strict `<` keeps the first of equidistant entries.
fn nearest_in(entries: &[RGB8], color: RGB8) -> usize {
    let mut best_idx = 0;
    let mut best_dist = u32::MAX;

    for (i, entry) in entries.iter().enumerate() {
        let d = distance_sq(color, *entry);
        if d < best_dist {
            best_dist = d;
            best_idx = i;
            if d == 0 {
                break;
            }
        }
    }

    best_idx
}

/// Squared Euclidean distance in RGB space.
#[inline]
pub fn distance_sq(a: RGB8, b: RGB8) -> u32 {
    let dr = a.r.abs_diff(b.r) as u32;
    let dg = a.g.abs_diff(b.g) as u32;
    let db = a.b.abs_diff(b.b) as u32;
    dr * dr + dg * dg + db * db
}
