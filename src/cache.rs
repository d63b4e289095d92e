use alloc::collections::BTreeMap;
use core::num::NonZeroUsize;

use rgb::RGB8;

use crate::nearest::TablePair;

/// Upper bound on the number of memoized colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheLimit {
    /// One entry per distinct input color, up to 2^24 entries for adversarial images.
    #[default]
    Unbounded,
    /// Flush the whole cache before an insert would exceed this many entries.
    Entries(NonZeroUsize),
}

/// Nearest-color mapper that memoizes results per exact input color.
///
/// Bound to one [`TablePair`] for its whole lifetime, so a cached value
/// never goes stale. Flushing only costs recomputation, never changes results.
#[derive(Debug, Clone)]
pub struct MemoizedMapper {
    pair: TablePair,
    cache: BTreeMap<u32, RGB8>,
    limit: CacheLimit,
    hits: u64,
    misses: u64,
}

impl MemoizedMapper {
    pub fn new(pair: TablePair) -> Self {
        Self::with_limit(pair, CacheLimit::Unbounded)
    }

    pub fn with_limit(pair: TablePair, limit: CacheLimit) -> Self {
        Self {
            pair,
            cache: BTreeMap::new(),
            limit,
            hits: 0,
            misses: 0,
        }
    }

    /// Map `color` to its replacement, computing it at most once per cache lifetime.
    pub fn map(&mut self, color: RGB8) -> RGB8 {
        let key = pack(color);
        if let Some(&mapped) = self.cache.get(&key) {
            self.hits += 1;
            return mapped;
        }

        self.misses += 1;
        let mapped = self.pair.classify(color);

        if let CacheLimit::Entries(max) = self.limit {
            if self.cache.len() >= max.get() {
                log::trace!("color cache full at {} entries, flushing", self.cache.len());
                self.cache.clear();
            }
        }
        self.cache.insert(key, mapped);
        mapped
    }

    pub fn tables(&self) -> &TablePair {
        &self.pair
    }

    /// Number of colors currently memoized.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

fn pack(c: RGB8) -> u32 {
    ((c.r as u32) << 16) | ((c.g as u32) << 8) | c.b as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn queries() -> Vec<RGB8> {
        // Deterministic pseudo-random walk with plenty of repeats
        let mut state = 0x1234_5678u32;
        (0..2000)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                // 4 levels per channel -> at most 64 distinct colors
                let r = ((state & 3) * 85) as u8;
                let g = (((state >> 2) & 3) * 85) as u8;
                let b = (((state >> 4) & 3) * 85) as u8;
                RGB8::new(r, g, b)
            })
            .collect()
    }

    #[test]
    fn memoized_matches_direct_classification() {
        let pair = TablePair::sample("jet", "viridis", 512).unwrap();
        let mut mapper = MemoizedMapper::new(pair.clone());
        for c in queries() {
            assert_eq!(mapper.map(c), pair.classify(c), "mismatch for {c:?}");
        }
        assert!(mapper.len() <= 64);
        assert_eq!(mapper.misses() as usize, mapper.len());
        assert_eq!(mapper.hits() + mapper.misses(), 2000);
    }

    #[test]
    fn bounded_cache_keeps_results_exact() {
        let pair = TablePair::sample("jet", "cividis", 128).unwrap();
        let limit = CacheLimit::Entries(NonZeroUsize::new(5).unwrap());
        let mut mapper = MemoizedMapper::with_limit(pair.clone(), limit);
        for c in queries() {
            assert_eq!(mapper.map(c), pair.classify(c));
            assert!(mapper.len() <= 5, "cache grew to {}", mapper.len());
        }
    }

    #[test]
    fn repeated_color_hits_cache() {
        let pair = TablePair::sample("jet", "plasma", 32).unwrap();
        let mut mapper = MemoizedMapper::new(pair);
        let c = RGB8::new(10, 20, 30);
        let first = mapper.map(c);
        assert_eq!(mapper.misses(), 1);
        assert_eq!(mapper.map(c), first);
        assert_eq!(mapper.map(c), first);
        assert_eq!(mapper.hits(), 2);
        assert_eq!(mapper.len(), 1);
    }

    #[test]
    fn pack_is_injective_on_channels() {
        assert_ne!(pack(RGB8::new(1, 0, 0)), pack(RGB8::new(0, 1, 0)));
        assert_ne!(pack(RGB8::new(0, 1, 0)), pack(RGB8::new(0, 0, 1)));
        assert_eq!(pack(RGB8::new(0xAB, 0xCD, 0xEF)), 0xABCDEF);
    }
}
