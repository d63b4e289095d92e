use core::num::NonZeroUsize;

use rgb::{RGB8, RGBA8};
use zenrecolor::{CacheLimit, Colormap, RemapConfig, RemapError};

fn jet_gradient(width: usize, height: usize) -> Vec<RGB8> {
    let table = zenrecolor::ColormapTable::sample("jet", width).unwrap();
    let mut pixels = Vec::with_capacity(width * height);
    for _ in 0..height {
        pixels.extend_from_slice(table.entries());
    }
    pixels
}

#[test]
fn smoke_test_rgb() {
    let width = 32;
    let height = 8;
    let pixels = jet_gradient(width, height);

    let config = RemapConfig::default();
    let result = zenrecolor::recolor(&pixels, width, height, &config).unwrap();

    assert_eq!(result.pixels().len(), width * height);
    assert!(result.pixels().iter().all(|p| p.a == 255));
    assert_eq!(result.stats().rows, height);
    assert_eq!(
        result.stats().written + result.stats().skipped_gray,
        width * height
    );
    // Every row is identical, so only the first row misses the cache
    assert!(result.stats().cache_misses as usize <= width);
}

#[test]
fn smoke_test_rgba_keeps_alpha() {
    let width = 16;
    let height = 4;
    let pixels: Vec<RGBA8> = jet_gradient(width, height)
        .into_iter()
        .enumerate()
        .map(|(i, p)| RGBA8::new(p.r, p.g, p.b, (i * 3) as u8))
        .collect();

    let result =
        zenrecolor::recolor_rgba(&pixels, width, height, &RemapConfig::default()).unwrap();
    for (input, output) in pixels.iter().zip(result.pixels()) {
        assert_eq!(input.a, output.a);
    }
}

#[test]
fn all_config_modes() {
    let width = 8;
    let height = 8;
    let pixels: Vec<RGB8> = (0..64)
        .map(|i| {
            let v = (i * 4) as u8;
            RGB8::new(v, 255 - v, v / 2)
        })
        .collect();

    for &target in Colormap::ALL {
        for ignore_gray in [true, false] {
            for limit in [
                CacheLimit::Unbounded,
                CacheLimit::Entries(NonZeroUsize::new(3).unwrap()),
            ] {
                let config = RemapConfig::new()
                    .output_colormap(target.name())
                    .table_size(64)
                    .ignore_gray(ignore_gray)
                    .cache_limit(limit);

                let result = zenrecolor::recolor(&pixels, width, height, &config).unwrap();
                assert_eq!(
                    result.pixels().len(),
                    64,
                    "mode {:?}/{}/{:?}",
                    target,
                    ignore_gray,
                    limit
                );
            }
        }
    }
}

#[test]
fn default_config() {
    let config = RemapConfig::default();
    assert_eq!(config.source_colormap, "jet");
    assert_eq!(config.output_colormap, "viridis");
    assert_eq!(config.table_size, zenrecolor::DEFAULT_TABLE_SIZE);
    assert_eq!(config.table_size, 512);
    assert!(config.ignore_gray);
    assert_eq!(config.cache_limit, CacheLimit::Unbounded);
}

#[test]
fn error_zero_dimension() {
    let pixels = vec![RGB8::new(0, 0, 0)];
    let config = RemapConfig::default();

    assert!(matches!(
        zenrecolor::recolor(&pixels, 0, 1, &config),
        Err(RemapError::ZeroDimension)
    ));
    assert!(matches!(
        zenrecolor::recolor(&pixels, 1, 0, &config),
        Err(RemapError::ZeroDimension)
    ));
}

#[test]
fn error_dimension_mismatch() {
    let pixels = vec![RGB8::new(0, 0, 0); 10];
    let config = RemapConfig::default();

    assert!(matches!(
        zenrecolor::recolor(&pixels, 4, 4, &config),
        Err(RemapError::DimensionMismatch {
            len: 10,
            width: 4,
            height: 4
        })
    ));
}

#[test]
fn error_selection_size_mismatch() {
    let pixels = vec![RGBA8::new(0, 0, 0, 255); 4];
    let selection = vec![1u8; 3];
    assert!(matches!(
        zenrecolor::recolor_rgba_masked(&pixels, 2, 2, &selection, &RemapConfig::default()),
        Err(RemapError::DimensionMismatch { len: 3, .. })
    ));
}

#[test]
fn error_unknown_colormap() {
    let pixels = vec![RGB8::new(0, 0, 255); 4];

    let config = RemapConfig::new().output_colormap("jetz");
    let err = zenrecolor::recolor(&pixels, 2, 2, &config).unwrap_err();
    assert!(matches!(err, RemapError::UnknownColormap(ref name) if name == "jetz"));

    let config = RemapConfig::new().source_colormap("");
    assert!(matches!(
        zenrecolor::recolor(&pixels, 2, 2, &config),
        Err(RemapError::UnknownColormap(_))
    ));
}

#[test]
fn error_zero_table_size() {
    let pixels = vec![RGB8::new(0, 0, 255); 4];
    let config = RemapConfig::new().table_size(0);
    assert!(matches!(
        zenrecolor::recolor(&pixels, 2, 2, &config),
        Err(RemapError::InvalidTableSize)
    ));
}

#[test]
fn error_messages_name_the_problem() {
    let err = RemapError::UnknownColormap("foo".into());
    assert_eq!(err.to_string(), "unknown colormap \"foo\"");

    let err = RemapError::pixel_io(3, 4, "layer locked");
    assert_eq!(err.to_string(), "pixel access failed at (3, 4): layer locked");
}
