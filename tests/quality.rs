//! Perceptual sanity checks: a jet ramp recolored onto a sequential colormap
//! should come out as that colormap's ramp, dark to light.

use rgb::RGB8;
use zenrecolor::{Colormap, ColormapTable, RemapConfig};

fn luma(p: &rgb::RGBA8) -> f32 {
    0.299 * p.r as f32 + 0.587 * p.g as f32 + 0.114 * p.b as f32
}

/// A 512-wide image whose every row is the sampled jet ramp.
fn jet_ramp_image(rows: usize) -> Vec<RGB8> {
    let jet = ColormapTable::sample("jet", 512).unwrap();
    jet.entries().repeat(rows)
}

#[test]
fn jet_ramp_becomes_target_ramp() {
    let pixels = jet_ramp_image(2);
    for target in ["viridis", "plasma", "inferno", "magma", "cividis"] {
        let config = RemapConfig::new().output_colormap(target);
        let result = zenrecolor::recolor(&pixels, 512, 2, &config).unwrap();
        let expected = ColormapTable::sample(target, 512).unwrap();

        let row = &result.pixels()[..512];
        let mut exact = 0;
        for (x, (out, want)) in row.iter().zip(expected.entries()).enumerate() {
            if (out.r, out.g, out.b) == (want.r, want.g, want.b) {
                exact += 1;
            } else {
                // Only repeated jet entries may resolve to an earlier index
                let src = pixels[x];
                let first = pixels[..512].iter().position(|&c| c == src).unwrap();
                assert!(first < x, "{target}: column {x} mismatched without a repeat");
            }
        }
        assert!(exact > 480, "{target}: only {exact}/512 columns exact");
    }
}

#[test]
fn remapped_ramp_brightens_left_to_right() {
    let pixels = jet_ramp_image(1);
    for &cmap in &[Colormap::Viridis, Colormap::Inferno, Colormap::Magma] {
        let config = RemapConfig::new().output_colormap(cmap.name());
        let result = zenrecolor::recolor(&pixels, 512, 1, &config).unwrap();
        let lumas: Vec<f32> = result.pixels().iter().map(luma).collect();

        let first = lumas[0];
        let last = lumas[511];
        assert!(
            last - first > 150.0,
            "{}: luma range {first}..{last} too flat",
            cmap.name()
        );

        // Rounding may wobble a step, never a visible reversal
        for w in lumas.windows(2) {
            assert!(
                w[1] >= w[0] - 2.0,
                "{}: luma dropped from {} to {}",
                cmap.name(),
                w[0],
                w[1]
            );
        }
    }
}

#[test]
fn gray_annotations_survive() {
    // Jet ramp with a black axis line and a white label box burned in
    let mut pixels = jet_ramp_image(4);
    for x in 0..512 {
        pixels[x] = RGB8::new(0, 0, 0);
    }
    for x in 100..140 {
        pixels[2 * 512 + x] = RGB8::new(255, 255, 255);
    }

    let result = zenrecolor::recolor(&pixels, 512, 4, &RemapConfig::default()).unwrap();
    let out = result.pixels();
    assert!(out[..512].iter().all(|p| (p.r, p.g, p.b) == (0, 0, 0)));
    assert!(
        out[2 * 512 + 100..2 * 512 + 140]
            .iter()
            .all(|p| (p.r, p.g, p.b) == (255, 255, 255))
    );
    assert_eq!(result.stats().skipped_gray, 512 + 40);
}
