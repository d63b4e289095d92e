//! Recolor a jet-colored PNG onto another colormap.
//!
//! Usage:
//!   cargo run --example recolor_png --release -- <input.png> [output.png] [colormap]
//!
//! Set `RUST_LOG=debug` to see table construction and pass statistics.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use zenrecolor::{ImgRef, ImgVec, RemapConfig, RemapEngine, RemapRegion};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let input = args
        .get(1)
        .expect("usage: recolor_png <input.png> [output.png] [colormap]");
    let output = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| recolored_path(Path::new(input)));
    let target = args.get(3).map(String::as_str).unwrap_or("viridis");

    // Load as 8-bit RGBA
    let mut decoder = png::Decoder::new(BufReader::new(File::open(input).unwrap()));
    decoder.set_transformations(
        png::Transformations::EXPAND | png::Transformations::ALPHA | png::Transformations::STRIP_16,
    );
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).unwrap();
    buf.truncate(frame.buffer_size());
    let (w, h) = (frame.width as usize, frame.height as usize);

    let pixels: Vec<rgb::RGBA8> = match frame.color_type {
        png::ColorType::Rgba => buf
            .chunks_exact(4)
            .map(|c| rgb::RGBA8::new(c[0], c[1], c[2], c[3]))
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .map(|c| rgb::RGBA8::new(c[0], c[0], c[0], c[1]))
            .collect(),
        other => panic!("unsupported PNG color type after expansion: {other:?}"),
    };

    let config = RemapConfig::new().output_colormap(target);
    let mut engine = RemapEngine::new(&config).unwrap();
    let mut out = ImgVec::new(pixels.clone(), w, h);

    let mut last_decile = 0;
    let stats = engine
        .remap(
            &RemapRegion::whole(w, h),
            &ImgRef::new(&pixels, w, h),
            &mut out,
            &mut |fraction: f32| {
                let decile = (fraction * 10.0) as u32;
                if decile > last_decile {
                    last_decile = decile;
                    log::info!("{}%", decile * 10);
                }
            },
        )
        .unwrap();

    log::info!(
        "{w}x{h}: {} recolored, {} gray kept, {} distinct colors",
        stats.written,
        stats.skipped_gray,
        stats.cache_misses
    );

    let file = File::create(&output).unwrap();
    let mut encoder = png::Encoder::new(BufWriter::new(file), w as u32, h as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    let flat: Vec<u8> = out.buf().iter().flat_map(|p| [p.r, p.g, p.b, p.a]).collect();
    writer.write_image_data(&flat).unwrap();

    println!("wrote {}", output.display());
}

/// `dir/name.ext` -> `dir/name_recolored.png`, next to the input.
fn recolored_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_owned());
    input.with_file_name(format!("{stem}_recolored.png"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recolored_path_never_overwrites_input() {
        let cases = [
            ("heat.png", "heat_recolored.png"),
            ("scan", "scan_recolored.png"),
            ("plots.png/fig.png", "plots.png/fig_recolored.png"),
            ("data/run.jet.PNG", "data/run.jet_recolored.png"),
        ];
        for (input, expected) in cases {
            let out = recolored_path(Path::new(input));
            assert_eq!(out, PathBuf::from(expected));
            assert_ne!(out, PathBuf::from(input));
        }
    }
}
