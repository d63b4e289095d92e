use alloc::borrow::ToOwned;
use core::str::FromStr;

use rgb::RGBA;

use crate::error::RemapError;
use crate::ramps::{self, Segments};

/// A continuous color ramp: maps a parameter `t` in `[0, 1]` to a normalized color.
///
/// Channels are in `[0, 1]`. Implementations clamp `t` before evaluating.
/// Alpha is carried for ramps that produce it but is dropped when sampled
/// into a [`ColormapTable`](crate::table::ColormapTable).
pub trait ColorFunction {
    fn eval(&self, t: f64) -> RGBA<f64>;
}

/// Built-in named colormaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colormap {
    /// Rainbow ramp: dark blue -> cyan -> yellow -> red -> dark red.
    Jet,
    /// Perceptually uniform: purple -> teal -> yellow.
    Viridis,
    /// Blue -> magenta -> yellow.
    Plasma,
    /// Black -> purple -> orange -> pale yellow.
    Inferno,
    /// Black -> purple -> salmon -> pale cream.
    Magma,
    /// Colorblind-friendly navy -> gray -> yellow.
    Cividis,
    /// Black -> white.
    Gray,
}

impl Colormap {
    /// All built-in colormaps, in registry order.
    pub const ALL: &[Colormap] = &[
        Self::Jet,
        Self::Viridis,
        Self::Plasma,
        Self::Inferno,
        Self::Magma,
        Self::Cividis,
        Self::Gray,
    ];

    /// Registry identifier.
    pub fn name(self) -> &'static str {
        match self {
            Self::Jet => "jet",
            Self::Viridis => "viridis",
            Self::Plasma => "plasma",
            Self::Inferno => "inferno",
            Self::Magma => "magma",
            Self::Cividis => "cividis",
            Self::Gray => "gray",
        }
    }

    /// Resolve a registry identifier. Matching ignores ASCII case and surrounding whitespace.
    pub fn from_name(name: &str) -> Result<Self, RemapError> {
        let wanted = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|cmap| cmap.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RemapError::UnknownColormap(name.to_owned()))
    }
}

impl FromStr for Colormap {
    type Err = RemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl ColorFunction for Colormap {
    fn eval(&self, t: f64) -> RGBA<f64> {
        let t = clamp_unit(t);
        match self {
            Self::Jet => segmented(ramps::JET_RED, ramps::JET_GREEN, ramps::JET_BLUE, t),
            Self::Gray => segmented(ramps::GRAY, ramps::GRAY, ramps::GRAY, t),
            Self::Viridis => listed(ramps::VIRIDIS, t),
            Self::Plasma => listed(ramps::PLASMA, t),
            Self::Inferno => listed(ramps::INFERNO, t),
            Self::Magma => listed(ramps::MAGMA, t),
            Self::Cividis => listed(ramps::CIVIDIS, t),
        }
    }
}

impl<F: Fn(f64) -> RGBA<f64>> ColorFunction for F {
    fn eval(&self, t: f64) -> RGBA<f64> {
        self(clamp_unit(t))
    }
}

// NaN maps to 0.
fn clamp_unit(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else if t > 0.0 {
        t
    } else {
        0.0
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn unpack(rgb: u32) -> [f64; 3] {
    [
        ((rgb >> 16) & 0xFF) as f64 / 255.0,
        ((rgb >> 8) & 0xFF) as f64 / 255.0,
        (rgb & 0xFF) as f64 / 255.0,
    ]
}

/// Piecewise-linear interpolation over one channel's anchors.
fn segment_value(anchors: Segments, t: f64) -> f64 {
    let mut prev = anchors[0];
    for &next in &anchors[1..] {
        if t <= next.0 {
            let span = next.0 - prev.0;
            if span <= 0.0 {
                return next.1;
            }
            return lerp(prev.1, next.1, (t - prev.0) / span);
        }
        prev = next;
    }
    prev.1
}

fn segmented(red: Segments, green: Segments, blue: Segments, t: f64) -> RGBA<f64> {
    RGBA::new(
        segment_value(red, t),
        segment_value(green, t),
        segment_value(blue, t),
        1.0,
    )
}

/// Nearest-lower lookup into a listed table: index `min(floor(t * len), len - 1)`.
fn listed(table: &[u32], t: f64) -> RGBA<f64> {
    let i = ((t * table.len() as f64) as usize).min(table.len() - 1);
    let [r, g, b] = unpack(table[i]);
    RGBA::new(r, g, b, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn registry_resolves_every_name() {
        for &cmap in Colormap::ALL {
            assert_eq!(Colormap::from_name(cmap.name()).unwrap(), cmap);
        }
        assert_eq!(Colormap::from_name(" Viridis ").unwrap(), Colormap::Viridis);
        assert_eq!("JET".parse::<Colormap>().unwrap(), Colormap::Jet);
    }

    #[test]
    fn unknown_name_fails() {
        let err = Colormap::from_name("rainbowz").unwrap_err();
        assert!(matches!(err, RemapError::UnknownColormap(ref n) if n == "rainbowz"));
    }

    #[test]
    fn jet_endpoints_and_anchors() {
        let start = Colormap::Jet.eval(0.0);
        assert!(close(start.r, 0.0) && close(start.g, 0.0) && close(start.b, 0.5));

        let end = Colormap::Jet.eval(1.0);
        assert!(close(end.r, 0.5) && close(end.g, 0.0) && close(end.b, 0.0));

        // Green plateau
        let mid = Colormap::Jet.eval(0.5);
        assert!(close(mid.g, 1.0), "jet green at 0.5 should be 1, got {}", mid.g);
    }

    #[test]
    fn out_of_range_parameters_clamp() {
        assert_eq!(Colormap::Magma.eval(-3.0), Colormap::Magma.eval(0.0));
        assert_eq!(Colormap::Magma.eval(7.0), Colormap::Magma.eval(1.0));
        assert_eq!(Colormap::Plasma.eval(f64::NAN), Colormap::Plasma.eval(0.0));
    }

    fn rgb_at(cmap: Colormap, t: f64) -> (u8, u8, u8) {
        let c = cmap.eval(t);
        let byte = |v: f64| (v * 255.0 + 0.5) as u8;
        (byte(c.r), byte(c.g), byte(c.b))
    }

    #[test]
    fn listed_ramps_match_reference_entries() {
        // Entry i of a 256-entry table sits at t = i / 255
        let at = |i: u32| i as f64 / 255.0;

        assert_eq!(rgb_at(Colormap::Viridis, 0.0), (68, 1, 84));
        assert_eq!(rgb_at(Colormap::Viridis, at(128)), (33, 145, 140));
        assert_eq!(rgb_at(Colormap::Viridis, at(153)), (34, 168, 132));
        assert_eq!(rgb_at(Colormap::Viridis, 1.0), (253, 231, 37));

        assert_eq!(rgb_at(Colormap::Plasma, at(128)), (204, 71, 120));
        assert_eq!(rgb_at(Colormap::Inferno, at(128)), (188, 55, 84));
        assert_eq!(rgb_at(Colormap::Magma, at(128)), (183, 55, 121));

        assert_eq!(rgb_at(Colormap::Cividis, 0.0), (0, 34, 78));
        assert_eq!(rgb_at(Colormap::Cividis, 1.0), (254, 232, 56));
    }

    #[test]
    fn listed_ramp_uses_lower_entry() {
        // 0.5 * 256 = 128 exactly
        let c = Colormap::Cividis.eval(0.5);
        let expected = unpack(ramps::CIVIDIS[128]);
        assert!(close(c.r, expected[0]) && close(c.g, expected[1]) && close(c.b, expected[2]));
        let end = Colormap::Cividis.eval(1.0);
        let expected = unpack(ramps::CIVIDIS[255]);
        assert!(close(end.b, expected[2]));
    }

    #[test]
    fn closures_are_color_functions() {
        let ramp = |t: f64| RGBA::new(t, 1.0 - t, 0.0, 0.5);
        let c = ramp.eval(2.0);
        assert!(close(c.r, 1.0) && close(c.g, 0.0));
    }
}
