//! Series colours
//!
//! By default every render draws fresh random colours, so the same exercise
//! can change colour between page loads. The `stable` palette derives the
//! colour from the exercise label instead.

use rand::Rng;
use serde::Deserialize;

/// Opacity of the filled area under each line
pub const FILL_OPACITY: f64 = 0.2;

/// An RGB triple rendered as a CSS `rgba()` colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Uniform random channels in `0..255`
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.gen_range(0..255),
            g: rng.gen_range(0..255),
            b: rng.gen_range(0..255),
        }
    }

    /// Deterministic colour for a label (FNV-1a over the UTF-8 bytes)
    pub fn from_label(label: &str) -> Self {
        let mut hash: u32 = 0x811c_9dc5;
        for byte in label.as_bytes() {
            hash ^= u32::from(*byte);
            hash = hash.wrapping_mul(0x0100_0193);
        }

        let [r, g, b, _] = hash.to_be_bytes();
        Self {
            r: r % 255,
            g: g % 255,
            b: b % 255,
        }
    }

    /// CSS colour string, e.g. `rgba(12, 200, 7, 0.2)`
    pub fn rgba(&self, opacity: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, opacity)
    }
}

/// How series colours are chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// New random line and fill colours on every render
    #[default]
    Random,
    /// Colour hashed from the exercise label
    Stable,
}

/// Line and fill colour for one series
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesColors {
    pub border: String,
    pub background: String,
}

impl Palette {
    /// Pick colours for the series labelled `label`.
    ///
    /// `Random` draws the border and background independently.
    pub fn colors<R: Rng + ?Sized>(&self, label: &str, rng: &mut R) -> SeriesColors {
        match self {
            Palette::Random => SeriesColors {
                border: Rgb::random(rng).rgba(1.0),
                background: Rgb::random(rng).rgba(FILL_OPACITY),
            },
            Palette::Stable => {
                let rgb = Rgb::from_label(label);
                SeriesColors {
                    border: rgb.rgba(1.0),
                    background: rgb.rgba(FILL_OPACITY),
                }
            }
        }
    }
}
