//! Inferno colour map.
//!
//! The 256-entry table is generated once from a degree-six polynomial fit of
//! matplotlib's `inferno` (black through purple and orange to pale yellow).

use std::sync::LazyLock;

const LUT_SIZE: usize = 256;

// Per-component coefficients, lowest degree first.
const COEFFS: [[f32; 3]; 7] = [
    [0.000_218_940_37, 0.001_651_004_6, -0.019_480_898],
    [0.106_513_42, 0.563_956_4, 3.932_712_4],
    [11.602_493, -3.972_854, -15.942_394],
    [-41.703_996, 17.436_399, 44.354_145],
    [77.162_94, -33.402_36, -81.807_31],
    [-71.319_43, 32.626_064, 73.209_52],
    [25.131_126, -12.242_669, -23.070_325],
];

static LUT: LazyLock<[[f32; 3]; LUT_SIZE]> = LazyLock::new(|| {
    let mut lut = [[0.0; 3]; LUT_SIZE];
    for (i, entry) in lut.iter_mut().enumerate() {
        let t = i as f32 / (LUT_SIZE - 1) as f32;
        for (c, value) in entry.iter_mut().enumerate() {
            // Horner
            let v = COEFFS.iter().rev().fold(0.0, |acc, k| acc * t + k[c]);
            *value = v.clamp(0.0, 1.0);
        }
    }
    lut
});

/// Lookup from a normalized scalar to an RGB triple in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inferno;

impl Inferno {
    /// Samples the map; `t` is clamped to `[0, 1]` and NaN maps to the low end.
    pub fn sample(self, t: f32) -> [f32; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        LUT[(t * (LUT_SIZE - 1) as f32).round() as usize]
    }
}
