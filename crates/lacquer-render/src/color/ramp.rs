//! Ten-step tonal ramps derived from a single base color.
//!
//! The ramp is a fixed heuristic walk through HSV space, not a perceptual
//! model: steps 1-5 are tints (lighter, less saturated), step 6 is the base
//! color, and steps 7-10 are shades (darker, more saturated). The hue drifts
//! two degrees per step, away from blue-green for tints and towards it for
//! shades.
//!
//! ```rust
//! use lacquer_render::color::{generate, ColorToken};
//!
//! let base = ColorToken::parse("#1890FF").unwrap();
//! let hover = generate(base, 1).unwrap();
//! let pressed = generate(base, 7).unwrap();
//!
//! assert_eq!(generate(base, 6).unwrap(), base);
//! assert!(hover.luminance() > base.luminance());
//! assert!(pressed.luminance() < base.luminance());
//! ```

use super::ColorToken;
use crate::error::ColorError;

/// Number of steps in a ramp.
pub const RAMP_STEPS: u8 = 10;

const HUE_STEP: f64 = 2.0;
const SATURATION_STEP: f64 = 16.0;
const SATURATION_STEP_DARK: f64 = 5.0;
const VALUE_STEP_LIGHT: f64 = 5.0;
const VALUE_STEP_DARK: f64 = 15.0;
const LIGHT_COUNT: u8 = 5;
const DARK_COUNT: u8 = 4;

// ─── HSV internals ──────────────────────────────────────────────────────────

/// Hue in whole degrees `0..360`, saturation and value as percentages.
#[derive(Debug, Clone, Copy)]
struct Hsv {
    h: f64,
    s: f64,
    v: f64,
}

fn to_hsv(color: ColorToken) -> Hsv {
    let r = color.red_f();
    let g = color.green_f();
    let b = color.blue_f();

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    // Achromatic colors have no hue; treat it as 0.
    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let s = if max == 0.0 { 0.0 } else { delta / max };

    Hsv {
        h: h.round() % 360.0,
        s: s * 100.0,
        v: max * 100.0,
    }
}

fn from_hsv(hsv: Hsv) -> ColorToken {
    let s = (hsv.s / 100.0).clamp(0.0, 1.0);
    let v = (hsv.v / 100.0).clamp(0.0, 1.0);
    let h = hsv.h.rem_euclid(360.0) / 60.0;

    let c = v * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let channel = |value: f64| ((value + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    ColorToken::rgb(channel(r), channel(g), channel(b))
}

// ─── Step rules ─────────────────────────────────────────────────────────────

fn step_hue(base: f64, i: f64, light: bool) -> f64 {
    let towards = if (60.0..=240.0).contains(&base) {
        light
    } else {
        !light
    };
    let hue = if towards {
        base - HUE_STEP * i
    } else {
        base + HUE_STEP * i
    };

    if hue < 0.0 {
        hue + 359.0
    } else if hue >= 359.0 {
        hue - 359.0
    } else {
        hue
    }
}

fn step_saturation(base: f64, i: u8, light: bool) -> f64 {
    let mut saturation = if light {
        base - SATURATION_STEP * i as f64
    } else if i == DARK_COUNT {
        base + SATURATION_STEP
    } else {
        base + SATURATION_STEP_DARK * i as f64
    };
    saturation = saturation.min(100.0);
    if light && i == LIGHT_COUNT && saturation > 10.0 {
        saturation = 10.0;
    }
    saturation = saturation.max(6.0);
    (saturation * 10.0).round() / 10.0
}

fn step_value(base: f64, i: f64, light: bool) -> f64 {
    if light {
        (base + VALUE_STEP_LIGHT * i).min(100.0)
    } else {
        (base - VALUE_STEP_DARK * i).max(0.0)
    }
}

/// Computes ramp step `step` (1..=10) for `base`.
///
/// Pure and deterministic: the same inputs always yield the same color. The
/// result is always fully opaque. Step 6 returns the base color itself
/// (modulo alpha); steps below 6 are tints and steps above are shades.
pub fn generate(base: ColorToken, step: u8) -> Result<ColorToken, ColorError> {
    if !(1..=RAMP_STEPS).contains(&step) {
        return Err(ColorError::StepOutOfRange(step));
    }
    Ok(step_color(base, step))
}

/// Computes all ten steps of the ramp for `base`, step 1 first.
pub fn ramp(base: ColorToken) -> [ColorToken; RAMP_STEPS as usize] {
    let mut steps = [base; RAMP_STEPS as usize];
    for (step, slot) in (1..=RAMP_STEPS).zip(steps.iter_mut()) {
        *slot = step_color(base, step);
    }
    steps
}

fn step_color(base: ColorToken, step: u8) -> ColorToken {
    let base = base.with_alpha(255);
    let light = step <= LIGHT_COUNT + 1;
    if step == LIGHT_COUNT + 1 {
        return base;
    }

    let i = if light {
        LIGHT_COUNT + 1 - step
    } else {
        step - LIGHT_COUNT - 1
    };
    let hsv = to_hsv(base);

    from_hsv(Hsv {
        h: step_hue(hsv.h, i as f64, light),
        s: step_saturation(hsv.s, i, light),
        v: step_value(hsv.v, i as f64, light),
    })
}

/// Formats `color` as `rgba(r,g,b,P%)` with the given alpha percentage.
///
/// The result is display text for template injection, not a color token;
/// it is never parsed back. `percent` is clamped to `0..=100`.
pub fn fade(color: ColorToken, percent: u8) -> String {
    format!(
        "rgba({},{},{},{}%)",
        color.r,
        color.g,
        color.b,
        percent.min(100)
    )
}
