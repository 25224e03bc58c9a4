//! Triangle-wave hue cycling for the halo
//!
//! The hue walks one degree per tick up to the top of the wheel, turns
//! around, walks back down to zero, and repeats.

/// Highest hue the oscillator reaches before turning around
pub const MAX_HUE: i32 = 359;

/// Hue that bounces between 0 and [`MAX_HUE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HueOscillator {
    hue: i32,
    direction: i32,
}

impl Default for HueOscillator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl HueOscillator {
    /// Start at `hue` (clamped into range), moving upward
    pub fn new(hue: i32) -> Self {
        Self {
            hue: hue.clamp(0, MAX_HUE),
            direction: 1,
        }
    }

    pub fn hue(&self) -> i32 {
        self.hue
    }

    /// +1 while rising, -1 while falling
    pub fn direction(&self) -> i32 {
        self.direction
    }

    /// Step one degree, reversing at either end
    pub fn advance(&mut self) {
        self.hue += self.direction;
        if self.hue >= MAX_HUE {
            self.hue = MAX_HUE;
            self.direction = -1;
        } else if self.hue <= 0 {
            self.hue = 0;
            self.direction = 1;
        }
    }
}

/// Convert HSL (hue in degrees, saturation and lightness in 0-1) to RGB
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [u8; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - chroma / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let to_byte = |c: f32| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}

/// Convert RGB to HSL (hue in degrees, saturation and lightness in 0-1)
pub fn rgb_to_hsl(rgb: [u8; 3]) -> (f32, f32, f32) {
    let [r, g, b] = rgb.map(|c| f32::from(c) / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta == 0.0 {
        return (0.0, 0.0, l);
    }

    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    (h, s, l)
}
