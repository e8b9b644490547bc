use image::Rgba;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// The default cube color
    pub const BLUE: Self = Self::rgb(56, 149, 179);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }

    /// Tints the color by `light`, then shifts its HSL lightness by `amount`
    ///
    /// A negative `amount` darkens. Lightness is clamped to `[0, 1]`.
    pub fn lighten(self, amount: f64, light: Color) -> Self {
        let tinted = Self::rgb(
            tint(self.r, light.r),
            tint(self.g, light.g),
            tint(self.b, light.b),
        );
        let (h, s, l) = tinted.to_hsl();
        Self::from_hsl(h, s, (l + amount).clamp(0.0, 1.0))
    }

    fn to_hsl(self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            // achromatic
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h / 6.0, s, l)
    }

    fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        if s == 0.0 {
            let v = to_channel(l);
            return Self::rgb(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self::rgb(
            to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            to_channel(hue_to_rgb(p, q, h)),
            to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLUE
    }
}

#[inline]
fn tint(channel: u8, light: u8) -> u8 {
    ((u16::from(channel) * u16::from(light)) / 255) as u8
}

#[inline]
fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        a.r.abs_diff(b.r) <= 1 && a.g.abs_diff(b.g) <= 1 && a.b.abs_diff(b.b) <= 1
    }

    #[test]
    fn zero_lighten_under_white_is_identity() {
        let lit = Color::BLUE.lighten(0.0, Color::WHITE);

        assert!(close(lit, Color::BLUE), "{lit:?}");
    }

    #[test]
    fn lighten_saturates_to_white() {
        assert_eq!(Color::BLUE.lighten(1.0, Color::WHITE), Color::WHITE);
        assert_eq!(Color::BLUE.lighten(-1.0, Color::WHITE), Color::BLACK);
    }

    #[test]
    fn positive_amount_is_brighter() {
        let brighter = Color::BLUE.lighten(0.15, Color::WHITE);
        let darker = Color::BLUE.lighten(-0.15, Color::WHITE);

        let sum = |c: Color| u32::from(c.r) + u32::from(c.g) + u32::from(c.b);
        assert!(sum(brighter) > sum(Color::BLUE));
        assert!(sum(darker) < sum(Color::BLUE));
    }

    #[test]
    fn grays_stay_gray() {
        let gray = Color::rgb(100, 100, 100).lighten(0.1, Color::WHITE);

        assert_eq!(gray.r, gray.g);
        assert_eq!(gray.g, gray.b);
    }
}
