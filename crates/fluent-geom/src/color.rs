use palette::{FromColor, Hsv, LinSrgba, Srgb, Srgba};

/// Linear, premultiplied RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorLinPremul {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

pub type Color = ColorLinPremul;

impl ColorLinPremul {
    #[inline]
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_srgba_u8([r, g, b, a])
    }

    /// Create from sRGB u8 RGBA array (premultiplied in linear space).
    #[inline]
    pub fn from_srgba_u8(c: [u8; 4]) -> Self {
        Self::from_srgb_f32(
            c[0] as f32 / 255.0,
            c[1] as f32 / 255.0,
            c[2] as f32 / 255.0,
            c[3] as f32 / 255.0,
        )
    }

    /// sRGB u8 channels with float alpha, CSS `rgba()` style.
    #[inline]
    pub fn from_srgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::from_srgb_f32(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
    }

    fn from_srgb_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        let lin: LinSrgba = LinSrgba::from_color(Srgba::new(r, g, b, a.clamp(0.0, 1.0)));
        Self {
            r: lin.red * lin.alpha,
            g: lin.green * lin.alpha,
            b: lin.blue * lin.alpha,
            a: lin.alpha,
        }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#AARRGGBB`. Leading and trailing
    /// non-alphanumerics are ignored; any other digit count yields a
    /// near-black fallback `(1, 1, 0, 1) / 255`.
    pub fn from_hex(hex: &str) -> Self {
        let hex = hex.trim_matches(|c: char| !c.is_alphanumeric());
        let value = hex
            .chars()
            .map_while(|c| c.to_digit(16))
            .fold(0u32, |acc, d| acc.wrapping_shl(4) | d);
        let (a, r, g, b) = match hex.chars().count() {
            3 => (
                255,
                (value >> 8 & 0xF) * 17,
                (value >> 4 & 0xF) * 17,
                (value & 0xF) * 17,
            ),
            6 => (255, value >> 16 & 0xFF, value >> 8 & 0xFF, value & 0xFF),
            8 => (value >> 24, value >> 16 & 0xFF, value >> 8 & 0xFF, value & 0xFF),
            _ => (1, 1, 1, 0),
        };
        Self::from_srgba_u8([r as u8, g as u8, b as u8, a as u8])
    }

    /// `0xRRGGBB` with explicit alpha.
    pub fn from_rgb(rgb: u32, alpha: f32) -> Self {
        Self::from_srgba(
            ((rgb & 0xFF_0000) >> 16) as u8,
            ((rgb & 0x00_FF00) >> 8) as u8,
            (rgb & 0x00_00FF) as u8,
            alpha,
        )
    }

    /// Convert back to sRGB u8 RGBA array (unpremultiplied).
    #[inline]
    pub fn to_srgba_u8(&self) -> [u8; 4] {
        let srgb = self.to_srgba();
        [
            to_u8(srgb.red),
            to_u8(srgb.green),
            to_u8(srgb.blue),
            to_u8(srgb.alpha),
        ]
    }

    fn to_srgba(self) -> Srgba {
        let (r, g, b) = if self.a > 0.0001 {
            (self.r / self.a, self.g / self.a, self.b / self.a)
        } else {
            (0.0, 0.0, 0.0)
        };
        Srgba::from_color(LinSrgba::new(r, g, b, self.a))
    }

    pub fn red(&self) -> u8 {
        self.to_srgba_u8()[0]
    }

    pub fn green(&self) -> u8 {
        self.to_srgba_u8()[1]
    }

    pub fn blue(&self) -> u8 {
        self.to_srgba_u8()[2]
    }

    pub fn alpha(&self) -> f32 {
        self.a
    }

    /// Scale HSV brightness by `1 + amount`.
    pub fn lighten(&self, amount: f32) -> Self {
        self.scale_brightness(1.0 + amount)
    }

    /// Scale HSV brightness by `1 - amount`.
    pub fn darken(&self, amount: f32) -> Self {
        self.scale_brightness(1.0 - amount)
    }

    fn scale_brightness(&self, factor: f32) -> Self {
        if !factor.is_finite() {
            return *self;
        }
        let srgba = self.to_srgba();
        let mut hsv: Hsv = Hsv::from_color(Srgb::new(srgba.red, srgba.green, srgba.blue));
        hsv.value = (hsv.value * factor).clamp(0.0, 1.0);
        let rgb: Srgb = Srgb::from_color(hsv);
        Self::from_srgb_f32(rgb.red, rgb.green, rgb.blue, srgba.alpha)
    }

    pub fn clear() -> Self {
        Self::default()
    }

    pub fn grey80() -> Self {
        Self::from_hex("#525760")
    }

    pub fn grey60() -> Self {
        Self::from_hex("#EDEDED")
    }

    pub fn grey40() -> Self {
        Self::from_hex("#EDEDED")
    }

    pub fn grey20() -> Self {
        Self::from_hex("#F9F9F9")
    }
}

fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
