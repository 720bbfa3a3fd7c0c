use serde::{Deserialize, Serialize};

/// Straight-alpha sRGB color with normalized components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red in `[0, 1]`.
    pub r: f64,
    /// Green in `[0, 1]`.
    pub g: f64,
    /// Blue in `[0, 1]`.
    pub b: f64,
    /// Alpha in `[0, 1]`.
    pub a: f64,
}

impl Color {
    /// Opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(s: &str) -> Result<Self, String> {
        parse_hex(s)
    }

    /// `#rrggbb` without alpha, for SVG paint attributes.
    pub fn to_svg_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Clamp and quantize to straight-alpha RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }
}

pub const WHITE: Color = Color::rgb8(0xFF, 0xFF, 0xFF);
pub const BLACK: Color = Color::rgb8(0x00, 0x00, 0x00);
pub const GRAY: Color = Color::rgb8(0x88, 0x88, 0x88);
pub const BLUE: Color = Color::rgb8(0x58, 0xC4, 0xDD);
pub const BLUE_C: Color = BLUE;
pub const GREEN: Color = Color::rgb8(0x83, 0xC1, 0x67);
pub const GREEN_C: Color = GREEN;
pub const YELLOW: Color = Color::rgb8(0xFF, 0xFF, 0x00);
pub const RED: Color = Color::rgb8(0xFC, 0x62, 0x55);
pub const ORANGE: Color = Color::rgb8(0xFF, 0x86, 0x2F);
pub const PURPLE: Color = Color::rgb8(0x9A, 0x72, 0xAC);

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let [r, g, b, a] = self.to_rgba8();
        serializer.serialize_str(&format!("#{r:02x}{g:02x}{b:02x}{a:02x}"))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<f64>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self {
                    r: *r,
                    g: *g,
                    b: *b,
                    a: 1.0,
                }),
                [r, g, b, a] => Ok(Self {
                    r: *r,
                    g: *g,
                    b: *b,
                    a: *a,
                }),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<Color, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }
    let (r, g, b, a) = match s.len() {
        6 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        ),
        8 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ),
        _ => {
            return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
        }
    };

    Ok(Color {
        a: f64::from(a) / 255.0,
        ..Color::rgb8(r, g, b)
    })
}
