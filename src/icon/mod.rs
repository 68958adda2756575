mod pixels;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::png::{self, PngError};

pub use pixels::PixelBuffer;

/// An RGB color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid hex color {0:?}, expected #rrggbb")]
pub struct ParseRgbError(String);

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseRgbError(s.to_owned()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ParseRgbError(s.to_owned()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Channels([u8; 3]),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::Channels([r, g, b]) => Ok(Self::new(r, g, b)),
        }
    }
}

/// One icon to generate: a `size`x`size` image with a centered square of `color`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSpec {
    pub size: u32,
    pub color: Rgb,
    pub output_path: PathBuf,
}

impl IconSpec {
    pub fn new(size: u32, color: Rgb, output_path: impl Into<PathBuf>) -> Self {
        Self {
            size,
            color,
            output_path: output_path.into(),
        }
    }

    /// The preset icon set written when no config is given.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(16, Rgb::new(99, 102, 241), "icons/icon16.png"),
            Self::new(48, Rgb::new(124, 58, 237), "icons/icon48.png"),
            Self::new(128, Rgb::new(139, 92, 246), "icons/icon128.png"),
        ]
    }

    /// Render the icon's pixels, refusing sizes the encoder would reject
    /// before anything is allocated.
    pub fn render(&self) -> Result<PixelBuffer, PngError> {
        png::check_size(self.size)?;
        Ok(PixelBuffer::centered_square(self.size, self.color))
    }
}
