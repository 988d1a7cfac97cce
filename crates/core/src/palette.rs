//! Static lookup tables: color names, style bytes, and brightness bytes.
//!
//! Every table here is a closed set. Names outside it are rejected with
//! [`Error::UnknownName`] instead of falling through to a default, so a typo
//! on the command line never reaches the device as a garbage byte.
//!
//! # Brightness
//! The firmware accepts four brightness steps, `0x08`, `0x16`, `0x24` and
//! `0x32`. There is no level 0; "off" is a separate disable command.
//!
//! # Styles
//! Animated styles are selected by a single firmware byte in slot 2 of the
//! style frame. The byte values are not contiguous.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, NameKind, Result};

/// A color as the device expects it on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Named backlight colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorName {
    Red,
    Green,
    Blue,
    Teal,
    Pink,
    Purple,
    White,
    Yellow,
    Orange,
}

impl ColorName {
    /// All colors, in table order.
    pub const ALL: &'static [ColorName] = &[
        ColorName::Red,
        ColorName::Green,
        ColorName::Blue,
        ColorName::Teal,
        ColorName::Pink,
        ColorName::Purple,
        ColorName::White,
        ColorName::Yellow,
        ColorName::Orange,
    ];

    /// Accepted spellings, same order as [`ColorName::ALL`].
    pub const NAMES: &'static [&'static str] = &[
        "red", "green", "blue", "teal", "pink", "purple", "white", "yellow", "orange",
    ];

    pub fn name(&self) -> &'static str {
        Self::NAMES[*self as usize]
    }

    /// Device color for this name.
    pub fn rgb(&self) -> Rgb {
        match self {
            Self::Red => Rgb::new(0xFF, 0x00, 0x00),
            Self::Green => Rgb::new(0x00, 0xFF, 0x00),
            Self::Blue => Rgb::new(0x00, 0x00, 0xFF),
            Self::Teal => Rgb::new(0x00, 0xFF, 0xFF),
            Self::Pink => Rgb::new(0xFF, 0x00, 0x80),
            Self::Purple => Rgb::new(0x80, 0x00, 0xFF),
            Self::White => Rgb::new(0xFF, 0xFF, 0xFF),
            Self::Yellow => Rgb::new(0xFF, 0xFF, 0x00),
            Self::Orange => Rgb::new(0xFF, 0x80, 0x00),
        }
    }
}

impl FromStr for ColorName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::NAMES
            .iter()
            .position(|name| *name == s)
            .map(|idx| Self::ALL[idx])
            .ok_or_else(|| Error::unknown(NameKind::Color, s))
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Firmware-driven animated lighting effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleName {
    Rainbow,
    Reactive,
    Raindrop,
    Marquee,
    Aurora,
    Pulse,
    Wave,
    Drop,
    Firework,
}

impl StyleName {
    /// All styles, in table order.
    pub const ALL: &'static [StyleName] = &[
        StyleName::Rainbow,
        StyleName::Reactive,
        StyleName::Raindrop,
        StyleName::Marquee,
        StyleName::Aurora,
        StyleName::Pulse,
        StyleName::Wave,
        StyleName::Drop,
        StyleName::Firework,
    ];

    /// Accepted spellings, same order as [`StyleName::ALL`].
    pub const NAMES: &'static [&'static str] = &[
        "rainbow", "reactive", "raindrop", "marquee", "aurora", "pulse", "wave", "drop",
        "firework",
    ];

    pub fn name(&self) -> &'static str {
        Self::NAMES[*self as usize]
    }

    /// Firmware style id.
    pub fn byte(&self) -> u8 {
        match self {
            Self::Rainbow => 0x05,
            Self::Reactive => 0x04,
            Self::Raindrop => 0x0A,
            Self::Marquee => 0x09,
            Self::Aurora => 0x0E,
            Self::Pulse => 0x02,
            Self::Wave => 0x03,
            Self::Drop => 0x06,
            Self::Firework => 0x11,
        }
    }
}

impl FromStr for StyleName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::NAMES
            .iter()
            .position(|name| *name == s)
            .map(|idx| Self::ALL[idx])
            .ok_or_else(|| Error::unknown(NameKind::Style, s))
    }
}

impl fmt::Display for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Backlight brightness step, 1 (dimmest) through 4 (brightest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BrightnessLevel(u8);

impl BrightnessLevel {
    pub const MIN: BrightnessLevel = BrightnessLevel(1);
    pub const MAX: BrightnessLevel = BrightnessLevel(4);

    /// Accepts levels 1..=4; anything else is `None`.
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&level)
            .then_some(Self(level))
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    /// Firmware brightness byte.
    pub fn byte(&self) -> u8 {
        match self.0 {
            1 => 0x08,
            2 => 0x16,
            3 => 0x24,
            _ => 0x32,
        }
    }
}

impl fmt::Display for BrightnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
