//! Per-key color payload for the bulk endpoint.
//!
//! The keyboard is addressed as a fixed grid of key zones, 8 rows by 16
//! columns. Each zone takes four payload bytes, `[zone_id, r, g, b]`, where
//! `zone_id = row * 16 + column`. The payload always covers every zone, so
//! its length never changes with the layout mode.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::palette::ColorName;

/// Rows in the key-zone grid.
pub const ZONE_ROWS: usize = 8;
/// Columns in the key-zone grid.
pub const ZONE_COLUMNS: usize = 16;
/// Total key zones.
pub const ZONE_COUNT: usize = ZONE_ROWS * ZONE_COLUMNS;
/// Bytes per zone: id, red, green, blue.
pub const ZONE_STRIDE: usize = 4;
/// Bulk payload length.
pub const PAYLOAD_LEN: usize = ZONE_COUNT * ZONE_STRIDE;

/// A physical key zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyZone {
    pub id: u8,
    pub row: u8,
    pub column: u8,
}

/// Zone table in wire order.
pub const ZONE_LAYOUT: [KeyZone; ZONE_COUNT] = build_layout();

const fn build_layout() -> [KeyZone; ZONE_COUNT] {
    let mut zones = [KeyZone {
        id: 0,
        row: 0,
        column: 0,
    }; ZONE_COUNT];
    let mut i = 0;
    while i < ZONE_COUNT {
        zones[i] = KeyZone {
            id: i as u8,
            row: (i / ZONE_COLUMNS) as u8,
            column: (i % ZONE_COLUMNS) as u8,
        };
        i += 1;
    }
    zones
}

/// How colors are distributed over the zone grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// One color everywhere.
    Mono,
    /// Alternating by column: even columns take the first color.
    HorizontalAlternating,
    /// Alternating by row: even rows take the first color.
    VerticalAlternating,
}

impl LayoutMode {
    /// Number of colors the mode consumes.
    pub fn color_count(&self) -> usize {
        match self {
            Self::Mono => 1,
            Self::HorizontalAlternating | Self::VerticalAlternating => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mono => "mono",
            Self::HorizontalAlternating => "horizontal-alternating",
            Self::VerticalAlternating => "vertical-alternating",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated color scheme: a layout plus the colors it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Mono(ColorName),
    HorizontalAlternating(ColorName, ColorName),
    VerticalAlternating(ColorName, ColorName),
}

impl ColorScheme {
    /// Build a scheme from user-supplied color names.
    ///
    /// Fails with [`Error::UnknownName`] on the first name outside the
    /// palette, or [`Error::SchemeArity`] if the count does not fit the mode.
    pub fn from_names<S: AsRef<str>>(mode: LayoutMode, names: &[S]) -> Result<Self> {
        if names.len() != mode.color_count() {
            return Err(Error::SchemeArity {
                mode: mode.name(),
                expected: mode.color_count(),
                got: names.len(),
            });
        }
        let colors = names
            .iter()
            .map(|n| ColorName::from_str(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(match mode {
            LayoutMode::Mono => Self::Mono(colors[0]),
            LayoutMode::HorizontalAlternating => Self::HorizontalAlternating(colors[0], colors[1]),
            LayoutMode::VerticalAlternating => Self::VerticalAlternating(colors[0], colors[1]),
        })
    }

    pub fn mode(&self) -> LayoutMode {
        match self {
            Self::Mono(_) => LayoutMode::Mono,
            Self::HorizontalAlternating(..) => LayoutMode::HorizontalAlternating,
            Self::VerticalAlternating(..) => LayoutMode::VerticalAlternating,
        }
    }

    /// Color assigned to one zone.
    pub fn color_at(&self, zone: &KeyZone) -> ColorName {
        match *self {
            Self::Mono(c) => c,
            Self::HorizontalAlternating(a, b) => {
                if zone.column % 2 == 0 {
                    a
                } else {
                    b
                }
            }
            Self::VerticalAlternating(a, b) => {
                if zone.row % 2 == 0 {
                    a
                } else {
                    b
                }
            }
        }
    }
}

/// Bulk payload describing the color of every key zone.
#[derive(Clone, PartialEq, Eq)]
pub struct ColorVector(Vec<u8>);

impl ColorVector {
    /// Encode a scheme over the full zone layout.
    pub fn build(scheme: &ColorScheme) -> Self {
        let mut buf = Vec::with_capacity(PAYLOAD_LEN);
        for zone in &ZONE_LAYOUT {
            let rgb = scheme.color_at(zone).rgb();
            buf.extend_from_slice(&[zone.id, rgb.r, rgb.g, rgb.b]);
        }
        Self(buf)
    }

    /// Single color on every zone.
    pub fn mono(color: ColorName) -> Self {
        Self::build(&ColorScheme::Mono(color))
    }

    /// Even columns take `a`, odd columns take `b`.
    pub fn horizontal_alternating(a: ColorName, b: ColorName) -> Self {
        Self::build(&ColorScheme::HorizontalAlternating(a, b))
    }

    /// Even rows take `a`, odd rows take `b`.
    pub fn vertical_alternating(a: ColorName, b: ColorName) -> Self {
        Self::build(&ColorScheme::VerticalAlternating(a, b))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ColorVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColorVector({} bytes)", self.0.len())
    }
}
