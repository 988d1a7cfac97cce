//! Control-transfer frame encoding.
//!
//! Every command is carried by exactly one 8-byte frame. The slot meanings
//! depend on the command:
//!
//! | Command            | 0    | 1    | 2     | 3     | 4          | 5    | 6        | 7    |
//! |--------------------|------|------|-------|-------|------------|------|----------|------|
//! | disable            | 0x08 | 0x01 | 0x00  | 0x00  | 0x00       | 0x00 | 0x00     | 0x00 |
//! | style              | 0x08 | 0x02 | style | delay | brightness | 0x08 | rotation | 0x00 |
//! | brightness         | 0x08 | 0x02 | 0x33  | 0x00  | brightness | 0x00 | 0x00     | 0x00 |
//! | begin color-scheme | 0x12 | 0x00 | 0x00  | 0x08  | 0x00       | 0x00 | 0x00     | 0x00 |

use std::fmt;

use crate::palette::{BrightnessLevel, StyleName};

/// Control frame length. The firmware rejects anything else.
pub const FRAME_LEN: usize = 8;

/// Frame opcodes.
pub mod opcodes {
    /// Lighting effect commands (disable, style, brightness).
    pub const EFFECT: u8 = 0x08;
    /// Per-key color upload.
    pub const COLOR_SCHEME: u8 = 0x12;

    /// Sub-opcode: backlight off.
    pub const SUB_DISABLE: u8 = 0x01;
    /// Sub-opcode: set effect parameters.
    pub const SUB_SET: u8 = 0x02;

    /// Style slot value that selects "brightness only".
    pub const BRIGHTNESS_ONLY: u8 = 0x33;
    /// Constant in slot 5 of a style frame.
    pub const STYLE_MARKER: u8 = 0x08;
    /// Slot 3 of the begin color-scheme frame.
    pub const SCHEME_ROWS: u8 = 0x08;
}

/// Countdown delay between animation steps, 0 (fastest) through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleDelay(u8);

impl StyleDelay {
    pub const MAX: u8 = 5;

    pub fn new(delay: u8) -> Option<Self> {
        (delay <= Self::MAX).then_some(Self(delay))
    }

    /// Convert a user-facing speed (0 slowest, 5 fastest) into a delay.
    pub fn from_speed(speed: u8) -> Option<Self> {
        (speed <= Self::MAX).then(|| Self(Self::MAX - speed))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for StyleDelay {
    fn default() -> Self {
        Self(3)
    }
}

/// Animation direction, 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation(u8);

impl Rotation {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn new(rotation: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&rotation)
            .then_some(Self(rotation))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

/// One 8-byte control-transfer frame.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ControlFrame([u8; FRAME_LEN]);

impl ControlFrame {
    /// Turn the backlight off.
    pub fn disable() -> Self {
        Self([opcodes::EFFECT, opcodes::SUB_DISABLE, 0, 0, 0, 0, 0, 0])
    }

    /// Select an animated style. Brightness is carried in the frame itself.
    pub fn style(
        style: StyleName,
        delay: StyleDelay,
        rotation: Rotation,
        brightness: BrightnessLevel,
    ) -> Self {
        Self::style_raw(style.byte(), delay, rotation, brightness)
    }

    /// Style frame with an arbitrary style byte, bypassing the name table.
    pub fn style_raw(
        style_byte: u8,
        delay: StyleDelay,
        rotation: Rotation,
        brightness: BrightnessLevel,
    ) -> Self {
        Self([
            opcodes::EFFECT,
            opcodes::SUB_SET,
            style_byte,
            delay.value(),
            brightness.byte(),
            opcodes::STYLE_MARKER,
            rotation.value(),
            0,
        ])
    }

    /// Set backlight brightness without changing the active effect.
    pub fn brightness(level: BrightnessLevel) -> Self {
        Self([
            opcodes::EFFECT,
            opcodes::SUB_SET,
            opcodes::BRIGHTNESS_ONLY,
            0,
            level.byte(),
            0,
            0,
            0,
        ])
    }

    /// Announce that a per-key color payload follows on the bulk endpoint.
    pub fn begin_color_scheme() -> Self {
        Self([opcodes::COLOR_SCHEME, 0, 0, opcodes::SCHEME_ROWS, 0, 0, 0, 0])
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }
}

impl fmt::Debug for ControlFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ControlFrame({:02X?})", self.0)
    }
}
