//! Lighting session: brightness state and transfer sequencing.
//!
//! A session lives for one CLI invocation. It remembers the last brightness
//! it set and enforces that a brightness frame has gone out before any color
//! scheme is uploaded. If none has, it sends one at [`DEFAULT_BRIGHTNESS`]
//! first. That fallback happens at most once per call.
//!
//! Style and disable commands never read or write the stored brightness;
//! a style frame carries its own brightness byte.

use tracing::debug;

use crate::error::Result;
use crate::frame::{ControlFrame, Rotation, StyleDelay};
use crate::palette::{BrightnessLevel, StyleName};
use crate::transport::{send_frame, send_payload, KeyboardTransport};
use crate::vector::{ColorScheme, ColorVector};

/// Brightness applied when a color scheme is pushed before any brightness.
pub const DEFAULT_BRIGHTNESS: BrightnessLevel = BrightnessLevel::MAX;

/// Number of bulk writes per color upload. The firmware expects the whole
/// payload to be re-sent across this many write cycles.
pub const BULK_REPETITIONS: usize = 8;

/// Session brightness state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrightnessState {
    Unset,
    Set(BrightnessLevel),
}

/// Animated style selection plus its timing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleParams {
    pub delay: StyleDelay,
    pub rotation: Rotation,
    pub brightness: BrightnessLevel,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            delay: StyleDelay::default(),
            rotation: Rotation::default(),
            brightness: BrightnessLevel::MAX,
        }
    }
}

/// Stateful coordinator between commands and the transport.
pub struct LightingSession<'a> {
    transport: &'a dyn KeyboardTransport,
    brightness: BrightnessState,
}

impl<'a> LightingSession<'a> {
    pub fn new(transport: &'a dyn KeyboardTransport) -> Self {
        Self {
            transport,
            brightness: BrightnessState::Unset,
        }
    }

    pub fn brightness(&self) -> BrightnessState {
        self.brightness
    }

    /// Turn the backlight off.
    pub fn disable(&mut self) -> Result<()> {
        debug!("Disabling backlight");
        send_frame(self.transport, &ControlFrame::disable())
    }

    /// Set brightness and remember it for later color uploads.
    pub fn set_brightness(&mut self, level: BrightnessLevel) -> Result<()> {
        send_frame(self.transport, &ControlFrame::brightness(level))?;
        self.brightness = BrightnessState::Set(level);
        debug!(level = level.level(), "Brightness set");
        Ok(())
    }

    /// Upload a per-key color scheme.
    ///
    /// Sends the begin color-scheme frame, then the color vector
    /// [`BULK_REPETITIONS`] times.
    pub fn apply_color_scheme(&mut self, scheme: &ColorScheme) -> Result<()> {
        if self.brightness == BrightnessState::Unset {
            debug!(
                level = DEFAULT_BRIGHTNESS.level(),
                "No brightness set, applying default before color scheme"
            );
            self.set_brightness(DEFAULT_BRIGHTNESS)?;
        }
        self.push_color_scheme(scheme)
    }

    fn push_color_scheme(&self, scheme: &ColorScheme) -> Result<()> {
        let vector = ColorVector::build(scheme);
        debug!(mode = %scheme.mode(), len = vector.len(), "Uploading color scheme");
        send_frame(self.transport, &ControlFrame::begin_color_scheme())?;
        send_payload(self.transport, vector.as_bytes(), BULK_REPETITIONS)
    }

    /// Select an animated style.
    pub fn set_style(&mut self, style: StyleName, params: StyleParams) -> Result<()> {
        debug!(style = %style, ?params, "Setting style");
        send_frame(
            self.transport,
            &ControlFrame::style(style, params.delay, params.rotation, params.brightness),
        )
    }

    /// Select a style by raw firmware byte.
    pub fn set_style_raw(&mut self, style_byte: u8, params: StyleParams) -> Result<()> {
        debug!(
            style_byte = format_args!("0x{:02X}", style_byte),
            ?params,
            "Setting raw style"
        );
        send_frame(
            self.transport,
            &ControlFrame::style_raw(style_byte, params.delay, params.rotation, params.brightness),
        )
    }
}
