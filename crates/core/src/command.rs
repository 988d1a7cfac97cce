//! One CLI invocation's worth of lighting commands.
//!
//! An invocation runs in a fixed order: disable, then brightness, then at
//! most one action.

use tracing::debug;

use crate::error::Result;
use crate::palette::{BrightnessLevel, StyleName};
use crate::session::{LightingSession, StyleParams};
use crate::vector::ColorScheme;

/// The single top-level action of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ColorScheme(ColorScheme),
    Style(StyleName, StyleParams),
    RawStyle(u8, StyleParams),
}

/// Everything one invocation asks the keyboard to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub disable: bool,
    pub brightness: Option<BrightnessLevel>,
    pub action: Option<Action>,
}

impl Invocation {
    /// True when there is nothing to send.
    pub fn is_empty(&self) -> bool {
        !self.disable && self.brightness.is_none() && self.action.is_none()
    }

    /// Run the invocation against a session.
    pub fn execute(&self, session: &mut LightingSession<'_>) -> Result<()> {
        debug!(invocation = ?self, "Executing invocation");
        if self.disable {
            session.disable()?;
        }
        if let Some(level) = self.brightness {
            session.set_brightness(level)?;
        }
        match self.action {
            Some(Action::ColorScheme(ref scheme)) => session.apply_color_scheme(scheme),
            Some(Action::Style(style, params)) => session.set_style(style, params),
            Some(Action::RawStyle(byte, params)) => session.set_style_raw(byte, params),
            None => Ok(()),
        }
    }
}
