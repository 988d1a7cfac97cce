//! keylight-core: lighting protocol encoding, session sequencing, and device discovery.
//!
//! This crate turns lighting intents (disable, brightness, color schemes,
//! animated styles) into the 8-byte control frames and per-key bulk payloads
//! understood by ITE 8291 keyboard backlight controllers.

pub mod command;
pub mod device;
pub mod error;
pub mod frame;
#[cfg(test)]
mod integration_tests;
pub mod options;
pub mod palette;
pub mod session;
pub mod transport;
pub mod vector;

/// ITE Tech USB Vendor ID.
pub const ITE_VID: u16 = 0x048D;

/// Known keyboard product IDs.
pub mod pids {
    /// ITE 8291 RGB keyboard controller.
    pub const ITE_8291: u16 = 0xCE00;
}
