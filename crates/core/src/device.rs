//! Device discovery and HID error mapping.

use crate::error::{Error, Result};
use tracing::{debug, info};

/// HID interface that carries the lighting endpoints.
pub const LIGHTING_INTERFACE: i32 = 1;

/// Information about a discovered keyboard interface.
#[derive(Debug, Clone)]
pub struct KeyboardInfo {
    pub vid: u16,
    pub pid: u16,
    pub interface: i32,
    pub path: String,
    pub product: Option<String>,
}

impl KeyboardInfo {
    pub fn is_lighting_interface(&self) -> bool {
        self.interface == LIGHTING_INTERFACE
    }
}

/// Enumerate HID interfaces belonging to the given keyboard.
pub fn discover_devices(vid: u16, pid: u16) -> Result<Vec<KeyboardInfo>> {
    debug!(
        vid = format_args!("0x{:04X}", vid),
        pid = format_args!("0x{:04X}", pid),
        "Starting HID device enumeration"
    );
    let api = hidapi::HidApi::new().map_err(|e| map_hid_error("hidapi init", &e))?;

    let mut devices = Vec::new();
    for info in api.device_list() {
        if info.vendor_id() != vid || info.product_id() != pid {
            continue;
        }

        info!(
            vid = format_args!("0x{:04X}", info.vendor_id()),
            pid = format_args!("0x{:04X}", info.product_id()),
            interface = info.interface_number(),
            path = %info.path().to_string_lossy(),
            "Found keyboard interface"
        );
        devices.push(KeyboardInfo {
            vid: info.vendor_id(),
            pid: info.product_id(),
            interface: info.interface_number(),
            path: info.path().to_string_lossy().into_owned(),
            product: info.product_string().map(|s| s.to_string()),
        });
    }

    debug!(count = devices.len(), "Device enumeration complete");
    Ok(devices)
}

/// Pick the interface to open: the lighting interface if present, else the first.
pub fn select_interface(devices: &[KeyboardInfo]) -> Option<&KeyboardInfo> {
    devices
        .iter()
        .find(|d| d.is_lighting_interface())
        .or_else(|| devices.first())
}

/// Classify a hidapi failure, separating permission problems from I/O errors.
pub fn map_hid_error(context: &str, err: &hidapi::HidError) -> Error {
    classify_message(format!("{context}: {err}"))
}

fn classify_message(msg: String) -> Error {
    let lower = msg.to_lowercase();
    if lower.contains("permission")
        || lower.contains("access denied")
        || lower.contains("access is denied")
    {
        Error::PermissionDenied(msg)
    } else if lower.contains("no such device") || lower.contains("not found") {
        Error::DeviceNotFound(msg)
    } else {
        Error::Transport(msg)
    }
}
