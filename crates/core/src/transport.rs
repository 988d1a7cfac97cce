//! Device transport abstraction.
//!
//! The session never talks to hardware directly. It hands encoded frames and
//! payloads to a [`KeyboardTransport`], so the real HID device, the CLI's
//! dry-run printer, and the test mock share one interface.

use serde::Serialize;
use tracing::trace;

use crate::error::Result;
use crate::frame::ControlFrame;

/// Abstraction over the keyboard's two transfer types.
pub trait KeyboardTransport: Send {
    /// Write one 8-byte frame as a control transfer.
    fn send_control_frame(&self, frame: &ControlFrame) -> Result<()>;

    /// Write the same payload `repetitions` times as bulk transfers.
    fn send_bulk_payload(&self, payload: &[u8], repetitions: usize) -> Result<()>;
}

/// One transfer as seen on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Transfer {
    Control { bytes: Vec<u8> },
    Bulk { bytes: Vec<u8> },
}

impl Transfer {
    pub fn control(frame: &ControlFrame) -> Self {
        Self::Control {
            bytes: frame.as_bytes().to_vec(),
        }
    }

    pub fn bulk(payload: &[u8]) -> Self {
        Self::Bulk {
            bytes: payload.to_vec(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Control { bytes } | Self::Bulk { bytes } => bytes,
        }
    }

    pub fn is_control(&self) -> bool {
        matches!(self, Self::Control { .. })
    }
}

/// Send a control frame, tracing the bytes on the way out.
pub fn send_frame(transport: &dyn KeyboardTransport, frame: &ControlFrame) -> Result<()> {
    trace!(frame_hex = format_args!("{:02X?}", frame.as_bytes()), "CTRL TX");
    transport.send_control_frame(frame)
}

/// Send a bulk payload `repetitions` times, tracing a prefix of the bytes.
pub fn send_payload(
    transport: &dyn KeyboardTransport,
    payload: &[u8],
    repetitions: usize,
) -> Result<()> {
    trace!(
        len = payload.len(),
        repetitions,
        head_hex = format_args!("{:02X?}", &payload[..payload.len().min(16)]),
        "BULK TX"
    );
    transport.send_bulk_payload(payload, repetitions)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_records_in_order() {
        let mock = mock::MockTransport::new();
        mock.send_control_frame(&ControlFrame::disable()).unwrap();
        mock.send_bulk_payload(&[1, 2, 3], 2).unwrap();

        let log = mock.transfers();
        assert_eq!(log.len(), 3);
        assert!(log[0].is_control());
        assert_eq!(log[1], Transfer::bulk(&[1, 2, 3]));
        assert_eq!(log[2], Transfer::bulk(&[1, 2, 3]));
    }

    #[test]
    fn mock_failure_surfaces_as_transport_error() {
        let mock = mock::MockTransport::new();
        mock.fail_after(1);
        mock.send_control_frame(&ControlFrame::disable()).unwrap();
        let err = mock.send_control_frame(&ControlFrame::disable()).unwrap_err();
        assert!(matches!(err, crate::error::Error::Transport(_)));
    }

    #[test]
    fn transfer_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Transfer::control(&ControlFrame::disable())).unwrap();
        assert_eq!(json, r#"{"kind":"control","bytes":[8,1,0,0,0,0,0,0]}"#);
    }
}
