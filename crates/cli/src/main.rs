//! keylight CLI: command-line keyboard backlight control.

use std::ffi::CString;
use std::io::Write;
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use keylight_core::command::{Action, Invocation};
use keylight_core::error::Error as CoreError;
use keylight_core::frame::{ControlFrame, FRAME_LEN};
use keylight_core::palette::StyleName;
use keylight_core::session::LightingSession;
use keylight_core::transport::{KeyboardTransport, Transfer};
use keylight_core::vector::{ColorScheme, LayoutMode};
use keylight_core::{device, options};

struct CliHidTransport {
    device: hidapi::HidDevice,
}

impl CliHidTransport {
    fn open(vid: u16, pid: u16) -> keylight_core::error::Result<Self> {
        let devices = device::discover_devices(vid, pid)?;
        let target = device::select_interface(&devices).ok_or_else(|| {
            CoreError::DeviceNotFound(format!("no keyboard with VID=0x{vid:04X} PID=0x{pid:04X}"))
        })?;

        let api = hidapi::HidApi::new().map_err(|e| device::map_hid_error("hidapi init", &e))?;
        let path = CString::new(target.path.clone())
            .map_err(|e| CoreError::Transport(format!("invalid device path: {e}")))?;
        let device = api
            .open_path(&path)
            .map_err(|e| device::map_hid_error(&format!("open {}", target.path), &e))?;

        tracing::info!(
            path = %target.path,
            interface = target.interface,
            "Opened keyboard"
        );
        Ok(Self { device })
    }
}

impl KeyboardTransport for CliHidTransport {
    fn send_control_frame(&self, frame: &ControlFrame) -> keylight_core::error::Result<()> {
        // Report id 0 followed by the frame.
        let mut report = [0u8; FRAME_LEN + 1];
        report[1..].copy_from_slice(frame.as_bytes());
        self.device
            .send_feature_report(&report)
            .map_err(|e| device::map_hid_error("control transfer", &e))
    }

    fn send_bulk_payload(
        &self,
        payload: &[u8],
        repetitions: usize,
    ) -> keylight_core::error::Result<()> {
        let mut report = Vec::with_capacity(payload.len() + 1);
        report.push(0u8);
        report.extend_from_slice(payload);

        for attempt in 0..repetitions {
            let written = self
                .device
                .write(&report)
                .map_err(|e| device::map_hid_error("bulk transfer", &e))?;
            check_full_write(written, report.len(), attempt, repetitions)?;
        }
        Ok(())
    }
}

/// hidapi counts the report id byte, so `expected` is the full report length.
fn check_full_write(
    written: usize,
    expected: usize,
    attempt: usize,
    repetitions: usize,
) -> keylight_core::error::Result<()> {
    if written < expected {
        return Err(CoreError::Transport(format!(
            "short bulk write {}/{}: {written} of {expected} bytes",
            attempt + 1,
            repetitions,
        )));
    }
    Ok(())
}

/// Writes transfers as JSON lines instead of touching a device.
struct DryRunTransport<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> DryRunTransport<W> {
    fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn emit(&self, transfer: &Transfer) -> keylight_core::error::Result<()> {
        let line = serde_json::to_string(transfer)
            .map_err(|e| CoreError::Transport(format!("dry-run encode: {e}")))?;
        let mut out = self
            .out
            .lock()
            .map_err(|_| CoreError::Transport("dry-run output lock poisoned".into()))?;
        writeln!(out, "{line}").map_err(|e| CoreError::Transport(format!("dry-run write: {e}")))
    }
}

impl<W: Write + Send> KeyboardTransport for DryRunTransport<W> {
    fn send_control_frame(&self, frame: &ControlFrame) -> keylight_core::error::Result<()> {
        self.emit(&Transfer::control(frame))
    }

    fn send_bulk_payload(
        &self,
        payload: &[u8],
        repetitions: usize,
    ) -> keylight_core::error::Result<()> {
        let transfer = Transfer::bulk(payload);
        for _ in 0..repetitions {
            self.emit(&transfer)?;
        }
        Ok(())
    }
}

fn parse_hex_u16(s: &str) -> std::result::Result<u16, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid hex id '{s}': {e}"))
}

fn parse_style_byte(s: &str) -> std::result::Result<u8, String> {
    options::parse_style_byte(s)
        .ok_or_else(|| format!("invalid style byte '{s}' (0-255 or 0x00-0xFF)"))
}

#[derive(Parser, Debug)]
#[command(
    name = "keylight",
    about = "Keyboard RGB backlight control",
    long_about = "Supply at least one of the options [-c|-H|-V|-s|-d]. \
                  Colors available: [red|green|blue|teal|pink|purple|white|yellow|orange]"
)]
struct Cli {
    /// Single color.
    #[arg(short = 'c', long = "color", value_name = "COLOR")]
    color: Option<String>,

    /// Brightness, 1-4 (out-of-range values fall back to 4).
    #[arg(short = 'b', long, allow_negative_numbers = true)]
    brightness: Option<i64>,

    /// Horizontal alternating colors.
    #[arg(short = 'H', long = "h-alt", num_args = 2, value_names = ["COLOR_A", "COLOR_B"])]
    h_alt: Option<Vec<String>>,

    /// Vertical alternating colors.
    #[arg(short = 'V', long = "v-alt", num_args = 2, value_names = ["COLOR_A", "COLOR_B"])]
    v_alt: Option<Vec<String>>,

    /// Animated style: rainbow, reactive, raindrop, marquee, aurora, pulse, wave, drop, firework.
    #[arg(short = 's', long, value_name = "STYLE")]
    style: Option<String>,

    /// Style speed, 0-5. Only used with --style.
    #[arg(short = 'S', long, allow_negative_numbers = true)]
    speed: Option<i64>,

    /// Style rotation, 1-4. Only used with --style.
    #[arg(short = 'r', long, allow_negative_numbers = true)]
    rotation: Option<i64>,

    /// Style byte sent verbatim, decimal or 0x-prefixed hex.
    #[arg(long = "style-debug", value_name = "BYTE", value_parser = parse_style_byte)]
    style_debug: Option<u8>,

    /// Turn the keyboard backlight off.
    #[arg(short = 'd', long)]
    disable: bool,

    /// USB vendor id (hex).
    #[arg(long = "vendor-id", value_parser = parse_hex_u16, default_value = "048d")]
    vendor_id: u16,

    /// USB product id (hex).
    #[arg(long = "product-id", value_parser = parse_hex_u16, default_value = "ce00")]
    product_id: u16,

    /// List matching keyboard interfaces and exit.
    #[arg(long = "list-devices")]
    list_devices: bool,

    /// Print transfers as JSON lines instead of sending them.
    #[arg(long = "dry-run")]
    dry_run: bool,
}

impl Cli {
    /// Resolve flags into one invocation.
    ///
    /// The first of color, h-alt, v-alt, style, style-debug wins.
    fn invocation(&self) -> keylight_core::error::Result<Invocation> {
        let action = if let Some(color) = &self.color {
            Some(Action::ColorScheme(ColorScheme::from_names(
                LayoutMode::Mono,
                &[color],
            )?))
        } else if let Some(colors) = &self.h_alt {
            Some(Action::ColorScheme(ColorScheme::from_names(
                LayoutMode::HorizontalAlternating,
                colors.as_slice(),
            )?))
        } else if let Some(colors) = &self.v_alt {
            Some(Action::ColorScheme(ColorScheme::from_names(
                LayoutMode::VerticalAlternating,
                colors.as_slice(),
            )?))
        } else if let Some(style) = &self.style {
            Some(Action::Style(style.parse::<StyleName>()?, self.style_params()))
        } else {
            self.style_debug
                .map(|byte| Action::RawStyle(byte, self.style_params()))
        };

        Ok(Invocation {
            disable: self.disable,
            brightness: self.brightness.map(options::resolve_brightness),
            action,
        })
    }

    fn style_params(&self) -> keylight_core::session::StyleParams {
        options::style_params(self.speed, self.rotation, self.brightness)
    }
}

fn list_devices(vid: u16, pid: u16) -> Result<()> {
    let devices = device::discover_devices(vid, pid)?;
    if devices.is_empty() {
        println!("No keyboard found (VID: 0x{vid:04X}, PID: 0x{pid:04X}).");
    } else {
        for dev in &devices {
            println!(
                "{} (VID: 0x{:04X}, PID: 0x{:04X}, interface: {}, path: {}){}",
                dev.product.as_deref().unwrap_or("Unknown keyboard"),
                dev.vid,
                dev.pid,
                dev.interface,
                dev.path,
                if dev.is_lighting_interface() {
                    " [lighting]"
                } else {
                    ""
                }
            );
        }
    }
    Ok(())
}

/// Execute the invocation described by `cli`, writing user-facing output to `out`.
fn run<W: Write + Send>(cli: &Cli, mut out: W) -> keylight_core::error::Result<()> {
    let invocation = cli.invocation()?;
    if invocation.is_empty() {
        return writeln!(out, "Invalid or absent command")
            .map_err(|e| CoreError::Transport(format!("stdout: {e}")));
    }

    if cli.dry_run {
        let transport = DryRunTransport::new(out);
        let mut session = LightingSession::new(&transport);
        return invocation.execute(&mut session);
    }

    let transport = CliHidTransport::open(cli.vendor_id, cli.product_id)?;
    let mut session = LightingSession::new(&transport);
    invocation.execute(&mut session)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.list_devices {
        return list_devices(cli.vendor_id, cli.product_id);
    }

    run(&cli, std::io::stdout()).map_err(|e| match e {
        CoreError::PermissionDenied(_) => anyhow::Error::new(e).context(
            "cannot open the keyboard; run as root or install a udev rule granting access to the hidraw device",
        ),
        other => other.into(),
    })
}
