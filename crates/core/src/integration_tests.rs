//! Integration tests: exercise whole invocations against a simulated keyboard.
//!
//! Each test builds an [`Invocation`] the way the CLI would, runs it through a
//! [`LightingSession`] backed by the recording mock, and checks the exact
//! sequence of transfers the keyboard would see.

#[cfg(test)]
mod tests {
    use crate::command::{Action, Invocation};
    use crate::error::{Error, NameKind};
    use crate::options;
    use crate::palette::{BrightnessLevel, ColorName, StyleName};
    use crate::session::{LightingSession, BULK_REPETITIONS};
    use crate::transport::mock::MockTransport;
    use crate::transport::Transfer;
    use crate::vector::{ColorScheme, ColorVector, LayoutMode, PAYLOAD_LEN};

    const DISABLE: [u8; 8] = [0x08, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    const BEGIN_SCHEME: [u8; 8] = [0x12, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00];

    fn brightness_frame(byte: u8) -> Vec<u8> {
        vec![0x08, 0x02, 0x33, 0x00, byte, 0x00, 0x00, 0x00]
    }

    fn run(invocation: &Invocation) -> MockTransport {
        let mock = MockTransport::new();
        let mut session = LightingSession::new(&mock);
        invocation.execute(&mut session).unwrap();
        mock
    }

    /// `-c red`: implicit brightness, begin frame, eight payloads.
    #[test]
    fn mono_color_from_cold_start() {
        let scheme = ColorScheme::from_names(LayoutMode::Mono, &["red"]).unwrap();
        let mock = run(&Invocation {
            action: Some(Action::ColorScheme(scheme)),
            ..Invocation::default()
        });

        let log = mock.transfers();
        assert_eq!(log.len(), 2 + BULK_REPETITIONS);
        assert_eq!(log[0].bytes(), brightness_frame(0x32).as_slice());
        assert_eq!(log[1].bytes(), BEGIN_SCHEME);
        let payload = ColorVector::mono(ColorName::Red);
        for t in &log[2..] {
            assert_eq!(*t, Transfer::bulk(payload.as_bytes()));
            assert_eq!(t.bytes().len(), PAYLOAD_LEN);
        }
    }

    /// `-b 1 -H green blue`: explicit brightness, no implicit default.
    #[test]
    fn alternating_colors_with_explicit_brightness() {
        let scheme =
            ColorScheme::from_names(LayoutMode::HorizontalAlternating, &["green", "blue"])
                .unwrap();
        let mock = run(&Invocation {
            brightness: BrightnessLevel::new(1),
            action: Some(Action::ColorScheme(scheme)),
            ..Invocation::default()
        });

        assert_eq!(
            mock.control_frames(),
            vec![brightness_frame(0x08), BEGIN_SCHEME.to_vec()]
        );
        assert_eq!(mock.transfers().len(), 2 + BULK_REPETITIONS);
    }

    /// `-d -b 3 -V white orange`: disable, brightness, then the scheme.
    #[test]
    fn disable_brightness_and_scheme_run_in_order() {
        let scheme =
            ColorScheme::from_names(LayoutMode::VerticalAlternating, &["white", "orange"])
                .unwrap();
        let mock = run(&Invocation {
            disable: true,
            brightness: BrightnessLevel::new(3),
            action: Some(Action::ColorScheme(scheme)),
        });

        assert_eq!(
            mock.control_frames(),
            vec![DISABLE.to_vec(), brightness_frame(0x24), BEGIN_SCHEME.to_vec()]
        );
    }

    /// `-s wave -S 4 -r 2 -b 2`: brightness frame first, then a style frame
    /// carrying its own brightness byte.
    #[test]
    fn style_with_all_options() {
        let params = options::style_params(Some(4), Some(2), Some(2));
        let mock = run(&Invocation {
            brightness: Some(options::resolve_brightness(2)),
            action: Some(Action::Style(StyleName::Wave, params)),
            ..Invocation::default()
        });

        assert_eq!(
            mock.control_frames(),
            vec![
                brightness_frame(0x16),
                vec![0x08, 0x02, 0x03, 0x01, 0x16, 0x08, 0x02, 0x00],
            ]
        );
    }

    /// `-s firework -S 9 -r 0`: out-of-range options fall back silently.
    #[test]
    fn style_with_out_of_range_options_uses_defaults() {
        let params = options::style_params(Some(9), Some(0), None);
        let mock = run(&Invocation {
            action: Some(Action::Style(StyleName::Firework, params)),
            ..Invocation::default()
        });

        assert_eq!(
            mock.control_frames(),
            vec![vec![0x08, 0x02, 0x11, 0x03, 0x32, 0x08, 0x01, 0x00]]
        );
    }

    /// `-d` alone.
    #[test]
    fn disable_only() {
        let mock = run(&Invocation {
            disable: true,
            ..Invocation::default()
        });
        assert_eq!(mock.transfers(), vec![Transfer::Control { bytes: DISABLE.to_vec() }]);
    }

    /// `--style-debug 0x20`: raw byte goes straight into slot 2.
    #[test]
    fn raw_style_debug() {
        let byte = options::parse_style_byte("0x20").unwrap();
        let mock = run(&Invocation {
            action: Some(Action::RawStyle(byte, options::style_params(None, None, None))),
            ..Invocation::default()
        });
        assert_eq!(
            mock.control_frames(),
            vec![vec![0x08, 0x02, 0x20, 0x03, 0x32, 0x08, 0x01, 0x00]]
        );
    }

    /// Invalid color names fail before anything is sent.
    #[test]
    fn unknown_color_fails_before_transmission() {
        let err = ColorScheme::from_names(LayoutMode::Mono, &["chartreuse"]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownName {
                kind: NameKind::Color,
                ..
            }
        ));
    }

    /// A transport failure mid-invocation stops the remaining commands.
    #[test]
    fn transport_failure_aborts_invocation() {
        let mock = MockTransport::new();
        mock.fail_after(1);
        let mut session = LightingSession::new(&mock);
        let result = Invocation {
            disable: true,
            brightness: BrightnessLevel::new(2),
            action: Some(Action::ColorScheme(ColorScheme::Mono(ColorName::Blue))),
        }
        .execute(&mut session);

        assert!(matches!(result, Err(Error::Transport(_))));
        assert_eq!(mock.control_frames(), vec![DISABLE.to_vec()]);
    }
}
