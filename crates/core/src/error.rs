//! Error types for keylight-core.

use thiserror::Error;

/// Which lookup table rejected a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Color,
    Style,
}

impl NameKind {
    /// Every name the table accepts, in declaration order.
    pub fn accepted(&self) -> &'static [&'static str] {
        match self {
            Self::Color => crate::palette::ColorName::NAMES,
            Self::Style => crate::palette::StyleName::NAMES,
        }
    }
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Color => f.write_str("color"),
            Self::Style => f.write_str("style"),
        }
    }
}

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Color or style name outside the closed set.
    #[error("unknown {kind} '{name}' (expected one of: {})", .kind.accepted().join(", "))]
    UnknownName { kind: NameKind, name: String },

    /// A color scheme was given the wrong number of colors for its layout.
    #[error("{mode} layout takes {expected} color(s), got {got}")]
    SchemeArity {
        mode: &'static str,
        expected: usize,
        got: usize,
    },

    /// Control or bulk transfer failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// No keyboard matched the vendor/product id.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// The device exists but could not be opened for writing.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
}

impl Error {
    pub(crate) fn unknown(kind: NameKind, name: &str) -> Self {
        Self::UnknownName {
            kind,
            name: name.to_string(),
        }
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
