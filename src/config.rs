//! Presence configuration types.
//!
//! [`PresenceConfig`] selects the trailing window used to decide liveness and
//! the text encoding used for NUL-terminated peer names on the wire.
use std::time::Duration;

use thiserror::Error;

use crate::framing::TextEncoding;

/// Errors raised while validating a [`PresenceConfig`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A zero-length liveness window would never report any peer.
    #[error("liveness window must be greater than zero")]
    ZeroWindow,

    /// The encoding may emit zero bytes, which collide with the terminator.
    #[error("encoding {0:?} cannot carry NUL-terminated strings")]
    EncodingNotNulSafe(TextEncoding),
}

/// Settings shared by a [`Group`](crate::Group) and the heartbeat framing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresenceConfig {
    liveness_window: Duration,
    encoding: TextEncoding,
}

impl PresenceConfig {
    /// Default trailing window for [`Group::alive`](crate::Group::alive).
    pub const DEFAULT_LIVENESS_WINDOW: Duration = Duration::from_secs(3);

    /// Build a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWindow`] for a zero `liveness_window` and
    /// [`ConfigError::EncodingNotNulSafe`] for encodings that can emit zero
    /// bytes.
    pub fn new(liveness_window: Duration, encoding: TextEncoding) -> Result<Self, ConfigError> {
        Self::default()
            .with_liveness_window(liveness_window)?
            .with_encoding(encoding)
    }

    /// Replace the liveness window.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWindow`] if `window` is zero.
    pub fn with_liveness_window(mut self, window: Duration) -> Result<Self, ConfigError> {
        if window.is_zero() {
            return Err(ConfigError::ZeroWindow);
        }
        self.liveness_window = window;
        Ok(self)
    }

    /// Replace the text encoding.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EncodingNotNulSafe`] if `encoding` can emit zero
    /// bytes for ordinary text.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Result<Self, ConfigError> {
        if !encoding.is_nul_safe() {
            return Err(ConfigError::EncodingNotNulSafe(encoding));
        }
        self.encoding = encoding;
        Ok(self)
    }

    /// Trailing window within which a peer counts as alive.
    #[must_use]
    pub fn liveness_window(&self) -> Duration { self.liveness_window }

    /// Encoding used for peer names.
    #[must_use]
    pub fn encoding(&self) -> TextEncoding { self.encoding }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            liveness_window: Self::DEFAULT_LIVENESS_WINDOW,
            encoding: TextEncoding::DEFAULT,
        }
    }
}
