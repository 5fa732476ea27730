//! Resolved tap gestures.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tap count at which a sequence resolves immediately instead of waiting.
pub const MULTI_TAP_THRESHOLD: u32 = 3;

/// The gesture a completed tap sequence resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum TapGesture {
    /// One tap followed by a quiet window.
    Single,
    /// Two taps followed by a quiet window.
    Double,
    /// Three taps. Fires on the third tap without waiting.
    Multi,
}

impl TapGesture {
    /// Maps a tap count onto the gesture it resolves to.
    ///
    /// Counts of three and above all collapse into [`TapGesture::Multi`].
    #[must_use]
    pub const fn from_count(count: u32) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(Self::Single),
            2 => Some(Self::Double),
            _ => Some(Self::Multi),
        }
    }

    /// Whether this gesture waits for the sensitivity window before resolving.
    #[must_use]
    pub const fn is_deferred(self) -> bool { !matches!(self, Self::Multi) }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Multi => "multi",
        }
    }
}

impl fmt::Display for TapGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}
