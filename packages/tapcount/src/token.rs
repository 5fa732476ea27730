//! Generation tokens for scheduled resolutions.
//!
//! Every registered tap mints a new token and every deferred resolution
//! carries the token that was current when it was scheduled. When the
//! resolution fires it only acts if its token is still the current one, so a
//! newer tap invalidates older timers without cancelling them.

/// Opaque generation marker minted once per tap.
///
/// Tokens are compared for equality only. Two consecutive tokens are always
/// distinct, including across the `u64` wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PendingToken(u64);

impl PendingToken {
    /// The token held before any tap has been registered.
    pub const INITIAL: Self = Self(0);

    /// Returns the token that supersedes this one.
    #[must_use]
    pub const fn next(self) -> Self { Self(self.0.wrapping_add(1)) }

    /// Raw generation number, for logging.
    #[must_use]
    pub const fn generation(self) -> u64 { self.0 }
}
