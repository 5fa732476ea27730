//! Tap count accumulation and deferred resolution.
//!
//! # How It Works
//!
//! Each call to [`TapDisambiguator::register_tap`] bumps the tap count and
//! mints a fresh [`PendingToken`]. The first and second taps schedule a
//! resolution one sensitivity window later, carrying that token. The third tap
//! resolves immediately as a multi tap.
//!
//! When a scheduled resolution fires it compares its token with the current
//! one. If a newer tap arrived in the meantime the tokens differ and the
//! resolution does nothing: it does not reset the count and invokes no
//! handler. Otherwise it resets the count and invokes the single or double
//! tap handler, depending on the count it was scheduled with.
//!
//! Scheduled resolutions only hold a weak reference to the surface state, so
//! dropping or detaching the disambiguator makes them inert.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::config::TapConfig;
use crate::gesture::{MULTI_TAP_THRESHOLD, TapGesture};
use crate::handlers::TapHandlers;
use crate::scheduler::Scheduler;
use crate::token::PendingToken;

/// Mutable per-surface state.
#[derive(Debug, Default)]
struct TapState {
    /// Taps observed since the last resolution.
    tap_count: u32,
    /// Token minted by the most recent tap.
    pending_token: PendingToken,
}

/// State shared with scheduled resolutions.
struct Surface {
    state: RefCell<TapState>,
    sensitivity_window: Duration,
    handlers: TapHandlers,
}

impl Surface {
    /// Resolves a deferred single or double tap if it is still current.
    fn resolve_scheduled(&self, token: PendingToken, tap_count: u32) {
        if self.state.borrow().pending_token != token {
            tracing::trace!(
                generation = token.generation(),
                tap_count,
                "tap resolution superseded"
            );
            return;
        }

        if let Some(gesture) = TapGesture::from_count(tap_count) {
            self.resolve(gesture);
        }
    }

    /// Resets the count and invokes the handler for `gesture`.
    ///
    /// The count is reset before the handler runs and no borrow is held while
    /// it runs, so the handler may register further taps.
    fn resolve(&self, gesture: TapGesture) {
        self.state.borrow_mut().tap_count = 0;

        let Some(handler) = self.handlers.get(gesture) else {
            tracing::debug!(%gesture, "tap resolved without handler");
            return;
        };

        tracing::debug!(%gesture, "tap resolved");
        handler();
    }
}

/// Disambiguates rapid taps on one surface into single, double or multi taps.
///
/// Create one per interactive surface when it is attached and drop it (or call
/// [`detach`](Self::detach)) when the surface goes away.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use tapcount::{ManualScheduler, TapDisambiguator};
///
/// let scheduler = ManualScheduler::new();
/// let taps = TapDisambiguator::builder(scheduler.clone())
///     .on_single_tap(|| println!("single"))
///     .on_double_tap(|| println!("double"))
///     .build();
///
/// taps.register_tap();
/// scheduler.advance(Duration::from_millis(50));
/// taps.register_tap();
/// scheduler.advance(Duration::from_millis(250)); // prints "double"
/// assert_eq!(taps.tap_count(), 0);
/// ```
pub struct TapDisambiguator<S: Scheduler> {
    surface: Rc<Surface>,
    scheduler: S,
}

impl<S: Scheduler> TapDisambiguator<S> {
    /// Creates a disambiguator for one surface.
    ///
    /// A negative sensitivity in `config` falls back to the default window.
    #[must_use]
    pub fn new(scheduler: S, config: &TapConfig, handlers: TapHandlers) -> Self {
        if config.is_clamped() {
            tracing::debug!(
                sensitivity = config.sensitivity,
                fallback_ms = config.sensitivity_ms(),
                "negative tap sensitivity, using default"
            );
        }

        let surface = Surface {
            state: RefCell::new(TapState::default()),
            sensitivity_window: config.sensitivity_window(),
            handlers,
        };

        tracing::trace!(
            window = ?surface.sensitivity_window,
            handlers = ?surface.handlers,
            "tap surface attached"
        );

        Self { surface: Rc::new(surface), scheduler }
    }

    /// Starts building a disambiguator that schedules through `scheduler`.
    #[must_use]
    pub fn builder(scheduler: S) -> TapDisambiguatorBuilder<S> {
        TapDisambiguatorBuilder::new(scheduler)
    }

    /// Registers one completed tap.
    ///
    /// Returns `Some(TapGesture::Multi)` when this tap resolved the sequence
    /// on the spot, `None` when resolution was deferred to the scheduler.
    pub fn register_tap(&self) -> Option<TapGesture> {
        let (tap_count, token) = {
            let mut state = self.surface.state.borrow_mut();
            state.tap_count = state.tap_count.saturating_add(1);
            state.pending_token = state.pending_token.next();
            (state.tap_count, state.pending_token)
        };

        tracing::trace!(tap_count, generation = token.generation(), "tap registered");

        if tap_count >= MULTI_TAP_THRESHOLD {
            self.surface.resolve(TapGesture::Multi);
            return Some(TapGesture::Multi);
        }

        let surface: Weak<Surface> = Rc::downgrade(&self.surface);
        self.scheduler.schedule(
            self.surface.sensitivity_window,
            Box::new(move || {
                if let Some(surface) = surface.upgrade() {
                    surface.resolve_scheduled(token, tap_count);
                }
            }),
        );

        None
    }

    /// Taps observed since the last resolution.
    #[must_use]
    pub fn tap_count(&self) -> u32 { self.surface.state.borrow().tap_count }

    /// Whether a tap sequence is waiting to resolve.
    #[must_use]
    pub fn has_pending(&self) -> bool { self.tap_count() > 0 }

    /// The token minted by the most recent tap.
    #[must_use]
    pub fn pending_token(&self) -> PendingToken { self.surface.state.borrow().pending_token }

    /// The effective sensitivity window.
    #[must_use]
    pub fn sensitivity_window(&self) -> Duration { self.surface.sensitivity_window }

    #[must_use]
    pub const fn scheduler(&self) -> &S { &self.scheduler }

    /// Detaches the surface, discarding any pending resolution.
    pub fn detach(self) {
        tracing::trace!(pending = self.has_pending(), "tap surface detached");
    }
}

impl<S: Scheduler> fmt::Debug for TapDisambiguator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.surface.state.borrow();
        f.debug_struct("TapDisambiguator")
            .field("tap_count", &state.tap_count)
            .field("pending_token", &state.pending_token)
            .field("sensitivity_window", &self.surface.sensitivity_window)
            .field("handlers", &self.surface.handlers)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`TapDisambiguator`].
///
/// Every setting is optional: the window defaults to 250 ms and unset
/// handlers are simply not invoked.
#[derive(Debug)]
pub struct TapDisambiguatorBuilder<S: Scheduler> {
    scheduler: S,
    config: TapConfig,
    handlers: TapHandlers,
}

impl<S: Scheduler> TapDisambiguatorBuilder<S> {
    fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            config: TapConfig::default(),
            handlers: TapHandlers::default(),
        }
    }

    /// Uses a loaded configuration.
    #[must_use]
    pub fn config(mut self, config: TapConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the sensitivity window in milliseconds. Negative values fall back
    /// to the default.
    #[must_use]
    pub fn sensitivity_ms(mut self, sensitivity: i64) -> Self {
        self.config.sensitivity = sensitivity;
        self
    }

    /// Replaces all handlers at once.
    #[must_use]
    pub fn handlers(mut self, handlers: TapHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    #[must_use]
    pub fn on_single_tap(mut self, action: impl Fn() + 'static) -> Self {
        self.handlers = self.handlers.on_single_tap(action);
        self
    }

    #[must_use]
    pub fn on_double_tap(mut self, action: impl Fn() + 'static) -> Self {
        self.handlers = self.handlers.on_double_tap(action);
        self
    }

    #[must_use]
    pub fn on_multi_tap(mut self, action: impl Fn() + 'static) -> Self {
        self.handlers = self.handlers.on_multi_tap(action);
        self
    }

    #[must_use]
    pub fn build(self) -> TapDisambiguator<S> {
        TapDisambiguator::new(self.scheduler, &self.config, self.handlers)
    }
}
