//! Host callbacks invoked when a tap sequence resolves.
//!
//! Each handler is optional. A missing handler is not an error: the sequence
//! still resolves and the tap count still resets, nothing is invoked.

use std::fmt;
use std::rc::Rc;

use tokio::sync::mpsc;

use crate::gesture::TapGesture;

/// A zero-argument action owned by the host.
pub type TapCallback = Rc<dyn Fn()>;

/// The single, double and multi tap handlers for one surface.
#[derive(Clone, Default)]
pub struct TapHandlers {
    single: Option<TapCallback>,
    double: Option<TapCallback>,
    multi: Option<TapCallback>,
}

impl TapHandlers {
    /// Creates an empty set of handlers.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Sets the action invoked for a single tap.
    #[must_use]
    pub fn on_single_tap(mut self, action: impl Fn() + 'static) -> Self {
        self.single = Some(Rc::new(action));
        self
    }

    /// Sets the action invoked for a double tap.
    #[must_use]
    pub fn on_double_tap(mut self, action: impl Fn() + 'static) -> Self {
        self.double = Some(Rc::new(action));
        self
    }

    /// Sets the action invoked once three taps have been seen.
    #[must_use]
    pub fn on_multi_tap(mut self, action: impl Fn() + 'static) -> Self {
        self.multi = Some(Rc::new(action));
        self
    }

    /// Returns the handler for `gesture`, if one is set.
    #[must_use]
    pub fn get(&self, gesture: TapGesture) -> Option<TapCallback> {
        match gesture {
            TapGesture::Single => self.single.clone(),
            TapGesture::Double => self.double.clone(),
            TapGesture::Multi => self.multi.clone(),
        }
    }

    #[must_use]
    pub const fn is_set(&self, gesture: TapGesture) -> bool {
        match gesture {
            TapGesture::Single => self.single.is_some(),
            TapGesture::Double => self.double.is_some(),
            TapGesture::Multi => self.multi.is_some(),
        }
    }

    /// Creates handlers that forward every resolved gesture into a channel.
    ///
    /// Useful for hosts that consume gestures as a stream instead of callbacks.
    /// Once the receiver is dropped, resolved gestures are discarded.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TapGesture>) {
        let (sender, receiver) = mpsc::unbounded_channel();

        let forward = |gesture: TapGesture| {
            let sender = sender.clone();
            move || {
                if sender.send(gesture).is_err() {
                    tracing::debug!(%gesture, "tap receiver dropped, gesture discarded");
                }
            }
        };

        let handlers = Self::new()
            .on_single_tap(forward(TapGesture::Single))
            .on_double_tap(forward(TapGesture::Double))
            .on_multi_tap(forward(TapGesture::Multi));

        (handlers, receiver)
    }
}

impl fmt::Debug for TapHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapHandlers")
            .field("single", &self.single.is_some())
            .field("double", &self.double.is_some())
            .field("multi", &self.multi.is_some())
            .finish()
    }
}
