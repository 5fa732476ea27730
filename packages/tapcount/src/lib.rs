//! Tapcount - single, double and multi tap disambiguation.
//!
//! A host forwards one signal per completed tap into a [`TapDisambiguator`].
//! After a quiet period with no further taps, the disambiguator invokes at most
//! one handler for the whole sequence:
//!
//! - one tap resolves as [`TapGesture::Single`] once the sensitivity window elapses
//! - two taps resolve as [`TapGesture::Double`] once the window elapses after the second
//! - the third tap resolves as [`TapGesture::Multi`] immediately, without waiting
//!
//! Scheduled resolutions are never cancelled. Every tap mints a new
//! [`PendingToken`], and a resolution whose token is no longer current does
//! nothing when it fires. This keeps the core usable on hosts whose timers are
//! fire-and-forget, see [`Scheduler`].
//!
//! Everything runs on the host's event thread. The types here are `!Send`.

pub mod config;
pub mod disambiguator;
pub mod error;
pub mod gesture;
pub mod handlers;
pub mod scheduler;
pub mod token;

pub use config::{ConfigError, TapConfig, load_config_from_path, load_config_from_str};
pub use disambiguator::{TapDisambiguator, TapDisambiguatorBuilder};
pub use error::TapError;
pub use gesture::TapGesture;
pub use handlers::{TapCallback, TapHandlers};
pub use scheduler::{ManualScheduler, Scheduler, TokioScheduler};
pub use token::PendingToken;
