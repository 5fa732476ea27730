//! Integration tests for tap sequences on the tokio scheduler.
//!
//! These run on a paused clock, so timings are exact.

mod common;

use std::time::Duration;

use tapcount::{TapDisambiguator, TapGesture, TapHandlers, TokioScheduler};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::LocalSet;
use tokio::time::sleep;

use crate::common::init_tracing;

fn ms(millis: u64) -> Duration { Duration::from_millis(millis) }

fn surface(sensitivity: i64) -> (
    TapDisambiguator<TokioScheduler>,
    tokio::sync::mpsc::UnboundedReceiver<TapGesture>,
) {
    let (handlers, receiver) = TapHandlers::channel();
    let taps = TapDisambiguator::builder(TokioScheduler::new())
        .sensitivity_ms(sensitivity)
        .handlers(handlers)
        .build();
    (taps, receiver)
}

#[tokio::test(start_paused = true)]
async fn test_single_tap() {
    init_tracing();
    LocalSet::new()
        .run_until(async {
            let (taps, mut gestures) = surface(250);

            taps.register_tap();
            sleep(ms(240)).await;
            assert!(gestures.try_recv().is_err());

            sleep(ms(20)).await;
            assert_eq!(gestures.try_recv().ok(), Some(TapGesture::Single));
            assert_eq!(taps.tap_count(), 0);

            sleep(ms(1000)).await;
            assert!(gestures.try_recv().is_err());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_double_tap() {
    init_tracing();
    LocalSet::new()
        .run_until(async {
            let (taps, mut gestures) = surface(250);

            taps.register_tap();
            sleep(ms(50)).await;
            taps.register_tap();

            // The first tap's deadline passes at 250ms without firing.
            sleep(ms(240)).await;
            assert!(gestures.try_recv().is_err());
            assert_eq!(taps.tap_count(), 2);

            sleep(ms(20)).await;
            assert_eq!(gestures.try_recv().ok(), Some(TapGesture::Double));

            sleep(ms(1000)).await;
            assert!(gestures.try_recv().is_err());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_triple_tap_is_synchronous() {
    init_tracing();
    LocalSet::new()
        .run_until(async {
            let (taps, mut gestures) = surface(250);

            taps.register_tap();
            sleep(ms(30)).await;
            taps.register_tap();
            sleep(ms(30)).await;
            assert_eq!(taps.register_tap(), Some(TapGesture::Multi));

            // Delivered before any further scheduling turn.
            assert_eq!(gestures.try_recv().ok(), Some(TapGesture::Multi));

            sleep(ms(1000)).await;
            assert!(gestures.try_recv().is_err());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_long_burst_splits_into_cycles() {
    init_tracing();
    LocalSet::new()
        .run_until(async {
            let (taps, mut gestures) = surface(250);

            for _ in 0..5 {
                taps.register_tap();
                sleep(ms(20)).await;
            }
            sleep(ms(1000)).await;

            assert_eq!(gestures.try_recv().ok(), Some(TapGesture::Multi));
            assert_eq!(gestures.try_recv().ok(), Some(TapGesture::Double));
            assert!(gestures.try_recv().is_err());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_negative_sensitivity_uses_default_window() {
    init_tracing();
    LocalSet::new()
        .run_until(async {
            let (taps, mut gestures) = surface(-10);
            assert_eq!(taps.sensitivity_window(), ms(250));

            taps.register_tap();
            sleep(ms(240)).await;
            assert!(gestures.try_recv().is_err());

            sleep(ms(20)).await;
            assert_eq!(gestures.try_recv().ok(), Some(TapGesture::Single));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_zero_window_resolves_asynchronously() {
    init_tracing();
    LocalSet::new()
        .run_until(async {
            let (taps, mut gestures) = surface(0);

            assert_eq!(taps.register_tap(), None);
            assert!(gestures.try_recv().is_err());
            assert_eq!(taps.tap_count(), 1);

            sleep(ms(1)).await;
            assert_eq!(gestures.try_recv().ok(), Some(TapGesture::Single));
            assert_eq!(taps.tap_count(), 0);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_detach_discards_pending_resolution() {
    init_tracing();
    LocalSet::new()
        .run_until(async {
            let (taps, mut gestures) = surface(250);

            taps.register_tap();
            taps.register_tap();
            taps.detach();

            sleep(ms(1000)).await;
            assert!(matches!(gestures.try_recv(), Err(TryRecvError::Disconnected)));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_surfaces_are_independent() {
    init_tracing();
    LocalSet::new()
        .run_until(async {
            let (left, mut left_gestures) = surface(250);
            let (right, mut right_gestures) = surface(100);

            left.register_tap();
            right.register_tap();
            sleep(ms(50)).await;
            right.register_tap();

            sleep(ms(110)).await;
            assert_eq!(right_gestures.try_recv().ok(), Some(TapGesture::Double));
            assert!(left_gestures.try_recv().is_err());

            sleep(ms(100)).await;
            assert_eq!(left_gestures.try_recv().ok(), Some(TapGesture::Single));
        })
        .await;
}
