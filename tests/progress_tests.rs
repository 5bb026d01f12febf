//! Integration tests for the animated progress indicator
//!
//! These run on tokio's paused clock, so a 1.5 s animation completes
//! instantly and frame timing is deterministic.

use board::ui::animations::AnimationPolicy;
use board::ui::{AnimatedProgress, LabelledProgress, ProgressSize};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn recording(target: f64) -> (AnimatedProgress, Arc<Mutex<Vec<f64>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let progress = AnimatedProgress::new(target).with_on_change(move |v| sink.lock().unwrap().push(v));
    (progress, seen)
}

#[tokio::test(start_paused = true)]
async fn test_full_animation_timing() {
    let (mut progress, seen) = recording(50.0);
    progress.mount();

    // 59 intervals in, one frame is still outstanding
    tokio::time::sleep(Duration::from_millis(25 * 59 + 5)).await;
    progress.pump();
    assert_eq!(seen.lock().unwrap().len(), 59);
    assert!(progress.value() < 50.0);
    assert!(progress.is_animating());

    tokio::time::sleep(Duration::from_millis(25)).await;
    progress.pump();
    assert_eq!(seen.lock().unwrap().len(), 60);
    assert_eq!(progress.value(), 50.0);
    assert!(!progress.is_animating());
}

#[tokio::test(start_paused = true)]
async fn test_values_never_exceed_target() {
    for target in [0.1, 33.3, 66.7, 99.9, 100.0] {
        let (mut progress, seen) = recording(target);
        progress.mount();
        progress.finish().await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 60);
        assert_eq!(*seen.last().unwrap(), target);
        assert!(seen.iter().all(|v| *v > 0.0 && *v <= target));
    }
}

#[tokio::test(start_paused = true)]
async fn test_custom_policy() {
    let policy = AnimationPolicy {
        enabled: true,
        duration: Duration::from_millis(200),
        steps: 4,
    };
    let (progress, seen) = recording(40.0);
    let mut progress = progress.with_policy(policy);
    progress.mount();
    progress.finish().await;

    assert_eq!(*seen.lock().unwrap(), vec![10.0, 20.0, 30.0, 40.0]);
}

#[tokio::test(start_paused = true)]
async fn test_remount_replays_animation() {
    let (mut progress, seen) = recording(20.0);
    progress.mount();
    progress.finish().await;
    progress.unmount();
    assert!(!progress.is_mounted());

    progress.mount();
    assert_eq!(progress.value(), 0.0);
    progress.finish().await;

    assert_eq!(seen.lock().unwrap().len(), 120);
    assert_eq!(progress.value(), 20.0);
}

#[tokio::test(start_paused = true)]
async fn test_set_target_before_mount_waits() {
    let (mut progress, seen) = recording(10.0);
    progress.set_target(70.0);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!progress.pump());
    assert!(seen.lock().unwrap().is_empty());

    progress.mount();
    progress.finish().await;
    assert_eq!(progress.value(), 70.0);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_indicator_mid_animation() {
    let (mut progress, seen) = recording(90.0);
    progress.mount();
    tokio::time::sleep(Duration::from_millis(300)).await;
    progress.pump();
    drop(progress);

    let count = seen.lock().unwrap().len();
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(seen.lock().unwrap().len(), count);
}

#[tokio::test(start_paused = true)]
async fn test_labelled_large_bar() {
    let mut labelled = LabelledProgress::new(
        AnimatedProgress::new(88.0)
            .with_size(ProgressSize::Large)
            .with_brand_color("#F97316"),
        Some("Overall Progress".to_string()),
    );
    labelled.progress_mut().mount();

    tokio::time::sleep(Duration::from_millis(760)).await;
    labelled.progress_mut().pump();
    let midway = labelled.readout();
    assert!(midway > 0.0 && midway < 88.0);

    labelled.progress_mut().finish().await;
    assert_eq!(labelled.percent_text(), "88%");
    assert_eq!(labelled.progress().brand_color(), Some("#F97316"));
    // 88% on a large bar saturates the glow
    assert_eq!(labelled.progress().glow(), 1.0);
}
