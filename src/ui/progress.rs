//! Animated progress indicator
//!
//! An [`AnimatedProgress`] owns the value a progress bar currently shows and
//! at most one [`AnimationTimer`] moving that value toward its target. The
//! timer runs as a tokio task and hands frames back over a channel; the
//! owner applies them in [`AnimatedProgress::pump`] from the UI loop.
//!
//! Every restart bumps a generation counter. Frames still queued from a
//! superseded timer carry the old generation and are dropped on arrival, so
//! after a retarget or an unmount no stale value reaches the display or the
//! change callback.
//!
//! ```no_run
//! use board::ui::progress::{AnimatedProgress, ProgressSize};
//!
//! # async fn example() {
//! let mut progress = AnimatedProgress::new(75.0)
//!     .with_size(ProgressSize::Large)
//!     .with_brand_color("#1D4DFF");
//! progress.mount();
//! progress.finish().await;
//! assert_eq!(progress.value(), 75.0);
//! # }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;

use super::animations::{settled_value, AnimationPolicy, ProgressFrames};

/// Called with every value the indicator displays
pub type ValueCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Bar thickness and glow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ProgressSize {
    /// Rows the bar occupies
    pub fn stroke_width(&self) -> u16 {
        match self {
            Self::Small | Self::Medium => 1,
            Self::Large => 2,
        }
    }

    pub fn glow_radius(&self) -> u16 {
        match self {
            Self::Small | Self::Medium => 12,
            Self::Large => 15,
        }
    }

    pub fn brightness(&self) -> f64 {
        match self {
            Self::Small | Self::Medium => 1.18,
            Self::Large => 1.25,
        }
    }
}

/// Glow strength in 0..=1 for a displayed value; no glow on an empty bar
pub fn glow_intensity(value: f64, size: ProgressSize) -> f64 {
    if value > 0.0 {
        ((value / 100.0).clamp(0.0, 1.0) * size.brightness()).min(1.0)
    } else {
        0.0
    }
}

/// One value emitted by a running timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressFrame {
    pub generation: u64,
    /// 1-based step number
    pub step: u32,
    pub value: f64,
}

/// Handle to a running animation timer
///
/// The timer stops when the handle is dropped.
pub struct AnimationTimer {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl AnimationTimer {
    /// Send each frame of `frames` to `tx`, one per `interval`, starting one
    /// interval from now.
    pub fn spawn(
        generation: u64,
        frames: ProgressFrames,
        interval: Duration,
        tx: mpsc::UnboundedSender<ProgressFrame>,
    ) -> Self {
        let token = CancellationToken::new();
        let cancel = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);

            for (index, value) in frames.enumerate() {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return,
                    _ = ticker.tick() => {}
                }

                let frame = ProgressFrame {
                    generation,
                    step: index as u32 + 1,
                    value,
                };
                if tx.send(frame).is_err() {
                    return;
                }
            }
        });

        Self { token, handle }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Drop for AnimationTimer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl std::fmt::Debug for AnimationTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationTimer")
            .field("cancelled", &self.token.is_cancelled())
            .field("finished", &self.handle.is_finished())
            .finish()
    }
}

/// A progress value that animates from 0 to its target
pub struct AnimatedProgress {
    target: f64,
    value: f64,
    size: ProgressSize,
    brand_color: Option<String>,
    policy: AnimationPolicy,
    on_change: Option<ValueCallback>,

    mounted: bool,
    generation: u64,
    total_steps: u32,
    timer: Option<AnimationTimer>,
    frames_tx: mpsc::UnboundedSender<ProgressFrame>,
    frames_rx: mpsc::UnboundedReceiver<ProgressFrame>,
}

impl AnimatedProgress {
    pub fn new(target: f64) -> Self {
        let (frames_tx, frames_rx) = mpsc::unbounded_channel();
        Self {
            target,
            value: 0.0,
            size: ProgressSize::default(),
            brand_color: None,
            policy: AnimationPolicy::default(),
            on_change: None,
            mounted: false,
            generation: 0,
            total_steps: 0,
            timer: None,
            frames_tx,
            frames_rx,
        }
    }

    pub fn with_size(mut self, size: ProgressSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_brand_color(mut self, color: impl Into<String>) -> Self {
        self.brand_color = Some(color.into());
        self
    }

    pub fn with_policy(mut self, policy: AnimationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    /// Start showing the indicator. Must run inside a tokio runtime when the
    /// target animates.
    pub fn mount(&mut self) {
        self.mounted = true;
        self.restart();
    }

    /// Stop the timer; nothing is emitted afterwards
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.stop_timer();
    }

    /// Change the target. A mounted indicator cancels its running timer and
    /// animates again from 0.
    pub fn set_target(&mut self, target: f64) {
        if target.to_bits() == self.target.to_bits() {
            return;
        }
        self.target = target;
        if self.mounted {
            self.restart();
        }
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        // Frames queued before the cancel belong to the old generation.
        self.generation += 1;
    }

    fn restart(&mut self) {
        self.stop_timer();
        self.value = 0.0;

        if !self.policy.animates(self.target) {
            self.total_steps = 1;
            let settled = settled_value(self.target);
            self.emit(settled);
            return;
        }

        let frames = self.policy.frames(self.target);
        self.total_steps = frames.total();
        self.timer = Some(AnimationTimer::spawn(
            self.generation,
            frames,
            self.policy.step_interval(),
            self.frames_tx.clone(),
        ));
    }

    fn emit(&mut self, value: f64) {
        self.value = value;
        if let Some(callback) = &self.on_change {
            callback(value);
        }
    }

    fn apply(&mut self, frame: ProgressFrame) -> bool {
        if !self.mounted || frame.generation != self.generation {
            return false;
        }
        self.emit(frame.value);
        if frame.step >= self.total_steps {
            self.timer = None;
        }
        true
    }

    /// Apply frames that arrived since the last call. Returns whether the
    /// displayed value changed.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Ok(frame) = self.frames_rx.try_recv() {
            changed |= self.apply(frame);
        }
        changed
    }

    /// Wait until the running animation has emitted its last frame
    pub async fn finish(&mut self) {
        while self.timer.is_some() {
            match self.frames_rx.recv().await {
                Some(frame) => {
                    self.apply(frame);
                }
                None => break,
            }
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn size(&self) -> ProgressSize {
        self.size
    }

    pub fn brand_color(&self) -> Option<&str> {
        self.brand_color.as_deref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_animating(&self) -> bool {
        self.timer.is_some()
    }

    pub fn glow(&self) -> f64 {
        glow_intensity(self.value, self.size)
    }

    /// Share of the bar to fill, 0..=1
    pub fn ratio(&self) -> f64 {
        (self.value / 100.0).clamp(0.0, 1.0)
    }
}

impl std::fmt::Debug for AnimatedProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedProgress")
            .field("target", &self.target)
            .field("value", &self.value)
            .field("size", &self.size)
            .field("generation", &self.generation)
            .field("timer", &self.timer)
            .finish()
    }
}

/// A progress bar with a caption and a percentage readout
///
/// The readout is fed by the indicator's change callback, the same way a
/// caller outside the indicator would follow its frames.
#[derive(Debug)]
pub struct LabelledProgress {
    pub label: Option<String>,
    pub show_percentage: bool,
    readout: Arc<AtomicU64>,
    progress: AnimatedProgress,
}

impl LabelledProgress {
    pub fn new(progress: AnimatedProgress, label: Option<String>) -> Self {
        let readout = Arc::new(AtomicU64::new(0f64.to_bits()));
        let sink = Arc::clone(&readout);
        let progress =
            progress.with_on_change(move |value| sink.store(value.to_bits(), Ordering::Relaxed));

        Self {
            label,
            show_percentage: true,
            readout,
            progress,
        }
    }

    pub fn progress(&self) -> &AnimatedProgress {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut AnimatedProgress {
        &mut self.progress
    }

    /// Last value reported through the callback
    pub fn readout(&self) -> f64 {
        f64::from_bits(self.readout.load(Ordering::Relaxed))
    }

    /// Rounded percentage text, e.g. `75%`
    pub fn percent_text(&self) -> String {
        format!("{}%", self.readout().round() as i64)
    }
}
