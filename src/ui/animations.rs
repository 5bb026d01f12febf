//! Animation primitives for progress indicators

use std::time::{Duration, Instant};

/// Total time a progress bar takes to reach its target
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1500);

/// Number of frames a progress animation is split into
pub const DEFAULT_STEPS: u32 = 60;

/// How a progress value travels from 0 to its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationPolicy {
    pub enabled: bool,
    pub duration: Duration,
    pub steps: u32,
}

impl AnimationPolicy {
    /// Jump straight to the target
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn step_interval(&self) -> Duration {
        self.duration / self.steps.max(1)
    }

    /// Whether `target` gets intermediate frames. Zero and NaN settle at once.
    pub fn animates(&self, target: f64) -> bool {
        self.enabled && self.steps > 0 && is_truthy(target)
    }

    pub fn frames(&self, target: f64) -> ProgressFrames {
        ProgressFrames::new(target, self)
    }
}

impl Default for AnimationPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            duration: DEFAULT_DURATION,
            steps: DEFAULT_STEPS,
        }
    }
}

fn is_truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

/// Value a non-animated indicator settles on
pub fn settled_value(target: f64) -> f64 {
    if target.is_nan() {
        0.0
    } else {
        target
    }
}

/// The frame values of one animation, in emission order
///
/// With animation enabled and a non-zero target this yields exactly `steps`
/// values: `target / steps * n` for step `n`, with the last step pinned to
/// `target` so float drift never leaves the bar short or over. Otherwise it
/// yields the settled target once.
#[derive(Debug, Clone)]
pub struct ProgressFrames {
    target: f64,
    increment: f64,
    steps: u32,
    next_step: u32,
}

impl ProgressFrames {
    fn new(target: f64, policy: &AnimationPolicy) -> Self {
        if policy.animates(target) {
            Self {
                target,
                increment: target / policy.steps as f64,
                steps: policy.steps,
                next_step: 1,
            }
        } else {
            Self {
                target: settled_value(target),
                increment: 0.0,
                steps: 1,
                next_step: 1,
            }
        }
    }

    /// Frames this schedule emits in total
    pub fn total(&self) -> u32 {
        self.steps
    }
}

impl Iterator for ProgressFrames {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next_step > self.steps {
            return None;
        }
        let step = self.next_step;
        self.next_step += 1;

        if step == self.steps {
            Some(self.target)
        } else {
            Some((self.increment * step as f64).min(self.target))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.steps + 1).saturating_sub(self.next_step) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProgressFrames {}

/// Breathing intensity for the glow on a filled bar
#[derive(Debug, Clone)]
pub struct Pulse {
    intensity: f64,
    direction: f64,
    speed: f64,
    last_update: Instant,
}

impl Pulse {
    /// `speed` is intensity units per second; 1.0 gives a two second cycle
    pub fn new(speed: f64) -> Self {
        Self {
            intensity: 0.0,
            direction: 1.0,
            speed,
            last_update: Instant::now(),
        }
    }

    pub fn tick(&mut self) {
        let elapsed = self.last_update.elapsed().as_secs_f64();
        self.last_update = Instant::now();
        self.advance(elapsed);
    }

    fn advance(&mut self, secs: f64) {
        self.intensity += self.direction * self.speed * secs;

        if self.intensity >= 1.0 {
            self.intensity = 1.0;
            self.direction = -1.0;
        } else if self.intensity <= 0.0 {
            self.intensity = 0.0;
            self.direction = 1.0;
        }
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }
}

impl Default for Pulse {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_for_75() {
        let frames: Vec<f64> = AnimationPolicy::default().frames(75.0).collect();
        assert_eq!(frames.len(), 60);
        assert_eq!(frames[0], 1.25);
        assert_eq!(frames[1], 2.5);
        assert_eq!(frames[59], 75.0);
    }

    #[test]
    fn test_last_frame_is_exact_for_all_targets() {
        let policy = AnimationPolicy::default();
        for whole in 0..=1000 {
            let target = whole as f64 / 10.0;
            let frames: Vec<f64> = policy.frames(target).collect();
            assert_eq!(*frames.last().unwrap(), target);
            assert!(frames.windows(2).all(|w| w[0] <= w[1]));
            assert!(frames.iter().all(|v| *v <= target));
            let expected = if target == 0.0 { 1 } else { 60 };
            assert_eq!(frames.len(), expected);
        }
    }

    #[test]
    fn test_zero_target_settles_immediately() {
        let frames: Vec<f64> = AnimationPolicy::default().frames(0.0).collect();
        assert_eq!(frames, vec![0.0]);
    }

    #[test]
    fn test_disabled_policy_settles_immediately() {
        let frames: Vec<f64> = AnimationPolicy::disabled().frames(42.0).collect();
        assert_eq!(frames, vec![42.0]);
    }

    #[test]
    fn test_nan_target_settles_at_zero() {
        let frames: Vec<f64> = AnimationPolicy::default().frames(f64::NAN).collect();
        assert_eq!(frames, vec![0.0]);
    }

    #[test]
    fn test_step_interval() {
        assert_eq!(
            AnimationPolicy::default().step_interval(),
            Duration::from_millis(25)
        );
    }

    #[test]
    fn test_exact_size() {
        let mut frames = AnimationPolicy::default().frames(10.0);
        assert_eq!(frames.len(), 60);
        frames.next();
        assert_eq!(frames.len(), 59);
        assert_eq!(frames.total(), 60);
    }

    #[test]
    fn test_pulse_bounces() {
        let mut pulse = Pulse::new(1.0);
        pulse.advance(1.5);
        assert_eq!(pulse.intensity(), 1.0);
        pulse.advance(0.5);
        assert!((pulse.intensity() - 0.5).abs() < 1e-9);
    }
}
