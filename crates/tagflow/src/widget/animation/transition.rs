//! Animated change of the field's natural size.
//!
//! The controller never blocks on an animation. When its natural size
//! changes it hands the old and new sizes to a [`SizeTransition`] and the host
//! samples it with [`SizeTransition::update`] once per frame. Sampling is
//! read-only with respect to the tag store, so a frame callback can never
//! reenter the mutation path.

use std::time::{Duration, Instant};

use tagflow_core::Size;

use super::easing::{Easing, lerp_eased};

/// Duration of a size change animation.
pub const DEFAULT_SIZE_DURATION: Duration = Duration::from_millis(200);

/// Current state of a size transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TransitionState {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Animating.
    Running {
        /// Eased progress from 0.0 to 1.0.
        progress: f32,
        /// Interpolated size for this frame.
        size: Size,
    },
    /// The animation reached its target on this update.
    Finished {
        /// The final size.
        size: Size,
    },
}

impl TransitionState {
    /// Whether an animation is in flight.
    pub fn is_running(&self) -> bool {
        matches!(self, TransitionState::Running { .. })
    }

    /// The size to display for this state, if the transition has one.
    pub fn size(&self) -> Option<Size> {
        match self {
            TransitionState::Idle => None,
            TransitionState::Running { size, .. } | TransitionState::Finished { size } => {
                Some(*size)
            }
        }
    }
}

/// Interpolates the displayed size between two natural sizes.
#[derive(Debug, Clone)]
pub struct SizeTransition {
    easing: Easing,
    duration: Duration,
    from: Size,
    to: Size,
    start_time: Option<Instant>,
}

impl SizeTransition {
    /// Create an idle transition with the default duration and curve.
    pub fn new() -> Self {
        Self {
            easing: Easing::default(),
            duration: DEFAULT_SIZE_DURATION,
            from: Size::ZERO,
            to: Size::ZERO,
            start_time: None,
        }
    }

    /// Set the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether an animation is in flight.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }

    /// The size the transition is heading to.
    #[inline]
    pub fn target(&self) -> Size {
        self.to
    }

    /// Start animating from `from` to `to` at `now`.
    ///
    /// Returns `false` if the sizes already agree and nothing was started.
    /// Retargeting a running transition starts the new one from `from`, which
    /// the caller passes as the currently displayed size.
    pub fn start(&mut self, from: Size, to: Size, now: Instant) -> bool {
        if from.approx_eq(&to) {
            self.start_time = None;
            self.to = to;
            return false;
        }
        self.from = from;
        self.to = to;
        self.start_time = Some(now);
        true
    }

    /// Jump straight to the target.
    pub fn stop(&mut self) {
        self.start_time = None;
    }

    /// Sample the transition at `now`.
    pub fn update(&mut self, now: Instant) -> TransitionState {
        let Some(start_time) = self.start_time else {
            return TransitionState::Idle;
        };

        let elapsed = now.saturating_duration_since(start_time);
        let raw = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };

        if raw >= 1.0 {
            self.start_time = None;
            return TransitionState::Finished { size: self.to };
        }

        let size = Size::new(
            lerp_eased(self.easing, self.from.width, self.to.width, raw),
            lerp_eased(self.easing, self.from.height, self.to.height, raw),
        );
        TransitionState::Running {
            progress: raw,
            size,
        }
    }
}

impl Default for SizeTransition {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_by_default() {
        let mut transition = SizeTransition::new();
        assert!(!transition.is_running());
        assert_eq!(transition.update(Instant::now()), TransitionState::Idle);
        assert_eq!(transition.duration(), Duration::from_millis(200));
    }

    #[test]
    fn test_equal_sizes_do_not_start() {
        let mut transition = SizeTransition::new();
        let size = Size::new(100.0, 24.0);
        assert!(!transition.start(size, size, Instant::now()));
        assert!(!transition.is_running());
    }

    #[test]
    fn test_runs_then_finishes() {
        let mut transition = SizeTransition::new().with_easing(Easing::Linear);
        let t0 = Instant::now();
        assert!(transition.start(Size::new(100.0, 24.0), Size::new(100.0, 48.0), t0));

        let state = transition.update(t0 + Duration::from_millis(100));
        assert!(state.is_running());
        let size = state.size().unwrap();
        assert!((size.height - 36.0).abs() < 0.01);
        assert!((size.width - 100.0).abs() < 0.01);

        let state = transition.update(t0 + Duration::from_millis(250));
        assert_eq!(
            state,
            TransitionState::Finished {
                size: Size::new(100.0, 48.0)
            }
        );
        assert!(!transition.is_running());
        assert_eq!(transition.update(t0 + Duration::from_millis(300)), TransitionState::Idle);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut transition = SizeTransition::new().with_duration(Duration::ZERO);
        let t0 = Instant::now();
        transition.start(Size::new(0.0, 10.0), Size::new(0.0, 20.0), t0);
        assert!(matches!(transition.update(t0), TransitionState::Finished { .. }));
    }

    #[test]
    fn test_clock_before_start_is_progress_zero() {
        let mut transition = SizeTransition::new().with_easing(Easing::Linear);
        let t0 = Instant::now() + Duration::from_secs(1);
        transition.start(Size::new(0.0, 10.0), Size::new(0.0, 20.0), t0);

        let state = transition.update(Instant::now());
        assert_eq!(state.size(), Some(Size::new(0.0, 10.0)));
    }
}
