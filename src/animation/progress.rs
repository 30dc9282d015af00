use crate::error::ConfigError;

/// Whether a convergence run is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Converging,
}

/// Normalized openness driven toward 0 or 1 by repeated linear interpolation.
///
/// Each toggle starts a run of `duration` ticks. A run never reaches its target
/// exactly; `is_open` is the source of truth for the discrete state.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressAnimation {
    progress: f32,
    target: f32,
    frames_remaining: u32,
    is_open: bool,
    duration: u32,
    rate: f32,
}

impl ProgressAnimation {
    /// Closed and idle, with the given run length and convergence rate
    pub fn new(duration: u32, rate: f32) -> Result<Self, ConfigError> {
        if duration == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if !(rate > 0.0 && rate < 1.0) {
            return Err(ConfigError::Rate(rate));
        }

        Ok(Self {
            progress: 0.0,
            target: 0.0,
            frames_remaining: 0,
            is_open: false,
            duration,
            rate,
        })
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn frames_remaining(&self) -> u32 {
        self.frames_remaining
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn state(&self) -> AnimationState {
        if self.frames_remaining > 0 {
            AnimationState::Converging
        } else {
            AnimationState::Idle
        }
    }

    /// Flip the open state and restart the countdown toward the new target.
    ///
    /// `progress` is left untouched so a retoggle mid-run does not jump.
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
        self.target = if self.is_open { 1.0 } else { 0.0 };
        self.frames_remaining = self.duration;
    }

    /// Apply one convergence step if a run is active. Returns whether a step was taken.
    pub fn tick(&mut self) -> bool {
        if self.frames_remaining == 0 {
            return false;
        }

        self.progress += (self.target - self.progress) * self.rate;
        self.progress = self.progress.clamp(0.0, 1.0);
        self.frames_remaining -= 1;
        true
    }

    /// Offset for the moving object at the current progress
    pub fn offset(&self, max_offset: f32) -> f32 {
        max_offset * self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn starts_closed_and_idle() {
        let anim = ProgressAnimation::new(60, 0.1).unwrap();
        assert_eq!(anim.state(), AnimationState::Idle);
        assert!(!anim.is_open());
        assert_eq!(anim.progress(), 0.0);
        assert_eq!(anim.target(), 0.0);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert_eq!(ProgressAnimation::new(0, 0.1), Err(ConfigError::ZeroDuration));
        assert_eq!(ProgressAnimation::new(60, 0.0), Err(ConfigError::Rate(0.0)));
        assert_eq!(ProgressAnimation::new(60, 1.0), Err(ConfigError::Rate(1.0)));
        assert!(ProgressAnimation::new(60, f32::NAN).is_err());
    }

    #[test]
    fn toggle_starts_run_toward_open() {
        let mut anim = ProgressAnimation::new(60, 0.1).unwrap();
        anim.toggle();

        assert!(anim.is_open());
        assert_eq!(anim.target(), 1.0);
        assert_eq!(anim.frames_remaining(), 60);
        assert_eq!(anim.state(), AnimationState::Converging);
    }

    #[test]
    fn tick_interpolates_and_counts_down() {
        let mut anim = ProgressAnimation::new(60, 0.1).unwrap();
        anim.toggle();

        assert!(anim.tick());
        assert_relative_eq!(anim.progress(), 0.1);
        assert_eq!(anim.frames_remaining(), 59);

        assert!(anim.tick());
        assert_relative_eq!(anim.progress(), 0.19, epsilon = 1e-6);
    }

    #[test]
    fn idle_tick_is_a_no_op() {
        let mut anim = ProgressAnimation::new(3, 0.5).unwrap();
        assert!(!anim.tick());
        assert_eq!(anim.progress(), 0.0);
    }

    #[test]
    fn run_stops_after_duration() {
        let mut anim = ProgressAnimation::new(3, 0.5).unwrap();
        anim.toggle();

        let steps = (0..10).filter(|_| anim.tick()).count();

        assert_eq!(steps, 3);
        assert_eq!(anim.state(), AnimationState::Idle);
        assert_relative_eq!(anim.progress(), 0.875);
    }

    #[test]
    fn offset_scales_progress() {
        let mut anim = ProgressAnimation::new(1, 0.5).unwrap();
        anim.toggle();
        anim.tick();
        assert_relative_eq!(anim.offset(-7.0), -3.5);
    }
}
