use crate::animation::ease::Ease;
use crate::foundation::core::{Fps, FrameIndex, FrameRange};
use crate::foundation::error::{EspressoError, EspressoResult};

/// Where a frame sits on the animation timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Eased growth, `frame < animation_frames`.
    Animating,
    /// Trailing frames holding the fully revealed state.
    Hold,
}

/// Immutable timing parameters of one animation pass.
///
/// `animation_frames = floor(fps * duration_secs)` and
/// `total_frames = animation_frames + hold_frames`. Nothing is carried between frames; progress
/// for any frame is a pure function of the clock, the frame index and the easing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClock {
    fps: Fps,
    duration_secs: f64,
    hold_frames: u64,
}

impl AnimationClock {
    pub fn new(fps: Fps, duration_secs: f64, hold_frames: u64) -> EspressoResult<Self> {
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            return Err(EspressoError::validation(format!(
                "animation duration must be finite and >= 0 (got {duration_secs})"
            )));
        }
        Ok(Self {
            fps,
            duration_secs,
            hold_frames,
        })
    }

    /// Build a clock whose hold phase is expressed in seconds (floor semantics).
    pub fn with_hold_secs(fps: Fps, duration_secs: f64, hold_secs: f64) -> EspressoResult<Self> {
        if !hold_secs.is_finite() || hold_secs < 0.0 {
            return Err(EspressoError::validation(format!(
                "hold duration must be finite and >= 0 (got {hold_secs})"
            )));
        }
        Self::new(fps, duration_secs, fps.secs_to_frames_floor(hold_secs))
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn hold_frames(&self) -> u64 {
        self.hold_frames
    }

    /// Frames spent growing, rounded down to a whole frame.
    pub fn animation_frames(&self) -> u64 {
        self.fps.secs_to_frames_floor(self.duration_secs)
    }

    pub fn total_frames(&self) -> u64 {
        self.animation_frames().saturating_add(self.hold_frames)
    }

    /// The whole timeline `[0, total_frames)`.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.total_frames()),
        }
    }

    /// Output length in seconds, hold included.
    pub fn total_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.total_frames())
    }

    pub fn phase(&self, frame: FrameIndex) -> Phase {
        if frame.0 >= self.animation_frames() {
            Phase::Hold
        } else {
            Phase::Animating
        }
    }

    /// Eased progress in `[0, 1]` for `frame`.
    ///
    /// Hold-phase frames are exactly `1.0`. A zero-frame animation is always fully revealed.
    pub fn progress(&self, frame: FrameIndex, ease: Ease) -> f64 {
        let n = self.animation_frames();
        if n == 0 || frame.0 >= n {
            return 1.0;
        }
        ease.apply(frame.0 as f64 / n as f64)
    }
}
