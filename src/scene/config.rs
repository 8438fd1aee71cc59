use crate::animation::clock::AnimationClock;
use crate::animation::ease::Ease;
use crate::animation::reveal::RevealWindow;
use crate::foundation::core::Fps;
use crate::foundation::error::{EspressoError, EspressoResult};

/// Timing and reveal settings of one animated chart.
///
/// Every field has a default matching the Reels preset: 8 s of growth at 30 fps followed by a
/// 4 s hold, cubic-out easing, headline typed over the first half and subheadline over the
/// second.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration_secs: f64,
    pub fps: Fps,
    pub hold_frames: u64,
    /// Overrides `hold_frames` when set (floor semantics).
    pub hold_secs: Option<f64>,
    pub easing: Ease,
    pub headline: RevealWindow,
    pub subheadline: RevealWindow,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_secs: 8.0,
            fps: Fps::default(),
            hold_frames: 120,
            hold_secs: None,
            easing: Ease::OutCubic,
            headline: RevealWindow::new(0.0, 0.5),
            subheadline: RevealWindow::new(0.5, 0.95),
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> EspressoResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(EspressoError::validation(
                "animation duration_secs must be finite and >= 0",
            ));
        }
        if let Some(h) = self.hold_secs
            && (!h.is_finite() || h < 0.0)
        {
            return Err(EspressoError::validation(
                "animation hold_secs must be finite and >= 0",
            ));
        }
        self.headline.validate("headline")?;
        self.subheadline.validate("subheadline")?;
        Ok(())
    }

    /// Cover tile preset: 1.5 s of growth, a 1 s hold, titles shown in full from frame 0.
    pub fn cover() -> Self {
        Self {
            duration_secs: 1.5,
            hold_frames: 30,
            hold_secs: Some(1.0),
            headline: RevealWindow::new(0.0, 0.0),
            subheadline: RevealWindow::new(0.0, 0.0),
            ..Self::default()
        }
    }

    /// Defaults for a chart kind, as named by [`crate::chart::Chart::kind`].
    pub fn preset_for(kind: &str) -> Self {
        match kind {
            "cover" => Self::cover(),
            _ => Self::default(),
        }
    }

    pub fn clock(&self) -> EspressoResult<AnimationClock> {
        match self.hold_secs {
            Some(hold) => AnimationClock::with_hold_secs(self.fps, self.duration_secs, hold),
            None => AnimationClock::new(self.fps, self.duration_secs, self.hold_frames),
        }
    }
}

/// Animation settings as written in a document. Omitted fields take the chart kind's preset.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub(crate) struct AnimationPatch {
    duration_secs: Option<f64>,
    fps: Option<Fps>,
    hold_frames: Option<u64>,
    hold_secs: Option<f64>,
    easing: Option<Ease>,
    headline: Option<RevealWindow>,
    subheadline: Option<RevealWindow>,
}

impl AnimationPatch {
    pub(crate) fn resolve(self, preset: AnimationConfig) -> AnimationConfig {
        // An explicit hold_frames replaces a preset hold given in seconds.
        let hold_secs = match (self.hold_secs, self.hold_frames) {
            (Some(secs), _) => Some(secs),
            (None, Some(_)) => None,
            (None, None) => preset.hold_secs,
        };
        AnimationConfig {
            duration_secs: self.duration_secs.unwrap_or(preset.duration_secs),
            fps: self.fps.unwrap_or(preset.fps),
            hold_frames: self.hold_frames.unwrap_or(preset.hold_frames),
            hold_secs,
            easing: self.easing.unwrap_or(preset.easing),
            headline: self.headline.unwrap_or(preset.headline),
            subheadline: self.subheadline.unwrap_or(preset.subheadline),
        }
    }
}

/// Text shared by every chart kind. `label` is the static source/footnote line.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Titles {
    pub headline: String,
    pub subheadline: String,
    pub label: String,
}
