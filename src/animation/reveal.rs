//! Reveal rules driven by eased progress.
//!
//! Everything here is a pure function of the frame's progress value: typewriter text, scaled
//! geometry, and the sequential reveal cursor used for left-to-right drawing.

use crate::animation::lerp::Lerp;
use crate::foundation::error::{EspressoError, EspressoResult};

/// The `[start, end]` sub-interval of progress during which an element goes from hidden to
/// fully shown. Serialized as a two-element array.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct RevealWindow {
    pub start: f64,
    pub end: f64,
}

impl RevealWindow {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The whole animation.
    pub const fn full() -> Self {
        Self::new(0.0, 1.0)
    }

    pub fn validate(&self, what: &str) -> EspressoResult<()> {
        for v in [self.start, self.end] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(EspressoError::validation(format!(
                    "{what} reveal window bounds must lie in [0, 1] (got [{}, {}])",
                    self.start, self.end
                )));
            }
        }
        Ok(())
    }

    /// `end <= start`: the window has no ramp and acts as a jump cut at `start`.
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }

    /// Progress mapped into the window, clamped to `[0, 1]`.
    pub fn local_progress(&self, progress: f64) -> f64 {
        if self.is_degenerate() {
            return if progress >= self.start { 1.0 } else { 0.0 };
        }
        ((progress - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }

    /// See [`typewriter`].
    pub fn typewriter<'a>(&self, text: &'a str, progress: f64) -> &'a str {
        typewriter(text, progress, *self)
    }
}

impl From<[f64; 2]> for RevealWindow {
    fn from([start, end]: [f64; 2]) -> Self {
        Self { start, end }
    }
}

impl From<RevealWindow> for [f64; 2] {
    fn from(value: RevealWindow) -> Self {
        [value.start, value.end]
    }
}

/// Visible prefix of `text` for a typewriter effect.
///
/// Nothing is shown at or before `window.start`, everything at or after `window.end`, and in
/// between the first `floor(local * chars)` characters. Truncation is per character, mid-word
/// cuts included.
pub fn typewriter(text: &str, progress: f64, window: RevealWindow) -> &str {
    if text.is_empty() {
        return "";
    }
    if window.is_degenerate() {
        return if progress >= window.start { text } else { "" };
    }
    if progress >= window.end {
        return text;
    }
    if progress <= window.start {
        return "";
    }

    let local = (progress - window.start) / (window.end - window.start);
    let n = (local * text.chars().count() as f64).floor() as usize;
    prefix_chars(text, n)
}

fn prefix_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// In-progress value of a grown quantity: `final_value * progress`.
pub fn reveal_quantity(final_value: f64, progress: f64) -> f64 {
    final_value * progress
}

/// Reveal state of one element in an ordered sequence.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "fraction")]
pub enum ElementReveal {
    Hidden,
    /// Shown and interpolating toward its successor by the given fraction.
    Partial(f64),
    Full,
}

/// Continuous position over `count` ordered elements: `progress * count`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealCursor {
    position: f64,
    count: usize,
}

impl RevealCursor {
    pub fn new(progress: f64, count: usize) -> Self {
        Self {
            position: progress.clamp(0.0, 1.0) * count as f64,
            count,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of elements strictly before the cursor element.
    pub fn whole(&self) -> usize {
        (self.position.floor() as usize).min(self.count)
    }

    pub fn fraction(&self) -> f64 {
        self.position - self.position.floor()
    }

    pub fn is_complete(&self) -> bool {
        self.whole() >= self.count
    }

    pub fn element(&self, index: usize) -> ElementReveal {
        if index >= self.count {
            return ElementReveal::Hidden;
        }
        let whole = self.whole();
        if index < whole {
            ElementReveal::Full
        } else if index == whole {
            ElementReveal::Partial(self.fraction())
        } else {
            ElementReveal::Hidden
        }
    }

    /// Discrete annotation toggle: on once the cursor passes the element's midpoint.
    pub fn annotation_visible(&self, index: usize) -> bool {
        index < self.count && (index as f64) + 0.5 < self.position
    }

    /// Visible prefix of `points`, ending with a point interpolated from the cursor element
    /// toward its successor.
    pub fn polyline<T: Lerp + Clone>(&self, points: &[T]) -> Vec<T> {
        let n = points.len().min(self.count);
        if n == 0 {
            return Vec::new();
        }
        let whole = self.whole();
        if whole >= n {
            return points[..n].to_vec();
        }

        let mut out = Vec::with_capacity(whole + 2);
        out.extend_from_slice(&points[..=whole]);
        let frac = self.fraction();
        if frac > 0.0 && whole + 1 < n {
            out.push(T::lerp(&points[whole], &points[whole + 1], frac));
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/reveal.rs"]
mod tests;
