//! Espresso turns small chart documents into frame-by-frame animation state for short-form
//! video (Reels) and static carousel slides.
//!
//! The public API is session-oriented:
//!
//! - Load and validate a [`ChartDocument`]
//! - Create an [`AnimationSession`]
//! - Evaluate single frames or stream a range into a [`FrameSink`]
//!
//! Drawing pixels and muxing video are left to an external renderer that consumes the
//! [`FrameState`] stream (see [`JsonLinesSink`]).
#![forbid(unsafe_code)]

/// Easing, timeline clock and reveal primitives.
pub mod animation;
/// Per-chart frame evaluation.
pub mod chart;
/// Frame sinks.
pub mod encode;
mod foundation;
/// Chart document boundary model.
pub mod scene;
/// Frame evaluation sessions.
pub mod session;

pub use crate::animation::clock::{AnimationClock, Phase};
pub use crate::animation::ease::Ease;
pub use crate::animation::lerp::Lerp;
pub use crate::animation::reveal::{
    ElementReveal, RevealCursor, RevealWindow, reveal_quantity, typewriter,
};
pub use crate::chart::{Chart, ChartFrame};
pub use crate::encode::{FrameSink, InMemorySink, JsonLinesSink, SinkConfig};
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point};
pub use crate::foundation::error::{EspressoError, EspressoResult};
pub use crate::foundation::format::NumberFormat;
pub use crate::scene::config::{AnimationConfig, Titles};
pub use crate::scene::document::ChartDocument;
pub use crate::session::{AnimationSession, FrameState, RenderStats, SessionOpts};
