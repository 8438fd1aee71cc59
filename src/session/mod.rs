//! Frame evaluation sessions.

pub mod animation_session;

pub use animation_session::{AnimationSession, FrameState, RenderStats, SessionOpts};
