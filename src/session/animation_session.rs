use rayon::prelude::*;

use crate::animation::clock::{AnimationClock, Phase};
use crate::animation::ease::Ease;
use crate::animation::reveal::RevealWindow;
use crate::chart::{Chart, ChartFrame};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, FrameIndex, FrameRange};
use crate::foundation::error::{EspressoError, EspressoResult};
use crate::scene::config::Titles;
use crate::scene::document::ChartDocument;

/// Options controlling `AnimationSession` range evaluation.
#[derive(Clone, Debug)]
pub struct SessionOpts {
    /// Evaluate frames on a dedicated rayon pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Frames evaluated per parallel batch before they are handed to the sink.
    pub chunk_size: usize,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            chunk_size: 64,
        }
    }
}

/// Everything an external renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameState {
    pub frame: u64,
    pub progress: f64,
    pub phase: Phase,
    pub headline: String,
    pub subheadline: String,
    pub label: String,
    pub chart: ChartFrame,
}

/// Range evaluation statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total frames in the requested range.
    pub frames_total: u64,
    /// Frames in the growth phase.
    pub frames_animated: u64,
    /// Frames in the hold phase (progress pinned to 1.0).
    pub frames_held: u64,
}

/// Frame evaluation session for one chart document.
///
/// The clock and easing are resolved once in `new`; every later call is a pure function of the
/// frame index, so frames can be evaluated in any order and on any thread.
#[derive(Clone, Debug)]
pub struct AnimationSession {
    canvas: Canvas,
    clock: AnimationClock,
    ease: Ease,
    headline_window: RevealWindow,
    subheadline_window: RevealWindow,
    titles: Titles,
    chart: Chart,
    opts: SessionOpts,
}

impl AnimationSession {
    pub fn new(doc: &ChartDocument, opts: SessionOpts) -> EspressoResult<Self> {
        doc.validate()?;
        let clock = doc.animation.clock()?;
        tracing::debug!(
            kind = doc.chart.kind(),
            animation_frames = clock.animation_frames(),
            hold_frames = clock.hold_frames(),
            easing = doc.animation.easing.name(),
            "animation session ready"
        );
        Ok(Self {
            canvas: doc.canvas,
            clock,
            ease: doc.animation.easing,
            headline_window: doc.animation.headline,
            subheadline_window: doc.animation.subheadline,
            titles: doc.titles.clone(),
            chart: doc.chart.clone(),
            opts,
        })
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn ease(&self) -> Ease {
        self.ease
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Evaluate one frame of the timeline.
    #[tracing::instrument(level = "trace", skip(self), fields(kind = self.chart.kind()))]
    pub fn evaluate_frame(&self, frame: FrameIndex) -> EspressoResult<FrameState> {
        if !self.clock.range().contains(frame) {
            return Err(EspressoError::validation(format!(
                "frame {} is outside the timeline (0..{})",
                frame.0,
                self.clock.total_frames()
            )));
        }
        Ok(self.state_at(frame))
    }

    /// The fully revealed frame, used for static carousel slides.
    pub fn final_frame(&self) -> FrameState {
        let last = self.clock.total_frames().saturating_sub(1);
        let mut state = self.state_with_progress(last, 1.0);
        state.phase = Phase::Hold;
        state
    }

    /// Evaluate a frame range and stream states into a sink.
    ///
    /// The sink receives frames in strictly increasing frame order. With `parallel` enabled each
    /// chunk is evaluated on the pool and then pushed in order, so the output matches the
    /// sequential path exactly.
    #[tracing::instrument(skip(self, sink), fields(start = range.start.0, end = range.end.0))]
    pub fn render_range(
        &self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
    ) -> EspressoResult<RenderStats> {
        let timeline = self.clock.range();
        if range.end.0 > timeline.end.0 {
            return Err(EspressoError::validation(format!(
                "render range end {} exceeds timeline length {}",
                range.end.0, timeline.end.0
            )));
        }

        sink.begin(SinkConfig {
            canvas: self.canvas,
            fps: self.clock.fps(),
            total_frames: self.clock.total_frames(),
            range,
        })?;

        let mut stats = RenderStats::default();
        let mut tally = |state: &FrameState| {
            stats.frames_total += 1;
            match state.phase {
                Phase::Animating => stats.frames_animated += 1,
                Phase::Hold => stats.frames_held += 1,
            }
        };

        if self.opts.parallel && !range.is_empty() {
            let pool = build_thread_pool(self.opts.threads)?;
            let chunk_size = normalized_chunk_size(self.opts.chunk_size);
            let mut chunk_start = range.start.0;
            while chunk_start < range.end.0 {
                let chunk_end = (chunk_start + chunk_size).min(range.end.0);
                let states: Vec<FrameState> = pool.install(|| {
                    (chunk_start..chunk_end)
                        .into_par_iter()
                        .map(|f| self.state_at(FrameIndex(f)))
                        .collect()
                });
                for state in &states {
                    sink.push_frame(state)?;
                    tally(state);
                }
                chunk_start = chunk_end;
            }
        } else {
            for f in range.start.0..range.end.0 {
                let state = self.state_at(FrameIndex(f));
                sink.push_frame(&state)?;
                tally(&state);
            }
        }

        sink.end()?;
        tracing::debug!(
            frames = stats.frames_total,
            animated = stats.frames_animated,
            held = stats.frames_held,
            "range evaluated"
        );
        Ok(stats)
    }

    /// Evaluate the whole timeline, hold included.
    pub fn render_all(&self, sink: &mut dyn FrameSink) -> EspressoResult<RenderStats> {
        self.render_range(self.clock.range(), sink)
    }

    fn state_at(&self, frame: FrameIndex) -> FrameState {
        let progress = self.clock.progress(frame, self.ease);
        let mut state = self.state_with_progress(frame.0, progress);
        state.phase = self.clock.phase(frame);
        state
    }

    fn state_with_progress(&self, frame: u64, progress: f64) -> FrameState {
        FrameState {
            frame,
            progress,
            phase: Phase::Animating,
            headline: self
                .headline_window
                .typewriter(&self.titles.headline, progress)
                .to_owned(),
            subheadline: self
                .subheadline_window
                .typewriter(&self.titles.subheadline, progress)
                .to_owned(),
            label: self.titles.label.clone(),
            chart: self.chart.evaluate(progress),
        }
    }
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

fn build_thread_pool(threads: Option<usize>) -> EspressoResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(EspressoError::validation(
            "session 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| EspressoError::upstream(format!("failed to build rayon thread pool: {e}")))
}
