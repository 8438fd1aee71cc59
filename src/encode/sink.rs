use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, Fps, FrameRange};
use crate::foundation::error::{EspressoError, EspressoResult};
use crate::session::FrameState;

/// Configuration provided to a [`FrameSink`] at the start of a range evaluation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SinkConfig {
    pub canvas: Canvas,
    pub fps: Fps,
    /// Length of the whole timeline, hold included.
    pub total_frames: u64,
    /// The range about to be pushed.
    pub range: FrameRange,
}

/// Sink contract for consuming evaluated frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing frame order within the
/// requested range.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> EspressoResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, frame: &FrameState) -> EspressoResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> EspressoResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<FrameState>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[FrameState] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> EspressoResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameState) -> EspressoResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> EspressoResult<()> {
        Ok(())
    }
}

/// Writes one JSON object per line: a header with the [`SinkConfig`], then one line per frame.
///
/// This is the hand-off format for an external renderer/encoder. Lines are written to
/// `<path>.tmp`, which replaces `path` in `end`; a sink dropped before `end` removes it.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    tmp_path: PathBuf,
    overwrite: bool,
    out: Option<CountingWriter<BufWriter<File>>>,
    bytes_written: u64,
    frames_written: u64,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>, overwrite: bool) -> Self {
        let path = path.into();
        Self {
            tmp_path: temp_path(&path),
            path,
            overwrite,
            out: None,
            bytes_written: 0,
            frames_written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes flushed to disk by the last completed `end`.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    fn writer(&mut self) -> EspressoResult<&mut CountingWriter<BufWriter<File>>> {
        self.out
            .as_mut()
            .ok_or_else(|| EspressoError::validation("JsonLinesSink used before begin()"))
    }

    fn write_line<T: serde::Serialize>(&mut self, value: &T) -> EspressoResult<()> {
        let path = self.path.clone();
        let w = self.writer()?;
        serde_json::to_writer(&mut *w, value)
            .map_err(|e| EspressoError::serde(format!("encode frame line: {e}")))?;
        w.write_all(b"\n")
            .map_err(|e| EspressoError::upstream(format!("write '{}': {e}", path.display())))
    }
}

#[derive(serde::Serialize)]
struct Header<'a> {
    espresso: &'a SinkConfig,
}

impl FrameSink for JsonLinesSink {
    fn begin(&mut self, cfg: SinkConfig) -> EspressoResult<()> {
        if !self.overwrite && self.path.exists() {
            return Err(EspressoError::validation(format!(
                "output '{}' already exists (overwrite disabled)",
                self.path.display()
            )));
        }
        ensure_parent_dir(&self.path)?;
        let file = File::create(&self.tmp_path).map_err(|e| {
            EspressoError::upstream(format!("create '{}': {e}", self.tmp_path.display()))
        })?;
        tracing::debug!(
            path = %self.path.display(),
            frames = cfg.range.len_frames(),
            "json lines sink opened"
        );
        self.out = Some(CountingWriter::new(BufWriter::new(file)));
        self.bytes_written = 0;
        self.frames_written = 0;
        self.write_line(&Header { espresso: &cfg })
    }

    fn push_frame(&mut self, frame: &FrameState) -> EspressoResult<()> {
        self.write_line(frame)?;
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> EspressoResult<()> {
        let Some(mut w) = self.out.take() else {
            return Err(EspressoError::validation("JsonLinesSink ended before begin()"));
        };
        let flushed = w.flush();
        let count = w.count;
        drop(w);
        if let Err(e) = flushed {
            let _ = std::fs::remove_file(&self.tmp_path);
            return Err(EspressoError::upstream(format!(
                "flush '{}': {e}",
                self.tmp_path.display()
            )));
        }
        std::fs::rename(&self.tmp_path, &self.path).map_err(|e| {
            EspressoError::upstream(format!(
                "rename '{}' to '{}': {e}",
                self.tmp_path.display(),
                self.path.display()
            ))
        })?;
        self.bytes_written = count;
        tracing::debug!(
            path = %self.path.display(),
            bytes = self.bytes_written,
            frames = self.frames_written,
            "json lines sink closed"
        );
        Ok(())
    }
}

impl Drop for JsonLinesSink {
    fn drop(&mut self) {
        if self.out.take().is_some() {
            let _ = std::fs::remove_file(&self.tmp_path);
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("frames"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[derive(Debug)]
struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> EspressoResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
