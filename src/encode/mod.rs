//! Frame sinks: where evaluated frame states go.

pub mod sink;

pub use sink::{FrameSink, InMemorySink, JsonLinesSink, SinkConfig, ensure_parent_dir};
