//! Notice Sink Implementations
//!
//! - JsonNoticeSink: NDJSON output for automation
//! - TracingNoticeSink: forwards notices to the log for headless embedding

mod json;
mod tracing_sink;

pub use json::JsonNoticeSink;
pub use tracing_sink::TracingNoticeSink;
