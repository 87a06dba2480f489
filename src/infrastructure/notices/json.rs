//! JSON Notice Sink
//!
//! Writes notices as NDJSON for automation consumption.

use crate::domain::ports::{Notice, NoticeLevel, NoticeSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Notice sink that outputs one JSON object per line
pub struct JsonNoticeSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonNoticeSink {
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl NoticeSink for JsonNoticeSink {
    fn notify(&self, notice: Notice) {
        let level = match notice.level {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        };
        let json = serde_json::json!({
            "event": "notice",
            "level": level,
            "message": notice.message,
        });
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", json);
            let _ = writer.flush();
        }
    }
}
