//! Notice Port
//!
//! User-facing notifications ("toasts") raised by remote outcomes.

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Receives notices
///
/// Implementations can be:
/// - a UI toast queue
/// - `TracingNoticeSink`: forwards to the log
/// - `NoopNoticeSink`: silent operation
pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// No-op sink for silent operation
pub struct NoopNoticeSink;

impl NoticeSink for NoopNoticeSink {
    fn notify(&self, _notice: Notice) {}
}
