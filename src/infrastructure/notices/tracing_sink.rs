//! Notice sink that forwards to the log

use tracing::{error, info};

use crate::domain::ports::{Notice, NoticeLevel, NoticeSink};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNoticeSink;

impl NoticeSink for TracingNoticeSink {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(level = "success", "{}", notice.message),
            NoticeLevel::Info => info!(level = "info", "{}", notice.message),
            NoticeLevel::Error => error!("{}", notice.message),
        }
    }
}
