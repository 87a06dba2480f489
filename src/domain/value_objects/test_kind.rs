//! Connectivity test kinds

use std::fmt;

use serde::{Deserialize, Serialize};

use super::RetrievalSlot;

/// Which connection a connectivity test exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    /// Outbound transport login
    Transport,
    /// Primary retrieval block login
    RetrievalPrimary,
    /// Secondary retrieval block login
    RetrievalSecondary,
    /// Deliver a real message to a recipient
    SendMessage,
}

impl TestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestKind::Transport => "transport",
            TestKind::RetrievalPrimary => "retrieval_primary",
            TestKind::RetrievalSecondary => "retrieval_secondary",
            TestKind::SendMessage => "send_message",
        }
    }

    /// Retrieval slot exercised by this test, if any
    pub fn retrieval_slot(&self) -> Option<RetrievalSlot> {
        match self {
            TestKind::RetrievalPrimary => Some(RetrievalSlot::Primary),
            TestKind::RetrievalSecondary => Some(RetrievalSlot::Secondary),
            _ => None,
        }
    }
}

impl From<RetrievalSlot> for TestKind {
    fn from(slot: RetrievalSlot) -> Self {
        match slot {
            RetrievalSlot::Primary => TestKind::RetrievalPrimary,
            RetrievalSlot::Secondary => TestKind::RetrievalSecondary,
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last observed result of a connectivity test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub ok: bool,
    pub message: Option<String>,
}

impl TestOutcome {
    pub fn success(message: Option<String>) -> Self {
        Self { ok: true, message }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
        }
    }
}
