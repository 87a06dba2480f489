//! Connectivity test port
//!
//! The external service that logs in to the configured servers or delivers a
//! real message. The controller only calls it and interprets the answer.

use super::dto::{ConnectivityTestRequest, TestMessageRequest, TestResponse};
use super::BackendError;

pub trait ConnectivityService: Send + Sync {
    /// `TestConnectivity` for transport and retrieval kinds
    fn test_connectivity(&self, request: &ConnectivityTestRequest)
        -> Result<TestResponse, BackendError>;

    /// `SendTestMessage`
    fn send_test_message(&self, request: &TestMessageRequest) -> Result<TestResponse, BackendError>;
}
