//! Trait abstraction for the submission service to enable mocking in tests

use crate::state::record::FormRecord;
use crate::state::SubmissionAck;
use anyhow::Result;
use async_trait::async_trait;

/// Operations that would reach a backend in a deployed intake portal
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Submit the completed application
    async fn submit(&self, record: &FormRecord) -> Result<SubmissionAck>;

    /// Send a verification email to the primary contact
    async fn send_verification_email(&self, email: &str) -> Result<()>;
}
