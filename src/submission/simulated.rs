//! Local stand-in for the submission backend

use super::traits::SubmissionService;
use crate::config::IntakeConfig;
use crate::state::record::FormRecord;
use crate::state::validation::is_valid_email;
use crate::state::SubmissionAck;
use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use uuid::Uuid;

/// Waits a fixed delay, logs the record and always succeeds
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    submit_delay: Duration,
    verification_delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(submit_delay: Duration, verification_delay: Duration) -> Self {
        Self {
            submit_delay,
            verification_delay,
        }
    }

    pub fn from_config(config: &IntakeConfig) -> Self {
        Self::new(config.submit_delay(), config.verification_delay())
    }
}

#[async_trait]
impl SubmissionService for SimulatedSubmitter {
    async fn submit(&self, record: &FormRecord) -> Result<SubmissionAck> {
        tokio::time::sleep(self.submit_delay).await;

        let ack = SubmissionAck {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
        };
        let payload = serde_json::to_string_pretty(record)?;
        tracing::info!(
            "Application {} submitted at {}\n{payload}",
            ack.id,
            ack.submitted_at.to_rfc3339()
        );
        Ok(ack)
    }

    async fn send_verification_email(&self, email: &str) -> Result<()> {
        if !is_valid_email(email) {
            bail!("Cannot send verification to invalid address '{email}'");
        }
        tokio::time::sleep(self.verification_delay).await;
        tracing::info!("Verification email sent to {email}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::validation::tests::complete_record;

    fn instant() -> SimulatedSubmitter {
        SimulatedSubmitter::new(Duration::ZERO, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_submit_returns_ack_and_leaves_record_unchanged() {
        let record = complete_record();
        let before = record.clone();
        let ack = instant().submit(&record).await.unwrap();
        assert_eq!(record, before);
        assert!(ack.submitted_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_each_submit_gets_a_new_id() {
        let submitter = instant();
        let record = complete_record();
        let a = submitter.submit(&record).await.unwrap();
        let b = submitter.submit(&record).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_submit_waits_configured_delay() {
        let submitter = SimulatedSubmitter::new(Duration::from_millis(20), Duration::ZERO);
        let started = std::time::Instant::now();
        submitter.submit(&complete_record()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_verification_email() {
        let submitter = instant();
        assert!(tokio_test::block_on(submitter.send_verification_email("ada@riverside.org")).is_ok());
        assert!(tokio_test::block_on(submitter.send_verification_email("not-an-email")).is_err());
    }

    #[test]
    fn test_from_config_uses_delays() {
        let config = IntakeConfig {
            submit_delay_ms: Some(7),
            verification_delay_ms: Some(3),
            ..Default::default()
        };
        let submitter = SimulatedSubmitter::from_config(&config);
        assert_eq!(submitter.submit_delay, Duration::from_millis(7));
        assert_eq!(submitter.verification_delay, Duration::from_millis(3));
    }
}
