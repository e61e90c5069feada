//! Driven port for outgoing mail.
//!
//! The site sends exactly one kind of mail: the contact-form message,
//! fire-and-forget, to a fixed recipient. Adapters own transport; the port
//! owns the header-safety contract.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::account::EmailAddress;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mailer adapters.
    pub enum MailError {
        /// The subject would smuggle extra headers into the message.
        HeaderInjection => "subject would inject additional mail headers",
        /// The transport failed to hand the message over.
        Transport { message: String } => "mail transport failed: {message}",
    }
}

/// A composed mail message awaiting dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    subject: String,
    body: String,
}

impl MailMessage {
    /// Bundle a subject line and plain-text body.
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Subject line.
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Plain-text body.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// Whether the subject contains characters that would terminate the
    /// header and start a new one.
    ///
    /// Every adapter checks this before touching its transport, so a
    /// crafted subject fails identically in tests and production.
    #[must_use]
    pub fn subject_injects_headers(&self) -> bool {
        self.subject.contains(['\r', '\n'])
    }
}

/// Outgoing mail dispatch.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send `message` to `recipient`.
    async fn send(&self, recipient: &EmailAddress, message: &MailMessage)
        -> Result<(), MailError>;
}

/// A sent message captured by [`RecordingMailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    /// Address the message was sent to.
    pub recipient: EmailAddress,
    /// The message as handed to the mailer.
    pub message: MailMessage,
}

/// In-memory mailer used by tests and database-less deployments.
///
/// Applies the same header-safety check as the production adapter, then
/// records the message instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    /// Messages recorded so far, for test assertions.
    #[must_use]
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().map_or_else(|_| Vec::new(), |sent| sent.clone())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(
        &self,
        recipient: &EmailAddress,
        message: &MailMessage,
    ) -> Result<(), MailError> {
        if message.subject_injects_headers() {
            return Err(MailError::header_injection());
        }
        self.sent
            .lock()
            .map_err(|_| MailError::transport("mail fixture lock poisoned"))?
            .push(SentMail {
                recipient: recipient.clone(),
                message: message.clone(),
            });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn recipient() -> EmailAddress {
        EmailAddress::new("owner@example.org").expect("valid email")
    }

    #[rstest]
    #[case("Hello\nBcc: everyone")]
    #[case("Hello\rX-Spam: yes")]
    #[tokio::test]
    async fn injected_subjects_are_rejected_before_recording(#[case] subject: &str) {
        let mailer = RecordingMailer::default();
        let err = mailer
            .send(&recipient(), &MailMessage::new(subject, "body"))
            .await
            .expect_err("injection must fail");
        assert_eq!(err, MailError::HeaderInjection);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn clean_subjects_are_recorded() {
        let mailer = RecordingMailer::default();
        mailer
            .send(&recipient(), &MailMessage::new("Hello", "body"))
            .await
            .expect("send succeeds");
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent.first().map(|mail| mail.message.subject().to_owned()),
            Some("Hello".to_owned())
        );
    }
}
