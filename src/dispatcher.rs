use crate::domain::Notification;
use crate::email_client::PrimaryEmailClient;
use crate::fallback_client::FallbackEmailClient;
use crate::rendering;

/// Which provider actually carried a successful delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailProvider {
    Primary,
    Fallback,
}

#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    #[error("Failed to render the fallback message")]
    RenderFailed(#[from] tera::Error),
    #[error("Fallback delivery failed after a primary provider fault")]
    FallbackFailed {
        #[source]
        fallback: reqwest::Error,
        // Kept for the log record: the fallback error alone does not explain why the fallback
        // was attempted in the first place.
        primary: reqwest::Error,
    },
}

/// Owns both provider clients and the degrade policy between them: try the primary's templated
/// send, and on any fault make exactly one attempt through the fallback with a locally rendered
/// message. No retry loop, no backoff, no queuing - a second failure is the caller's problem.
///
/// Sends are not idempotent. Dispatching the same notification twice sends two emails; nothing
/// here deduplicates, by contract with the request boundary.
pub struct NotificationDispatcher {
    primary: PrimaryEmailClient,
    fallback: FallbackEmailClient,
}

impl NotificationDispatcher {
    pub fn new(primary: PrimaryEmailClient, fallback: FallbackEmailClient) -> Self {
        Self { primary, fallback }
    }

    /// Make a best-effort delivery attempt and report one unambiguous outcome. The two provider
    /// calls are awaited sequentially: the fallback only ever runs once the primary has
    /// definitively failed, so there is nothing to race.
    #[tracing::instrument(
        name = "Dispatching a notification",
        skip(self, notification),
        fields(
            kind = %notification.kind(),
            recipient_email = %notification.recipient().email
        )
    )]
    pub async fn dispatch(
        &self,
        notification: &Notification,
    ) -> Result<EmailProvider, DispatchError> {
        let primary_fault = match self.send_via_primary(notification).await {
            Ok(()) => return Ok(EmailProvider::Primary),
            Err(e) => e,
        };
        tracing::warn!(
            error.cause_chain = ?primary_fault,
            error.message = %primary_fault,
            "Primary provider failed, attempting fallback delivery"
        );

        let message = rendering::render_fallback(notification)?;
        match self
            .fallback
            .send_raw(
                &notification.recipient().email,
                &message.subject,
                &message.html_body,
            )
            .await
        {
            Ok(()) => Ok(EmailProvider::Fallback),
            Err(fallback) => Err(DispatchError::FallbackFailed {
                fallback,
                primary: primary_fault,
            }),
        }
    }

    async fn send_via_primary(&self, notification: &Notification) -> Result<(), reqwest::Error> {
        match notification {
            Notification::DailyDigest { recipient, hadiths } => {
                self.primary
                    .send_daily_digest(&recipient.email, &recipient.name, hadiths)
                    .await
            }
            Notification::Welcome { recipient } => {
                self.primary
                    .send_welcome(&recipient.email, &recipient.name)
                    .await
            }
        }
    }
}
