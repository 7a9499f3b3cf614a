use crate::dispatcher::{DispatchError, NotificationDispatcher};
use crate::domain::{EmailAddress, Notification, Recipient, RecipientName};
use crate::utils::error_chain_fmt;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};

#[derive(serde::Deserialize)]
pub struct WelcomeBody {
    email: Option<String>,
    name: Option<String>,
}

impl TryFrom<WelcomeBody> for Notification {
    type Error = String;

    fn try_from(body: WelcomeBody) -> Result<Self, Self::Error> {
        let email = EmailAddress::parse(body.email.unwrap_or_default())?;
        let name = RecipientName::parse(body.name.unwrap_or_default())?;
        Ok(Notification::welcome(Recipient { email, name }))
    }
}

#[derive(thiserror::Error)]
pub enum WelcomeError {
    #[error("Email and name are required")]
    ValidationError(#[source] anyhow::Error),
    #[error("Failed to send welcome email")]
    DeliveryError(#[from] DispatchError),
    #[error("Internal server error")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for WelcomeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for WelcomeError {
    fn status_code(&self) -> StatusCode {
        match self {
            WelcomeError::ValidationError(_) => StatusCode::BAD_REQUEST,
            WelcomeError::DeliveryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WelcomeError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

/// The welcome request boundary. Same shape as the daily-digest one, minus the hadith list; the
/// two stay separate because the required fields and every error message are part of each kind's
/// external contract.
#[tracing::instrument(name = "Sending a welcome email", skip(body, dispatcher))]
pub async fn send_welcome(
    body: web::Bytes,
    dispatcher: web::Data<NotificationDispatcher>,
) -> Result<HttpResponse, WelcomeError> {
    let body: WelcomeBody = serde_json::from_slice(&body)
        .map_err(|e| WelcomeError::UnexpectedError(anyhow::Error::from(e)))?;
    let notification: Notification = body
        .try_into()
        .map_err(|e: String| WelcomeError::ValidationError(anyhow::anyhow!(e)))?;
    dispatcher.dispatch(&notification).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}
