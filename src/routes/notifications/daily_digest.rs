use crate::dispatcher::{DispatchError, NotificationDispatcher};
use crate::domain::{EmailAddress, HadithExcerpt, Notification, Recipient, RecipientName};
use crate::utils::error_chain_fmt;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};

/// Every field is optional at the deserialization stage: a *missing* field must surface as a
/// validation failure (400), not as a malformed-body failure (500). Type mismatches (e.g. a
/// string where the hadith list should be) still fail deserialization and take the 500 path.
#[derive(serde::Deserialize)]
pub struct DailyDigestBody {
    email: Option<String>,
    name: Option<String>,
    hadiths: Option<Vec<HadithExcerpt>>,
}

impl TryFrom<DailyDigestBody> for Notification {
    type Error = String;

    fn try_from(body: DailyDigestBody) -> Result<Self, Self::Error> {
        let email = EmailAddress::parse(body.email.unwrap_or_default())?;
        let name = RecipientName::parse(body.name.unwrap_or_default())?;
        Notification::daily_digest(Recipient { email, name }, body.hadiths.unwrap_or_default())
    }
}

#[derive(thiserror::Error)]
pub enum DailyDigestError {
    // `Display` doubles as the client-facing message, so the variants spell out the exact
    // wording the API contract promises. The underlying cause only shows up in log records,
    // via the `Debug` implementation below.
    #[error("Email, name, and hadith list are required")]
    ValidationError(#[source] anyhow::Error),
    #[error("Failed to send daily hadith email")]
    DeliveryError(#[from] DispatchError),
    #[error("Internal server error")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for DailyDigestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for DailyDigestError {
    fn status_code(&self) -> StatusCode {
        match self {
            DailyDigestError::ValidationError(_) => StatusCode::BAD_REQUEST,
            DailyDigestError::DeliveryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DailyDigestError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

/// The daily-digest request boundary. The body is taken raw rather than through the `web::Json`
/// extractor: a body that does not parse at all is the unexpected-input path and must answer
/// 500, while the extractor would answer 400 on its own.
#[tracing::instrument(name = "Sending a daily hadith digest", skip(body, dispatcher))]
pub async fn send_daily_digest(
    body: web::Bytes,
    dispatcher: web::Data<NotificationDispatcher>,
) -> Result<HttpResponse, DailyDigestError> {
    let body: DailyDigestBody = serde_json::from_slice(&body)
        .map_err(|e| DailyDigestError::UnexpectedError(anyhow::Error::from(e)))?;
    let notification: Notification = body
        .try_into()
        .map_err(|e: String| DailyDigestError::ValidationError(anyhow::anyhow!(e)))?;
    dispatcher.dispatch(&notification).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}
