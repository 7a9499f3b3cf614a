use crate::domain::{EmailAddress, HadithExcerpt, RecipientName};
use crate::rendering;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// Client for the primary transactional provider. Sends go through the provider's templated
/// endpoint: we hand over a template alias plus a model and the provider owns the rich layout.
pub struct PrimaryEmailClient {
    http_client: Client,
    base_url: String,
    sender: EmailAddress,
    authorization_token: Secret<String>,
}

impl PrimaryEmailClient {
    pub fn new(
        base_url: String,
        sender: EmailAddress,
        authorization_token: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        // The timeout lives on the `Client`, so every send is bounded without each call site
        // having to remember it. A timed-out send surfaces as an ordinary `reqwest::Error`.
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        })
    }

    pub async fn send_daily_digest(
        &self,
        recipient: &EmailAddress,
        name: &RecipientName,
        hadiths: &[HadithExcerpt],
    ) -> Result<(), reqwest::Error> {
        let template_model = DigestTemplateModel {
            name: name.as_ref(),
            date: rendering::digest_date(),
            hadiths,
        };
        self.send_templated(recipient, "daily-hadith-digest", template_model)
            .await
    }

    pub async fn send_welcome(
        &self,
        recipient: &EmailAddress,
        name: &RecipientName,
    ) -> Result<(), reqwest::Error> {
        let template_model = WelcomeTemplateModel {
            name: name.as_ref(),
        };
        self.send_templated(recipient, "welcome", template_model).await
    }

    async fn send_templated<T: serde::Serialize>(
        &self,
        recipient: &EmailAddress,
        template_alias: &str,
        template_model: T,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}/email/withTemplate", self.base_url);
        let request_body = TemplatedEmailRequest {
            from: self.sender.as_ref(),
            to: recipient.as_ref(),
            template_alias,
            template_model,
        };
        self.http_client
            .post(&url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await?
            // A rejection (4xx/5xx) and a transport fault must look the same to the caller: both
            // mean the primary did not deliver and the fallback should be attempted.
            .error_for_status()?;
        Ok(())
    }
}

/// The provider expects PascalCase field names on its templated-send endpoint.
#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct TemplatedEmailRequest<'a, T: serde::Serialize> {
    from: &'a str,
    to: &'a str,
    template_alias: &'a str,
    template_model: T,
}

#[derive(serde::Serialize)]
struct DigestTemplateModel<'a> {
    name: &'a str,
    date: String,
    hadiths: &'a [HadithExcerpt],
}

#[derive(serde::Serialize)]
struct WelcomeTemplateModel<'a> {
    name: &'a str,
}
