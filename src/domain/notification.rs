use crate::domain::{EmailAddress, RecipientName};

/// # Type Driven Development
/// Making an incorrect usage pattern unrepresentable, by construction, is known as *type driven
/// development*. Both fields went through `parse` before a `Recipient` could exist, so everything
/// downstream of the request boundary handles validated data only.
#[derive(Debug)]
pub struct Recipient {
    pub email: EmailAddress,
    pub name: RecipientName,
}

/// One curated excerpt as it appears in a daily digest. `narrator` is optional because some of
/// the curated collections do not record one.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HadithExcerpt {
    pub book: String,
    pub number: u32,
    pub text: String,
    pub narrator: Option<String>,
}

/// One notification to be delivered, discriminated by kind. The kind selects which templated
/// send the primary provider performs and which fallback message gets rendered.
#[derive(Debug)]
pub enum Notification {
    DailyDigest {
        recipient: Recipient,
        hadiths: Vec<HadithExcerpt>,
    },
    Welcome {
        recipient: Recipient,
    },
}

impl Notification {
    /// A digest with nothing in it is not a digest. Rejecting the empty list here means the
    /// dispatcher and the rendering code never have to re-check it.
    pub fn daily_digest(
        recipient: Recipient,
        hadiths: Vec<HadithExcerpt>,
    ) -> Result<Self, String> {
        if hadiths.is_empty() {
            return Err("A daily digest must carry at least one hadith.".to_string());
        }
        Ok(Self::DailyDigest { recipient, hadiths })
    }

    pub fn welcome(recipient: Recipient) -> Self {
        Self::Welcome { recipient }
    }

    pub fn recipient(&self) -> &Recipient {
        match self {
            Self::DailyDigest { recipient, .. } => recipient,
            Self::Welcome { recipient } => recipient,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::DailyDigest { .. } => "daily_digest",
            Self::Welcome { .. } => "welcome",
        }
    }
}
