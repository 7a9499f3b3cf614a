use crate::domain::Notification;
use once_cell::sync::Lazy;
use tera::{Context, Tera};

/// The minimal HTML sent through the fallback provider. Rich layout is the primary provider's
/// job; these templates only need to get the content across when the primary is down.
const DIGEST_TEMPLATE: &str = "\
<h2>আসসালামু আলাইকুম, {{ name }}!</h2>\
<p>{{ date }} তারিখের নির্বাচিত হাদিস:</p>\
<ol>\
{% for hadith in hadiths %}\
<li>\
<blockquote>{{ hadith.text }}</blockquote>\
<p>{{ hadith.book }}, হাদিস নং {{ hadith.number }}</p>\
{% if hadith.narrator %}<p>বর্ণনাকারী: {{ hadith.narrator }}</p>{% endif %}\
</li>\
{% endfor %}\
</ol>";

const WELCOME_TEMPLATE: &str = "\
<h2>আসসালামু আলাইকুম, {{ name }}!</h2>\
<p>দৈনিক হাদিসে আপনাকে স্বাগতম। প্রতিদিন সকালে নির্বাচিত হাদিস আপনার ইনবক্সে পৌঁছে যাবে।</p>";

static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("daily_digest.html", DIGEST_TEMPLATE),
        ("welcome.html", WELCOME_TEMPLATE),
    ])
    // The templates are compiled in; failing to parse them is a programming error, not a
    // runtime condition.
    .expect("Failed to compile the built-in fallback templates");
    tera
});

/// A subject and HTML body derived deterministically from a notification. Request-scoped: it is
/// rendered when the fallback path is taken and discarded once the send completes.
pub struct RenderedMessage {
    pub subject: String,
    pub html_body: String,
}

/// Today's date as it appears in digest subjects and bodies, e.g. `23 August 2026`.
pub fn digest_date() -> String {
    chrono::Utc::now().format("%d %B %Y").to_string()
}

/// Render the degraded message for the fallback provider. Same inputs, same output: the only
/// moving part is the current date in the daily digest.
pub fn render_fallback(notification: &Notification) -> Result<RenderedMessage, tera::Error> {
    match notification {
        Notification::DailyDigest { recipient, hadiths } => {
            let date = digest_date();
            let mut context = Context::new();
            context.insert("name", recipient.name.as_ref());
            context.insert("date", &date);
            context.insert("hadiths", hadiths);
            let html_body = TEMPLATES.render("daily_digest.html", &context)?;
            Ok(RenderedMessage {
                subject: format!("আজকের হাদিস - {date}"),
                html_body,
            })
        }
        Notification::Welcome { recipient } => {
            let mut context = Context::new();
            context.insert("name", recipient.name.as_ref());
            let html_body = TEMPLATES.render("welcome.html", &context)?;
            Ok(RenderedMessage {
                subject: "দৈনিক হাদিসে স্বাগতম".to_string(),
                html_body,
            })
        }
    }
}
