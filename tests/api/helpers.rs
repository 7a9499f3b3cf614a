use hadith_notify::configuration::get_configuration;
use hadith_notify::startup::Application;
use hadith_notify::telemetry;
use once_cell::sync::Lazy;
use wiremock::MockServer;

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    // We cannot assign the output of `get_subscriber` to a variable based on the value TEST_LOG
    // because the sink is part of the type returned by `get_subscriber`, therefore they are not
    // the same type. We could work around it, but this is the most straight-forward way of
    // moving forward.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber =
            telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        telemetry::init_subscriber(subscriber);
    } else {
        let subscriber =
            telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        telemetry::init_subscriber(subscriber);
    }
});

pub(crate) struct TestApp {
    pub(crate) address: String,
    /// Stands in for the primary (templated) provider.
    pub(crate) primary_server: MockServer,
    /// Stands in for the fallback (raw send) provider.
    pub(crate) fallback_server: MockServer,
}

impl TestApp {
    pub async fn post_daily_digest(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/notifications/daily-digest", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_welcome(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/notifications/welcome", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Send an arbitrary byte payload, bypassing JSON serialization. Used to exercise the
    /// malformed-body path.
    pub async fn post_raw(&self, endpoint: &str, body: String) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/notifications/{}", &self.address, endpoint))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub(crate) async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed. All other
    // invocations will instead skip execution.
    Lazy::force(&TRACING);

    // Launch mock servers to stand in for the two email providers
    let primary_server = MockServer::start().await;
    let fallback_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // Use a random OS port
        c.application.port = 0;
        c.primary_email.base_url = primary_server.uri();
        c.fallback_email.base_url = fallback_server.uri();
        c
    };

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application");

    let address = format!("http://127.0.0.1:{}", application.port());

    // Launch the server as a background task. tokio::spawn returns a handle to the spawned
    // future, but we have no use for it here, hence the non-binding let.
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        primary_server,
        fallback_server,
    }
}

/// A digest body every field of which is present and valid.
pub(crate) fn valid_digest_body() -> serde_json::Value {
    serde_json::json!({
        "email": "rafi@dailyhadith.app",
        "name": "Rafi",
        "hadiths": [
            {
                "book": "সহীহ বুখারী",
                "number": 1,
                "text": "নিশ্চয়ই সকল কাজ নিয়তের উপর নির্ভরশীল।",
                "narrator": "উমর ইবনুল খাত্তাব (রাঃ)"
            }
        ]
    })
}

pub(crate) fn valid_welcome_body() -> serde_json::Value {
    serde_json::json!({
        "email": "rafi@dailyhadith.app",
        "name": "Rafi"
    })
}
