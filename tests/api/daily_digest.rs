use crate::helpers::{spawn_app, valid_digest_body};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn digest_returns_200_when_the_primary_provider_accepts_the_send() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/email/withTemplate"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.primary_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        // We assert that the fallback provider is never touched!
        .expect(0)
        .mount(&app.fallback_server)
        .await;

    // Act
    let response = app.post_daily_digest(&valid_digest_body()).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    // Mock expectations are checked on drop
}

#[tokio::test]
async fn digest_degrades_to_the_fallback_when_the_primary_provider_faults() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.primary_server)
        .await;
    Mock::given(path("/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.fallback_server)
        .await;

    // Act
    let response = app.post_daily_digest(&valid_digest_body()).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);

    // The degraded message is rendered locally: the subject carries today's date and the body
    // greets the recipient by name and quotes the excerpt.
    let requests = app.fallback_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let today = chrono::Utc::now().format("%d %B %Y").to_string();
    assert!(sent["subject"].as_str().unwrap().contains(&today));
    let html = sent["html"].as_str().unwrap();
    assert!(html.contains("Rafi"));
    assert!(html.contains("সহীহ বুখারী"));
}

#[tokio::test]
async fn digest_returns_500_when_both_providers_fault() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.primary_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.fallback_server)
        .await;

    // Act
    let response = app.post_daily_digest(&valid_digest_body()).await;

    // Assert
    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to send daily hadith email");
}

#[tokio::test]
async fn digest_returns_400_when_required_data_is_missing() {
    // Arrange
    let app = spawn_app().await;

    // No provider must ever be called on a rejected request, primary or fallback.
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.primary_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.fallback_server)
        .await;

    let hadiths = valid_digest_body()["hadiths"].clone();
    let test_cases = vec![
        (
            serde_json::json!({ "name": "Rafi", "hadiths": hadiths.clone() }),
            "missing the email",
        ),
        (
            serde_json::json!({ "email": "rafi@dailyhadith.app", "hadiths": hadiths.clone() }),
            "missing the name",
        ),
        (
            serde_json::json!({ "email": "rafi@dailyhadith.app", "name": "Rafi" }),
            "missing the hadith list",
        ),
        (
            serde_json::json!({ "email": "rafi@dailyhadith.app", "name": "Rafi", "hadiths": [] }),
            "an empty hadith list",
        ),
        (
            serde_json::json!({ "email": "", "name": "Rafi", "hadiths": hadiths.clone() }),
            "an empty email",
        ),
        (
            serde_json::json!({ "email": "rafi@dailyhadith.app", "name": " ", "hadiths": hadiths.clone() }),
            "a whitespace-only name",
        ),
    ];

    for (invalid_body, error_message) in test_cases {
        // Act
        let response = app.post_daily_digest(&invalid_body).await;

        // Assert
        assert_eq!(
            response.status().as_u16(),
            400,
            "The API did not return a 400 Bad Request when the payload was {}.",
            error_message
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Email, name, and hadith list are required");
    }
}

#[tokio::test]
async fn digest_returns_500_when_the_body_is_not_json() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.primary_server)
        .await;

    // Act
    let response = app
        .post_raw("daily-digest", "definitely not json".to_string())
        .await;

    // Assert
    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Internal server error");
}
