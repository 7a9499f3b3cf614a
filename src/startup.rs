use crate::configuration::Settings;
use crate::dispatcher::NotificationDispatcher;
use crate::email_client::PrimaryEmailClient;
use crate::fallback_client::FallbackEmailClient;
use crate::routes;
use actix_web::{dev::Server, web, App, HttpServer};
use std::io::ErrorKind;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, std::io::Error> {
        let dispatcher = build_dispatcher(&configuration)?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)?;
        // Retrieve the port assigned to us by the OS
        let port = listener.local_addr()?.port();
        let server = run(listener, dispatcher)?;

        // We "save" the bound port in one of `Application`'s fields.
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// A more expressive name that makes it clear that this function only returns when the
    /// application is stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

fn build_dispatcher(configuration: &Settings) -> Result<NotificationDispatcher, std::io::Error> {
    let primary_sender = configuration
        .primary_email
        .sender()
        .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;
    let primary = PrimaryEmailClient::new(
        configuration.primary_email.base_url.clone(),
        primary_sender,
        configuration.primary_email.authorization_token.clone(),
        configuration.primary_email.timeout(),
    )
    .map_err(|e| std::io::Error::new(ErrorKind::Other, e))?;

    let fallback_sender = configuration
        .fallback_email
        .sender()
        .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;
    let fallback = FallbackEmailClient::new(
        configuration.fallback_email.base_url.clone(),
        fallback_sender,
        configuration.fallback_email.authorization_token.clone(),
        configuration.fallback_email.timeout(),
    )
    .map_err(|e| std::io::Error::new(ErrorKind::Other, e))?;

    Ok(NotificationDispatcher::new(primary, fallback))
}

pub fn run(
    listener: TcpListener,
    dispatcher: NotificationDispatcher,
) -> Result<Server, std::io::Error> {
    // Wrap the dispatcher in a smart pointer: one instance, shared across workers. It holds no
    // mutable state, so no synchronization is needed beyond the `Arc` that `web::Data` provides.
    let dispatcher = web::Data::new(dispatcher);
    let server = HttpServer::new(move || {
        App::new()
            // Middlewares are added using the `wrap` method on `App`
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(routes::health_check))
            .route(
                "/notifications/daily-digest",
                web::post().to(routes::send_daily_digest),
            )
            .route(
                "/notifications/welcome",
                web::post().to(routes::send_welcome),
            )
            // Register the dispatcher as part of the application state
            .app_data(dispatcher.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
