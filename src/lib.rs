pub mod configuration;
pub mod dispatcher;
pub mod domain;
pub mod email_client;
pub mod fallback_client;
pub mod rendering;
pub mod routes;
pub mod startup;
pub mod telemetry;
mod utils;
