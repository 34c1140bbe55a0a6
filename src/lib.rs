//! HTTP gateway that turns JSON CRUD requests into InfluxDB v2 writes,
//! Flux queries and delete predicates, plus the pieces used by the
//! `decrypt-secrets` program to publish InfluxDB credentials to SSM.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

/// Install the fmt subscriber, honouring `RUST_LOG` and defaulting to `info`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
