//! Service entry-point: loads settings, verifies the search store, and serves
//! the student endpoints.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use student_search::domain::StudentService;
use student_search::domain::ports::SearchGateway;
use student_search::inbound::http::health::HealthState;
use student_search::inbound::http::state::HttpState;
use student_search::outbound::elasticsearch::{ElasticsearchCredentials, ElasticsearchGateway};
use student_search::settings::StudentSearchSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = StudentSearchSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load configuration: {e}")))?;
    let base_url = settings.elastic_url().map_err(io::Error::other)?;
    let bind_addr = settings.socket_addr().map_err(io::Error::other)?;
    let credentials = settings
        .credentials()
        .map(|(username, password)| ElasticsearchCredentials {
            username: username.to_owned(),
            password: password.to_owned(),
        });

    let gateway =
        ElasticsearchGateway::with_credentials(base_url, settings.request_timeout(), credentials)
            .map_err(|e| io::Error::other(format!("failed to build search store client: {e}")))?;
    let cluster = gateway.cluster_info().await.map_err(|e| {
        error!(error = %e, "search store unavailable at startup");
        io::Error::other(format!("search store unavailable: {e}"))
    })?;
    info!(
        cluster = %cluster.cluster_name,
        version = %cluster.version,
        index = settings.index_name(),
        "connected to search store"
    );

    let service = StudentService::new(Arc::new(gateway), settings.index_name());
    let http_state = web::Data::new(HttpState::from_service(Arc::new(service)));
    let health_state = web::Data::new(HealthState::new());

    let server = create_server(health_state.clone(), ServerConfig::new(bind_addr, http_state))?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
