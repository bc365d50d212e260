// Main entry point - Dependency injection and command dispatch
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::auth_service::AuthService;
use crate::application::dashboard_service::DashboardService;
use crate::application::measurement_service::MeasurementService;
use crate::application::session::{Session, TokenStore};
use crate::infrastructure::config::load_client_config;
use crate::infrastructure::http_api::HttpWaterQualityApi;
use crate::infrastructure::token_store::{FileTokenStore, MemoryTokenStore};
use crate::presentation::app_state::AppState;
use crate::presentation::cli::{Cli, Command};
use crate::presentation::handlers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = load_client_config()?;
    tracing::debug!("Using API at {}", config.api.base_url);

    // Session backed by the configured token store
    let store: Arc<dyn TokenStore> = if config.session.persist {
        Arc::new(FileTokenStore::new(config.session.token_path.clone()))
    } else {
        Arc::new(MemoryTokenStore::default())
    };
    let session = Session::new(store);

    // Create API client (infrastructure layer)
    let api = Arc::new(HttpWaterQualityApi::new(
        config.api.base_url.clone(),
        session.clone(),
    ));

    // Create services (application layer)
    let state = AppState {
        api: api.clone(),
        auth_service: AuthService::new(api.clone(), session),
        dashboard_service: DashboardService::new(api.clone(), config.output.chart_width),
        measurement_service: MeasurementService::new(api, config.output.download_dir.clone()),
        chart_height: config.output.chart_height,
    };

    // Dispatch (presentation layer)
    match cli.command {
        Command::Login { username, password } => {
            handlers::login(&state, &username, &password).await
        }
        Command::Signup {
            username,
            email,
            password,
        } => handlers::signup(&state, &username, &email, &password).await,
        Command::Logout => handlers::logout(&state),
        Command::Status => handlers::status(&state),
        Command::Health => handlers::health(&state).await,
        Command::Overview => handlers::overview(&state).await,
        Command::Trends { days, parameter } => handlers::trends(&state, days, parameter).await,
        Command::Parameters => handlers::parameters(&state),
        Command::Parameter { parameter } => handlers::parameter(&state, parameter).await,
        Command::Compare { locations, days } => {
            handlers::compare(&state, &locations, days).await
        }
        Command::Measurement { id } => handlers::measurement(&state, id).await,
        Command::Measure { readings, report } => {
            handlers::measure(&state, readings.into(), report).await
        }
        Command::Export { format } => handlers::export(&state, format.into()).await,
    }
}
