// Command handlers
use crate::application::auth_service::{LoginOutcome, SignupOutcome};
use crate::application::measurement_service::SubmitOutcome;
use crate::application::navigation::Route;
use crate::application::view_state::ViewState;
use crate::application::water_quality_api::ExportFormat;
use crate::domain::measurement::WaterQualityInput;
use crate::domain::parameter::Parameter;
use crate::presentation::app_state::AppState;
use crate::presentation::render;
use anyhow::{bail, Result};
use colored::Colorize;

pub async fn login(state: &AppState, username: &str, password: &str) -> Result<()> {
    match state.auth_service.login(username, password).await {
        LoginOutcome::SignedIn(next) => {
            println!("{}", "Signed in".green());
            println!("Continue with `{}`", next.command());
            Ok(())
        }
        LoginOutcome::Failed(message) => bail!(message),
    }
}

pub async fn signup(state: &AppState, username: &str, email: &str, password: &str) -> Result<()> {
    match state.auth_service.register(username, email, password).await {
        SignupOutcome::Registered(next) => {
            println!("{}", "Account created".green());
            println!("Sign in with `{}`", next.command());
            Ok(())
        }
        SignupOutcome::Failed(message) => bail!(message),
    }
}

pub fn logout(state: &AppState) -> Result<()> {
    let next = state.auth_service.logout()?;
    println!("Signed out. Sign in again with `{}`", next.command());
    Ok(())
}

pub fn status(state: &AppState) -> Result<()> {
    let mut auth = state.auth_service.auth_state();
    auth.sync();
    if auth.is_loading() {
        println!("Checking session...");
    } else if auth.is_authenticated() {
        println!("{}", "Signed in".green());
    } else {
        println!(
            "{} Sign in with `{}` or create an account with `{}`",
            "Not signed in.".yellow(),
            Route::Login.command(),
            Route::Signup.command()
        );
    }
    Ok(())
}

pub async fn health(state: &AppState) -> Result<()> {
    match state.api.health_check().await {
        Ok(health) => {
            println!("Service status: {}", health.status.green());
            Ok(())
        }
        Err(e) => bail!("Service unavailable: {}", e.user_message()),
    }
}

pub async fn overview(state: &AppState) -> Result<()> {
    require_login(state)?;
    loading("dashboard");
    let view = state.dashboard_service.overview().await;
    show(view, |data| render::render_overview(data, state.chart_height))?;
    println!();
    println!(
        "More: `{}`, `{}`, `{}`",
        Route::Trends.command(),
        Route::Parameters.command(),
        Route::NewMeasurement.command()
    );
    Ok(())
}

pub async fn trends(state: &AppState, days: u32, only: Option<Parameter>) -> Result<()> {
    require_login(state)?;
    loading("trends");
    let view = state.dashboard_service.trends(days, only).await;
    show(view, |data| render::render_trends(data, state.chart_height))
}

pub fn parameters(state: &AppState) -> Result<()> {
    require_login(state)?;
    print!("{}", render::render_catalog());
    println!();
    println!(
        "Open one with `{}`",
        Route::ParameterDetail("<parameter>".to_string()).command()
    );
    Ok(())
}

pub async fn parameter(state: &AppState, parameter: Parameter) -> Result<()> {
    require_login(state)?;
    loading(parameter.display_name());
    let view = state.dashboard_service.parameter(parameter.key()).await;
    show(view, |data| render::render_parameter(data, state.chart_height))
}

pub async fn compare(state: &AppState, locations: &[String], days: u32) -> Result<()> {
    loading("comparison");
    let view = state.dashboard_service.compare(locations, days).await;
    show(view, |data| render::render_comparison(data, state.chart_height))
}

pub async fn measurement(state: &AppState, id: i64) -> Result<()> {
    loading("measurement");
    let view = state.dashboard_service.measurement(id).await;
    show(view, render::render_measurement)
}

pub async fn measure(state: &AppState, input: WaterQualityInput, report: bool) -> Result<()> {
    require_login(state)?;
    println!("{}", "Analyzing...".dimmed());

    match state.measurement_service.submit(&input).await {
        SubmitOutcome::Predicted(prediction) => {
            print!("{}", render::render_prediction(&prediction));
        }
        SubmitOutcome::Invalid(errors) => {
            for error in &errors {
                eprintln!("  {}: {}", error.field.bold(), error.message);
            }
            bail!("Please correct the highlighted values");
        }
        SubmitOutcome::LoginRequired(next) => redirect(next)?,
        SubmitOutcome::Failed(message) => bail!(message),
    }

    if report {
        println!("{}", "Generating report...".dimmed());
        let path = state.measurement_service.download_report(&input).await?;
        println!("Report saved to {}", path.display());
    } else {
        println!();
        println!("Add `--report` to download the PDF report");
    }
    Ok(())
}

pub async fn export(state: &AppState, format: ExportFormat) -> Result<()> {
    println!("{}", format!("Exporting data as {}...", format).dimmed());
    let path = state.measurement_service.export(format).await?;
    println!("Data saved to {}", path.display());
    Ok(())
}

fn require_login(state: &AppState) -> Result<()> {
    match state.auth_service.auth_state().guard() {
        Ok(()) => Ok(()),
        Err(next) => redirect(next),
    }
}

fn redirect(next: Route) -> Result<()> {
    tracing::debug!("Redirecting to {}", next);
    bail!("Please log in to continue. Run `{}`", next.command())
}

fn loading(what: &str) {
    eprintln!("{}", format!("Loading {}...", what).dimmed());
}

fn show<T>(view: ViewState<T>, render: impl FnOnce(&T) -> String) -> Result<()> {
    if view.is_loading() {
        bail!("Nothing to show yet");
    }
    if let Some(message) = view.error() {
        bail!(message.to_string());
    }
    if let Some(data) = view.data() {
        print!("{}", render(data));
    }
    Ok(())
}
