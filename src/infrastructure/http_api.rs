// HTTP implementation of the water quality API
use crate::application::error::ApiError;
use crate::application::session::Session;
use crate::application::water_quality_api::{
    AccessToken, Credentials, ExportFormat, HealthStatus, Registration, WaterQualityApi,
};
use crate::domain::dashboard::{ComparisonDashboardData, DashboardData, ParameterDashboardData};
use crate::domain::measurement::{MeasurementDetails, WaterQualityInput};
use crate::domain::prediction::WaterQualityPrediction;
use crate::domain::trends::TrendData;
use crate::infrastructure::config::endpoint_url;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Whether a request carries the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    None,
    /// Attached when present
    Optional,
    /// Fails with `MissingToken` before sending when absent
    Required,
}

#[derive(Clone)]
pub struct HttpWaterQualityApi {
    base_url: String,
    session: Session,
    client: reqwest::Client,
}

impl HttpWaterQualityApi {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder, auth: Auth) -> Result<RequestBuilder, ApiError> {
        if auth == Auth::None {
            return Ok(request);
        }
        match self.session.token() {
            Some(token) => Ok(request.bearer_auth(token)),
            None if auth == Auth::Required => {
                tracing::error!("No authentication token found");
                Err(ApiError::MissingToken)
            }
            None => Ok(request),
        }
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        auth: Auth,
        fallback: &str,
    ) -> Result<Response, ApiError> {
        let request = self.authorize(request, auth)?;

        let response = request
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request failed: {}", e);
                ApiError::Network(e.to_string())
            })?;

        tracing::debug!("{} {}", response.status(), response.url());

        if !response.status().is_success() {
            return Err(error_from_response(response, fallback).await);
        }

        Ok(response)
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        auth: Auth,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let request = request.header(ACCEPT, "application/json");
        let response = self.execute(request, auth, fallback).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            ApiError::Decode(e.to_string())
        })
    }

    async fn execute_bytes(
        &self,
        request: RequestBuilder,
        auth: Auth,
        fallback: &str,
    ) -> Result<Bytes, ApiError> {
        let response = self.execute(request, auth, fallback).await?;
        response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

/// Message from the server's `detail` field, else the status text, else `fallback`
async fn error_from_response(response: Response, fallback: &str) -> ApiError {
    let status = response.status();
    let body = response.bytes().await.unwrap_or_default();

    let message = detail_message(&body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| fallback.to_string());

    tracing::warn!("API error {}: {}", status.as_u16(), message);
    ApiError::Http {
        status: status.as_u16(),
        message,
    }
}

fn detail_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.is_empty() => Some(detail.clone()),
        // Validation failures carry a list of {loc, msg, type}
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

#[async_trait]
impl WaterQualityApi for HttpWaterQualityApi {
    async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        let request = self.client.get(self.url("/health"));
        self.execute_json(request, Auth::None, DEFAULT_ERROR_MESSAGE).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, ApiError> {
        let request = self.client.post(self.url("/token")).form(&[
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ]);
        self.execute_json(request, Auth::None, "Invalid credentials").await
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let request = self.client.post(self.url("/register")).json(registration);
        self.execute(request, Auth::None, "Registration failed").await?;
        Ok(())
    }

    async fn predict(&self, input: &WaterQualityInput) -> Result<WaterQualityPrediction, ApiError> {
        tracing::debug!("Sending prediction request: {:?}", input);
        let request = self.client.post(self.url("/api/predict")).json(input);
        self.execute_json(request, Auth::Required, "Failed to predict water quality")
            .await
    }

    async fn measurement(&self, id: i64) -> Result<MeasurementDetails, ApiError> {
        let request = self
            .client
            .get(self.url(&format!("/api/measurements/{}", id)));
        self.execute_json(request, Auth::Optional, DEFAULT_ERROR_MESSAGE).await
    }

    async fn trends(&self, days: u32) -> Result<TrendData, ApiError> {
        let request = self
            .client
            .get(self.url(&format!("/api/trends?days={}", days)));
        self.execute_json(request, Auth::Required, DEFAULT_ERROR_MESSAGE).await
    }

    async fn dashboard(&self) -> Result<DashboardData, ApiError> {
        let request = self.client.get(self.url("/api/dashboard"));
        self.execute_json(request, Auth::Required, DEFAULT_ERROR_MESSAGE).await
    }

    async fn parameter_dashboard(&self, parameter: &str) -> Result<ParameterDashboardData, ApiError> {
        let path = format!("/api/dashboard/parameter/{}", urlencoding::encode(parameter));
        let request = self.client.get(self.url(&path));
        self.execute_json(request, Auth::Required, DEFAULT_ERROR_MESSAGE).await
    }

    async fn compare(
        &self,
        locations: &[String],
        days: u32,
    ) -> Result<ComparisonDashboardData, ApiError> {
        let locations = locations
            .iter()
            .map(|l| urlencoding::encode(l).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        let path = format!("/api/dashboard/compare?locations={}&days={}", locations, days);
        let request = self.client.get(self.url(&path));
        self.execute_json(request, Auth::Optional, DEFAULT_ERROR_MESSAGE).await
    }

    async fn export_data(&self, format: ExportFormat) -> Result<Bytes, ApiError> {
        let path = format!("/api/export?format={}", format.as_query());
        let request = self.client.get(self.url(&path));
        self.execute_bytes(request, Auth::Optional, DEFAULT_ERROR_MESSAGE).await
    }

    async fn generate_report(&self, input: &WaterQualityInput) -> Result<Bytes, ApiError> {
        let request = self.client.post(self.url("/api/generate-report")).json(input);
        self.execute_bytes(request, Auth::Required, "Failed to generate report")
            .await
    }
}
