// Port for the remote water quality API
use crate::application::error::ApiError;
use crate::domain::dashboard::{ComparisonDashboardData, DashboardData, ParameterDashboardData};
use crate::domain::measurement::{MeasurementDetails, WaterQualityInput};
use crate::domain::prediction::WaterQualityPrediction;
use crate::domain::trends::TrendData;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
}

impl ExportFormat {
    pub fn as_query(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "excel",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

#[async_trait]
pub trait WaterQualityApi: Send + Sync {
    async fn health_check(&self) -> Result<HealthStatus, ApiError>;

    /// Exchange credentials for a bearer token
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, ApiError>;

    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;

    async fn predict(&self, input: &WaterQualityInput) -> Result<WaterQualityPrediction, ApiError>;

    async fn measurement(&self, id: i64) -> Result<MeasurementDetails, ApiError>;

    async fn trends(&self, days: u32) -> Result<TrendData, ApiError>;

    async fn dashboard(&self) -> Result<DashboardData, ApiError>;

    async fn parameter_dashboard(&self, parameter: &str) -> Result<ParameterDashboardData, ApiError>;

    async fn compare(
        &self,
        locations: &[String],
        days: u32,
    ) -> Result<ComparisonDashboardData, ApiError>;

    /// Raw export file contents
    async fn export_data(&self, format: ExportFormat) -> Result<Bytes, ApiError>;

    /// PDF report bytes for the given input
    async fn generate_report(&self, input: &WaterQualityInput) -> Result<Bytes, ApiError>;
}
