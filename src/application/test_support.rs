// In-memory WaterQualityApi double for service tests
use crate::application::error::ApiError;
use crate::application::water_quality_api::{
    AccessToken, Credentials, ExportFormat, HealthStatus, Registration, WaterQualityApi,
};
use crate::domain::dashboard::{ComparisonDashboardData, DashboardData, ParameterDashboardData};
use crate::domain::measurement::{MeasurementDetails, WaterQualityInput};
use crate::domain::prediction::WaterQualityPrediction;
use crate::domain::trends::TrendData;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

type Canned<T> = Mutex<Option<Result<T, ApiError>>>;

#[derive(Default)]
pub struct FakeApi {
    pub calls: AtomicUsize,
    pub login: Canned<AccessToken>,
    pub register: Canned<()>,
    pub predict: Canned<WaterQualityPrediction>,
    pub measurement: Canned<MeasurementDetails>,
    pub trends: Canned<TrendData>,
    pub dashboard: Canned<DashboardData>,
    pub parameter: Canned<ParameterDashboardData>,
    pub compare: Canned<ComparisonDashboardData>,
    pub export: Canned<Bytes>,
    pub report: Canned<Bytes>,
    pub last_login: Mutex<Option<String>>,
}

impl FakeApi {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond<T>(&self, canned: &Canned<T>) -> Result<T, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        canned
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(ApiError::Network("no canned response".to_string())))
    }
}

#[async_trait]
impl WaterQualityApi for FakeApi {
    async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(HealthStatus {
            status: "healthy".to_string(),
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, ApiError> {
        *self.last_login.lock().unwrap() = Some(credentials.username.clone());
        self.respond(&self.login)
    }

    async fn register(&self, _registration: &Registration) -> Result<(), ApiError> {
        self.respond(&self.register)
    }

    async fn predict(&self, _input: &WaterQualityInput) -> Result<WaterQualityPrediction, ApiError> {
        self.respond(&self.predict)
    }

    async fn measurement(&self, _id: i64) -> Result<MeasurementDetails, ApiError> {
        self.respond(&self.measurement)
    }

    async fn trends(&self, _days: u32) -> Result<TrendData, ApiError> {
        self.respond(&self.trends)
    }

    async fn dashboard(&self) -> Result<DashboardData, ApiError> {
        self.respond(&self.dashboard)
    }

    async fn parameter_dashboard(&self, _parameter: &str) -> Result<ParameterDashboardData, ApiError> {
        self.respond(&self.parameter)
    }

    async fn compare(
        &self,
        _locations: &[String],
        _days: u32,
    ) -> Result<ComparisonDashboardData, ApiError> {
        self.respond(&self.compare)
    }

    async fn export_data(&self, _format: ExportFormat) -> Result<Bytes, ApiError> {
        self.respond(&self.export)
    }

    async fn generate_report(&self, _input: &WaterQualityInput) -> Result<Bytes, ApiError> {
        self.respond(&self.report)
    }
}
