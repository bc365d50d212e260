// Application state shared by command handlers
use crate::application::auth_service::AuthService;
use crate::application::dashboard_service::DashboardService;
use crate::application::measurement_service::MeasurementService;
use crate::application::water_quality_api::WaterQualityApi;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn WaterQualityApi>,
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub measurement_service: MeasurementService,
    pub chart_height: usize,
}
