// Dashboard service - Use cases behind the overview, trends, parameter and comparison views
use crate::application::error::ApiError;
use crate::application::view_state::{load, ViewState};
use crate::application::water_quality_api::WaterQualityApi;
use crate::domain::chart::ChartData;
use crate::domain::dashboard::{Alert, ComparisonDashboardData, ParameterDashboardData, ParameterSummary};
use crate::domain::measurement::{MeasurementDetails, RecentMeasurement};
use crate::domain::parameter::{display_label, Parameter};
use crate::domain::prediction::GroupedRecommendation;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub current_wqi: f64,
    pub quality_category: String,
    pub wqi_chart: ChartData,
    /// Every parameter across the recent measurements
    pub parameter_chart: ChartData,
    pub parameter_summary: Vec<(String, ParameterSummary)>,
    pub recent_measurements: Vec<RecentMeasurement>,
    pub recommendations: Vec<(&'static str, Vec<GroupedRecommendation>)>,
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendsView {
    pub days: u32,
    pub wqi_chart: ChartData,
    pub charts: Vec<ChartData>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterView {
    pub data: ParameterDashboardData,
    pub chart: ChartData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub data: ComparisonDashboardData,
    pub chart: ChartData,
}

#[derive(Clone)]
pub struct DashboardService {
    api: Arc<dyn WaterQualityApi>,
    max_points: usize,
}

impl DashboardService {
    pub fn new(api: Arc<dyn WaterQualityApi>, max_points: usize) -> Self {
        Self { api, max_points }
    }

    pub async fn overview(&self) -> ViewState<Overview> {
        let state = load(
            self.api.dashboard(),
            "Failed to load dashboard data. Please try again later.",
        )
        .await;

        state.map(|data| Overview {
            current_wqi: data.current_wqi,
            quality_category: data.quality_category.clone(),
            wqi_chart: self.fit(data.wqi_chart()),
            parameter_chart: self.fit(ChartData::new(
                "parameters".to_string(),
                "Recent Parameter Readings".to_string(),
                None,
                data.parameter_series(),
            )),
            parameter_summary: data
                .parameter_summary
                .iter()
                .map(|(key, summary)| (display_label(key), *summary))
                .collect(),
            recent_measurements: data.recent_measurements.clone(),
            recommendations: data.recommendations.grouped(),
            alerts: data.alerts,
        })
    }

    pub async fn trends(&self, days: u32, only: Option<Parameter>) -> ViewState<TrendsView> {
        let failure = match only {
            Some(parameter) => format!(
                "Failed to load {} trend data. Please try again later.",
                parameter.key()
            ),
            None => "Failed to load trend data. Please try again later.".to_string(),
        };

        load(self.api.trends(days), failure).await.map(|data| TrendsView {
            days,
            wqi_chart: self.fit(data.wqi_chart()),
            charts: data.charts(only).into_iter().map(|c| self.fit(c)).collect(),
        })
    }

    pub async fn parameter(&self, parameter: &str) -> ViewState<ParameterView> {
        load(
            self.api.parameter_dashboard(parameter),
            format!("Failed to load {} data. Please try again later.", parameter),
        )
        .await
        .map(|data| {
            let chart = self.fit(data.history_chart());
            ParameterView { data, chart }
        })
    }

    pub async fn compare(&self, locations: &[String], days: u32) -> ViewState<ComparisonView> {
        load(
            self.api.compare(locations, days),
            "Failed to load comparison data. Please try again later.",
        )
        .await
        .map(|data| {
            let chart = self.fit(data.wqi_chart());
            ComparisonView { data, chart }
        })
    }

    pub async fn measurement(&self, id: i64) -> ViewState<MeasurementDetails> {
        let result: Result<MeasurementDetails, ApiError> = self.api.measurement(id).await;
        ViewState::resolve(result, format!("Failed to load measurement {}.", id))
    }

    /// Downsample every series to the configured chart width
    fn fit(&self, mut chart: ChartData) -> ChartData {
        chart.series = chart
            .series
            .iter()
            .map(|s| s.downsampled(self.max_points))
            .collect();
        chart
    }
}
