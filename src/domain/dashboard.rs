// Dashboard domain models
use super::chart::{ChartData, ChartPoint, ReferenceLine, SeriesData};
use super::measurement::{date_label, RecentMeasurement};
use super::parameter::{display_label, Parameter};
use super::prediction::RecommendationSet;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardData {
    pub current_wqi: f64,
    #[serde(default)]
    pub quality_category: String,
    #[serde(default)]
    pub parameter_summary: BTreeMap<String, ParameterSummary>,
    #[serde(default)]
    pub recent_measurements: Vec<RecentMeasurement>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub recommendations: RecommendationSet,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ParameterSummary {
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Alert {
    #[serde(default)]
    pub parameter: String,
    pub severity: String,
    pub message: String,
}

impl DashboardData {
    /// WQI over the recent measurements, in the order the server returned them
    pub fn wqi_chart(&self) -> ChartData {
        let points = self
            .recent_measurements
            .iter()
            .map(|m| ChartPoint::new(date_label(&m.timestamp), m.wqi_value))
            .collect();

        ChartData::new(
            "wqi".to_string(),
            "Water Quality Trends".to_string(),
            None,
            vec![SeriesData::new("wqi".to_string(), "WQI".to_string(), points)],
        )
    }

    /// One series per parameter taken from the recent measurements
    pub fn parameter_series(&self) -> Vec<SeriesData> {
        Parameter::ALL
            .iter()
            .map(|parameter| {
                let points = self
                    .recent_measurements
                    .iter()
                    .map(|m| {
                        let value = m
                            .parameters
                            .entries()
                            .into_iter()
                            .find(|(p, _)| p == parameter)
                            .map(|(_, v)| v)
                            .unwrap_or_default();
                        ChartPoint::new(date_label(&m.timestamp), value)
                    })
                    .collect();
                SeriesData::new(
                    parameter.key().to_string(),
                    parameter.display_name().to_string(),
                    points,
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterDashboardData {
    pub parameter: String,
    pub current_value: f64,
    #[serde(default)]
    pub historical_values: HistoricalValues,
    #[serde(default)]
    pub statistics: ParameterStatistics,
    pub threshold_info: ThresholdInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HistoricalValues {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ParameterStatistics {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ThresholdInfo {
    pub min_acceptable: f64,
    pub max_acceptable: f64,
    pub is_within_range: bool,
}

impl ParameterDashboardData {
    pub fn display_name(&self) -> String {
        display_label(&self.parameter)
    }

    /// Historical values with the acceptable thresholds as reference lines
    pub fn history_chart(&self) -> ChartData {
        let points = self
            .historical_values
            .dates
            .iter()
            .zip(self.historical_values.values.iter())
            .map(|(date, value)| ChartPoint::new(date.clone(), *value))
            .collect();

        let unit = Parameter::from_key(&self.parameter)
            .and_then(|p| p.unit())
            .map(str::to_string);

        ChartData::new(
            self.parameter.clone(),
            "Historical Values".to_string(),
            unit,
            vec![SeriesData::new(
                self.parameter.clone(),
                self.display_name(),
                points,
            )],
        )
        .with_reference_line(ReferenceLine::new(
            "Min Threshold",
            self.threshold_info.min_acceptable,
        ))
        .with_reference_line(ReferenceLine::new(
            "Max Threshold",
            self.threshold_info.max_acceptable,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComparisonDashboardData {
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub wqi_values: BTreeMap<String, Vec<f64>>,
    #[serde(default)]
    pub parameter_averages: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ComparisonDashboardData {
    /// One WQI series per requested location; missing values plot as zero
    pub fn wqi_chart(&self) -> ChartData {
        let series = self
            .locations
            .iter()
            .map(|location| {
                let values = self.wqi_values.get(location);
                let points = self
                    .dates
                    .iter()
                    .enumerate()
                    .map(|(i, date)| {
                        let value = values.and_then(|v| v.get(i)).copied().unwrap_or(0.0);
                        ChartPoint::new(date.clone(), value)
                    })
                    .collect();
                SeriesData::new(location.clone(), location.clone(), points)
            })
            .collect();

        ChartData::new(
            "compare".to_string(),
            "WQI by Location".to_string(),
            None,
            series,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_decodes_and_builds_wqi_chart() {
        let json = r#"{
            "current_wqi": 72.4,
            "quality_category": "Good",
            "parameter_summary": {"ph": {"current": 7.1, "min": 6.8, "max": 7.6, "avg": 7.2}},
            "recent_measurements": [
                {"id": 1, "timestamp": "2024-03-01T08:00:00Z", "wqi_value": 70.0,
                 "parameters": {"ph": 7.0, "nitrate": 4.0}},
                {"id": 2, "timestamp": "2024-03-02T08:00:00Z", "wqi_value": 74.0}
            ],
            "alerts": [{"parameter": "ph", "severity": "high", "message": "pH spike"}]
        }"#;

        let data: DashboardData = serde_json::from_str(json).unwrap();
        assert_eq!(data.parameter_summary["ph"].avg, 7.2);
        assert!(data.recommendations.is_empty());

        let chart = data.wqi_chart();
        assert_eq!(chart.series[0].points[0], ChartPoint::new("2024-03-01", 70.0));
        assert_eq!(chart.series[0].latest().map(|p| p.value), Some(74.0));

        let series = data.parameter_series();
        let nitrate = series.iter().find(|s| s.id == "nitrate").unwrap();
        assert_eq!(nitrate.points[0].value, 4.0);
        assert_eq!(nitrate.points[1].value, 0.0);
    }

    #[test]
    fn test_history_chart_has_threshold_lines() {
        let data = ParameterDashboardData {
            parameter: "ph".to_string(),
            current_value: 7.4,
            historical_values: HistoricalValues {
                dates: vec!["2024-03-01".into(), "2024-03-02".into(), "2024-03-03".into()],
                values: vec![7.0, 7.4],
            },
            statistics: ParameterStatistics::default(),
            threshold_info: ThresholdInfo {
                min_acceptable: 6.5,
                max_acceptable: 8.5,
                is_within_range: true,
            },
        };

        let chart = data.history_chart();
        assert_eq!(chart.series[0].name, "pH");
        assert_eq!(chart.series[0].points.len(), 2);
        assert_eq!(
            chart.reference_lines,
            vec![
                ReferenceLine::new("Min Threshold", 6.5),
                ReferenceLine::new("Max Threshold", 8.5),
            ]
        );
        assert_eq!(chart.y_bounds(), Some((6.5, 8.5)));
    }

    #[test]
    fn test_comparison_chart_fills_gaps() {
        let data = ComparisonDashboardData {
            locations: vec!["north".into(), "south".into()],
            dates: vec!["d1".into(), "d2".into()],
            wqi_values: BTreeMap::from([("north".to_string(), vec![60.0])]),
            parameter_averages: BTreeMap::new(),
        };

        let chart = data.wqi_chart();
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].points[1].value, 0.0);
        assert!(chart.series[1].points.iter().all(|p| p.value == 0.0));
    }
}
