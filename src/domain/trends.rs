// Trend series returned by the analytics API
use super::chart::{ChartData, ChartPoint, SeriesData};
use super::parameter::{display_label, Parameter};
use serde::Deserialize;
use std::collections::BTreeMap;

pub const DEFAULT_TREND_DAYS: u32 = 30;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrendData {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, Vec<f64>>,
    #[serde(default)]
    pub wqi_values: Vec<f64>,
}

impl TrendData {
    /// Chart for one parameter key. Dates without a value plot as zero.
    pub fn chart_for(&self, key: &str) -> ChartData {
        let values = self.parameters.get(key);
        let points = self
            .dates
            .iter()
            .enumerate()
            .map(|(i, date)| {
                let value = values.and_then(|v| v.get(i)).copied().unwrap_or(0.0);
                ChartPoint::new(date.clone(), value)
            })
            .collect();

        let name = display_label(key);
        let unit = Parameter::from_key(key)
            .and_then(|p| p.unit())
            .map(str::to_string);

        ChartData::new(
            key.to_string(),
            name.clone(),
            unit,
            vec![SeriesData::new(key.to_string(), name, points)],
        )
    }

    pub fn wqi_chart(&self) -> ChartData {
        let points = self
            .dates
            .iter()
            .zip(self.wqi_values.iter())
            .map(|(date, value)| ChartPoint::new(date.clone(), *value))
            .collect();

        ChartData::new(
            "wqi".to_string(),
            "Water Quality Index".to_string(),
            None,
            vec![SeriesData::new("wqi".to_string(), "WQI".to_string(), points)],
        )
    }

    /// Charts for the requested parameters, or for every catalog parameter
    pub fn charts(&self, only: Option<Parameter>) -> Vec<ChartData> {
        match only {
            Some(parameter) => vec![self.chart_for(&self.key_for(parameter))],
            None => Parameter::ALL
                .iter()
                .map(|p| self.chart_for(&self.key_for(*p)))
                .collect(),
        }
    }

    /// Server key for a parameter, honoring legacy keys when present
    fn key_for(&self, parameter: Parameter) -> String {
        self.parameters
            .keys()
            .find(|k| Parameter::from_key(k) == Some(parameter))
            .cloned()
            .unwrap_or_else(|| parameter.key().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trends() -> TrendData {
        TrendData {
            dates: vec!["2024-03-01".into(), "2024-03-02".into(), "2024-03-03".into()],
            parameters: BTreeMap::from([
                ("ph".to_string(), vec![7.0, 7.2]),
                ("D_O".to_string(), vec![8.0, 8.1, 8.3]),
            ]),
            wqi_values: vec![70.0, 71.0, 69.5],
        }
    }

    #[test]
    fn test_missing_values_plot_as_zero() {
        let chart = trends().chart_for("ph");
        let values: Vec<f64> = chart.series[0].points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![7.0, 7.2, 0.0]);

        let absent = trends().chart_for("nitrate");
        assert!(absent.series[0].points.iter().all(|p| p.value == 0.0));
        assert_eq!(absent.unit.as_deref(), Some("mg/L"));
    }

    #[test]
    fn test_legacy_key_resolves_to_display_name() {
        let charts = trends().charts(Some(Parameter::DissolvedOxygen));
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].title, "Dissolved Oxygen");
        assert_eq!(charts[0].series[0].points[2].value, 8.3);
    }

    #[test]
    fn test_all_charts_follow_catalog() {
        let charts = trends().charts(None);
        assert_eq!(charts.len(), Parameter::ALL.len());
        assert_eq!(charts[0].title, "Temperature");
    }

    #[test]
    fn test_wqi_chart() {
        let chart = trends().wqi_chart();
        assert_eq!(chart.series[0].points.len(), 3);
    }
}
