// Terminal rendering - every view renders to a String for the handlers to print
use crate::application::dashboard_service::{ComparisonView, Overview, ParameterView, TrendsView};
use crate::domain::chart::{ChartData, ChartKind};
use crate::domain::measurement::{date_label, MeasurementDetails};
use crate::domain::parameter::{display_label, Parameter};
use crate::domain::prediction::{AlertVariant, GroupedRecommendation, WaterQualityPrediction};
use colored::Colorize;
use std::fmt::Write;

const SERIES_GLYPHS: [char; 6] = ['*', 'o', '+', 'x', '#', '@'];
const RECENT_ROWS: usize = 5;

/// Plots every series of `chart` on a grid `height` rows tall
pub fn render_chart(chart: &ChartData, height: usize) -> String {
    tracing::trace!("Rendering chart {} ({} series)", chart.id, chart.series.len());
    let mut out = String::new();
    let title = match &chart.unit {
        Some(unit) => format!("{} ({})", chart.title, unit),
        None => chart.title.clone(),
    };
    let _ = writeln!(out, "{}", title.bold());

    let Some((mut lo, mut hi)) = chart.y_bounds() else {
        let _ = writeln!(out, "  No data available");
        return out;
    };
    if chart.is_empty() {
        let _ = writeln!(out, "  No data available");
        return out;
    }
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }

    let height = height.max(2);
    let width = chart.series.iter().map(|s| s.points.len()).max().unwrap_or(0);
    let row_of = |value: f64| -> usize {
        let scaled = (value - lo) / (hi - lo) * (height - 1) as f64;
        (height - 1).saturating_sub(scaled.round().max(0.0) as usize)
    };

    let mut grid = vec![vec![' '; width]; height];
    for line in &chart.reference_lines {
        let row = row_of(line.value);
        for cell in grid[row].iter_mut() {
            *cell = '-';
        }
    }
    for (idx, series) in chart.series.iter().enumerate() {
        let glyph = SERIES_GLYPHS[idx % SERIES_GLYPHS.len()];
        for (col, point) in series.points.iter().enumerate() {
            if point.value.is_finite() {
                grid[row_of(point.value)][col] = glyph;
            }
        }
    }

    let digits = chart.fraction_digits;
    let top = format!("{:.*}", digits, hi);
    let bottom = format!("{:.*}", digits, lo);
    let axis_width = top.len().max(bottom.len());

    for (i, row) in grid.iter().enumerate() {
        let label = if i == 0 {
            top.as_str()
        } else if i == height - 1 {
            bottom.as_str()
        } else {
            ""
        };
        let cells: String = row.iter().collect();
        let _ = writeln!(out, "  {:>w$} |{}", label, cells, w = axis_width);
    }
    let _ = writeln!(out, "  {:>w$} +{}", "", "-".repeat(width), w = axis_width);

    if let Some(first) = chart.series.iter().find(|s| !s.points.is_empty()) {
        let start = &first.points[0].label;
        let end = &first.points[first.points.len() - 1].label;
        let gap = width.saturating_sub(start.len() + end.len()).max(1);
        let _ = writeln!(
            out,
            "  {:>w$}  {}{}{}",
            "",
            start,
            " ".repeat(gap),
            end,
            w = axis_width
        );
    }

    if chart.kind == ChartKind::MultiLine {
        let _ = writeln!(out, "  Legend:");
    }
    for (idx, series) in chart.series.iter().enumerate() {
        let glyph = SERIES_GLYPHS[idx % SERIES_GLYPHS.len()];
        let latest = series
            .latest()
            .map(|p| format!(" (latest {:.*})", digits, p.value))
            .unwrap_or_default();
        let _ = writeln!(out, "  {} {}{}", glyph, series.name, latest);
    }
    for line in &chart.reference_lines {
        let _ = writeln!(out, "  - {} ({:.*})", line.label, digits, line.value);
    }

    out
}

pub fn render_overview(overview: &Overview, height: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Water Quality Dashboard".bold().cyan());
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(
        out,
        "  {} {:.1}",
        "Current WQI:".bold(),
        overview.current_wqi
    );
    let _ = writeln!(
        out,
        "  {} {}",
        "Quality:    ".bold(),
        overview.quality_category
    );
    let _ = writeln!(out);

    out.push_str(&render_chart(&overview.wqi_chart, height));
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", "Parameter Summary".bold().cyan());
    if overview.parameter_summary.is_empty() {
        let _ = writeln!(out, "  No parameter data");
    }
    for (name, summary) in &overview.parameter_summary {
        let _ = writeln!(
            out,
            "  {:<28} {:>10.2} (avg: {:.2}, range: {:.2} - {:.2})",
            name, summary.current, summary.avg, summary.min, summary.max
        );
    }
    let _ = writeln!(out);

    out.push_str(&render_chart(&overview.parameter_chart, height));
    let _ = writeln!(out);

    if !overview.recent_measurements.is_empty() {
        let _ = writeln!(out, "{}", "Recent Measurements".bold().cyan());
        for m in overview.recent_measurements.iter().rev().take(RECENT_ROWS) {
            let _ = writeln!(
                out,
                "  #{:<6} {:<12} {:>6.1}  {}",
                m.id,
                date_label(&m.timestamp),
                m.wqi_value,
                m.quality_category
            );
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{}", "Recommendations".bold().cyan());
    if overview.recommendations.is_empty() {
        let _ = writeln!(out, "  No recommendations at this time");
    }
    for (category, groups) in &overview.recommendations {
        let _ = writeln!(out, "  {}", humanize(category).to_uppercase().bold());
        for group in groups {
            let heading = format!(
                "{} - {}",
                humanize(&group.parameter),
                group.severity.to_uppercase()
            );
            let _ = writeln!(out, "    {}", emphasize(&heading, AlertVariant::for_severity(&group.severity)));
            out.push_str(&render_recommendation_body(group, true));
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", "Alerts".bold().cyan());
    if overview.alerts.is_empty() {
        let _ = writeln!(out, "  No active alerts");
    }
    for alert in &overview.alerts {
        let text = format!(
            "[{}] {}: {}",
            alert.severity.to_uppercase(),
            display_label(&alert.parameter),
            alert.message
        );
        let _ = writeln!(out, "  {}", emphasize(&text, AlertVariant::for_severity(&alert.severity)));
    }

    out
}

pub fn render_trends(view: &TrendsView, height: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!("Water Quality Trends (last {} days)", view.days).bold().cyan()
    );
    let _ = writeln!(out);
    out.push_str(&render_chart(&view.wqi_chart, height));
    for chart in &view.charts {
        let _ = writeln!(out);
        out.push_str(&render_chart(chart, height));
    }
    out
}

pub fn render_parameter(view: &ParameterView, height: usize) -> String {
    let data = &view.data;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!("{} Analysis", data.display_name()).bold().cyan()
    );
    let _ = writeln!(out);

    let status = if data.threshold_info.is_within_range {
        "Within acceptable range".green()
    } else {
        "Outside acceptable range".red()
    };
    let _ = writeln!(out, "  {} {:.2}", "Current Value:".bold(), data.current_value);
    let _ = writeln!(out, "  {}", status);
    let _ = writeln!(out, "  {} {:.2}", "Average:      ".bold(), data.statistics.avg);
    let _ = writeln!(
        out,
        "  ±{:.2} standard deviation",
        data.statistics.std_dev
    );
    let _ = writeln!(
        out,
        "  {} {:.2} - {:.2}",
        "Range:        ".bold(),
        data.statistics.min,
        data.statistics.max
    );
    let _ = writeln!(
        out,
        "  Acceptable: {} - {}",
        data.threshold_info.min_acceptable, data.threshold_info.max_acceptable
    );
    let _ = writeln!(out);

    out.push_str(&render_chart(&view.chart, height));
    out
}

pub fn render_comparison(view: &ComparisonView, height: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Location Comparison".bold().cyan());
    let _ = writeln!(out);
    out.push_str(&render_chart(&view.chart, height));
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", "Parameter Averages".bold().cyan());
    for location in &view.data.locations {
        let _ = writeln!(out, "  {}", location.bold());
        match view.data.parameter_averages.get(location) {
            Some(averages) if !averages.is_empty() => {
                for (key, value) in averages {
                    let _ = writeln!(out, "    {:<28} {:>10.2}", display_label(key), value);
                }
            }
            _ => {
                let _ = writeln!(out, "    No data available");
            }
        }
    }
    out
}

pub fn render_measurement(details: &MeasurementDetails) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("Measurement #{}", details.id).bold().cyan());
    if !details.location.is_empty() {
        let _ = writeln!(out, "  {} {}", "Location:".bold(), details.location);
    }
    let _ = writeln!(out, "  {} {}", "Taken:   ".bold(), details.timestamp);
    let _ = writeln!(
        out,
        "  {} {:.1} - {}",
        "WQI:     ".bold(),
        details.wqi_value,
        details.quality_category
    );
    for (parameter, value) in details.parameters.entries() {
        let _ = writeln!(out, "    {:<28} {:>10.2}{}", parameter.display_name(), value, unit_suffix(parameter));
    }
    out
}

pub fn render_prediction(prediction: &WaterQualityPrediction) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Analysis Results".bold().cyan());
    let _ = writeln!(
        out,
        "  {} {:.1} - {}",
        "Water Quality Index:".bold(),
        prediction.wqi_value,
        prediction.quality_category
    );
    let potable = if prediction.is_potable {
        "potable".green()
    } else {
        "not potable".red()
    };
    let _ = writeln!(
        out,
        "  The water is {} with a confidence of {:.1}%.",
        potable,
        prediction.confidence_percent()
    );

    if !prediction.parameters.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "Parameters".bold().cyan());
        for (key, value) in &prediction.parameters {
            let _ = writeln!(out, "    {:<28} {:>10.2}", humanize(key), value);
        }
    }

    if !prediction.recommendations.is_empty() {
        let grouped = prediction.recommendations.grouped();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "Recommendations".bold().cyan());
        for (category, groups) in &grouped {
            let _ = writeln!(out, "  {}", humanize(category).to_uppercase().bold());
            for group in groups {
                let within = group.is_within_range();
                let status = if within {
                    "WITHIN RANGE".to_string()
                } else {
                    group.severity.clone()
                };
                let heading = format!("{} - {}", group.parameter.to_uppercase(), status);
                let _ = writeln!(
                    out,
                    "    {}",
                    emphasize(&heading, AlertVariant::for_recommendation(group))
                );
                out.push_str(&render_recommendation_body(group, !within));
            }
        }
    }

    out
}

pub fn render_catalog() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Water Quality Parameters".bold().cyan());
    for parameter in Parameter::ALL {
        let (min, max) = parameter.input_range();
        let _ = writeln!(
            out,
            "  {:<18} {:<28} {:<38} {}-{}{}",
            parameter.slug(),
            parameter.display_name().bold(),
            parameter.description(),
            min,
            max,
            unit_suffix(parameter)
        );
    }
    out
}

fn render_recommendation_body(group: &GroupedRecommendation, show_implications: bool) -> String {
    let mut out = String::new();
    if !group.description.is_empty() {
        let _ = writeln!(out, "      {}", group.description);
    }
    if show_implications && !group.health_implications.is_empty() {
        let _ = writeln!(out, "      Health implications:");
        for implication in &group.health_implications {
            let _ = writeln!(out, "        • {}", implication);
        }
    }
    let range = match group.acceptable_range {
        Some((min, max)) => format!("{} - {}", min, max),
        None => "Not specified".to_string(),
    };
    let _ = writeln!(
        out,
        "      Current: {}  Acceptable Range: {}",
        group.current_value, range
    );
    for action in &group.actions {
        let _ = writeln!(out, "        {}: {}", humanize(&action.priority), action.action);
    }
    out
}

fn emphasize(text: &str, variant: AlertVariant) -> String {
    match variant {
        AlertVariant::Destructive => text.red().bold().to_string(),
        AlertVariant::Default => text.yellow().to_string(),
    }
}

fn humanize(key: &str) -> String {
    key.replace('_', " ")
}

fn unit_suffix(parameter: Parameter) -> String {
    parameter
        .unit()
        .map(|u| format!(" {}", u))
        .unwrap_or_default()
}
