// Prediction and recommendation domain models
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WaterQualityPrediction {
    pub is_potable: bool,
    pub confidence: f64,
    pub wqi_value: f64,
    #[serde(default)]
    pub quality_category: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
    #[serde(default)]
    pub recommendations: RecommendationSet,
}

impl WaterQualityPrediction {
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecommendationSet {
    #[serde(default)]
    pub immediate: Vec<Recommendation>,
    #[serde(default)]
    pub short_term: Vec<Recommendation>,
    #[serde(default)]
    pub long_term: Vec<Recommendation>,
    #[serde(default)]
    pub preventive: Vec<Recommendation>,
}

impl RecommendationSet {
    pub fn categories(&self) -> [(&'static str, &[Recommendation]); 4] {
        [
            ("immediate", self.immediate.as_slice()),
            ("short_term", self.short_term.as_slice()),
            ("long_term", self.long_term.as_slice()),
            ("preventive", self.preventive.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.categories().iter().all(|(_, recs)| recs.is_empty())
    }

    /// Non-empty categories with their recommendations grouped for display
    pub fn grouped(&self) -> Vec<(&'static str, Vec<GroupedRecommendation>)> {
        self.categories()
            .into_iter()
            .filter(|(_, recs)| !recs.is_empty())
            .map(|(category, recs)| (category, group_recommendations(recs)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recommendation {
    pub parameter: String,
    pub severity: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub health_implications: Vec<String>,
    #[serde(default)]
    pub current_value: f64,
    #[serde(default)]
    pub acceptable_range: Option<(f64, f64)>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub priority: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendedAction {
    pub priority: String,
    pub action: String,
}

/// Recommendations sharing a parameter and severity, merged into one entry
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedRecommendation {
    pub parameter: String,
    pub severity: String,
    pub description: String,
    pub health_implications: Vec<String>,
    pub current_value: f64,
    pub acceptable_range: Option<(f64, f64)>,
    pub actions: Vec<RecommendedAction>,
}

impl GroupedRecommendation {
    pub fn is_within_range(&self) -> bool {
        match self.acceptable_range {
            Some((min, max)) => self.current_value >= min && self.current_value <= max,
            None => false,
        }
    }
}

/// Groups by (parameter, severity), keeping first-seen order. The first
/// recommendation of a group supplies its descriptive fields.
pub fn group_recommendations(recs: &[Recommendation]) -> Vec<GroupedRecommendation> {
    let mut groups: Vec<GroupedRecommendation> = Vec::new();

    for rec in recs {
        let action = RecommendedAction {
            priority: rec.priority.clone(),
            action: rec.action.clone(),
        };

        match groups
            .iter_mut()
            .find(|g| g.parameter == rec.parameter && g.severity == rec.severity)
        {
            Some(group) => group.actions.push(action),
            None => groups.push(GroupedRecommendation {
                parameter: rec.parameter.clone(),
                severity: rec.severity.clone(),
                description: rec.description.clone(),
                health_implications: rec.health_implications.clone(),
                current_value: rec.current_value,
                acceptable_range: rec.acceptable_range,
                actions: vec![action],
            }),
        }
    }

    groups
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertVariant {
    Default,
    Destructive,
}

impl AlertVariant {
    /// Emphasis used for analysis results: in-range values are never destructive
    pub fn for_recommendation(rec: &GroupedRecommendation) -> Self {
        if rec.is_within_range() {
            return AlertVariant::Default;
        }
        match rec.severity.to_lowercase().as_str() {
            "critical" | "severe" | "moderate" => AlertVariant::Destructive,
            _ => AlertVariant::Default,
        }
    }

    /// Emphasis used on the overview for alerts and recommendations
    pub fn for_severity(severity: &str) -> Self {
        if severity.eq_ignore_ascii_case("high") {
            AlertVariant::Destructive
        } else {
            AlertVariant::Default
        }
    }
}
