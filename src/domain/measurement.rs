// Measurement domain models
use crate::domain::parameter::Parameter;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Input submitted by the measurement form. Ranges mirror `Parameter::input_range`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "readings_are_finite", skip_on_field_errors = false))]
pub struct WaterQualityInput {
    #[validate(range(min = 0.0, max = 40.0))]
    pub temperature: f64,
    #[validate(range(min = 0.0, max = 14.0))]
    pub dissolved_oxygen: f64,
    #[validate(range(min = 0.0, max = 14.0))]
    pub ph: f64,
    #[validate(range(min = 0.0, max = 2000.0))]
    pub conductivity: f64,
    #[validate(range(min = 0.0, max = 30.0))]
    pub bod: f64,
    #[validate(range(min = 0.0, max = 50.0))]
    pub nitrate: f64,
    #[validate(range(min = 0.0, max = 500.0))]
    pub fecal_coliform: f64,
    #[validate(range(min = 0.0, max = 1000.0))]
    pub total_coliform: f64,
}

impl Default for WaterQualityInput {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            dissolved_oxygen: 7.0,
            ph: 7.0,
            conductivity: 500.0,
            bod: 5.0,
            nitrate: 10.0,
            fecal_coliform: 100.0,
            total_coliform: 200.0,
        }
    }
}

impl WaterQualityInput {
    pub fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Temperature => self.temperature,
            Parameter::DissolvedOxygen => self.dissolved_oxygen,
            Parameter::Ph => self.ph,
            Parameter::Conductivity => self.conductivity,
            Parameter::Bod => self.bod,
            Parameter::Nitrate => self.nitrate,
            Parameter::FecalColiform => self.fecal_coliform,
            Parameter::TotalColiform => self.total_coliform,
        }
    }

    /// Validates every field, returning one message per offending field
    pub fn check(&self) -> Result<(), Vec<FieldError>> {
        self.validate().map_err(|errors| field_errors(&errors))
    }
}

fn readings_are_finite(input: &WaterQualityInput) -> Result<(), ValidationError> {
    let all_finite = Parameter::ALL
        .iter()
        .all(|p| input.value(*p).is_finite());
    if all_finite {
        Ok(())
    } else {
        Err(ValidationError::new("not_finite"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut result: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .map(|(field, _)| {
            let field = field.to_string();
            let message = match Parameter::from_key(&field) {
                Some(parameter) => {
                    let (min, max) = parameter.input_range();
                    format!("{} must be between {} and {}", parameter.display_name(), min, max)
                }
                None => "All values must be finite numbers".to_string(),
            };
            FieldError { field, message }
        })
        .collect();

    // HashMap order is unstable; keep output in catalog order
    result.sort_by_key(|e| {
        Parameter::ALL
            .iter()
            .position(|p| p.key() == e.field)
            .unwrap_or(usize::MAX)
    });
    result
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterReadings {
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub dissolved_oxygen: f64,
    #[serde(default)]
    pub ph: f64,
    #[serde(default)]
    pub conductivity: f64,
    #[serde(default)]
    pub bod: f64,
    #[serde(default)]
    pub nitrate: f64,
    #[serde(default)]
    pub fecal_coliform: f64,
    #[serde(default)]
    pub total_coliform: f64,
}

impl ParameterReadings {
    pub fn entries(&self) -> Vec<(Parameter, f64)> {
        vec![
            (Parameter::Temperature, self.temperature),
            (Parameter::DissolvedOxygen, self.dissolved_oxygen),
            (Parameter::Ph, self.ph),
            (Parameter::Conductivity, self.conductivity),
            (Parameter::Bod, self.bod),
            (Parameter::Nitrate, self.nitrate),
            (Parameter::FecalColiform, self.fecal_coliform),
            (Parameter::TotalColiform, self.total_coliform),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeasurementDetails {
    pub id: i64,
    #[serde(default)]
    pub location: String,
    pub timestamp: String,
    pub wqi_value: f64,
    #[serde(default)]
    pub quality_category: String,
    #[serde(default)]
    pub parameters: ParameterReadings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecentMeasurement {
    pub id: i64,
    pub timestamp: String,
    pub wqi_value: f64,
    #[serde(default)]
    pub quality_category: String,
    #[serde(default)]
    pub parameters: ParameterReadings,
}

/// Short date label for chart axes; falls back to the raw timestamp
pub fn date_label(timestamp: &str) -> String {
    if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(timestamp) {
        return parsed.format("%Y-%m-%d").to_string();
    }
    if let Ok(parsed) = chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%Y-%m-%d").to_string();
    }
    timestamp.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_input_is_valid() {
        assert!(WaterQualityInput::default().check().is_ok());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let input = WaterQualityInput {
            temperature: 40.0,
            ph: 0.0,
            total_coliform: 1000.0,
            ..Default::default()
        };
        assert!(input.check().is_ok());
    }

    #[test]
    fn test_out_of_range_fields_reported_in_catalog_order() {
        let input = WaterQualityInput {
            nitrate: 51.0,
            temperature: -1.0,
            ..Default::default()
        };
        let errors = input.check().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["temperature", "nitrate"]);
        assert_eq!(errors[0].message, "Temperature must be between 0 and 40");
    }

    #[test]
    fn test_non_finite_rejected() {
        let input = WaterQualityInput {
            conductivity: f64::NAN,
            ..Default::default()
        };
        let errors = input.check().unwrap_err();
        assert_eq!(
            errors.last().map(|e| e.message.as_str()),
            Some("All values must be finite numbers")
        );
    }

    #[test]
    fn test_infinite_reading_reports_range_and_finiteness() {
        let input = WaterQualityInput {
            bod: f64::INFINITY,
            ..Default::default()
        };
        let errors = input.check().unwrap_err();
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Biochemical Oxygen Demand must be between 0 and 30",
                "All values must be finite numbers",
            ]
        );
    }

    #[test]
    fn test_measurement_details_missing_optional_fields() {
        let json = r#"{"id": 7, "timestamp": "2024-03-01T10:00:00", "wqi_value": 71.5}"#;
        let details: MeasurementDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.id, 7);
        assert_eq!(details.location, "");
        assert_eq!(details.parameters, ParameterReadings::default());
    }

    #[test]
    fn test_date_label() {
        assert_eq!(date_label("2024-03-01T10:00:00Z"), "2024-03-01");
        assert_eq!(date_label("2024-03-01T10:00:00.123"), "2024-03-01");
        assert_eq!(date_label("yesterday"), "yesterday");
    }
}
