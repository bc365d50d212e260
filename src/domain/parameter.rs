// Measured water quality parameters
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Temperature,
    DissolvedOxygen,
    Ph,
    Conductivity,
    Bod,
    Nitrate,
    FecalColiform,
    TotalColiform,
}

impl Parameter {
    pub const ALL: [Parameter; 8] = [
        Parameter::Temperature,
        Parameter::DissolvedOxygen,
        Parameter::Ph,
        Parameter::Conductivity,
        Parameter::Bod,
        Parameter::Nitrate,
        Parameter::FecalColiform,
        Parameter::TotalColiform,
    ];

    /// Key used by the remote API in JSON bodies and paths
    pub fn key(&self) -> &'static str {
        match self {
            Parameter::Temperature => "temperature",
            Parameter::DissolvedOxygen => "dissolved_oxygen",
            Parameter::Ph => "ph",
            Parameter::Conductivity => "conductivity",
            Parameter::Bod => "bod",
            Parameter::Nitrate => "nitrate",
            Parameter::FecalColiform => "fecal_coliform",
            Parameter::TotalColiform => "total_coliform",
        }
    }

    pub fn slug(&self) -> String {
        self.key().replace('_', "-")
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Parameter::Temperature => "Temperature",
            Parameter::DissolvedOxygen => "Dissolved Oxygen",
            Parameter::Ph => "pH",
            Parameter::Conductivity => "Conductivity",
            Parameter::Bod => "Biochemical Oxygen Demand",
            Parameter::Nitrate => "Nitrate",
            Parameter::FecalColiform => "Fecal Coliform",
            Parameter::TotalColiform => "Total Coliform",
        }
    }

    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Parameter::Temperature => Some("°C"),
            Parameter::DissolvedOxygen | Parameter::Bod | Parameter::Nitrate => Some("mg/L"),
            Parameter::Ph => None,
            Parameter::Conductivity => Some("µS/cm"),
            Parameter::FecalColiform | Parameter::TotalColiform => Some("MPN/100mL"),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Parameter::Temperature => "Water temperature",
            Parameter::DissolvedOxygen => "Amount of oxygen dissolved in water",
            Parameter::Ph => "Measure of acidity or alkalinity",
            Parameter::Conductivity => "Ability to conduct electricity",
            Parameter::Bod => "Amount of oxygen consumed by organisms",
            Parameter::Nitrate => "Nitrogen-containing compound",
            Parameter::FecalColiform => "Bacteria from fecal matter",
            Parameter::TotalColiform => "Group of bacteria found in water",
        }
    }

    /// Inclusive range accepted by the measurement form
    pub fn input_range(&self) -> (f64, f64) {
        match self {
            Parameter::Temperature => (0.0, 40.0),
            Parameter::DissolvedOxygen => (0.0, 14.0),
            Parameter::Ph => (0.0, 14.0),
            Parameter::Conductivity => (0.0, 2000.0),
            Parameter::Bod => (0.0, 30.0),
            Parameter::Nitrate => (0.0, 50.0),
            Parameter::FecalColiform => (0.0, 500.0),
            Parameter::TotalColiform => (0.0, 1000.0),
        }
    }

    pub fn from_key(key: &str) -> Option<Parameter> {
        key.parse().ok()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown parameter: {0}")]
pub struct UnknownParameter(pub String);

impl FromStr for Parameter {
    type Err = UnknownParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Older trend payloads use D_O and B_O_D
        match s {
            "D_O" => return Ok(Parameter::DissolvedOxygen),
            "B_O_D" => return Ok(Parameter::Bod),
            _ => {}
        }

        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Parameter::ALL
            .into_iter()
            .find(|p| {
                p.key() == normalized
                    || p.display_name().to_lowercase().replace(' ', "_") == normalized
            })
            .ok_or_else(|| UnknownParameter(s.to_string()))
    }
}

/// Human-readable label for any server-side parameter key
pub fn display_label(key: &str) -> String {
    match Parameter::from_key(key) {
        Some(parameter) => parameter.display_name().to_string(),
        None => key.replace('_', " "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_slug_and_name() {
        assert_eq!("dissolved_oxygen".parse(), Ok(Parameter::DissolvedOxygen));
        assert_eq!("dissolved-oxygen".parse(), Ok(Parameter::DissolvedOxygen));
        assert_eq!("Dissolved Oxygen".parse(), Ok(Parameter::DissolvedOxygen));
        assert_eq!("PH".parse(), Ok(Parameter::Ph));
        assert_eq!("biochemical oxygen demand".parse(), Ok(Parameter::Bod));
    }

    #[test]
    fn test_parse_legacy_trend_keys() {
        assert_eq!("D_O".parse(), Ok(Parameter::DissolvedOxygen));
        assert_eq!("B_O_D".parse(), Ok(Parameter::Bod));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "turbidity".parse::<Parameter>(),
            Err(UnknownParameter("turbidity".to_string()))
        );
    }

    #[test]
    fn test_display_label_falls_back_to_key() {
        assert_eq!(display_label("total_coliform"), "Total Coliform");
        assert_eq!(display_label("free_chlorine"), "free chlorine");
    }

    #[test]
    fn test_slug() {
        assert_eq!(Parameter::FecalColiform.slug(), "fecal-coliform");
    }
}
