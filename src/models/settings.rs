use serde::{Deserialize, Serialize};

pub const MIN_RISK_PERCENT: f64 = 0.1;
pub const MAX_RISK_PERCENT: f64 = 10.0;
pub const RISK_PERCENT_STEP: f64 = 0.1;
pub const DEFAULT_RISK_PERCENT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub risk_percent: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            risk_percent: DEFAULT_RISK_PERCENT,
            created_at: 0,
            updated_at: 0,
        }
    }
}

impl Settings {
    /// Risk per trade must lie in [0.1, 10.0] and sit on the 0.1 grid.
    pub fn validate_risk_percent(value: f64) -> Result<(), String> {
        if !value.is_finite() || !(MIN_RISK_PERCENT..=MAX_RISK_PERCENT).contains(&value) {
            return Err(format!(
                "risk_percent must be between {} and {}, got {}",
                MIN_RISK_PERCENT, MAX_RISK_PERCENT, value
            ));
        }

        let steps = value / RISK_PERCENT_STEP;
        if (steps - steps.round()).abs() > 1e-6 {
            return Err(format!(
                "risk_percent must be a multiple of {}, got {}",
                RISK_PERCENT_STEP, value
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSettingsInput {
    pub risk_percent: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_percent_bounds() {
        assert!(Settings::validate_risk_percent(0.1).is_ok());
        assert!(Settings::validate_risk_percent(10.0).is_ok());
        assert!(Settings::validate_risk_percent(2.5).is_ok());
        assert!(Settings::validate_risk_percent(0.3).is_ok());

        assert!(Settings::validate_risk_percent(0.05).is_err());
        assert!(Settings::validate_risk_percent(10.5).is_err());
        assert!(Settings::validate_risk_percent(f64::NAN).is_err());
    }

    #[test]
    fn test_risk_percent_step() {
        assert!(Settings::validate_risk_percent(0.15).is_err());
        assert!(Settings::validate_risk_percent(1.25).is_err());
    }

    #[test]
    fn test_default_is_valid() {
        let settings = Settings::default();
        assert!(Settings::validate_risk_percent(settings.risk_percent).is_ok());
    }
}
