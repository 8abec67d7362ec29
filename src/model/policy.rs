// src/model/policy.rs

use crate::analysis::stats::inverse_normal_cdf;
use crate::error::ReorderError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Named service levels and the z-scores planners conventionally use for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ServiceLevel {
    #[serde(rename = "p90")]
    #[value(name = "p90")]
    P90,
    #[default]
    #[serde(rename = "p95")]
    #[value(name = "p95")]
    P95,
    #[serde(rename = "p97_5")]
    #[value(name = "p97_5")]
    P97_5,
    #[serde(rename = "p99")]
    #[value(name = "p99")]
    P99,
    #[serde(rename = "p99_9")]
    #[value(name = "p99_9")]
    P99_9,
}

impl ServiceLevel {
    /// Table z-score, rounded the way inventory textbooks print it.
    pub fn z_score(self) -> f64 {
        match self {
            ServiceLevel::P90 => 1.28,
            ServiceLevel::P95 => 1.65,
            ServiceLevel::P97_5 => 1.96,
            ServiceLevel::P99 => 2.33,
            ServiceLevel::P99_9 => 3.09,
        }
    }

    /// Target probability of not stocking out during lead time.
    pub fn probability(self) -> f64 {
        match self {
            ServiceLevel::P90 => 0.90,
            ServiceLevel::P95 => 0.95,
            ServiceLevel::P97_5 => 0.975,
            ServiceLevel::P99 => 0.99,
            ServiceLevel::P99_9 => 0.999,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceLevel::P90 => "90%",
            ServiceLevel::P95 => "95%",
            ServiceLevel::P97_5 => "97.5%",
            ServiceLevel::P99 => "99%",
            ServiceLevel::P99_9 => "99.9%",
        }
    }
}

/// The two global inputs of the reorder point formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyConstants {
    /// Days between placing a purchase order and receiving the stock.
    pub lead_time_days: u32,
    /// Standard deviations of buffer held against lead-time demand.
    pub service_z_score: f64,
}

impl Default for PolicyConstants {
    fn default() -> Self {
        Self {
            lead_time_days: 7,
            service_z_score: ServiceLevel::P95.z_score(),
        }
    }
}

impl PolicyConstants {
    pub fn new(lead_time_days: u32, service_z_score: f64) -> Self {
        Self {
            lead_time_days,
            service_z_score,
        }
    }

    pub fn with_service_level(lead_time_days: u32, level: ServiceLevel) -> Self {
        Self::new(lead_time_days, level.z_score())
    }

    /// Derives the z-score from a target in-stock probability in (0, 1).
    pub fn with_service_probability(lead_time_days: u32, probability: f64) -> Result<Self, ReorderError> {
        if !(probability > 0.0 && probability < 1.0) {
            return Err(ReorderError::invalid(format!(
                "service probability must lie strictly between 0 and 1, got {}",
                probability
            )));
        }
        Ok(Self::new(lead_time_days, inverse_normal_cdf(probability)))
    }

    pub fn validate(&self) -> Result<(), ReorderError> {
        if self.lead_time_days == 0 {
            return Err(ReorderError::invalid("lead_time_days must be positive"));
        }
        if !self.service_z_score.is_finite() || self.service_z_score < 0.0 {
            return Err(ReorderError::invalid(format!(
                "service_z_score must be a finite, non-negative number, got {}",
                self.service_z_score
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_seven_days_at_ninety_five_percent() {
        let policy = PolicyConstants::default();

        assert_eq!(policy.lead_time_days, 7);
        assert_eq!(policy.service_z_score, 1.65);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn service_level_table() {
        assert_eq!(ServiceLevel::P90.z_score(), 1.28);
        assert_eq!(ServiceLevel::P97_5.z_score(), 1.96);
        assert_eq!(ServiceLevel::P99.label(), "99%");
        assert_eq!(ServiceLevel::default(), ServiceLevel::P95);
    }

    #[test]
    fn probability_is_converted_through_the_normal_quantile() {
        let policy = PolicyConstants::with_service_probability(7, 0.95).unwrap();
        assert!((policy.service_z_score - 1.645).abs() < 1e-2);

        assert!(PolicyConstants::with_service_probability(7, 1.0).is_err());
        assert!(PolicyConstants::with_service_probability(7, 0.0).is_err());
    }

    #[test]
    fn invalid_constants_are_rejected() {
        assert!(PolicyConstants::new(0, 1.65).validate().unwrap_err().is_invalid_input());
        assert!(PolicyConstants::new(7, -0.1).validate().is_err());
        assert!(PolicyConstants::new(7, f64::NAN).validate().is_err());
        assert!(PolicyConstants::new(7, 0.0).validate().is_ok());
    }
}
