// src/planning/config.rs

//! Run configuration, loaded from TOML.
//!
//! Every section is optional; an empty file reproduces the reference run
//! (7-day lead time, 95% service level, three synthetic products, seed 42).
//!
//! ```
//! use reorder_point::planning::config::PlanningConfig;
//!
//! let config = PlanningConfig::from_toml_str(r#"
//!     [policy]
//!     lead_time_days = 10
//!     service_level = "p99"
//! "#).unwrap();
//!
//! assert_eq!(config.policy.constants().unwrap().service_z_score, 2.33);
//! ```

use crate::error::ReorderError;
use crate::io::provider::{CsvProvider, ProductProfile, SalesHistoryProvider, SyntheticProvider};
use crate::model::policy::{PolicyConstants, ServiceLevel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    pub policy: PolicyConfig,
    pub source: SourceConfig,
    /// Optional CSV file receiving the full-precision results.
    pub export: Option<PathBuf>,
}

impl PlanningConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReorderError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ReorderError> {
        Ok(toml::from_str(s)?)
    }
}

/// Lead time and service level.
///
/// The z-score is taken from, in order of precedence: `service_z_score`,
/// `service_probability`, `service_level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub lead_time_days: u32,
    pub service_level: ServiceLevel,
    pub service_probability: Option<f64>,
    pub service_z_score: Option<f64>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            lead_time_days: 7,
            service_level: ServiceLevel::default(),
            service_probability: None,
            service_z_score: None,
        }
    }
}

impl PolicyConfig {
    /// Resolves and validates the policy constants.
    pub fn constants(&self) -> Result<PolicyConstants, ReorderError> {
        let policy = if let Some(z) = self.service_z_score {
            PolicyConstants::new(self.lead_time_days, z)
        } else if let Some(p) = self.service_probability {
            PolicyConstants::with_service_probability(self.lead_time_days, p)?
        } else {
            PolicyConstants::with_service_level(self.lead_time_days, self.service_level)
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Human-readable service level for the report banner.
    pub fn service_label(&self) -> String {
        if let Some(z) = self.service_z_score {
            format!("z = {:.2}", z)
        } else if let Some(p) = self.service_probability {
            format!("{:.1}%", p * 100.0)
        } else {
            self.service_level.label().to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Synthetic,
    Csv,
}

/// Where the sales history comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// CSV file, required when `kind = "csv"`.
    pub path: Option<PathBuf>,
    pub seed: u64,
    pub start_date: NaiveDate,
    pub days: usize,
    pub products: Vec<ProductProfile>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Synthetic,
            path: None,
            seed: 42,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
            days: 30,
            products: ProductProfile::reference_set(),
        }
    }
}

impl SourceConfig {
    pub fn provider(&self) -> Result<Box<dyn SalesHistoryProvider>, ReorderError> {
        match self.kind {
            SourceKind::Synthetic => Ok(Box::new(SyntheticProvider::new(
                self.seed,
                self.start_date,
                self.days,
                self.products.clone(),
            ))),
            SourceKind::Csv => {
                let path = self
                    .path
                    .as_ref()
                    .ok_or_else(|| ReorderError::invalid("source.path is required for a CSV source"))?;
                Ok(Box::new(CsvProvider::new(path)))
            }
        }
    }
}
