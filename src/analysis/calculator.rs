// src/analysis/calculator.rs

//! Reorder point calculation.
//!
//! Classic continuous-review formulas, assuming i.i.d. daily demand:
//!
//! - Safety Stock  = Z * StdDev_daily * sqrt(LeadTime)
//! - Reorder Point = MeanDemand_daily * LeadTime + Safety Stock
//!
//! Figures keep full precision; rounding happens only when they are printed.

use crate::analysis::stats::{mean, sample_std_dev};
use crate::error::ReorderError;
use crate::model::policy::PolicyConstants;
use crate::model::sales::SalesSeries;
use serde::Serialize;

/// Statistics and reorder point derived for one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReorderAnalysis {
    pub average_daily_demand: f64,
    pub demand_std_dev: f64,
    pub safety_stock: f64,
    pub reorder_point: f64,
}

/// Analyzes one product's sales history under the given policy.
///
/// # Errors
/// `InvalidInput` if the series is empty, `lead_time_days` is zero or the
/// z-score is negative.
pub fn analyze(series: &SalesSeries, policy: &PolicyConstants) -> Result<ReorderAnalysis, ReorderError> {
    analyze_quantities(&series.quantities(), policy).map_err(|e| match e {
        ReorderError::InvalidInput(msg) => {
            ReorderError::InvalidInput(format!("{}: {}", series.product(), msg))
        }
        other => other,
    })
}

/// Same as [`analyze`] but over a bare slice of daily quantities.
pub fn analyze_quantities(quantities: &[u32], policy: &PolicyConstants) -> Result<ReorderAnalysis, ReorderError> {
    policy.validate()?;

    let average_daily_demand =
        mean(quantities).ok_or_else(|| ReorderError::invalid("sales history is empty"))?;
    let demand_std_dev = sample_std_dev(quantities);

    let lead_time = f64::from(policy.lead_time_days);

    // Demand uncertainty over the lead-time window (square-root-of-time rule)
    let safety_stock = policy.service_z_score * demand_std_dev * lead_time.sqrt();

    let reorder_point = average_daily_demand * lead_time + safety_stock;

    Ok(ReorderAnalysis {
        average_daily_demand,
        demand_std_dev,
        safety_stock,
        reorder_point,
    })
}
