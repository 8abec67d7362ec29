// src/planning/engine.rs

use crate::analysis::calculator::{analyze, ReorderAnalysis};
use crate::error::ReorderError;
use crate::io::provider::SalesHistoryProvider;
use crate::model::policy::PolicyConstants;
use tracing::{debug, info, warn};

/// Result of planning one product.
#[derive(Debug)]
pub struct ProductOutcome {
    pub product: String,
    pub result: Result<ReorderAnalysis, ReorderError>,
}

impl ProductOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// One planning pass: pull the history once, then analyze every product under the same policy.
pub struct PlanningRun {
    policy: PolicyConstants,
    provider: Box<dyn SalesHistoryProvider>,
}

impl PlanningRun {
    pub fn new(policy: PolicyConstants, provider: Box<dyn SalesHistoryProvider>) -> Self {
        Self { policy, provider }
    }

    pub fn policy(&self) -> &PolicyConstants {
        &self.policy
    }

    /// Runs the analysis for every product in source order.
    ///
    /// A provider failure aborts the whole run. A bad product only fails its
    /// own outcome; the remaining products are still analyzed.
    pub fn run(&self) -> Result<Vec<ProductOutcome>, ReorderError> {
        let history = self.provider.sales_history()?;
        info!(
            products = history.len(),
            lead_time_days = self.policy.lead_time_days,
            z = self.policy.service_z_score,
            "planning reorder points"
        );

        let mut outcomes = Vec::with_capacity(history.len());
        for series in &history {
            let result = analyze(series, &self.policy);

            match &result {
                Ok(analysis) => debug!(
                    product = series.product(),
                    days = series.len(),
                    reorder_point = analysis.reorder_point,
                    "analyzed"
                ),
                Err(e) => warn!(product = series.product(), error = %e, "product skipped"),
            }

            outcomes.push(ProductOutcome {
                product: series.product().to_string(),
                result,
            });
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::provider::{CsvProvider, InMemoryProvider, ProductProfile, SyntheticProvider};
    use crate::model::sales::SalesSeries;
    use chrono::NaiveDate;

    fn jan_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn empty_product_fails_alone_and_order_is_kept() {
        let history = vec![
            SalesSeries::from_quantities("First", jan_first(), &[10, 10, 10, 10, 10]).unwrap(),
            SalesSeries::from_quantities("Hollow", jan_first(), &[]).unwrap(),
            SalesSeries::from_quantities("Last", jan_first(), &[3]).unwrap(),
        ];
        let run = PlanningRun::new(PolicyConstants::default(), Box::new(InMemoryProvider::new(history)));

        let outcomes = run.run().unwrap();
        let names: Vec<&str> = outcomes.iter().map(|o| o.product.as_str()).collect();
        assert_eq!(names, vec!["First", "Hollow", "Last"]);

        assert_eq!(outcomes[0].result.as_ref().unwrap().reorder_point, 70.0);
        assert!(outcomes[1].result.as_ref().unwrap_err().is_invalid_input());
        assert_eq!(outcomes[2].result.as_ref().unwrap().reorder_point, 21.0);
    }

    #[test]
    fn invalid_policy_fails_every_product() {
        let provider = SyntheticProvider::new(42, jan_first(), 30, ProductProfile::reference_set());
        let run = PlanningRun::new(PolicyConstants::new(0, 1.65), Box::new(provider));

        let outcomes = run.run().unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| !o.is_ok()));
    }

    #[test]
    fn provider_failure_aborts_the_run() {
        let run = PlanningRun::new(
            PolicyConstants::default(),
            Box::new(CsvProvider::new("/no/such/history.csv")),
        );

        assert!(matches!(run.run(), Err(ReorderError::Io(_))));
    }

    #[test]
    fn reference_run_produces_plausible_reorder_points() {
        let provider = SyntheticProvider::new(42, jan_first(), 30, ProductProfile::reference_set());
        let run = PlanningRun::new(PolicyConstants::default(), Box::new(provider));

        let outcomes = run.run().unwrap();
        for outcome in &outcomes {
            let analysis = outcome.result.as_ref().unwrap();
            assert!(analysis.reorder_point >= analysis.average_daily_demand * 7.0);
            assert!(analysis.safety_stock >= 0.0);
        }

        // Product_C sells roughly 150 a day, far more than Product_A's 50
        assert!(outcomes[2].result.as_ref().unwrap().reorder_point > outcomes[0].result.as_ref().unwrap().reorder_point);
    }
}
