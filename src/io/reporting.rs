// src/io/reporting.rs

use crate::analysis::calculator::ReorderAnalysis;
use crate::error::ReorderError;
use crate::model::policy::PolicyConstants;
use crate::planning::engine::ProductOutcome;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// One exported row: a product, the policy it was planned under, and the full-precision figures.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRecord<'a> {
    pub product: &'a str,
    pub lead_time_days: u32,
    pub service_z_score: f64,
    pub average_daily_demand: f64,
    pub demand_std_dev: f64,
    pub safety_stock: f64,
    pub reorder_point: f64,
}

/// Banner printed once before the per-product blocks.
///
/// `service_label` describes the service level, e.g. "95%".
pub fn render_header(policy: &PolicyConstants, service_label: &str) -> String {
    format!(
        "--- SUPPLY CHAIN INVENTORY OPTIMIZATION MODEL ---\n\n\
         Assumptions: {}-Day Lead Time | {} Service Level Target\n",
        policy.lead_time_days, service_label
    )
}

/// Renders the text block for one product. Figures are rounded to whole units here and only here.
pub fn render_analysis(product: &str, analysis: &ReorderAnalysis) -> String {
    format!(
        "[{}] Analysis:\n\
         \x20 > Avg Daily Demand:  {:.0} units\n\
         \x20 > Demand Volatility: {:.0} units (Std Dev)\n\
         \x20 > Safety Stock:      {:.0} units required\n\
         \x20 > REORDER POINT:     Trigger new PO when inventory drops to {:.0} units\n",
        product,
        analysis.average_daily_demand,
        analysis.demand_std_dev,
        analysis.safety_stock,
        analysis.reorder_point
    )
}

/// Writes every successful analysis to a CSV file. Failed products are skipped.
///
/// Returns the number of rows written.
pub fn write_analysis_csv(
    file_path: impl AsRef<Path>,
    policy: &PolicyConstants,
    outcomes: &[ProductOutcome],
) -> Result<usize, ReorderError> {
    let mut wtr = csv::Writer::from_path(file_path.as_ref())?;

    let mut rows = 0;
    for outcome in outcomes {
        if let Ok(analysis) = &outcome.result {
            wtr.serialize(AnalysisRecord {
                product: &outcome.product,
                lead_time_days: policy.lead_time_days,
                service_z_score: policy.service_z_score,
                average_daily_demand: analysis.average_daily_demand,
                demand_std_dev: analysis.demand_std_dev,
                safety_stock: analysis.safety_stock,
                reorder_point: analysis.reorder_point,
            })?;
            rows += 1;
        }
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!(
        rows,
        path = %file_path.as_ref().display(),
        "exported reorder analysis"
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::calculator::analyze_quantities;

    #[test]
    fn renders_the_flat_demand_block() {
        let analysis = analyze_quantities(&[10, 10, 10, 10, 10], &PolicyConstants::default()).unwrap();

        let expected = "\
[Product_A] Analysis:
  > Avg Daily Demand:  10 units
  > Demand Volatility: 0 units (Std Dev)
  > Safety Stock:      0 units required
  > REORDER POINT:     Trigger new PO when inventory drops to 70 units
";
        assert_eq!(render_analysis("Product_A", &analysis), expected);
    }

    #[test]
    fn rounds_to_whole_units_only_when_rendering() {
        let analysis = ReorderAnalysis {
            average_daily_demand: 49.6,
            demand_std_dev: 4.4,
            safety_stock: 19.21,
            reorder_point: 366.41,
        };

        let text = render_analysis("X", &analysis);
        assert!(text.contains("Avg Daily Demand:  50 units"));
        assert!(text.contains("Demand Volatility: 4 units"));
        assert!(text.contains("Safety Stock:      19 units"));
        assert!(text.contains("drops to 366 units"));
    }

    #[test]
    fn header_names_lead_time_and_service_level() {
        let header = render_header(&PolicyConstants::default(), "95%");

        assert!(header.starts_with("--- SUPPLY CHAIN INVENTORY OPTIMIZATION MODEL ---\n"));
        assert!(header.contains("Assumptions: 7-Day Lead Time | 95% Service Level Target"));
    }

    #[test]
    fn csv_export_skips_failed_products() {
        let policy = PolicyConstants::default();
        let outcomes = vec![
            ProductOutcome {
                product: "Good".to_string(),
                result: analyze_quantities(&[10, 10], &policy),
            },
            ProductOutcome {
                product: "Empty".to_string(),
                result: analyze_quantities(&[], &policy),
            },
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reorder_points.csv");
        let rows = write_analysis_csv(&path, &policy, &outcomes).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        assert_eq!(rows, 1);
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("product,lead_time_days,service_z_score,average_daily_demand,demand_std_dev,safety_stock,reorder_point")
        );
        assert!(lines.next().unwrap().starts_with("Good,7,1.65,10"));
        assert_eq!(lines.next(), None);
    }
}
