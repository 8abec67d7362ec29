//! Reorder point planning from daily sales history.
//!
//! A [`SalesHistoryProvider`](io::provider::SalesHistoryProvider) supplies one
//! [`SalesSeries`](model::sales::SalesSeries) per product, the calculator turns each
//! series plus the [`PolicyConstants`](model::policy::PolicyConstants) into a
//! [`ReorderAnalysis`](analysis::calculator::ReorderAnalysis), and the reporting
//! module prints it.

pub mod analysis;
pub mod error;
pub mod io;
pub mod model;
pub mod planning;

pub use analysis::calculator::{analyze, analyze_quantities, ReorderAnalysis};
pub use error::ReorderError;
pub use model::policy::{PolicyConstants, ServiceLevel};
pub use model::sales::{SalesRecord, SalesSeries};
