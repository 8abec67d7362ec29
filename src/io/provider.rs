// src/io/provider.rs

use crate::error::ReorderError;
use crate::model::sales::{SalesRecord, SalesSeries};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Source of per-product daily sales history.
///
/// The calculator only ever sees the resulting [`SalesSeries`], so any origin
/// (synthetic, file, database) can sit behind this trait.
pub trait SalesHistoryProvider: Debug {
    /// Returns one series per product, in source order.
    fn sales_history(&self) -> Result<Vec<SalesSeries>, ReorderError>;
}

// =========================================================================
// 1. Synthetic (Normal) History
// =========================================================================

/// Demand shape of one synthetic product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductProfile {
    pub name: String,
    pub mean: f64,
    pub std_dev: f64,
}

impl ProductProfile {
    pub fn new(name: impl Into<String>, mean: f64, std_dev: f64) -> Self {
        Self {
            name: name.into(),
            mean,
            std_dev,
        }
    }

    /// Rejects profiles the normal generator cannot sample sensibly.
    pub fn validate(&self) -> Result<(), ReorderError> {
        if !self.mean.is_finite() {
            return Err(ReorderError::invalid(format!(
                "demand mean for '{}' must be finite, got {}",
                self.name, self.mean
            )));
        }
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(ReorderError::invalid(format!(
                "demand std_dev for '{}' must be finite and non-negative, got {}",
                self.name, self.std_dev
            )));
        }
        Ok(())
    }

    /// The three reference products: steady, erratic and high-volume.
    pub fn reference_set() -> Vec<ProductProfile> {
        vec![
            ProductProfile::new("Product_A", 50.0, 5.0),
            ProductProfile::new("Product_B", 20.0, 12.0),
            ProductProfile::new("Product_C", 150.0, 25.0),
        ]
    }
}

/// Generates daily sales from a Normal (Bell Curve) distribution per product.
///
/// The generator is seeded, so the same provider always yields the same history.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    pub seed: u64,
    pub start_date: NaiveDate,
    pub days: usize,
    pub products: Vec<ProductProfile>,
}

impl SyntheticProvider {
    pub fn new(seed: u64, start_date: NaiveDate, days: usize, products: Vec<ProductProfile>) -> Self {
        Self {
            seed,
            start_date,
            days,
            products,
        }
    }
}

impl SalesHistoryProvider for SyntheticProvider {
    fn sales_history(&self) -> Result<Vec<SalesSeries>, ReorderError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut history = Vec::with_capacity(self.products.len());

        for profile in &self.products {
            profile.validate()?;
            let normal = Normal::new(profile.mean, profile.std_dev).map_err(|e| {
                ReorderError::invalid(format!("bad demand profile for '{}': {}", profile.name, e))
            })?;

            let mut quantities = Vec::with_capacity(self.days);
            for _ in 0..self.days {
                let val: f64 = normal.sample(&mut rng);

                // Truncate toward zero, then clamp negative days to 0.
                // Clamping (rather than redrawing) biases the mean of erratic
                // low-volume products upward; accepted.
                let whole = val.trunc();
                if whole <= 0.0 {
                    quantities.push(0);
                } else {
                    quantities.push(whole as u32);
                }
            }

            debug!(product = %profile.name, days = self.days, "generated synthetic sales");
            history.push(SalesSeries::from_quantities(
                profile.name.clone(),
                self.start_date,
                &quantities,
            )?);
        }

        Ok(history)
    }
}

// =========================================================================
// 2. CSV History
// =========================================================================

// One line of `date,product,quantity`
#[derive(Debug, Deserialize)]
struct SalesRow {
    date: NaiveDate,
    product: String,
    quantity: i64,
}

/// Reads long-format sales history (`date,product,quantity`) from a CSV file.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    path: PathBuf,
}

impl CsvProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SalesHistoryProvider for CsvProvider {
    fn sales_history(&self) -> Result<Vec<SalesSeries>, ReorderError> {
        debug!(path = %self.path.display(), "reading sales history");
        let file = std::fs::File::open(&self.path)?;
        read_sales_csv(file)
    }
}

/// Parses CSV sales history from any reader.
///
/// Products come back in order of first appearance. Rows may be in any
/// order; each product's days must still form an unbroken sequence.
pub fn read_sales_csv<R: Read>(reader: R) -> Result<Vec<SalesSeries>, ReorderError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut order: Vec<(String, Vec<SalesRecord>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rdr.deserialize() {
        let row: SalesRow = row?;

        let quantity = if row.quantity < 0 {
            warn!(
                product = %row.product,
                date = %row.date,
                quantity = row.quantity,
                "negative sales clamped to 0"
            );
            0
        } else {
            u32::try_from(row.quantity).map_err(|_| {
                ReorderError::invalid(format!(
                    "quantity {} for '{}' on {} is out of range",
                    row.quantity, row.product, row.date
                ))
            })?
        };

        let slot = match index.get(&row.product) {
            Some(&i) => i,
            None => {
                index.insert(row.product.clone(), order.len());
                order.push((row.product.clone(), Vec::new()));
                order.len() - 1
            }
        };
        order[slot].1.push(SalesRecord::new(row.date, quantity));
    }

    let mut history = Vec::with_capacity(order.len());
    for (product, mut records) in order {
        records.sort_by_key(|r| r.date);
        debug!(product = %product, days = records.len(), "loaded sales from CSV");
        history.push(SalesSeries::new(product, records)?);
    }

    Ok(history)
}

// =========================================================================
// 3. In-Memory History
// =========================================================================

/// Hands out a fixed, already-built history.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    series: Vec<SalesSeries>,
}

impl InMemoryProvider {
    pub fn new(series: Vec<SalesSeries>) -> Self {
        Self { series }
    }
}

impl SalesHistoryProvider for InMemoryProvider {
    fn sales_history(&self) -> Result<Vec<SalesSeries>, ReorderError> {
        Ok(self.series.clone())
    }
}
