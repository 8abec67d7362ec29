// src/model/sales.rs

use crate::error::ReorderError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Units of one product sold on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub quantity: u32,
}

impl SalesRecord {
    pub fn new(date: NaiveDate, quantity: u32) -> Self {
        Self { date, quantity }
    }
}

/// The daily sales history of a single product.
///
/// Records are ordered by date and cover consecutive calendar days with no
/// gaps and no duplicates. Quantities are unsigned, so they can never be negative.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSeries {
    product: String,
    records: Vec<SalesRecord>,
}

impl SalesSeries {
    /// Builds a series, checking that the dates form an unbroken daily sequence.
    ///
    /// An empty series is accepted here; it is the calculator that refuses it.
    pub fn new(product: impl Into<String>, records: Vec<SalesRecord>) -> Result<Self, ReorderError> {
        let product = product.into();

        for pair in records.windows(2) {
            let (prev, next) = (pair[0].date, pair[1].date);
            if prev.succ_opt() != Some(next) {
                return Err(ReorderError::invalid(format!(
                    "sales history for '{}' is not a consecutive daily sequence: {} is followed by {}",
                    product, prev, next
                )));
            }
        }

        Ok(Self { product, records })
    }

    /// Lays `quantities` out on consecutive days starting at `start`.
    pub fn from_quantities(
        product: impl Into<String>,
        start: NaiveDate,
        quantities: &[u32],
    ) -> Result<Self, ReorderError> {
        let product = product.into();
        let mut records = Vec::with_capacity(quantities.len());

        for (date, &quantity) in start.iter_days().zip(quantities) {
            records.push(SalesRecord::new(date, quantity));
        }

        if records.len() != quantities.len() {
            return Err(ReorderError::invalid(format!(
                "sales history for '{}' runs past the last representable date",
                product
            )));
        }

        Ok(Self { product, records })
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn quantities(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.quantity).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }
}
