//! Credit default spread lookup by interest coverage
//!
//! The table mirrors the synthetic-rating approach: interest coverage maps to
//! a rating band, each band carrying a default spread over the risk-free
//! rate. Bands are half-open `[lower, upper)`, ordered, and non-overlapping;
//! a coverage ratio outside every band is a configuration error rather than a
//! silent fallthrough.

use crate::error::ValuationError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One (lower bound, upper bound, spread) band of the table
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpreadBand {
    /// Inclusive lower coverage bound
    pub lower: f64,

    /// Exclusive upper coverage bound
    pub upper: f64,

    /// Default spread for coverage ratios in this band (decimal)
    pub spread: f64,
}

impl SpreadBand {
    fn contains(&self, coverage: f64) -> bool {
        coverage >= self.lower && coverage < self.upper
    }
}

/// Ordered credit-spread band table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditSpreadTable {
    bands: Vec<SpreadBand>,
}

impl CreditSpreadTable {
    /// Build a table, checking ordering and non-overlap
    pub fn new(bands: Vec<SpreadBand>) -> Result<Self, ValuationError> {
        if bands.is_empty() {
            return Err(ValuationError::InvalidConfiguration(
                "credit spread table has no bands".to_string(),
            ));
        }
        for band in &bands {
            if band.lower >= band.upper {
                return Err(ValuationError::InvalidConfiguration(format!(
                    "credit spread band [{}, {}) is empty",
                    band.lower, band.upper
                )));
            }
        }
        for pair in bands.windows(2) {
            if pair[1].lower < pair[0].upper {
                return Err(ValuationError::InvalidConfiguration(format!(
                    "credit spread bands [{}, {}) and [{}, {}) overlap or are out of order",
                    pair[0].lower, pair[0].upper, pair[1].lower, pair[1].upper
                )));
            }
        }
        Ok(Self { bands })
    }

    /// Default large-cap synthetic-rating table (AAA at the bottom right)
    pub fn default_table() -> Self {
        let bands = vec![
            SpreadBand { lower: -100_000.0, upper: 0.2, spread: 0.1934 },
            SpreadBand { lower: 0.2, upper: 0.65, spread: 0.1478 },
            SpreadBand { lower: 0.65, upper: 0.8, spread: 0.1057 },
            SpreadBand { lower: 0.8, upper: 1.25, spread: 0.0702 },
            SpreadBand { lower: 1.25, upper: 1.5, spread: 0.0526 },
            SpreadBand { lower: 1.5, upper: 1.75, spread: 0.0344 },
            SpreadBand { lower: 1.75, upper: 2.0, spread: 0.0295 },
            SpreadBand { lower: 2.0, upper: 2.25, spread: 0.0213 },
            SpreadBand { lower: 2.25, upper: 2.5, spread: 0.0178 },
            SpreadBand { lower: 2.5, upper: 3.0, spread: 0.0157 },
            SpreadBand { lower: 3.0, upper: 4.25, spread: 0.0127 },
            SpreadBand { lower: 4.25, upper: 5.5, spread: 0.0114 },
            SpreadBand { lower: 5.5, upper: 6.5, spread: 0.0098 },
            SpreadBand { lower: 6.5, upper: 8.5, spread: 0.0078 },
            SpreadBand { lower: 8.5, upper: 100_000.0, spread: 0.0059 },
        ];
        Self::new(bands).expect("default spread table is well-formed")
    }

    /// Load a table from a CSV file with columns `lower,upper,spread`
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Load a table from any reader
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> anyhow::Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut bands = Vec::new();
        for result in csv_reader.deserialize() {
            let band: SpreadBand = result?;
            bands.push(band);
        }
        Ok(Self::new(bands)?)
    }

    /// Default spread for an interest coverage ratio
    ///
    /// Returns the first band containing the coverage; no match is a
    /// configuration error (a table that fails to cover the observed ratio).
    pub fn spread_for(&self, coverage: f64) -> Result<f64, ValuationError> {
        self.bands
            .iter()
            .find(|band| band.contains(coverage))
            .map(|band| band.spread)
            .ok_or_else(|| {
                ValuationError::InvalidConfiguration(format!(
                    "no credit spread band covers interest coverage {:.4}",
                    coverage
                ))
            })
    }

    /// The lowest spread in the table (the best rating band)
    pub fn lowest_spread(&self) -> f64 {
        self.bands
            .iter()
            .map(|band| band.spread)
            .fold(f64::INFINITY, f64::min)
    }
}

impl Default for CreditSpreadTable {
    fn default() -> Self {
        Self::default_table()
    }
}
