//! Labelled CSV datasets for bulk evaluation.
//!
//! Rows are kept as flat JSON payloads so they can be sent to the scoring
//! service verbatim; field validation is the service's job.

use std::io::Read;
use std::path::Path;

use serde_json::{Map, Number, Value};

use crate::error::AttritionError;
use crate::types::Attrition;

/// Name of the ground-truth column.
pub const LABEL_COLUMN: &str = "Attrition";

/// One employee row with its ground-truth outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRow {
    /// Every column except the label, keyed by header name.
    pub features: Map<String, Value>,
    /// Ground truth.
    pub truth: Attrition,
}

/// A validated evaluation dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDataset {
    /// Header row, label column included, in file order.
    pub headers: Vec<String>,
    /// Data rows, in file order.
    pub rows: Vec<LabeledRow>,
    /// Raw cells in file order, kept for previews.
    pub raw: Vec<Vec<String>>,
}

impl LabeledDataset {
    /// Read a CSV file with a header row.
    pub fn from_path(path: &Path) -> Result<Self, AttritionError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Read CSV from any reader.
    ///
    /// Fails without partial output when the label column is absent, a
    /// label is not `Yes`/`No`, a row is ragged, or there are no rows.
    pub fn from_reader(reader: impl Read) -> Result<Self, AttritionError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        let label_idx = headers
            .iter()
            .position(|h| h == LABEL_COLUMN)
            .ok_or_else(|| {
                AttritionError::UploadValidation(format!(
                    "dataset must contain '{}' column",
                    LABEL_COLUMN
                ))
            })?;

        let mut rows = Vec::new();
        let mut raw = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row_num = i + 1;
            let truth = record[label_idx].parse::<Attrition>().map_err(|e| {
                AttritionError::UploadValidation(format!("row {}: {} {}", row_num, LABEL_COLUMN, e))
            })?;

            let features = headers
                .iter()
                .zip(record.iter())
                .enumerate()
                .filter(|&(col, _)| col != label_idx)
                .map(|(_, (name, cell))| (name.clone(), cell_value(cell)))
                .collect();

            rows.push(LabeledRow { features, truth });
            raw.push(record.iter().map(str::to_string).collect());
        }

        if rows.is_empty() {
            return Err(AttritionError::UploadValidation("dataset has no rows".into()));
        }

        Ok(Self { headers, rows, raw })
    }

    /// Number of data rows, header excluded.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always `false` for a dataset that passed validation.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ground truth in binary form (`Yes = 1`, `No = 0`), in row order.
    pub fn truth_binary(&self) -> Vec<u8> {
        self.rows.iter().map(|r| r.truth.as_binary()).collect()
    }
}

/// Integers stay integers, other numbers become floats, everything else is
/// kept as a string.
fn cell_value(cell: &str) -> Value {
    if let Ok(i) = cell.parse::<i64>() {
        return Value::Number(i.into());
    }
    match cell.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(cell.to_string()),
    }
}
