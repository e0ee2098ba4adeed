/// Errors returned by attrition-rs operations.
#[derive(Debug, thiserror::Error)]
pub enum AttritionError {
    /// A required feature field was absent from a record.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A feature value could not be coerced to a finite number.
    #[error("field {field} is not numeric: {value}")]
    TypeConversion {
        /// Name of the offending field.
        field: &'static str,
        /// The value as received, rendered for diagnostics.
        value: String,
    },

    /// A classifier file could not be loaded due to format issues.
    #[error("model format error: {0}")]
    ModelFormatError(String),

    /// A scaler range file could not be loaded due to format issues.
    #[error("scaler format error at line {line}: {message}")]
    ScalerFormatError {
        /// 1-based line number where the error occurred.
        line: usize,
        /// Description of the parse failure.
        message: String,
    },

    /// A scaler target interval was empty, inverted or non-finite.
    #[error("inconsistent lower/upper bounds: {lower} {upper}")]
    InvalidScalerBounds {
        /// Requested lower bound.
        lower: f64,
        /// Requested upper bound.
        upper: f64,
    },

    /// An uploaded evaluation dataset failed validation.
    #[error("invalid dataset: {0}")]
    UploadValidation(String),

    /// Scaling or classification produced an unusable result.
    #[error("internal scoring error: {0}")]
    Internal(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader rejected the input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AttritionError {
    /// Whether the error was caused by the caller's input rather than by
    /// the loaded artifacts or the scoring code.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AttritionError::MissingField(_) | AttritionError::TypeConversion { .. }
        )
    }

    /// Name of the feature field the error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AttritionError::MissingField(field) => Some(field),
            AttritionError::TypeConversion { field, .. } => Some(field),
            _ => None,
        }
    }
}
