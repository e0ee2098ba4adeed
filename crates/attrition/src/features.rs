//! The fixed-schema employee feature record.
//!
//! Wire payloads are flat JSON objects keyed by field name, in any order.
//! The model consumes the same values as a dense vector whose order is
//! [`FEATURE_NAMES`]; feature index `i + 1` in the model and scaler files
//! refers to `FEATURE_NAMES[i]`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AttritionError;

/// Number of features the classifier and scaler were fit on.
pub const FEATURE_COUNT: usize = 15;

/// Field names in model input order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Age",
    "DailyRate",
    "DistanceFromHome",
    "Education",
    "EnvironmentSatisfaction",
    "JobInvolvement",
    "JobLevel",
    "JobSatisfaction",
    "MonthlyIncome",
    "NumCompaniesWorked",
    "PercentSalaryHike",
    "PerformanceRating",
    "TotalWorkingYears",
    "WorkLifeBalance",
    "YearsAtCompany",
];

/// Employee attributes scored by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeatureRecord {
    /// Age in years.
    pub age: f64,
    /// Daily pay rate.
    pub daily_rate: f64,
    /// Commute distance.
    pub distance_from_home: f64,
    /// Education level, 1 (below college) to 5 (doctor).
    pub education: f64,
    /// Work environment satisfaction, 1 to 4.
    pub environment_satisfaction: f64,
    /// Job involvement, 1 to 4.
    pub job_involvement: f64,
    /// Job level, 1 to 5.
    pub job_level: f64,
    /// Job satisfaction, 1 to 4.
    pub job_satisfaction: f64,
    /// Monthly income.
    pub monthly_income: f64,
    /// Number of previous employers.
    pub num_companies_worked: f64,
    /// Last salary increase in percent.
    pub percent_salary_hike: f64,
    /// Performance rating, 1 to 4.
    pub performance_rating: f64,
    /// Total years of work experience.
    pub total_working_years: f64,
    /// Work-life balance, 1 to 4.
    pub work_life_balance: f64,
    /// Years with the current employer.
    pub years_at_company: f64,
}

impl FeatureRecord {
    /// Build a record from values given in model input order.
    pub fn from_values(v: [f64; FEATURE_COUNT]) -> Self {
        Self {
            age: v[0],
            daily_rate: v[1],
            distance_from_home: v[2],
            education: v[3],
            environment_satisfaction: v[4],
            job_involvement: v[5],
            job_level: v[6],
            job_satisfaction: v[7],
            monthly_income: v[8],
            num_companies_worked: v[9],
            percent_salary_hike: v[10],
            performance_rating: v[11],
            total_working_years: v[12],
            work_life_balance: v[13],
            years_at_company: v[14],
        }
    }

    /// Values in model input order.
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age,
            self.daily_rate,
            self.distance_from_home,
            self.education,
            self.environment_satisfaction,
            self.job_involvement,
            self.job_level,
            self.job_satisfaction,
            self.monthly_income,
            self.num_companies_worked,
            self.percent_salary_hike,
            self.performance_rating,
            self.total_working_years,
            self.work_life_balance,
            self.years_at_company,
        ]
    }

    /// Validate a flat JSON object into a record.
    ///
    /// Fields are checked in model order, so the first missing or
    /// non-numeric field in that order is the one reported. Keys outside
    /// the schema are ignored.
    pub fn from_json_map(map: &Map<String, Value>) -> Result<Self, AttritionError> {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, &name) in values.iter_mut().zip(FEATURE_NAMES.iter()) {
            let raw = map.get(name).ok_or(AttritionError::MissingField(name))?;
            *slot = coerce_numeric(name, raw)?;
        }
        Ok(Self::from_values(values))
    }
}

/// Coerce a JSON value to a finite `f64`.
///
/// Numbers are taken as-is; strings are accepted when they parse as a
/// number after trimming. Everything else is a conversion error.
pub fn coerce_numeric(field: &'static str, raw: &Value) -> Result<f64, AttritionError> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(AttritionError::TypeConversion {
            field,
            value: raw.to_string(),
        }),
    }
}
