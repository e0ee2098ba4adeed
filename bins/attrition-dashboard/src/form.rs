//! Bounded controls for the single-employee form.
//!
//! Numeric controls reject out-of-range values at parse time; categorical
//! controls map a fixed set of choices onto the ordinal codes the model was
//! trained on.

use attrition_rs::FeatureRecord;
use clap::{Args, ValueEnum};

macro_rules! ordinal_choice {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($label:literal, $code:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn ordinal(self) -> f64 {
                match self {
                    $(Self::$variant => $code as f64),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }
    };
}

ordinal_choice!(Education {
    BelowCollege => ("Below College", 1),
    College => ("College", 2),
    Bachelor => ("Bachelor", 3),
    Master => ("Master", 4),
    Doctor => ("Doctor", 5),
});

ordinal_choice!(JobLevel {
    EntryLevel => ("Entry Level", 1),
    Junior => ("Junior", 2),
    MidLevel => ("Mid Level", 3),
    Senior => ("Senior", 4),
    Manager => ("Manager", 5),
});

ordinal_choice!(JobSatisfaction {
    VeryDissatisfied => ("Very Dissatisfied", 1),
    Dissatisfied => ("Dissatisfied", 2),
    Satisfied => ("Satisfied", 3),
    VerySatisfied => ("Very Satisfied", 4),
});

ordinal_choice!(EnvironmentSatisfaction {
    Poor => ("Poor", 1),
    Average => ("Average", 2),
    Good => ("Good", 3),
    Excellent => ("Excellent", 4),
});

ordinal_choice!(JobInvolvement {
    Low => ("Low", 1),
    Medium => ("Medium", 2),
    High => ("High", 3),
    VeryHigh => ("Very High", 4),
});

ordinal_choice!(WorkLifeBalance {
    Poor => ("Poor", 1),
    Fair => ("Fair", 2),
    Good => ("Good", 3),
    Excellent => ("Excellent", 4),
});

ordinal_choice!(PerformanceRating {
    Low => ("Low", 1),
    Good => ("Good", 2),
    Excellent => ("Excellent", 3),
    Outstanding => ("Outstanding", 4),
});

/// Employee details entered on the command line.
#[derive(Debug, Clone, Args)]
pub struct EmployeeForm {
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(18..=60))]
    pub age: u32,

    #[arg(long, default_value_t = 5000, value_parser = clap::value_parser!(u32).range(1000..=20000))]
    pub monthly_income: u32,

    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(100..=1500))]
    pub daily_rate: u32,

    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(0..=50))]
    pub distance_from_home: u32,

    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(0..=40))]
    pub total_working_years: u32,

    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(0..=40))]
    pub years_at_company: u32,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub num_companies_worked: u32,

    #[arg(long, default_value_t = 13, value_parser = clap::value_parser!(u32).range(5..=30))]
    pub percent_salary_hike: u32,

    #[arg(long, value_enum, default_value_t = Education::BelowCollege)]
    pub education: Education,

    #[arg(long, value_enum, default_value_t = JobLevel::EntryLevel)]
    pub job_level: JobLevel,

    #[arg(long, value_enum, default_value_t = JobSatisfaction::VeryDissatisfied)]
    pub job_satisfaction: JobSatisfaction,

    #[arg(long, value_enum, default_value_t = EnvironmentSatisfaction::Poor)]
    pub environment_satisfaction: EnvironmentSatisfaction,

    #[arg(long, value_enum, default_value_t = JobInvolvement::Low)]
    pub job_involvement: JobInvolvement,

    #[arg(long, value_enum, default_value_t = WorkLifeBalance::Poor)]
    pub work_life_balance: WorkLifeBalance,

    #[arg(long, value_enum, default_value_t = PerformanceRating::Low)]
    pub performance_rating: PerformanceRating,
}

impl EmployeeForm {
    pub fn to_record(&self) -> FeatureRecord {
        FeatureRecord {
            age: f64::from(self.age),
            daily_rate: f64::from(self.daily_rate),
            distance_from_home: f64::from(self.distance_from_home),
            education: self.education.ordinal(),
            environment_satisfaction: self.environment_satisfaction.ordinal(),
            job_involvement: self.job_involvement.ordinal(),
            job_level: self.job_level.ordinal(),
            job_satisfaction: self.job_satisfaction.ordinal(),
            monthly_income: f64::from(self.monthly_income),
            num_companies_worked: f64::from(self.num_companies_worked),
            percent_salary_hike: f64::from(self.percent_salary_hike),
            performance_rating: self.performance_rating.ordinal(),
            total_working_years: f64::from(self.total_working_years),
            work_life_balance: self.work_life_balance.ordinal(),
            years_at_company: f64::from(self.years_at_company),
        }
    }

    /// Human-readable `(label, value)` pairs in form order.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Age", self.age.to_string()),
            ("Monthly Income", self.monthly_income.to_string()),
            ("Daily Rate", self.daily_rate.to_string()),
            ("Distance From Home", self.distance_from_home.to_string()),
            ("Total Working Years", self.total_working_years.to_string()),
            ("Years At Company", self.years_at_company.to_string()),
            ("Companies Worked", self.num_companies_worked.to_string()),
            ("Salary Hike %", self.percent_salary_hike.to_string()),
            ("Education", self.education.label().to_string()),
            ("Job Level", self.job_level.label().to_string()),
            ("Job Satisfaction", self.job_satisfaction.label().to_string()),
            ("Environment Satisfaction", self.environment_satisfaction.label().to_string()),
            ("Job Involvement", self.job_involvement.label().to_string()),
            ("Work-Life Balance", self.work_life_balance.label().to_string()),
            ("Performance Rating", self.performance_rating.label().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        form: EmployeeForm,
    }

    fn parse(args: &[&str]) -> Result<EmployeeForm, clap::Error> {
        Harness::try_parse_from(std::iter::once("form").chain(args.iter().copied())).map(|h| h.form)
    }

    #[test]
    fn defaults_match_form_defaults() {
        let record = parse(&[]).unwrap().to_record();
        assert_eq!(record.age, 30.0);
        assert_eq!(record.monthly_income, 5000.0);
        assert_eq!(record.daily_rate, 800.0);
        assert_eq!(record.distance_from_home, 5.0);
        assert_eq!(record.total_working_years, 8.0);
        assert_eq!(record.years_at_company, 5.0);
        assert_eq!(record.num_companies_worked, 1.0);
        assert_eq!(record.percent_salary_hike, 13.0);
        // first choice of every selector
        assert_eq!(record.education, 1.0);
        assert_eq!(record.job_level, 1.0);
        assert_eq!(record.job_satisfaction, 1.0);
        assert_eq!(record.environment_satisfaction, 1.0);
        assert_eq!(record.job_involvement, 1.0);
        assert_eq!(record.work_life_balance, 1.0);
        assert_eq!(record.performance_rating, 1.0);
    }

    #[test]
    fn selectors_map_to_ordinals() {
        let form = parse(&[
            "--education",
            "master",
            "--job-level",
            "mid-level",
            "--job-satisfaction",
            "very-satisfied",
            "--job-involvement",
            "very-high",
            "--performance-rating",
            "outstanding",
        ])
        .unwrap();
        let record = form.to_record();
        assert_eq!(record.education, 4.0);
        assert_eq!(record.job_level, 3.0);
        assert_eq!(record.job_satisfaction, 4.0);
        assert_eq!(record.job_involvement, 4.0);
        assert_eq!(record.performance_rating, 4.0);
        assert_eq!(form.job_level.label(), "Mid Level");
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(parse(&["--age", "17"]).is_err());
        assert!(parse(&["--age", "61"]).is_err());
        assert!(parse(&["--monthly-income", "999"]).is_err());
        assert!(parse(&["--num-companies-worked", "11"]).is_err());
        assert!(parse(&["--percent-salary-hike", "4"]).is_err());
        assert!(parse(&["--age", "60", "--distance-from-home", "50"]).is_ok());
    }

    #[test]
    fn unknown_choice_is_rejected() {
        assert!(parse(&["--education", "phd"]).is_err());
    }

    #[test]
    fn summary_lists_every_control() {
        let form = parse(&["--work-life-balance", "good"]).unwrap();
        let summary = form.summary();
        assert_eq!(summary.len(), attrition_rs::FEATURE_COUNT);
        assert!(summary.contains(&("Work-Life Balance", "Good".to_string())));
    }
}
