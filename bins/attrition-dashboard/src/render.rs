//! Plain-text panels printed by the dashboard.

use attrition_rs::dataset::LabeledDataset;
use attrition_rs::metrics::ClassificationReport;
use attrition_rs::Attrition;

const TITLE: &str = "Employee Attrition Prediction Dashboard";

fn rule(width: usize) -> String {
    "=".repeat(width)
}

/// Neutral state shown before any prediction is requested.
pub fn prompt() -> String {
    format!(
        "{title}\n{rule}\n\
         Enter employee details and run `attrition-dashboard predict` to assess attrition risk.\n\
         Run `attrition-dashboard evaluate <file.csv>` to score a labelled dataset.\n",
        title = TITLE,
        rule = rule(TITLE.len()),
    )
}

/// Result panel for a single prediction.
pub fn prediction_panel(inputs: &[(&'static str, String)], outcome: Attrition) -> String {
    let width = inputs.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let mut out = format!("{}\n{}\n", TITLE, rule(TITLE.len()));
    for (label, value) in inputs {
        out.push_str(&format!("  {:<width$}  {}\n", label, value, width = width));
    }
    let banner = match outcome {
        Attrition::Yes => "[!] High Attrition Risk",
        Attrition::No => "[ok] Low Attrition Risk",
    };
    out.push_str(&format!("\n{}\nPredicted Attrition: {}\n", banner, outcome));
    out
}

/// Table of the first `rows` rows of a dataset, columns padded to fit.
pub fn preview(dataset: &LabeledDataset, rows: usize) -> String {
    let shown = &dataset.raw[..rows.min(dataset.raw.len())];
    let widths: Vec<usize> = dataset
        .headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            shown
                .iter()
                .filter_map(|row| row.get(col))
                .map(String::len)
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = format!("Dataset preview ({} of {} rows)\n", shown.len(), dataset.len());
    push_row(&mut out, dataset.headers.iter(), &widths);
    for row in shown {
        push_row(&mut out, row.iter(), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a String>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Metrics block, each ratio to two decimals.
pub fn report(report: &ClassificationReport) -> String {
    let c = &report.counts;
    format!(
        "Model Evaluation Metrics\n\
         Accuracy:  {:.2}\n\
         Precision: {:.2}\n\
         Recall:    {:.2}\n\
         F1 Score:  {:.2}\n\
         Confusion: TP={} FP={} TN={} FN={}\n",
        report.accuracy,
        report.precision,
        report.recall,
        report.f1,
        c.true_positive,
        c.false_positive,
        c.true_negative,
        c.false_negative
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrition_rs::metrics::ConfusionCounts;

    #[test]
    fn prompt_mentions_predict() {
        assert!(prompt().contains("attrition-dashboard predict"));
    }

    #[test]
    fn panels_differ_by_outcome() {
        let inputs = vec![("Age", "30".to_string()), ("Job Level", "Senior".to_string())];
        let high = prediction_panel(&inputs, Attrition::Yes);
        let low = prediction_panel(&inputs, Attrition::No);
        assert!(high.contains("High Attrition Risk"));
        assert!(!high.contains("Low Attrition Risk"));
        assert!(low.contains("Low Attrition Risk"));
        assert!(low.contains("Job Level  Senior"));
    }

    #[test]
    fn preview_is_capped() {
        let csv = "Age,Attrition\n30,No\n31,No\n32,Yes\n33,No\n34,No\n35,Yes\n36,No\n";
        let ds = LabeledDataset::from_reader(csv.as_bytes()).unwrap();
        let text = preview(&ds, 5);
        assert!(text.starts_with("Dataset preview (5 of 7 rows)"));
        assert!(text.contains("34"));
        assert!(!text.contains("35"));
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn report_uses_two_decimals() {
        let counts = ConfusionCounts {
            true_positive: 3,
            false_positive: 1,
            true_negative: 4,
            false_negative: 2,
        };
        let text = report(&counts.report());
        assert!(text.contains("Accuracy:  0.70"));
        assert!(text.contains("Precision: 0.75"));
        assert!(text.contains("Recall:    0.60"));
        assert!(text.contains("F1 Score:  0.67"));
        assert!(text.contains("TP=3 FP=1 TN=4 FN=2"));
        assert_eq!(text.lines().count(), 6);
    }
}
