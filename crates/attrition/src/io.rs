//! Readers for the two scoring artifacts.
//!
//! - The classifier is a LIBSVM model file as written by `svm-train`.
//! - The scaler is a range file as written by `svm-scale -s`.

use std::io::BufRead;
use std::path::Path;

use crate::error::AttritionError;
use crate::features::FEATURE_COUNT;
use crate::scale::{FeatureRange, FeatureScaler};
use crate::types::*;

// ─── Keyword tables ─────────────────────────────────────────────────

fn str_to_svm_type(s: &str) -> Result<SvmType, String> {
    match s {
        "c_svc" => Ok(SvmType::CSvc),
        "nu_svc" => Ok(SvmType::NuSvc),
        "one_class" | "epsilon_svr" | "nu_svr" => {
            Err(format!("svm_type {} is not a classifier", s))
        }
        _ => Err(format!("unknown svm_type: {}", s)),
    }
}

fn str_to_kernel_type(s: &str) -> Result<KernelType, String> {
    match s {
        "linear" => Ok(KernelType::Linear),
        "polynomial" => Ok(KernelType::Polynomial),
        "rbf" => Ok(KernelType::Rbf),
        "sigmoid" => Ok(KernelType::Sigmoid),
        "precomputed" => Err("precomputed kernels cannot score feature records".into()),
        _ => Err(format!("unknown kernel_type: {}", s)),
    }
}

fn check_feature_index(index: i32) -> Result<(), String> {
    if index < 1 || index > FEATURE_COUNT as i32 {
        return Err(format!(
            "feature index {} out of range [1, {}]",
            index, FEATURE_COUNT
        ));
    }
    Ok(())
}

// ─── Classifier (model file) ────────────────────────────────────────

/// Load a classifier from a LIBSVM model file.
pub fn load_classifier(path: &Path) -> Result<Classifier, AttritionError> {
    let file = std::fs::File::open(path)?;
    load_classifier_from_reader(std::io::BufReader::new(file))
}

/// Load a classifier from any buffered reader.
pub fn load_classifier_from_reader(reader: impl BufRead) -> Result<Classifier, AttritionError> {
    let bad = |line: usize, msg: String| AttritionError::ModelFormatError(format!("line {}: {}", line, msg));

    let mut lines = reader.lines();
    let mut svm_type = None;
    let mut kernel = KernelParams::default();
    let mut kernel_seen = false;
    let mut nr_class = None;
    let mut total_sv = None;
    let mut rho: Vec<f64> = Vec::new();
    let mut label: Vec<i32> = Vec::new();
    let mut n_sv: Vec<usize> = Vec::new();

    let mut line_num: usize = 0;
    loop {
        let line = lines
            .next()
            .ok_or_else(|| AttritionError::ModelFormatError("unexpected end of file in header".into()))??;
        line_num += 1;
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            continue;
        };

        match cmd {
            "svm_type" => {
                let val = parts.next().ok_or_else(|| bad(line_num, "missing svm_type value".into()))?;
                svm_type = Some(str_to_svm_type(val).map_err(|m| bad(line_num, m))?);
            }
            "kernel_type" => {
                let val = parts.next().ok_or_else(|| bad(line_num, "missing kernel_type value".into()))?;
                kernel.kernel_type = str_to_kernel_type(val).map_err(|m| bad(line_num, m))?;
                kernel_seen = true;
            }
            "degree" => kernel.degree = parse_single(&mut parts, line_num, "degree")?,
            "gamma" => kernel.gamma = parse_single(&mut parts, line_num, "gamma")?,
            "coef0" => kernel.coef0 = parse_single(&mut parts, line_num, "coef0")?,
            "nr_class" => nr_class = Some(parse_single::<usize>(&mut parts, line_num, "nr_class")?),
            "total_sv" => total_sv = Some(parse_single::<usize>(&mut parts, line_num, "total_sv")?),
            "rho" => rho = parse_multiple(&mut parts, line_num, "rho")?,
            "label" => label = parse_multiple(&mut parts, line_num, "label")?,
            // Platt parameters play no part in the label decision.
            "probA" | "probB" => {
                parse_multiple::<f64>(&mut parts, line_num, cmd)?;
            }
            "nr_sv" => n_sv = parse_multiple(&mut parts, line_num, "nr_sv")?,
            "SV" => break,
            _ => return Err(bad(line_num, format!("unknown keyword: {}", cmd))),
        }
    }

    let svm_type = svm_type.ok_or_else(|| bad(line_num, "header has no svm_type".into()))?;
    if !kernel_seen {
        return Err(bad(line_num, "header has no kernel_type".into()));
    }
    match nr_class {
        Some(2) => {}
        Some(n) => return Err(bad(line_num, format!("expected a binary model, nr_class is {}", n))),
        None => return Err(bad(line_num, "header has no nr_class".into())),
    }
    let total_sv = total_sv.ok_or_else(|| bad(line_num, "header has no total_sv".into()))?;
    let rho = match rho.as_slice() {
        [r] => *r,
        _ => return Err(bad(line_num, format!("expected 1 rho value, got {}", rho.len()))),
    };
    let label: [i32; 2] = match label.as_slice() {
        [a, b] => [*a, *b],
        _ => return Err(bad(line_num, format!("expected 2 labels, got {}", label.len()))),
    };
    let outcomes = (
        Attrition::from_class_label(label[0]),
        Attrition::from_class_label(label[1]),
    );
    if !matches!(
        outcomes,
        (Some(Attrition::Yes), Some(Attrition::No)) | (Some(Attrition::No), Some(Attrition::Yes))
    ) {
        return Err(bad(
            line_num,
            format!("labels {} {} must be 1 and one of 0/-1", label[0], label[1]),
        ));
    }
    let n_sv: [usize; 2] = match n_sv.as_slice() {
        [a, b] if a + b == total_sv => [*a, *b],
        [a, b] => {
            return Err(bad(
                line_num,
                format!("nr_sv {} + {} does not match total_sv {}", a, b, total_sv),
            ))
        }
        _ => return Err(bad(line_num, "header has no nr_sv for both classes".into())),
    };

    let mut sv_coef = Vec::with_capacity(total_sv);
    let mut sv = Vec::with_capacity(total_sv);
    while sv.len() < total_sv {
        let line = lines
            .next()
            .ok_or_else(|| AttritionError::ModelFormatError("unexpected end of file in SV section".into()))??;
        line_num += 1;
        let mut parts = line.split_whitespace();
        let Some(coef_str) = parts.next() else {
            continue;
        };
        let coef: f64 = coef_str
            .parse()
            .map_err(|_| bad(line_num, format!("invalid sv_coef: {}", coef_str)))?;

        let mut nodes: Vec<SvmNode> = Vec::new();
        for token in parts {
            let (idx_str, val_str) = token
                .split_once(':')
                .ok_or_else(|| bad(line_num, format!("expected index:value, got: {}", token)))?;
            let index: i32 = idx_str
                .parse()
                .map_err(|_| bad(line_num, format!("invalid index: {}", idx_str)))?;
            check_feature_index(index).map_err(|m| bad(line_num, m))?;
            if nodes.last().is_some_and(|prev| index <= prev.index) {
                return Err(bad(line_num, format!("feature indices must be ascending at {}", index)));
            }
            let value: f64 = val_str
                .parse()
                .map_err(|_| bad(line_num, format!("invalid value: {}", val_str)))?;
            nodes.push(SvmNode { index, value });
        }
        sv_coef.push(coef);
        sv.push(nodes);
    }

    Ok(Classifier {
        svm_type,
        kernel,
        sv,
        sv_coef,
        rho,
        label,
        n_sv,
    })
}

// ─── Scaler (range file) ────────────────────────────────────────────

/// Load a scaler from an `svm-scale` range file.
pub fn load_scaler(path: &Path) -> Result<FeatureScaler, AttritionError> {
    let file = std::fs::File::open(path)?;
    load_scaler_from_reader(std::io::BufReader::new(file))
}

/// Load a scaler from any buffered reader.
///
/// A leading `y` section (target scaling) is accepted and ignored, since
/// the classifier output is never rescaled.
pub fn load_scaler_from_reader(reader: impl BufRead) -> Result<FeatureScaler, AttritionError> {
    let bad = |line: usize, message: String| AttritionError::ScalerFormatError { line, message };

    let mut lines = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push((idx + 1, line));
        }
    }
    let mut lines = lines.into_iter();
    let mut next_line = |what: &str| {
        lines
            .next()
            .ok_or_else(|| bad(0, format!("unexpected end of file, expected {}", what)))
    };

    let (mut line_num, mut line) = next_line("x or y section")?;
    if line.trim() == "y" {
        for what in ["y_lower y_upper", "y_min y_max"] {
            let (n, l) = next_line(what)?;
            parse_pair(&l).ok_or_else(|| bad(n, format!("invalid {} line: {}", what, l.trim())))?;
        }
        (line_num, line) = next_line("x section")?;
    }
    if line.trim() != "x" {
        return Err(bad(line_num, format!("expected x, got: {}", line.trim())));
    }

    let (n, l) = next_line("lower upper")?;
    let (lower, upper) =
        parse_pair(&l).ok_or_else(|| bad(n, format!("invalid lower/upper line: {}", l.trim())))?;
    let mut scaler = FeatureScaler::new(lower, upper).map_err(|e| bad(n, e.to_string()))?;

    for (n, l) in lines {
        let parts: Vec<&str> = l.split_whitespace().collect();
        let &[idx_str, min_str, max_str] = parts.as_slice() else {
            return Err(bad(n, format!("expected index min max, got: {}", l.trim())));
        };
        let index: i32 = idx_str
            .parse()
            .map_err(|_| bad(n, format!("invalid feature index: {}", idx_str)))?;
        check_feature_index(index).map_err(|m| bad(n, m))?;
        let min: f64 = min_str
            .parse()
            .map_err(|_| bad(n, format!("invalid min: {}", min_str)))?;
        let max: f64 = max_str
            .parse()
            .map_err(|_| bad(n, format!("invalid max: {}", max_str)))?;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(bad(n, format!("invalid range {} {} for feature {}", min_str, max_str, index)));
        }
        let slot = &mut scaler.ranges[(index - 1) as usize];
        if slot.is_some() {
            return Err(bad(n, format!("feature index {} listed twice", index)));
        }
        *slot = Some(FeatureRange { min, max });
    }

    Ok(scaler)
}

// ─── Helper parsers ──────────────────────────────────────────────────

fn parse_pair(line: &str) -> Option<(f64, f64)> {
    let mut parts = line.split_whitespace().map(str::parse::<f64>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(a)), Some(Ok(b)), None) => Some((a, b)),
        _ => None,
    }
}

fn parse_single<T: std::str::FromStr>(
    parts: &mut std::str::SplitWhitespace<'_>,
    line_num: usize,
    field: &str,
) -> Result<T, AttritionError> {
    let val_str = parts.next().ok_or_else(|| {
        AttritionError::ModelFormatError(format!("line {}: missing {} value", line_num, field))
    })?;
    val_str.parse().map_err(|_| {
        AttritionError::ModelFormatError(format!(
            "line {}: invalid {} value: {}",
            line_num, field, val_str
        ))
    })
}

fn parse_multiple<T: std::str::FromStr>(
    parts: &mut std::str::SplitWhitespace<'_>,
    line_num: usize,
    field: &str,
) -> Result<Vec<T>, AttritionError> {
    parts
        .map(|s| {
            s.parse::<T>().map_err(|_| {
                AttritionError::ModelFormatError(format!(
                    "line {}: invalid {} value: {}",
                    line_num, field, s
                ))
            })
        })
        .collect()
}
