//! Response-quality metrics: consistency, differentiation, and reliability
//! estimates. These annotate a report, they never block it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Dimension, ItemScore, StandardizedVector};

/// Cut-offs deciding when a module's responses are flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidityThresholds {
    pub min_consistency: f64,
    /// Minimum spread of T-scores; flat profiles fall below it.
    pub min_differentiation: f64,
}

impl Default for ValidityThresholds {
    fn default() -> Self {
        Self {
            min_consistency: 0.6,
            min_differentiation: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidityStatus {
    Valid,
    Flagged,
}

impl ValidityStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Valid => "Valid",
            Self::Flagged => "Flagged",
        }
    }
}

/// Quality metrics for one module's responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidityReport {
    pub response_consistency: f64,
    pub profile_differentiation: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference_clarity: Option<f64>,
    pub cronbach_alpha: f64,
    pub sem: f64,
    pub status: ValidityStatus,
}

/// Assesses one module's answered items against its standardized vector.
/// `preference_clarity` carries the MBTI clarity average when applicable.
pub fn assess(
    items: &[ItemScore],
    standardized: &StandardizedVector,
    preference_clarity: Option<f64>,
    thresholds: &ValidityThresholds,
) -> ValidityReport {
    let (half_a, half_b) = split_halves(items);
    let split_half = correlate_or_agree(&half_a, &half_b);

    let response_consistency = match paired_scores(items) {
        Some((xs, ys)) => correlate_or_agree(&xs, &ys),
        None => split_half,
    }
    .clamp(0.0, 1.0);

    let profile_differentiation = t_score_spread(standardized);

    // Spearman-Brown step-up of the split-half correlation; a full
    // Cronbach's alpha needs a respondent sample this engine never sees.
    let cronbach_alpha = (2.0 * split_half / (1.0 + split_half)).clamp(0.0, 1.0);
    let sem = standardized.mean_norm_sd() * (1.0 - cronbach_alpha).sqrt();

    let status = if response_consistency >= thresholds.min_consistency
        && profile_differentiation > thresholds.min_differentiation
    {
        ValidityStatus::Valid
    } else {
        ValidityStatus::Flagged
    };

    ValidityReport {
        response_consistency,
        profile_differentiation,
        preference_clarity,
        cronbach_alpha,
        sem,
        status,
    }
}

/// Paired same-construct items: two answered items sharing a dimension and
/// sub-dimension tag. Returns `None` with fewer than two pairs, in which
/// case the split-half estimate stands in.
fn paired_scores(items: &[ItemScore]) -> Option<(Vec<f64>, Vec<f64>)> {
    let mut groups: BTreeMap<(Dimension, &str), Vec<f64>> = BTreeMap::new();
    for item in items {
        if let Some(tag) = item.sub_dimension.as_deref() {
            groups
                .entry((item.dimension, tag))
                .or_default()
                .push(item.value);
        }
    }

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for values in groups.values() {
        if values.len() >= 2 {
            xs.push(values[0]);
            ys.push(values[1]);
        }
    }

    if xs.len() >= 2 {
        Some((xs, ys))
    } else {
        None
    }
}

/// Odd/even split of each dimension's answered items, summed per half,
/// laid out in canonical dimension order.
fn split_halves(items: &[ItemScore]) -> (Vec<f64>, Vec<f64>) {
    let mut sums: BTreeMap<Dimension, (f64, f64, usize)> = BTreeMap::new();
    for item in items {
        let entry = sums.entry(item.dimension).or_insert((0.0, 0.0, 0));
        if entry.2 % 2 == 0 {
            entry.0 += item.value;
        } else {
            entry.1 += item.value;
        }
        entry.2 += 1;
    }

    let mut half_a = Vec::with_capacity(sums.len());
    let mut half_b = Vec::with_capacity(sums.len());
    for (a, b, _) in sums.values() {
        half_a.push(*a);
        half_b.push(*b);
    }
    (half_a, half_b)
}

/// Pearson correlation; when either side is degenerate (no variance) the
/// halves count as consistent only if they agree elementwise.
fn correlate_or_agree(xs: &[f64], ys: &[f64]) -> f64 {
    match pearson(xs, ys) {
        Some(r) => r,
        None => {
            let agree = xs.len() == ys.len()
                && !xs.is_empty()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|(x, y)| (x - y).abs() < f64::EPSILON);
            if agree {
                1.0
            } else {
                0.0
            }
        }
    }
}

fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator < f64::EPSILON {
        return None;
    }
    Some(cov / denominator)
}

/// Population standard deviation across the module's T-scores.
fn t_score_spread(standardized: &StandardizedVector) -> f64 {
    let count = standardized.entries.len();
    if count == 0 {
        return 0.0;
    }
    let mean = standardized.mean_t_score();
    let variance = standardized
        .entries
        .values()
        .map(|entry| {
            let delta = entry.t_score - mean;
            delta * delta
        })
        .sum::<f64>()
        / count as f64;
    variance.sqrt()
}
