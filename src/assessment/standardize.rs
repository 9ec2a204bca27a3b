//! Standardization: raw totals to T-scores and percentiles via norm-table
//! lookups with a Global-region fallback.

use std::collections::BTreeMap;

use super::domain::{
    AgeGroup, Region, ScoreVector, StandardScore, StandardizedVector,
};
use crate::catalog::domain::NormRecord;
use crate::catalog::NormTable;
use crate::error::EngineError;

/// Converts a raw vector into T-scores and percentiles. Missing norms are
/// fatal; defaulting to a population mean would misrepresent scale
/// position.
pub fn standardize(
    vector: &ScoreVector,
    age_group: AgeGroup,
    region: &Region,
    norms: &dyn NormTable,
) -> Result<StandardizedVector, EngineError> {
    let module = vector.module;
    let mut entries = BTreeMap::new();

    for (dimension, raw) in &vector.values {
        let record = norms
            .lookup(module, age_group, *dimension, region)
            .or_else(|| norms.lookup(module, age_group, *dimension, &Region::global()))
            .ok_or_else(|| EngineError::NormNotFound {
                module,
                age_group,
                dimension: *dimension,
                region: region.clone(),
            })?;

        entries.insert(
            *dimension,
            StandardScore {
                t_score: t_score(*raw, &record),
                percentile: percentile(*raw, &record),
                norm_sd: record.sd,
            },
        );
    }

    Ok(StandardizedVector { module, entries })
}

/// `50 + 10·(raw − mean)/sd`, clamped to the reportable [0, 100] band.
fn t_score(raw: f64, record: &NormRecord) -> f64 {
    let t = 50.0 + 10.0 * (raw - record.mean) / record.sd;
    t.clamp(0.0, 100.0)
}

/// Linear interpolation between the stored percentile anchors, flat at 25
/// below the first anchor and at 90 above the last.
fn percentile(raw: f64, record: &NormRecord) -> f64 {
    let anchors = record.anchors.pairs();
    let (first_pct, first_raw) = anchors[0];
    let (last_pct, last_raw) = anchors[anchors.len() - 1];

    if raw <= first_raw {
        return first_pct;
    }
    if raw >= last_raw {
        return last_pct;
    }

    for window in anchors.windows(2) {
        let (lower_pct, lower_raw) = window[0];
        let (upper_pct, upper_raw) = window[1];
        if raw <= upper_raw {
            if (upper_raw - lower_raw).abs() < f64::EPSILON {
                return upper_pct;
            }
            let fraction = (raw - lower_raw) / (upper_raw - lower_raw);
            return lower_pct + fraction * (upper_pct - lower_pct);
        }
    }

    last_pct
}
