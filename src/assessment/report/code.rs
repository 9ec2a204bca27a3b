use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use super::ModuleOutcome;
use crate::assessment::domain::ModuleCode;
use crate::assessment::matching::CareerMatch;

/// Derives the content-addressed report code. Identical scores,
/// classifications, and match ordering always produce the same code, so a
/// regeneration attempt collides in the report registry instead of
/// silently issuing a duplicate.
pub(crate) fn derive_report_code(
    modules: &BTreeMap<ModuleCode, ModuleOutcome>,
    matches: &[CareerMatch],
) -> String {
    let mut hasher = DefaultHasher::new();

    for (module, outcome) in modules {
        module.code().hash(&mut hasher);
        for (dimension, entry) in &outcome.standardized.entries {
            dimension.key().hash(&mut hasher);
            fixed(entry.t_score).hash(&mut hasher);
            fixed(entry.percentile).hash(&mut hasher);
        }
        outcome.interpretation.headline().hash(&mut hasher);
    }

    for career_match in matches {
        career_match.career_id.hash(&mut hasher);
        career_match.rank_position.hash(&mut hasher);
        fixed(career_match.match_percentage).hash(&mut hasher);
    }

    format!("RPT-{:016X}", hasher.finish())
}

/// Scores hash at four decimal places so float noise below reporting
/// precision cannot fork the code.
fn fixed(value: f64) -> i64 {
    (value * 10_000.0).round() as i64
}
