use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `(dimension, score)` pair; serializes as a two-element JSON array.
pub type DimensionScore = (String, f64);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrengthsWeaknesses {
    pub strengths: Vec<DimensionScore>,
    /// Lowest score first.
    pub weaknesses: Vec<DimensionScore>,
}

/// Highest `top_n` dimensions and lowest `top_n` dimensions.
///
/// With fewer than `2 * top_n` dimensions the two lists overlap. Ties keep the input order.
pub fn identify_strengths_weaknesses(
    overall_scores: &BTreeMap<String, f64>,
    top_n: usize,
) -> StrengthsWeaknesses {
    if overall_scores.is_empty() || top_n == 0 {
        return StrengthsWeaknesses::default();
    }

    let mut ranked: Vec<DimensionScore> = overall_scores
        .iter()
        .map(|(dimension, score)| (dimension.clone(), *score))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let strengths = ranked.iter().take(top_n).cloned().collect();
    let tail_start = ranked.len().saturating_sub(top_n);
    let mut weaknesses = ranked[tail_start..].to_vec();
    weaknesses.reverse();

    StrengthsWeaknesses {
        strengths,
        weaknesses,
    }
}
