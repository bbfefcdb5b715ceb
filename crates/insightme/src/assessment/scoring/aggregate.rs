use super::rules::Contribution;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, Copy)]
struct DimensionTally {
    sum: f64,
    count: u32,
}

/// Running sum and count per dimension.
#[derive(Debug, Default)]
pub(crate) struct Tallies {
    by_dimension: BTreeMap<String, DimensionTally>,
}

impl Tallies {
    pub(crate) fn record(&mut self, contribution: Contribution) {
        let tally = self.by_dimension.entry(contribution.dimension).or_default();
        tally.sum += contribution.score;
        tally.count += 1;
    }

    /// Average per dimension rounded to two decimals. Dimensions never recorded are absent.
    pub(crate) fn averages(&self) -> BTreeMap<String, f64> {
        self.by_dimension
            .iter()
            .filter(|(_, tally)| tally.count > 0)
            .map(|(dimension, tally)| {
                (
                    dimension.clone(),
                    round_to(tally.sum / f64::from(tally.count), 2),
                )
            })
            .collect()
    }
}

/// Rounds to `decimals` places, exact ties going to the even neighbour.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
