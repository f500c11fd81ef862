use std::cmp::Ordering;

use serde::Serialize;

use super::engine::ScoringResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSite {
    /// 1-based position in the final order.
    pub rank: usize,
    #[serde(flatten)]
    pub result: ScoringResult,
}

/// Total order for report output: higher composite score first, then fewer fatal
/// flaws, then higher unbanded total, then site id.
pub fn compare(a: &ScoringResult, b: &ScoringResult) -> Ordering {
    b.composite
        .composite_score
        .total_cmp(&a.composite.composite_score)
        .then_with(|| a.fatal_flaw_count().cmp(&b.fatal_flaw_count()))
        .then_with(|| b.composite.raw_total.total_cmp(&a.composite.raw_total))
        .then_with(|| a.site_id.cmp(&b.site_id))
}

/// Sort results independently of the order they were produced in.
pub fn rank(mut results: Vec<ScoringResult>) -> Vec<RankedSite> {
    results.sort_by(compare);
    results
        .into_iter()
        .enumerate()
        .map(|(index, result)| RankedSite {
            rank: index + 1,
            result,
        })
        .collect()
}
