//! Popularity rank of a track among its siblings.

use crate::catalog_client::SiblingTrack;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankResult {
    /// 1-based position by descending popularity, 0 when the target is not
    /// in the list.
    pub rank: usize,
    pub total: usize,
}

impl RankResult {
    pub fn is_ranked(&self) -> bool {
        self.rank > 0
    }
}

/// Ranks `target_id` among `siblings` by popularity, most popular first.
///
/// Equal popularities keep their upstream order. The target may be absent,
/// e.g. when it falls outside the fetched page, in which case the rank is 0.
pub fn rank_by_popularity(siblings: &[SiblingTrack], target_id: &str) -> RankResult {
    let mut sorted: Vec<&SiblingTrack> = siblings.iter().collect();
    // sort_by is stable
    sorted.sort_by(|a, b| b.popularity.cmp(&a.popularity));

    let rank = sorted
        .iter()
        .position(|t| t.id == target_id)
        .map(|index| index + 1)
        .unwrap_or(0);

    RankResult {
        rank,
        total: siblings.len(),
    }
}
