//! Series grouping over a ranked result list.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A series that dominates a result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesAggregate {
	pub series: String,
	/// Results belonging to the series.
	pub hits: usize,
	/// Rank of the series' best result.
	pub best_rank: usize,
}

/// Picks the series to surface above the individual results, if any.
///
/// Takes each result's series in rank order. A series qualifies when there
/// are at least two results, it has two or more of them, and the list is
/// not that series alone (another series or an unaffiliated post is
/// present). Among qualifying series the one with most hits wins, then the
/// one ranked first.
///
/// ```
/// use therefore_search::series_aggregate;
///
/// let aggregate = series_aggregate([Some("Foundations"), None, Some("Foundations")]).unwrap();
/// assert_eq!(aggregate.series, "Foundations");
/// assert_eq!(aggregate.hits, 2);
///
/// assert!(series_aggregate([Some("Foundations"), Some("Foundations")]).is_none());
/// ```
pub fn series_aggregate<'a, I>(series: I) -> Option<SeriesAggregate>
where
	I: IntoIterator<Item = Option<&'a str>>,
{
	let mut groups: IndexMap<&str, (usize, usize)> = IndexMap::new();
	let mut total = 0;
	let mut unaffiliated = false;
	for (rank, name) in series.into_iter().enumerate() {
		total += 1;
		match name {
			Some(name) => groups.entry(name).or_insert((0, rank)).0 += 1,
			None => unaffiliated = true,
		}
	}

	if total < 2 || !(groups.len() > 1 || unaffiliated) {
		return None;
	}

	groups
		.into_iter()
		.filter(|(_, (hits, _))| *hits >= 2)
		.min_by(|(_, (a_hits, a_rank)), (_, (b_hits, b_rank))| b_hits.cmp(a_hits).then(a_rank.cmp(b_rank)))
		.map(|(name, (hits, best_rank))| SeriesAggregate {
			series: name.to_string(),
			hits,
			best_rank,
		})
}
