use crate::bench::{ResolverSummary, SENTINEL_MS};

/// Coarse latency-quality label derived from a summary's average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
	Excellent,
	Great,
	Good,
	Ok,
	Slow,
	Failed,
}

impl Rating {
	/// Tier boundaries are half-open on the upper end; the sentinel (and
	/// anything past it) means no probe ever succeeded.
	pub fn from_avg(avg_ms: u64) -> Self {
		if avg_ms >= SENTINEL_MS {
			Rating::Failed
		} else if avg_ms < 10 {
			Rating::Excellent
		} else if avg_ms < 30 {
			Rating::Great
		} else if avg_ms < 60 {
			Rating::Good
		} else if avg_ms < 100 {
			Rating::Ok
		} else {
			Rating::Slow
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Rating::Excellent => "EXCELLENT",
			Rating::Great => "GREAT",
			Rating::Good => "GOOD",
			Rating::Ok => "OK",
			Rating::Slow => "SLOW",
			Rating::Failed => "FAILED",
		}
	}
}

/// A resolver summary with its sorted position and rating attached.
#[derive(Debug, Clone)]
pub struct RankedEntry {
	pub rank: usize,
	pub rating: Rating,
	pub summary: ResolverSummary,
}

/// Rank summaries ascending by average latency.
///
/// Sentinel entries sort strictly after everything measurable. The sort is
/// stable, so equal averages keep their input order and reruns on the same
/// input produce identical output.
pub fn rank(mut summaries: Vec<ResolverSummary>) -> Vec<RankedEntry> {
	summaries.sort_by_key(|s| (s.avg_ms >= SENTINEL_MS, s.avg_ms));
	summaries.into_iter()
		.enumerate()
		.map(|(i, summary)| RankedEntry {
			rank: i + 1,
			rating: Rating::from_avg(summary.avg_ms),
			summary,
		})
		.collect()
}

/// The addresses worth recommending: the first up-to-`n` ranked entries
/// that actually produced a measurement. A fully-failed resolver is never
/// recommended, no matter how short the list gets.
pub fn recommended(ranked: &[RankedEntry], n: usize) -> Vec<String> {
	ranked.iter()
		.filter(|e| e.summary.avg_ms < SENTINEL_MS)
		.take(n)
		.map(|e| e.summary.address.clone())
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn summary(address: &str, label: &str, avg_ms: u64) -> ResolverSummary {
		let failed = avg_ms >= SENTINEL_MS;
		ResolverSummary {
			address: address.to_string(),
			label: label.to_string(),
			avg_ms,
			min_ms: if failed { SENTINEL_MS } else { avg_ms / 2 },
			max_ms: if failed { SENTINEL_MS } else { avg_ms * 2 },
			success_count: if failed { 0 } else { 4 },
			failure_count: if failed { 4 } else { 0 },
		}
	}

	#[test]
	fn test_rating_boundaries() {
		assert_eq!(Rating::from_avg(0), Rating::Excellent);
		assert_eq!(Rating::from_avg(9), Rating::Excellent);
		assert_eq!(Rating::from_avg(10), Rating::Great);
		assert_eq!(Rating::from_avg(29), Rating::Great);
		assert_eq!(Rating::from_avg(30), Rating::Good);
		assert_eq!(Rating::from_avg(59), Rating::Good);
		assert_eq!(Rating::from_avg(60), Rating::Ok);
		assert_eq!(Rating::from_avg(99), Rating::Ok);
		assert_eq!(Rating::from_avg(100), Rating::Slow);
		assert_eq!(Rating::from_avg(SENTINEL_MS - 1), Rating::Slow);
		assert_eq!(Rating::from_avg(SENTINEL_MS), Rating::Failed);
	}

	#[test]
	fn test_rank_ascending_order() {
		let input = vec![
			summary("8.8.8.8", "slow", 120),
			summary("1.1.1.1", "fast", 8),
			summary("9.9.9.9", "medium", 45),
		];
		let ranked = rank(input);
		assert_eq!(ranked[0].rank, 1);
		assert_eq!(ranked[0].summary.label, "fast");
		assert_eq!(ranked[0].rating, Rating::Excellent);
		assert_eq!(ranked[1].summary.label, "medium");
		assert_eq!(ranked[1].rating, Rating::Good);
		assert_eq!(ranked[2].summary.label, "slow");
		assert_eq!(ranked[2].rating, Rating::Slow);
		for pair in ranked.windows(2) {
			assert!(pair[0].summary.avg_ms <= pair[1].summary.avg_ms);
		}
	}

	#[test]
	fn test_sentinel_sorts_strictly_last() {
		let input = vec![
			summary("1.1.1.1", "dead", SENTINEL_MS),
			summary("8.8.8.8", "alive", 200),
			summary("9.9.9.9", "also dead", SENTINEL_MS),
		];
		let ranked = rank(input);
		assert_eq!(ranked[0].summary.label, "alive");
		assert_eq!(ranked[1].rating, Rating::Failed);
		assert_eq!(ranked[2].rating, Rating::Failed);
	}

	#[test]
	fn test_tie_break_is_input_order() {
		let input = vec![
			summary("8.8.8.8", "first at 20", 20),
			summary("1.1.1.1", "second at 20", 20),
			summary("9.9.9.9", "third at 20", 20),
		];
		let ranked_a = rank(input.clone());
		let ranked_b = rank(input);
		assert_eq!(ranked_a[0].summary.label, "first at 20");
		assert_eq!(ranked_a[1].summary.label, "second at 20");
		assert_eq!(ranked_a[2].summary.label, "third at 20");
		// Reruns on identical input give identical order
		for (a, b) in ranked_a.iter().zip(ranked_b.iter()) {
			assert_eq!(a.summary.address, b.summary.address);
			assert_eq!(a.rank, b.rank);
		}
	}

	#[test]
	fn test_recommended_excludes_failed() {
		let ranked = rank(vec![
			summary("1.1.1.1", "a", 10),
			summary("8.8.8.8", "b", SENTINEL_MS),
			summary("9.9.9.9", "c", 20),
			summary("4.2.2.1", "d", 30),
			summary("64.6.64.6", "e", 40),
		]);
		let picks = recommended(&ranked, 3);
		assert_eq!(picks, vec!["1.1.1.1", "9.9.9.9", "4.2.2.1"]);
	}

	#[test]
	fn test_recommended_shorter_than_three() {
		let ranked = rank(vec![
			summary("1.1.1.1", "a", 10),
			summary("8.8.8.8", "b", SENTINEL_MS),
		]);
		let picks = recommended(&ranked, 3);
		assert_eq!(picks, vec!["1.1.1.1"]);
	}

	#[test]
	fn test_recommended_all_failed_is_empty() {
		let ranked = rank(vec![
			summary("1.1.1.1", "a", SENTINEL_MS),
			summary("8.8.8.8", "b", SENTINEL_MS),
		]);
		assert!(recommended(&ranked, 3).is_empty());
	}

	#[test]
	fn test_two_resolver_scenario() {
		// Resolver A succeeds 4 trials at [10,20,30,40], B fails all 4
		use crate::bench::LatencyAccumulator;
		use crate::dns::ProbeResult;
		use crate::resolvers::ResolverEntry;

		let a = ResolverEntry {
			address: "1.1.1.1".parse().unwrap(),
			label: "A".to_string(),
		};
		let b = ResolverEntry {
			address: "8.8.8.8".parse().unwrap(),
			label: "B".to_string(),
		};

		let mut acc_a = LatencyAccumulator::new();
		for ms in [10, 20, 30, 40] {
			acc_a.fold(&ProbeResult::success(ms));
		}
		let mut acc_b = LatencyAccumulator::new();
		for _ in 0..4 {
			acc_b.fold(&ProbeResult::failure());
		}

		let ranked = rank(vec![acc_b.finish(&b), acc_a.finish(&a)]);
		assert_eq!(ranked[0].rank, 1);
		assert_eq!(ranked[0].summary.label, "A");
		assert_eq!(ranked[0].summary.avg_ms, 25);
		assert_eq!(ranked[0].summary.min_ms, 10);
		assert_eq!(ranked[0].summary.max_ms, 40);
		assert_eq!(ranked[0].rating, Rating::Great);
		assert_eq!(ranked[1].rank, 2);
		assert_eq!(ranked[1].summary.label, "B");
		assert_eq!(ranked[1].rating, Rating::Failed);

		let picks = recommended(&ranked, 3);
		assert_eq!(picks, vec!["1.1.1.1"]);
	}
}
