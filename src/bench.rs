use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::dns::{self, ProbeResult};
use crate::resolvers::ResolverEntry;

/// Sentinel latency for a resolver with zero successful probes.
///
/// Keeps avg/min/max well-defined and the ranking order total; a summary
/// carrying this value is rated FAILED and never recommended.
pub const SENTINEL_MS: u64 = 9999;

/// Benchmark parameters shared by every probe in a run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
	pub rounds: u32,
	pub timeout: Duration,
	pub max_inflight: usize,
}

/// Aggregated probe statistics for one resolver.
#[derive(Debug, Clone)]
pub struct ResolverSummary {
	pub address: String,
	pub label: String,
	pub avg_ms: u64,
	pub min_ms: u64,
	pub max_ms: u64,
	pub success_count: u32,
	pub failure_count: u32,
}

impl ResolverSummary {
	pub fn total_trials(&self) -> u32 {
		self.success_count + self.failure_count
	}
}

/// Running aggregation of probe outcomes for one resolver.
///
/// fold and merge are associative and commutative, so probe completion
/// order never affects the resulting summary. Failed probes only bump the
/// failure counter; their (absent) timing never touches sum/min/max.
#[derive(Debug, Clone, Default)]
pub struct LatencyAccumulator {
	sum_ms: u64,
	min_ms: Option<u64>,
	max_ms: u64,
	success_count: u32,
	failure_count: u32,
}

impl LatencyAccumulator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn fold(&mut self, result: &ProbeResult) {
		match result.elapsed_ms {
			Some(ms) if result.succeeded => {
				self.sum_ms += ms;
				self.min_ms = Some(self.min_ms.map_or(ms, |m| m.min(ms)));
				self.max_ms = self.max_ms.max(ms);
				self.success_count += 1;
			}
			_ => {
				self.failure_count += 1;
			}
		}
	}

	/// Combine two accumulators, e.g. from parallel workers.
	pub fn merge(&mut self, other: &LatencyAccumulator) {
		self.sum_ms += other.sum_ms;
		self.min_ms = match (self.min_ms, other.min_ms) {
			(Some(a), Some(b)) => Some(a.min(b)),
			(a, b) => a.or(b),
		};
		self.max_ms = self.max_ms.max(other.max_ms);
		self.success_count += other.success_count;
		self.failure_count += other.failure_count;
	}

	/// Produce the summary for one resolver.
	///
	/// avg uses truncating integer division; with zero successes all three
	/// latency fields collapse to the sentinel.
	pub fn finish(&self, entry: &ResolverEntry) -> ResolverSummary {
		let (avg_ms, min_ms, max_ms) = if self.success_count == 0 {
			(SENTINEL_MS, SENTINEL_MS, SENTINEL_MS)
		} else {
			(
				self.sum_ms / u64::from(self.success_count),
				self.min_ms.unwrap_or(SENTINEL_MS),
				self.max_ms,
			)
		};
		ResolverSummary {
			address: entry.address.to_string(),
			label: entry.label.clone(),
			avg_ms,
			min_ms,
			max_ms,
			success_count: self.success_count,
			failure_count: self.failure_count,
		}
	}
}

/// Probe one resolver across every domain, `rounds` times each.
///
/// Probes run sequentially so the accumulator has a single owner; each
/// probe enforces its own timeout, so a hung query costs at most one
/// timeout period. Total trials = domains.len() * rounds.
pub async fn benchmark_resolver(
	entry: &ResolverEntry,
	domains: &[String],
	rounds: u32,
	timeout: Duration,
) -> ResolverSummary {
	let target = SocketAddr::new(entry.address, 53);
	let mut acc = LatencyAccumulator::new();

	for _ in 0..rounds {
		for domain in domains {
			let result = dns::probe(target, domain, timeout).await;
			acc.fold(&result);
		}
	}

	acc.finish(entry)
}

/// Run the benchmark across all configured resolvers.
///
/// Resolvers are deduplicated by address (first occurrence wins), then each
/// surviving resolver gets its own task behind a semaphore. Handles are
/// awaited in spawn order, so summaries come back one per unique address in
/// input order and the progress callback sees a monotonic (done, total).
/// A resolver that fails every trial still produces a summary; nothing
/// aborts the batch.
pub async fn run(
	resolvers: &[ResolverEntry],
	domains: &[String],
	config: &BenchConfig,
	mut progress: impl FnMut(usize, usize, &ResolverSummary),
) -> Vec<ResolverSummary> {
	let mut seen = HashSet::new();
	let unique: Vec<ResolverEntry> = resolvers.iter()
		.filter(|r| seen.insert(r.address))
		.cloned()
		.collect();

	let total = unique.len();
	let semaphore = Arc::new(Semaphore::new(config.max_inflight));

	let mut handles = Vec::new();
	for entry in unique {
		let sem = semaphore.clone();
		let domains = domains.to_vec();
		let rounds = config.rounds;
		let timeout = config.timeout;

		handles.push(tokio::spawn(async move {
			let _permit = sem.acquire().await.expect("semaphore closed");
			benchmark_resolver(&entry, &domains, rounds, timeout).await
		}));
	}

	let mut summaries = Vec::with_capacity(total);
	for (i, handle) in handles.into_iter().enumerate() {
		match handle.await {
			Ok(summary) => {
				progress(i + 1, total, &summary);
				summaries.push(summary);
			}
			Err(e) => {
				eprintln!("Warning: benchmark task failed: {}", e);
			}
		}
	}

	summaries
}
