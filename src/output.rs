use comfy_table::{Table, ContentArrangement, presets::UTF8_FULL};

use anyhow::Result;
use serde::Serialize;

use crate::bench::SENTINEL_MS;
use crate::location::LocationInfo;
use crate::rank::{self, RankedEntry};

/// One row of the machine-readable result set. Numeric fields only.
#[derive(Debug, Serialize)]
struct ReportRow {
	dns: String,
	name: String,
	avg_ms: u64,
	min_ms: u64,
	max_ms: u64,
	failures: u32,
}

/// The structured document emitted in --json mode.
#[derive(Debug, Serialize)]
struct BenchReport {
	server_ip: String,
	server_location: String,
	server_country_code: String,
	server_region: String,
	recommended_dns: Vec<String>,
	results: Vec<ReportRow>,
}

fn medal(rank: usize) -> &'static str {
	match rank {
		1 => " 🥇",
		2 => " 🥈",
		3 => " 🥉",
		_ => "",
	}
}

/// Print the human-readable report: location summary, ranked table, and
/// the top-3 recommendation block. Entries are rendered in the order the
/// ranker produced them; nothing is re-sorted or re-aggregated here.
pub fn print_report(ranked: &[RankedEntry], location: &LocationInfo) {
	println!();
	println!("Vantage Point");
	println!("=============");
	println!("IP:       {}", location.ip);
	println!("Location: {}", location.display_location());
	println!("ISP:      {}", location.isp);
	println!("AS:       {}", location.as_number);
	println!("Region:   {}", location.region.as_str());

	let mut table = Table::new();
	table.load_preset(UTF8_FULL);
	table.set_content_arrangement(ContentArrangement::Dynamic);
	table.set_header(vec![
		"Rank", "DNS Server", "Name", "Avg", "Min", "Max", "Failures", "Rating",
	]);

	for entry in ranked {
		let s = &entry.summary;
		let (avg, min, max) = if s.avg_ms >= SENTINEL_MS {
			("-".to_string(), "-".to_string(), "-".to_string())
		} else {
			(
				format!("{} ms", s.avg_ms),
				format!("{} ms", s.min_ms),
				format!("{} ms", s.max_ms),
			)
		};
		table.add_row(vec![
			format!("{}{}", entry.rank, medal(entry.rank)),
			s.address.clone(),
			s.label.clone(),
			avg,
			min,
			max,
			format!("{}/{}", s.failure_count, s.total_trials()),
			entry.rating.as_str().to_string(),
		]);
	}

	println!("\nBenchmark Results");
	println!("=================\n");
	println!("{table}");

	let picks = rank::recommended(ranked, 3);
	println!("Recommended DNS");
	println!("===============");
	if picks.is_empty() {
		println!("No resolver produced a successful measurement.");
	} else {
		for (i, address) in picks.iter().enumerate() {
			println!("{}.{} {}", i + 1, medal(i + 1), address);
		}
	}
}

/// Render the structured document for --json mode.
pub fn render_json(ranked: &[RankedEntry], location: &LocationInfo) -> Result<String> {
	let report = BenchReport {
		server_ip: location.ip.clone(),
		server_location: location.display_location(),
		server_country_code: location.country_code.clone(),
		server_region: location.region.as_str().to_string(),
		recommended_dns: rank::recommended(ranked, 3),
		results: ranked.iter()
			.map(|entry| ReportRow {
				dns: entry.summary.address.clone(),
				name: entry.summary.label.clone(),
				avg_ms: entry.summary.avg_ms,
				min_ms: entry.summary.min_ms,
				max_ms: entry.summary.max_ms,
				failures: entry.summary.failure_count,
			})
			.collect(),
	};
	Ok(serde_json::to_string_pretty(&report)?)
}
