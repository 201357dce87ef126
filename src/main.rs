mod bench;
mod cli;
mod dns;
mod location;
mod output;
mod rank;
mod resolvers;

use clap::Parser;
use std::time::Duration;

use crate::bench::BenchConfig;
use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	// Fatal if the host cannot issue DNS queries at all
	dns::ensure_query_capability().await?;

	let resolver_set = resolvers::curated_resolvers();
	let domains = resolvers::test_domains();
	let config = BenchConfig {
		rounds: cli.rounds,
		timeout: Duration::from_secs(cli.timeout),
		max_inflight: 8,
	};

	// Best-effort; falls back to unknown/global on any failure
	let location = location::lookup(Duration::from_secs(3)).await;

	if !cli.json {
		println!(
			"Benchmarking {} resolvers ({} domains x {} rounds, {}s timeout)...",
			resolver_set.len(), domains.len(), config.rounds, cli.timeout,
		);
	}

	let json_mode = cli.json;
	let summaries = bench::run(&resolver_set, &domains, &config, |done, total, summary| {
		// Progress is advisory; keep stdout clean in JSON mode
		if !json_mode {
			println!("  [{}/{}] {} ({})", done, total, summary.label, summary.address);
		}
	}).await;

	let ranked = rank::rank(summaries);

	if cli.json {
		println!("{}", output::render_json(&ranked, &location)?);
	} else {
		output::print_report(&ranked, &location);
	}

	Ok(())
}
