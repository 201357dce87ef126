use clap::Parser;

/// DNS resolver latency benchmark
#[derive(Parser, Debug)]
#[command(name = "dns-vantage")]
#[command(about = "Benchmark public DNS resolvers from this vantage point and recommend the fastest")]
pub struct Cli {
	/// Emit a machine-readable JSON document instead of the table report
	#[arg(long = "json")]
	pub json: bool,

	/// Number of query rounds per (resolver, domain) pair
	#[arg(short = 'n', long = "rounds", default_value = "3")]
	pub rounds: u32,

	/// Per-query timeout in seconds
	#[arg(short = 't', long = "timeout", default_value = "2")]
	pub timeout: u64,
}
