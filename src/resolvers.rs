use std::net::IpAddr;

/// One entry in the fixed resolver table: an IP literal plus a human label.
///
/// The address is the key; the curated table never repeats one, and the
/// orchestrator drops duplicates defensively.
#[derive(Debug, Clone)]
pub struct ResolverEntry {
	pub address: IpAddr,
	pub label: String,
}

impl ResolverEntry {
	fn new(address: &str, label: &str) -> Self {
		Self {
			address: address.parse().expect("curated resolver address must be a valid IP literal"),
			label: label.to_string(),
		}
	}
}

/// Return the curated set of public resolvers to benchmark.
///
/// Order matters: ranking tie-breaks fall back to this iteration order, so
/// the table is an ordered list rather than a map.
pub fn curated_resolvers() -> Vec<ResolverEntry> {
	vec![
		ResolverEntry::new("1.1.1.1", "Cloudflare"),
		ResolverEntry::new("1.0.0.1", "Cloudflare Secondary"),
		ResolverEntry::new("8.8.8.8", "Google"),
		ResolverEntry::new("8.8.4.4", "Google Secondary"),
		ResolverEntry::new("9.9.9.9", "Quad9"),
		ResolverEntry::new("149.112.112.112", "Quad9 Secondary"),
		ResolverEntry::new("208.67.222.222", "OpenDNS"),
		ResolverEntry::new("208.67.220.220", "OpenDNS Secondary"),
		ResolverEntry::new("94.140.14.14", "AdGuard"),
		ResolverEntry::new("185.228.168.9", "CleanBrowsing"),
		ResolverEntry::new("8.26.56.26", "Comodo Secure"),
		ResolverEntry::new("64.6.64.6", "Verisign"),
		ResolverEntry::new("4.2.2.1", "Level3"),
		ResolverEntry::new("77.88.8.8", "Yandex"),
		ResolverEntry::new("185.222.222.222", "DNS.SB"),
		ResolverEntry::new("76.76.2.0", "Control D"),
	]
}

/// Return the fixed list of test domains.
///
/// Popular, globally anycast domains that every public resolver should have
/// cached, so the measurement reflects resolver latency rather than
/// authoritative lookup cost.
pub fn test_domains() -> Vec<String> {
	vec![
		"google.com",
		"cloudflare.com",
		"wikipedia.org",
		"github.com",
		"amazon.com",
	].into_iter().map(String::from).collect()
}
