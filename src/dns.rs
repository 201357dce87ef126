use std::net::SocketAddr;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use hickory_proto::op::{Message, MessageType, Query, ResponseCode};
use hickory_proto::rr::{Name, RecordType};
use tokio::net::UdpSocket;

/// Outcome of a single timed probe against one (resolver, domain) pair.
///
/// A failed probe carries no timing value. Timeouts, refusals, and malformed
/// responses are indistinguishable here; the caller only counts failures.
#[derive(Debug, Clone, Copy)]
pub struct ProbeResult {
	pub elapsed_ms: Option<u64>,
	pub succeeded: bool,
}

impl ProbeResult {
	pub fn success(elapsed_ms: u64) -> Self {
		Self { elapsed_ms: Some(elapsed_ms), succeeded: true }
	}

	pub fn failure() -> Self {
		Self { elapsed_ms: None, succeeded: false }
	}
}

/// Build an A-record DNS query for the given domain.
///
/// Returns the serialized query bytes ready to send over UDP.
pub fn build_query(domain: &str, txid: u16) -> Result<Vec<u8>> {
	let name = Name::from_ascii(domain)
		.map_err(|e| anyhow!("invalid domain name '{}': {}", domain, e))?;

	let mut message = Message::new();
	message.set_id(txid);
	message.set_recursion_desired(true);
	message.add_query(Query::query(name, RecordType::A));

	let bytes = message.to_vec()
		.map_err(|e| anyhow!("failed to serialize DNS query: {}", e))?;
	Ok(bytes)
}

/// Parse a DNS response, validating the transaction ID and extracting the rcode.
///
/// Returns an error if the response cannot be parsed or the txid does not match.
pub fn parse_response(bytes: &[u8], expected_txid: u16) -> Result<ResponseCode> {
	let message = Message::from_vec(bytes)
		.map_err(|e| anyhow!("failed to parse DNS response: {}", e))?;

	if message.id() != expected_txid {
		return Err(anyhow!(
			"txid mismatch: expected {}, got {}",
			expected_txid, message.id()
		));
	}

	if message.message_type() != MessageType::Response {
		return Err(anyhow!("received a query instead of a response"));
	}

	Ok(message.response_code())
}

/// Verify that the host can issue DNS queries at all.
///
/// Binding an unbound UDP socket is the minimum capability every probe
/// needs; if this fails, no probe can succeed and the run aborts up front.
pub async fn ensure_query_capability() -> Result<()> {
	UdpSocket::bind("0.0.0.0:0")
		.await
		.context("no DNS query capability available (cannot bind a UDP socket)")?;
	Ok(())
}

/// Issue one timed A query against a resolver and measure latency.
///
/// Binds a dedicated socket per probe to avoid response stealing between
/// concurrent tasks. The recv loop retries on txid mismatch within the
/// remaining timeout budget. Every failure mode collapses into a single
/// failed ProbeResult; retries, if any, are the caller's concern.
pub async fn probe(resolver: SocketAddr, domain: &str, timeout: Duration) -> ProbeResult {
	let txid: u16 = rand::random();
	let query_bytes = match build_query(domain, txid) {
		Ok(bytes) => bytes,
		Err(_) => return ProbeResult::failure(),
	};

	let bind_addr = if resolver.is_ipv4() {
		"0.0.0.0:0"
	} else {
		"[::]:0"
	};
	let socket = match UdpSocket::bind(bind_addr).await {
		Ok(s) => s,
		Err(_) => return ProbeResult::failure(),
	};

	// Timing wraps send+recv only
	let start = Instant::now();
	if socket.send_to(&query_bytes, resolver).await.is_err() {
		return ProbeResult::failure();
	}

	let mut buf = vec![0u8; 4096];
	let max_retries = 3;
	for _ in 0..max_retries {
		let elapsed = start.elapsed();
		if elapsed >= timeout {
			break;
		}
		let remaining = timeout - elapsed;

		match tokio::time::timeout(remaining, socket.recv_from(&mut buf)).await {
			Ok(Ok((len, _src))) => {
				let elapsed_ms = start.elapsed().as_millis() as u64;
				match parse_response(&buf[..len], txid) {
					Ok(ResponseCode::NoError) => {
						return ProbeResult::success(elapsed_ms);
					}
					Ok(_) => {
						// Delivered but unresolvable (SERVFAIL, REFUSED, ...)
						return ProbeResult::failure();
					}
					Err(_) => {
						// txid mismatch or parse error, retry recv
						continue;
					}
				}
			}
			_ => {
				// Timeout or recv error
				break;
			}
		}
	}

	ProbeResult::failure()
}
