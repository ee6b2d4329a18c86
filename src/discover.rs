//! UDP broadcast discovery (spec.md §4.8). Named as an external
//! collaborator for the CLI surface, but kept as a plain library function
//! since the original ships it as an importable function, not just a
//! script (spec.md §2 "Supplemented features"). Ground truth: `examples/
//! original_source/luxtronik/discover.py` (`discover`).

use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::debug;

const DISCOVERY_PORTS: [u16; 2] = [4444, 47808];
const MAGIC_REQUEST: &str = "2000;111;1;\0";
const MAGIC_RESPONSE_PREFIX: &str = "2500;111;";
const PER_PORT_TIMEOUT: Duration = Duration::from_secs(2);

/// Broadcast a discovery packet on each well-known port in turn and
/// return the first responder's `(ip, port)`. `port` is `None` when the
/// response doesn't carry a valid decimal port (an old firmware quirk the
/// original source tolerates rather than treats as failure).
pub async fn probe() -> Option<(String, Option<u16>)> {
    for &port in &DISCOVERY_PORTS {
        debug!(port, "sending discovery packet");
        if let Some(found) = probe_port(port).await {
            return Some(found);
        }
    }
    None
}

async fn probe_port(port: u16) -> Option<(String, Option<u16>)> {
    let socket = UdpSocket::bind(("0.0.0.0", port)).await.ok()?;
    socket.set_broadcast(true).ok()?;
    socket.send_to(MAGIC_REQUEST.as_bytes(), ("255.255.255.255", port)).await.ok()?;

    let mut buf = [0u8; 1024];
    loop {
        let recv = timeout(PER_PORT_TIMEOUT, socket.recv_from(&mut buf)).await;
        let (len, from) = match recv {
            Ok(Ok(pair)) => pair,
            Ok(Err(_)) | Err(_) => return None,
        };
        let text = String::from_utf8_lossy(&buf[..len]);
        if text == MAGIC_REQUEST {
            continue;
        }
        if let Some(rest) = text.strip_prefix(MAGIC_RESPONSE_PREFIX) {
            let fields: Vec<&str> = text.split(';').collect();
            let port = fields.get(2).and_then(|s| s.parse::<u16>().ok());
            if port.is_none() {
                debug!("response did not contain a valid port number, an old Luxtronik software version might be the reason");
            }
            debug!(ip = %from.ip(), fields = rest, "received discovery answer");
            return Some((from.ip().to_string(), port));
        }
        debug!(ip = %from.ip(), "received answer with wrong magic bytes, skipping");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn probe_times_out_quickly_when_nothing_answers() {
        // No real heat pump on the test network; both ports time out and
        // `probe` returns `None` well within the test harness's deadline.
        let result = timeout(Duration::from_secs(10), probe()).await;
        assert!(result.is_ok(), "probe() should return, not hang, when unanswered");
    }
}
