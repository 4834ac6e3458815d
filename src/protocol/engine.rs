//! Request/response engine: build a frame once, drive the poll/turn state
//! machine until a response is collected or the attempt times out, decode the
//! reply, then close the transport.

use std::time::Duration;

use crate::config::XwayAddress;
use crate::error::Result;
use crate::protocol::frame;
use crate::protocol::turn::{self, TransmitPolicy};
use crate::transport::Transport;

/// Send `unite_bytes` and return the decoded UNI-TE response bytes.
///
/// Mirrors `original_source/pyunitelway/client.py::run_unite`: resend the same
/// frame on every attempt timeout (no backoff, no attempt cap — the caller's
/// own outer timeout, if any, bounds this), then close the transport on
/// success regardless of whether the caller asked for another request next.
#[tracing::instrument(level = "info", skip(transport, unite_bytes), fields(link_address))]
pub async fn run_unite<P: TransmitPolicy, T: Transport>(
    transport: &T,
    link_address: u8,
    xway: &XwayAddress,
    unite_bytes: &[u8],
    timeout: Duration,
) -> Result<Vec<u8>> {
    let wire = frame::build_frame(link_address, xway, unite_bytes);

    let raw_response = loop {
        P::wait_for_turn(transport, link_address).await?;
        transport.send(&wire).await?;
        if let Some(response) = turn::await_response::<P, T>(transport, link_address, timeout).await? {
            break response;
        }
        tracing::debug!(link_address, "attempt timed out, resending");
    };

    let result = frame::parse_frame(&raw_response);
    transport.close().await?;
    result
}
