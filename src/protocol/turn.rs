//! Poll/turn state machine: in non-VPN mode, a client must wait for the master's
//! `[DLE, ENQ, my_address]` token before it may transmit, then must separate its
//! own response frame from foreign polls interleaved in the byte stream.
//!
//! The VPN/non-VPN distinction is modeled as a `TransmitPolicy` trait with two
//! zero-sized implementations rather than a `vpn_mode: bool` threaded through
//! every call — `Client` picks one at construction time and the engine never
//! branches on a runtime flag.

use std::time::Duration;

use crate::constants::{DLE, ENQ};
use crate::error::Result;
use crate::protocol::frame;
use crate::transport::Transport;
use crate::util;

/// How a client acquires permission to transmit on the bus.
///
/// `wait_for_turn` resolves once the client may send; `wait_for_turn` under
/// [`Immediate`] returns without reading anything, under [`GatedByPoll`] it
/// blocks until the master's enquiry token for this slave address appears.
pub trait TransmitPolicy: Send + Sync {
    /// Block until the caller may transmit. `link_address` is this client's slave address.
    async fn wait_for_turn<T: Transport>(transport: &T, link_address: u8) -> Result<()>;

    /// Whether `await_response` should give up after `timeout` and let the engine resend.
    fn applies_timeout() -> bool;
}

/// Non-VPN transmit policy: wait for `[DLE, ENQ, link_address]` before sending.
pub struct GatedByPoll;

impl TransmitPolicy for GatedByPoll {
    #[tracing::instrument(level = "debug", skip(transport))]
    async fn wait_for_turn<T: Transport>(transport: &T, link_address: u8) -> Result<()> {
        let needle = [DLE, ENQ, link_address];
        let mut buf: Vec<u8> = Vec::new();
        loop {
            let chunk = transport.recv(3).await?;
            buf.extend_from_slice(&chunk);
            let (found, _) = util::find_subsequence(&buf, &needle);
            if found {
                tracing::trace!(link_address, "own poll token observed, may transmit");
                return Ok(());
            }
            // bound the scan buffer so a long run of foreign polls doesn't grow forever
            if buf.len() > 4096 {
                let keep = buf.len() - 3;
                buf.drain(0..keep);
            }
        }
    }

    fn applies_timeout() -> bool {
        true
    }
}

/// VPN transmit policy: the tunnel carries only our traffic, so there is no
/// polling gate to wait for.
pub struct Immediate;

impl TransmitPolicy for Immediate {
    async fn wait_for_turn<T: Transport>(_transport: &T, _link_address: u8) -> Result<()> {
        Ok(())
    }

    fn applies_timeout() -> bool {
        false
    }
}

/// Read bytes from `transport` until the full UNI-TELWAY response frame addressed
/// to `link_address` has been collected, discarding any foreign `[DLE, ENQ, x]`
/// polls found along the way. Returns `None` on timeout (caller should resend).
///
/// Under [`Immediate`] (`P::applies_timeout() == false`) this waits indefinitely,
/// matching the VPN-mode behavior where there is no polling gate to time out on.
#[tracing::instrument(level = "debug", skip(transport))]
pub async fn await_response<P: TransmitPolicy, T: Transport>(
    transport: &T,
    link_address: u8,
    timeout: Duration,
) -> Result<Option<Vec<u8>>> {
    let scan = scan_for_response(transport, link_address);
    if !P::applies_timeout() {
        return Ok(Some(scan.await?));
    }
    match tokio::time::timeout(timeout, scan).await {
        Ok(result) => Ok(Some(result?)),
        Err(_) => {
            tracing::warn!(link_address, ?timeout, "timed out waiting for response");
            Ok(None)
        }
    }
}

async fn scan_for_response<T: Transport>(transport: &T, link_address: u8) -> Result<Vec<u8>> {
    let mut buf: Vec<u8> = Vec::new();
    loop {
        let chunk = transport.recv(3).await?;
        buf.extend_from_slice(&chunk);

        let (enq_found, enq_idx) = frame::find_enq_token(&buf);
        if enq_found && buf.len() > enq_idx + 2 {
            buf.drain(enq_idx..enq_idx + 3);
        }

        let (stx_found, stx_idx) = frame::find_stx_token(&buf);
        if stx_found {
            let extra = transport.recv(1).await?;
            buf.extend_from_slice(&extra);
            if let Some(&received_addr) = buf.get(stx_idx + 2) {
                if received_addr == link_address {
                    let mut reply = buf[stx_idx..].to_vec();
                    let tail = transport.recv(256).await?;
                    reply.extend_from_slice(&tail);
                    tracing::debug!(link_address, "matched response start-of-frame");
                    return Ok(reply);
                }
                // foreign response frame start; drop the three-byte token and keep scanning
                buf.drain(stx_idx..stx_idx + 3);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STX;
    use crate::testing::ScriptedTransport;

    #[tokio::test]
    async fn gated_by_poll_waits_for_own_address() {
        let transport = ScriptedTransport::new(vec![DLE, ENQ, 0x07, DLE, ENQ, 0x03]);
        GatedByPoll::wait_for_turn(&transport, 0x03).await.unwrap();
    }

    #[tokio::test]
    async fn immediate_never_reads() {
        let transport = ScriptedTransport::new(vec![]);
        Immediate::wait_for_turn(&transport, 0x03).await.unwrap();
        assert_eq!(transport.bytes_consumed(), 0);
    }

    #[tokio::test]
    async fn await_response_discards_foreign_poll_and_finds_reply() {
        let mut script = vec![DLE, ENQ, 0x07]; // foreign poll, discarded
        script.extend_from_slice(&[DLE, STX, 0x03, 0x02, 0x34, 0x00]); // our frame start
        script.extend(std::iter::repeat(0u8).take(256));
        let transport = ScriptedTransport::new(script);

        let got = await_response::<GatedByPoll, _>(&transport, 0x03, Duration::from_secs(1))
            .await
            .unwrap();
        assert!(got.is_some());
        let buf = got.unwrap();
        assert_eq!(&buf[..3], &[DLE, STX, 0x03]);
    }

    #[tokio::test]
    async fn await_response_times_out_without_match() {
        let transport = ScriptedTransport::new(vec![DLE, ENQ, 0x07]);
        let got = await_response::<GatedByPoll, _>(&transport, 0x03, Duration::from_millis(10))
            .await
            .unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn immediate_policy_ignores_timeout() {
        assert!(!Immediate::applies_timeout());
        assert!(GatedByPoll::applies_timeout());
    }
}
