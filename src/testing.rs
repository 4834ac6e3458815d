//! In-memory [`Transport`] for exercising the protocol stack without a real PLC
//! or TCP-to-serial adapter, mirroring the teacher's `lab` feature.

use std::sync::Mutex;

use crate::error::Result;
use crate::transport::Transport;

/// A [`Transport`] backed by a fixed inbound byte script and a recorded
/// outbound log.
///
/// `recv` serves bytes from the script in order; once the script is exhausted
/// it blocks forever (matching a real half-duplex line with no more traffic —
/// tests should bound this with an outer `tokio::time::timeout`). `send` never
/// blocks; it appends to `sent` for the test to assert against.
pub struct ScriptedTransport {
    inbound: Mutex<std::collections::VecDeque<u8>>,
    sent: Mutex<Vec<u8>>,
    consumed: Mutex<usize>,
    closed: Mutex<bool>,
}

impl ScriptedTransport {
    /// Build a transport that will serve `script` bytes to successive `recv` calls.
    pub fn new(script: Vec<u8>) -> Self {
        Self {
            inbound: Mutex::new(script.into()),
            sent: Mutex::new(Vec::new()),
            consumed: Mutex::new(0),
            closed: Mutex::new(false),
        }
    }

    /// Everything written via `send` so far, in order.
    pub fn sent_bytes(&self) -> Vec<u8> {
        self.sent.lock().expect("poisoned").clone()
    }

    /// Total bytes handed out by `recv` so far.
    pub fn bytes_consumed(&self) -> usize {
        *self.consumed.lock().expect("poisoned")
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        *self.closed.lock().expect("poisoned")
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, bytes: &[u8]) -> Result<()> {
        self.sent.lock().expect("poisoned").extend_from_slice(bytes);
        Ok(())
    }

    async fn recv(&self, n: usize) -> Result<Vec<u8>> {
        {
            let mut inbound = self.inbound.lock().expect("poisoned");
            if inbound.len() >= n {
                let out: Vec<u8> = inbound.drain(..n).collect();
                drop(inbound);
                *self.consumed.lock().expect("poisoned") += n;
                return Ok(out);
            }
        }
        // script exhausted: behave like a socket with no more inbound traffic —
        // never resolve on our own. A caller racing this against
        // `tokio::time::timeout` observes a timeout, not a read result.
        std::future::pending().await
    }

    async fn close(&self) -> Result<()> {
        *self.closed.lock().expect("poisoned") = true;
        Ok(())
    }
}
