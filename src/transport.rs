//! Byte-oriented duplex transport abstraction. Production code talks to a PLC
//! through [`TcpTransport`]; the `testing` feature substitutes
//! [`crate::testing::ScriptedTransport`] so the rest of the crate never knows
//! the difference, the way the teacher abstracts a netlink socket behind a
//! small connection trait.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use crate::error::Result;

/// An opaque byte-oriented duplex channel: send bytes, receive exactly `n`
/// bytes, close. Implementors are responsible for their own internal buffering.
pub trait Transport: Send + Sync {
    /// Write `bytes` to the channel.
    async fn send(&self, bytes: &[u8]) -> Result<()>;

    /// Read exactly `n` bytes from the channel, blocking until they arrive.
    async fn recv(&self, n: usize) -> Result<Vec<u8>>;

    /// Close the channel. Idempotent — closing twice is not an error.
    async fn close(&self) -> Result<()>;
}

/// [`Transport`] over a real TCP connection to a serial-to-TCP adapter.
pub struct TcpTransport {
    stream: Mutex<Option<TcpStream>>,
}

impl TcpTransport {
    /// Connect to `(ip, port)` and, if `connection_query` is given, send it
    /// immediately with no response expected — matches the vendor adapter's
    /// undocumented handshake requirement.
    #[tracing::instrument(skip(connection_query))]
    pub async fn connect(
        ip: std::net::Ipv4Addr,
        port: u16,
        connection_query: Option<&[u8]>,
    ) -> Result<Self> {
        let stream = TcpStream::connect((ip, port)).await?;
        let transport = Self {
            stream: Mutex::new(Some(stream)),
        };
        if let Some(query) = connection_query {
            tracing::debug!(len = query.len(), "sending connection query");
            transport.send(query).await?;
        }
        tracing::info!(%ip, port, "connected");
        Ok(transport)
    }
}

impl Transport for TcpTransport {
    async fn send(&self, bytes: &[u8]) -> Result<()> {
        let mut guard = self.stream.lock().await;
        let stream = guard
            .as_mut()
            .ok_or_else(|| std::io::Error::other("transport already closed"))?;
        stream.write_all(bytes).await?;
        tracing::trace!(len = bytes.len(), "sent");
        Ok(())
    }

    async fn recv(&self, n: usize) -> Result<Vec<u8>> {
        let mut guard = self.stream.lock().await;
        let stream = guard
            .as_mut()
            .ok_or_else(|| std::io::Error::other("transport already closed"))?;
        let mut buf = vec![0u8; n];
        stream.read_exact(&mut buf).await?;
        tracing::trace!(len = n, "received");
        Ok(buf)
    }

    async fn close(&self) -> Result<()> {
        let mut guard = self.stream.lock().await;
        if let Some(mut stream) = guard.take() {
            stream.shutdown().await?;
            tracing::info!("disconnected");
        }
        Ok(())
    }
}
