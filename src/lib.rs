//! Async client for the UNI-TELWAY / X-WAY / UNI-TE serial-over-TCP protocol
//! stack used by Schneider Modicon PLCs (Premium/Quantum/M340 and compatible).
//!
//! A TCP-to-serial adapter exposes the PLC's UNI-TELWAY bus verbatim over a
//! plain socket; this crate speaks that byte stream directly — framing,
//! checksum, half-duplex poll/turn arbitration, and the UNI-TE request
//! catalog for bit/word/dword memory areas and I/O channels.
//!
//! # Example
//!
//! ```ignore
//! use std::net::Ipv4Addr;
//! use unitelway::{Client, ClientConfig, XwayAddress};
//!
//! #[tokio::main]
//! async fn main() -> unitelway::Result<()> {
//!     let config = ClientConfig::builder()
//!         .slave_address(0x03)
//!         .category_code(2)
//!         .xway(XwayAddress { network: 0, station: 1, gate: 0, ext1: 0, ext2: 0 })
//!         .build()?;
//!
//!     let mut client = Client::connect(Ipv4Addr::new(192, 168, 1, 50), 8234, None, config).await?;
//!     let value = client.read_internal_word(10).await?;
//!     println!("%MW10 = {value}");
//!     Ok(())
//! }
//! ```
//!
//! # Connection lifetime
//!
//! Every public [`Client`] operation is one complete UNI-TELWAY transaction:
//! it opens (or reuses) the transport, sends a request, waits for the
//! matching reply, and — on success — closes the transport, matching the
//! vendor adapter's one-transaction-per-connection behavior. Call
//! [`Client::connect`] again before the next operation.
//!
//! # VPN mode
//!
//! When tunneling the bus over a link that carries only this client's
//! traffic (no other UNI-TELWAY masters sharing the wire), set
//! [`ClientConfigBuilder::vpn_mode`] to bypass the poll/turn gate — the
//! client transmits immediately instead of waiting for its enquiry token.
//!
//! # Testing
//!
//! The `testing` feature exposes [`testing::ScriptedTransport`], an in-memory
//! [`Transport`] for exercising the protocol stack without a PLC or adapter.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod protocol;
pub mod requests;
pub mod transport;
pub mod util;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::Client;
pub use config::{ClientConfig, ClientConfigBuilder, XwayAddress};
pub use error::{Error, Result};
pub use transport::{TcpTransport, Transport};
