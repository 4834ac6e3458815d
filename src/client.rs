//! High-level client: the public surface mapping memory-area operations onto
//! the frame codec, poll/turn state machine, and request/response engine.
//!
//! Grounded on `original_source/pyunitelway/client.py`'s `UnitelwayClient`:
//! one socket per logical transaction. `run_unite` closes the transport on
//! success (`protocol::engine::run_unite`), so every public operation here
//! consumes the current connection — callers reconnect before their next
//! call, exactly as the Python original's callers must re-run
//! `connect_socket` before each new request.

use std::net::Ipv4Addr;

use crate::config::ClientConfig;
use crate::constants::{object_type, request};
use crate::error::{Error, Result};
use crate::protocol::engine;
use crate::protocol::turn::{GatedByPoll, Immediate};
use crate::requests::io_channel::IoChannelReport;
use crate::requests::{bits, dwords, io_channel, mirror, words};
use crate::transport::{TcpTransport, Transport};

/// A UNI-TELWAY client bound to one [`Transport`]. Every public operation
/// consumes the current connection on success — see the module docs.
pub struct Client<T: Transport = TcpTransport> {
    config: ClientConfig,
    transport: Option<T>,
}

impl Client<TcpTransport> {
    /// Open a TCP connection to the serial-to-TCP adapter and, if given, send
    /// `connection_query` immediately with no expected reply.
    #[tracing::instrument(skip(config, connection_query))]
    pub async fn connect(
        ip: Ipv4Addr,
        port: u16,
        connection_query: Option<&[u8]>,
        config: ClientConfig,
    ) -> Result<Self> {
        let transport = TcpTransport::connect(ip, port, connection_query).await?;
        Ok(Self {
            config,
            transport: Some(transport),
        })
    }
}

impl<T: Transport> Client<T> {
    /// Wrap an already-connected transport (e.g. [`crate::testing::ScriptedTransport`]).
    pub fn from_transport(transport: T, config: ClientConfig) -> Self {
        Self {
            config,
            transport: Some(transport),
        }
    }

    /// Close the underlying transport. Idempotent — a no-op if already closed
    /// (which is the common case: a successful operation already closed it).
    pub async fn disconnect(&mut self) -> Result<()> {
        if let Some(transport) = self.transport.take() {
            transport.close().await?;
        }
        Ok(())
    }

    /// Run one UNI-TE request/response round trip and drop the connection —
    /// the engine closes it on success; on failure the caller must
    /// reconnect, per §7 of the design notes.
    async fn run(&mut self, unite_bytes: &[u8]) -> Result<Vec<u8>> {
        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| Error::Transport(std::io::Error::other("client is not connected")))?;

        let link_address = self.config.slave_address();
        let xway = self.config.xway();
        let timeout = self.config.timeout();

        let result = if self.config.vpn_mode() {
            engine::run_unite::<Immediate, T>(transport, link_address, &xway, unite_bytes, timeout).await
        } else {
            engine::run_unite::<GatedByPoll, T>(transport, link_address, &xway, unite_bytes, timeout).await
        };

        // the engine already physically closed the transport on success; drop
        // our handle so `disconnect`/a later `run` can't observe a stale one
        if result.is_ok() {
            self.transport = None;
        }
        result
    }

    fn category_code(&self) -> u8 {
        self.config.category_code()
    }

    /// Echo-test the PLC: `true` if the response data matches what was sent.
    #[tracing::instrument(skip(self, data))]
    pub async fn mirror(&mut self, data: &[u8]) -> Result<bool> {
        let query = mirror::build(self.category_code(), data);
        let response = self.run(&query).await?;
        mirror::parse(&response, data)
    }

    /// Read `%M` internal bit `address`. Returns `(value, forcing, byte map)`.
    #[tracing::instrument(skip(self))]
    pub async fn read_internal_bit(&mut self, address: u16) -> Result<(bool, bool, bits::BitMap)> {
        let query = bits::build_read_internal(self.category_code(), address);
        let response = self.run(&query).await?;
        bits::parse_read_internal(address, &response)
    }

    /// Read `%S` system bit `address`. Returns `(value, byte map)`.
    #[tracing::instrument(skip(self))]
    pub async fn read_system_bit(&mut self, address: u16) -> Result<(bool, bits::PlainBitMap)> {
        let query = bits::build_read_system(self.category_code(), address);
        let response = self.run(&query).await?;
        bits::parse_read_system(address, &response)
    }

    /// Read `n` (multiple of 8) consecutive `%M` bits starting at `address`.
    #[tracing::instrument(skip(self))]
    pub async fn read_internal_bits(&mut self, address: u16, n: u16) -> Result<bits::BitMap> {
        let query = bits::build_read_many(self.category_code(), object_type::INTERNAL_BIT, address, n)?;
        let response = self.run(&query).await?;
        bits::parse_read_many_internal(address, n, &response)
    }

    /// Read `n` (multiple of 8) consecutive `%S` bits starting at `address`.
    #[tracing::instrument(skip(self))]
    pub async fn read_system_bits(&mut self, address: u16, n: u16) -> Result<bits::PlainBitMap> {
        let query = bits::build_read_many(self.category_code(), object_type::SYSTEM_BIT, address, n)?;
        let response = self.run(&query).await?;
        bits::parse_read_many_system(address, n, &response)
    }

    /// Write `%M` internal bit `address`.
    #[tracing::instrument(skip(self))]
    pub async fn write_internal_bit(&mut self, address: u16, value: bool) -> Result<bool> {
        let query = bits::build_write_internal(self.category_code(), address, value);
        let response = self.run(&query).await?;
        bits::parse_write(request::WRITE_INTERNAL_BIT, &response)
    }

    /// Write `%S` system bit `address`.
    #[tracing::instrument(skip(self))]
    pub async fn write_system_bit(&mut self, address: u16, value: bool) -> Result<bool> {
        let query = bits::build_write_system(self.category_code(), address, value);
        let response = self.run(&query).await?;
        bits::parse_write(request::WRITE_SYSTEM_BIT, &response)
    }

    async fn read_word(&mut self, request_code: u8, address: u16) -> Result<i16> {
        let query = words::build_read(request_code, self.category_code(), address);
        let response = self.run(&query).await?;
        words::parse_read(request_code, &response)
    }

    /// Read `%MW` internal word `address`.
    pub async fn read_internal_word(&mut self, address: u16) -> Result<i16> {
        self.read_word(request::READ_INTERNAL_WORD, address).await
    }

    /// Read `%SW` system word `address`.
    pub async fn read_system_word(&mut self, address: u16) -> Result<i16> {
        self.read_word(request::READ_SYSTEM_WORD, address).await
    }

    /// Read `%KW` constant word `address`.
    pub async fn read_constant_word(&mut self, address: u16) -> Result<i16> {
        self.read_word(request::READ_CONSTANT_WORD, address).await
    }

    async fn write_word(&mut self, request_code: u8, address: u16, value: i16) -> Result<bool> {
        let query = words::build_write(request_code, self.category_code(), address, value);
        let response = self.run(&query).await?;
        words::parse_write(request_code, &response)
    }

    /// Write `%MW` internal word `address`.
    pub async fn write_internal_word(&mut self, address: u16, value: i16) -> Result<bool> {
        self.write_word(request::WRITE_INTERNAL_WORD, address, value).await
    }

    /// Write `%SW` system word `address`.
    pub async fn write_system_word(&mut self, address: u16, value: i16) -> Result<bool> {
        self.write_word(request::WRITE_SYSTEM_WORD, address, value).await
    }

    async fn read_words(&mut self, seg: u8, address: u16, n: u16) -> Result<Vec<i16>> {
        let query = words::build_read_many(self.category_code(), seg, address, n);
        let response = self.run(&query).await?;
        words::parse_read_many(&response)
    }

    /// Read `n` consecutive `%MW` internal words starting at `address`.
    pub async fn read_internal_words(&mut self, address: u16, n: u16) -> Result<Vec<i16>> {
        self.read_words(words::INTERNAL_SEGMENT, address, n).await
    }

    /// Read `n` consecutive `%SW` system words starting at `address`.
    pub async fn read_system_words(&mut self, address: u16, n: u16) -> Result<Vec<i16>> {
        self.read_words(words::SYSTEM_SEGMENT, address, n).await
    }

    /// Read `n` consecutive `%KW` constant words starting at `address`.
    pub async fn read_constant_words(&mut self, address: u16, n: u16) -> Result<Vec<i16>> {
        self.read_words(words::CONSTANT_SEGMENT, address, n).await
    }

    async fn write_words(&mut self, seg: u8, address: u16, data: &[i16]) -> Result<bool> {
        let query = words::build_write_many(self.category_code(), seg, address, data);
        let response = self.run(&query).await?;
        words::parse_write_many(&response)
    }

    /// Write `data` as consecutive `%MW` internal words starting at `address`.
    pub async fn write_internal_words(&mut self, address: u16, data: &[i16]) -> Result<bool> {
        self.write_words(words::INTERNAL_SEGMENT, address, data).await
    }

    /// Write `data` as consecutive `%SW` system words starting at `address`.
    pub async fn write_system_words(&mut self, address: u16, data: &[i16]) -> Result<bool> {
        self.write_words(words::SYSTEM_SEGMENT, address, data).await
    }

    async fn read_dword(&mut self, request_code: u8, address: u16) -> Result<i32> {
        let query = dwords::build_read(request_code, self.category_code(), address);
        let response = self.run(&query).await?;
        dwords::parse_read(request_code, &response)
    }

    /// Read `%MD` internal double word `address`.
    pub async fn read_internal_dword(&mut self, address: u16) -> Result<i32> {
        self.read_dword(request::READ_INTERNAL_DWORD, address).await
    }

    /// Read `%KD` constant double word `address`.
    pub async fn read_constant_dword(&mut self, address: u16) -> Result<i32> {
        self.read_dword(request::READ_CONSTANT_DWORD, address).await
    }

    /// Write `%MD` internal double word `address`.
    #[tracing::instrument(skip(self))]
    pub async fn write_internal_dword(&mut self, address: u16, value: i32) -> Result<bool> {
        let query = dwords::build_write(request::WRITE_INTERNAL_DWORD, self.category_code(), address, value);
        let response = self.run(&query).await?;
        dwords::parse_write(request::WRITE_INTERNAL_DWORD, &response)
    }

    async fn read_dwords(&mut self, seg: u8, address: u16, n: u16) -> Result<Vec<i32>> {
        let query = dwords::build_read_many(self.category_code(), seg, address, n);
        let response = self.run(&query).await?;
        dwords::parse_read_many(&response)
    }

    /// Read `n` `%MD` internal double words starting at `address`. The PLC
    /// steps by 2 addresses per double word — use
    /// [`dwords::stepped_addresses`] to recover which address each entry of
    /// the returned list corresponds to.
    pub async fn read_internal_dwords(&mut self, address: u16, n: u16) -> Result<Vec<i32>> {
        self.read_dwords(dwords::INTERNAL_SEGMENT, address, n).await
    }

    /// Read `n` `%KD` constant double words starting at `address` (see
    /// [`Client::read_internal_dwords`] for the addressing step).
    pub async fn read_constant_dwords(&mut self, address: u16, n: u16) -> Result<Vec<i32>> {
        self.read_dwords(dwords::CONSTANT_SEGMENT, address, n).await
    }

    /// Write `data` as `%MD` internal double words starting at `address`,
    /// stepping by 2 addresses per value.
    #[tracing::instrument(skip(self, data))]
    pub async fn write_internal_dwords(&mut self, address: u16, data: &[i32]) -> Result<bool> {
        let query = dwords::build_write_many(self.category_code(), dwords::INTERNAL_SEGMENT, address, data);
        let response = self.run(&query).await?;
        dwords::parse_write_many(&response)
    }

    /// Read `%I`/`%Q` bits and `%IW`/`%QW` words together from one channel.
    #[tracing::instrument(skip(self))]
    pub async fn read_io_channel(
        &mut self,
        channel_address: &[u8],
        obj_type: u8,
        number: u8,
        start_address: u8,
    ) -> Result<IoChannelReport> {
        let query = io_channel::build_read(self.category_code(), channel_address, obj_type, number, start_address);
        let response = self.run(&query).await?;
        io_channel::parse_read(start_address as u16, &response)
    }

    /// Write bits and words together to one I/O channel.
    #[tracing::instrument(skip(self, bit_values, word_values))]
    pub async fn write_io_channel(
        &mut self,
        channel_address: &[u8],
        obj_type: u8,
        start_address: u16,
        number: u16,
        bit_values: &[u8],
        word_values: &[i16],
    ) -> Result<bool> {
        let query = io_channel::build_write(
            self.category_code(),
            channel_address,
            obj_type,
            start_address,
            number,
            bit_values,
            word_values,
        );
        let response = self.run(&query).await?;
        io_channel::parse_write(&response)
    }
}
