//! Client configuration: slave address, UNI-TE category code, X-WAY addressing
//! tuple, and the VPN/polling-gate switch — validated once at construction
//! through [`ClientConfig::builder`] rather than checked piecemeal at each call
//! site.

use crate::constants::TIMEOUT_SEC;
use crate::error::{Error, Result};

/// The five X-WAY addressing octets carried after the fixed `0x20` type byte
/// in every request's header. See `original_source/pyunitelway/client.py`'s
/// `_xway_start` and the Schneider X-WAY addressing guide for the 5/6-level
/// addressing scheme `ext1`/`ext2` support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XwayAddress {
    pub network: u8,
    pub station: u8,
    pub gate: u8,
    pub ext1: u8,
    pub ext2: u8,
}

/// Immutable client configuration, constructed through [`ClientConfig::builder`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub(crate) slave_address: u8,
    pub(crate) category_code: u8,
    pub(crate) xway: XwayAddress,
    pub(crate) vpn_mode: bool,
    pub(crate) timeout: std::time::Duration,
}

impl ClientConfig {
    /// Start building a configuration.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// This client's slave link address.
    pub fn slave_address(&self) -> u8 {
        self.slave_address
    }

    /// The UNI-TE category code embedded in every request.
    pub fn category_code(&self) -> u8 {
        self.category_code
    }

    /// Whether the polling-turn gate is bypassed for this client.
    pub fn vpn_mode(&self) -> bool {
        self.vpn_mode
    }

    /// Per-attempt response timeout.
    pub fn timeout(&self) -> std::time::Duration {
        self.timeout
    }

    /// The X-WAY addressing tuple embedded in every request.
    pub fn xway(&self) -> XwayAddress {
        self.xway
    }
}

/// Validating builder for [`ClientConfig`].
///
/// `category_code` must fit in 3 bits (0..=7) since it is embedded in a UNI-TE
/// request byte alongside other bit fields; `slave_address` is a full byte but
/// must not collide with a real slave PLC on the bus — that collision can't be
/// checked here, only documented (see the crate's top-level docs).
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    slave_address: Option<u8>,
    category_code: Option<u8>,
    xway: Option<XwayAddress>,
    vpn_mode: bool,
    timeout: Option<std::time::Duration>,
}

impl ClientConfigBuilder {
    /// Set this client's slave link address.
    pub fn slave_address(mut self, address: u8) -> Self {
        self.slave_address = Some(address);
        self
    }

    /// Set the UNI-TE category code (must be 0..=7).
    pub fn category_code(mut self, code: u8) -> Self {
        self.category_code = Some(code);
        self
    }

    /// Set the X-WAY addressing tuple.
    pub fn xway(mut self, xway: XwayAddress) -> Self {
        self.xway = Some(xway);
        self
    }

    /// Bypass the polling-turn gate (set when tunneling over a VPN that carries
    /// only this client's traffic).
    pub fn vpn_mode(mut self, enabled: bool) -> Self {
        self.vpn_mode = enabled;
        self
    }

    /// Override the default per-attempt response timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<ClientConfig> {
        let category_code = self
            .category_code
            .ok_or_else(|| Error::InvalidConfig("category_code is required".into()))?;
        if category_code > 0x07 {
            return Err(Error::InvalidConfig(format!(
                "category_code must be between 0 and 7, got {category_code}"
            )));
        }

        let slave_address = self
            .slave_address
            .ok_or_else(|| Error::InvalidConfig("slave_address is required".into()))?;

        let xway = self
            .xway
            .ok_or_else(|| Error::InvalidConfig("xway address is required".into()))?;

        Ok(ClientConfig {
            slave_address,
            category_code,
            xway,
            vpn_mode: self.vpn_mode,
            timeout: self.timeout.unwrap_or(std::time::Duration::from_secs(TIMEOUT_SEC)),
        })
    }
}
