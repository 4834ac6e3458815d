//! Shared helpers for the integration tests: a default client configuration
//! and a scripted wire-level response builder, so each test only has to
//! describe the UNI-TE bytes it cares about.

use unitelway::testing::ScriptedTransport;
use unitelway::{ClientConfig, XwayAddress};

pub fn xway() -> XwayAddress {
    XwayAddress {
        network: 0,
        station: 1,
        gate: 0,
        ext1: 0,
        ext2: 0,
    }
}

/// `vpn_mode(true)` by default so tests don't have to script an enquiry
/// token before every response; gated-turn tests opt back into the poll gate.
pub fn config() -> ClientConfig {
    ClientConfig::builder()
        .slave_address(0x03)
        .category_code(2)
        .xway(xway())
        .vpn_mode(true)
        .build()
        .unwrap()
}

pub fn gated_config() -> ClientConfig {
    ClientConfig::builder()
        .slave_address(0x03)
        .category_code(2)
        .xway(xway())
        .build()
        .unwrap()
}

/// Wrap `unite_response` in a wire frame for `cfg`, padded with trailing
/// zero bytes so the engine's final bounded `recv` doesn't block forever.
pub fn transport_for(cfg: &ClientConfig, unite_response: &[u8]) -> ScriptedTransport {
    let mut bytes = unitelway::protocol::build_frame(cfg.slave_address(), &cfg.xway(), unite_response);
    bytes.extend(std::iter::repeat(0u8).take(256));
    ScriptedTransport::new(bytes)
}
