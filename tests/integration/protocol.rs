//! Framing and turn-arbitration behavior as seen through the public API:
//! the poll gate, a rejected message, and a corrupted checksum.

use unitelway::constants::{DLE, ENQ};
use unitelway::{Client, Error};

use crate::common::gated_config;

#[tokio::test]
async fn client_waits_for_the_poll_token_before_sending() {
    let cfg = gated_config();
    let wire = unitelway::protocol::build_frame(cfg.slave_address(), &cfg.xway(), &[0x5A, 0xAA]);

    let mut script = vec![DLE, ENQ, cfg.slave_address()];
    script.extend_from_slice(&wire);
    script.extend(std::iter::repeat(0u8).take(256));
    let transport = unitelway::testing::ScriptedTransport::new(script);

    let mut client = Client::from_transport(transport, cfg);
    assert!(client.mirror(&[0xAA]).await.unwrap());
}

#[tokio::test]
async fn a_refused_message_surfaces_as_an_error() {
    let cfg = gated_config();
    let mut wire = unitelway::protocol::build_frame(cfg.slave_address(), &cfg.xway(), &[0x5A, 0xAA]);
    wire[4] = 0x22; // X-WAY type byte: message refused
    let bcc_idx = wire.len() - 1;
    wire[bcc_idx] = wire[..bcc_idx].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));

    let mut script = vec![DLE, ENQ, cfg.slave_address()];
    script.extend_from_slice(&wire);
    script.extend(std::iter::repeat(0u8).take(256));
    let transport = unitelway::testing::ScriptedTransport::new(script);

    let mut client = Client::from_transport(transport, cfg);
    let err = client.mirror(&[0xAA]).await.unwrap_err();
    assert!(matches!(err, Error::RefusedByPeer));
}

#[tokio::test]
async fn a_corrupted_checksum_is_rejected() {
    let cfg = gated_config();
    let mut wire = unitelway::protocol::build_frame(cfg.slave_address(), &cfg.xway(), &[0x5A, 0xAA]);
    let last = wire.len() - 1;
    wire[last] ^= 0xFF;

    let mut script = vec![DLE, ENQ, cfg.slave_address()];
    script.extend_from_slice(&wire);
    script.extend(std::iter::repeat(0u8).take(256));
    let transport = unitelway::testing::ScriptedTransport::new(script);

    let mut client = Client::from_transport(transport, cfg);
    let err = client.mirror(&[0xAA]).await.unwrap_err();
    assert!(matches!(err, Error::BadChecksum { .. }));
}
