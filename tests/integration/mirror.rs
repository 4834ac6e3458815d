//! MIRROR echo test and the one-socket-per-transaction connection lifecycle.

use unitelway::{Client, Error};

use crate::common::{config, transport_for};

#[tokio::test]
async fn mirror_echoes_back_true() {
    let cfg = config();
    let transport = transport_for(&cfg, &[0x5A, 0x01, 0x02, 0x03]);
    let mut client = Client::from_transport(transport, cfg);

    assert!(client.mirror(&[0x01, 0x02, 0x03]).await.unwrap());
}

#[tokio::test]
async fn a_second_call_without_reconnecting_fails() {
    let cfg = config();
    let transport = transport_for(&cfg, &[0x5A, 0xAA]);
    let mut client = Client::from_transport(transport, cfg);

    assert!(client.mirror(&[0xAA]).await.unwrap());
    let err = client.mirror(&[0xAA]).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
