//! `%MW` internal, `%SW` system, and `%KW` constant word read/write, single
//! and multi.

use unitelway::Client;
use unitelway::constants::object_type;

use crate::common::{config, transport_for};

#[tokio::test]
async fn read_internal_word_decodes_negative_value() {
    let cfg = config();
    let transport = transport_for(&cfg, &[0x34, 0xFF, 0xFF]); // -1 LE
    let mut client = Client::from_transport(transport, cfg);

    assert_eq!(client.read_internal_word(10).await.unwrap(), -1);
}

#[tokio::test]
async fn read_constant_word_decodes_value() {
    let cfg = config();
    let transport = transport_for(&cfg, &[0x36, 0x2C, 0x01]); // 300 LE
    let mut client = Client::from_transport(transport, cfg);

    assert_eq!(client.read_constant_word(0).await.unwrap(), 300);
}

#[tokio::test]
async fn write_system_word_reports_success() {
    let cfg = config();
    let transport = transport_for(&cfg, &[0xFE]);
    let mut client = Client::from_transport(transport, cfg);

    assert!(client.write_system_word(3, 42).await.unwrap());
}

#[tokio::test]
async fn read_internal_words_decodes_a_run_of_values() {
    let cfg = config();
    let mut response = vec![0x33, object_type::WORD];
    response.extend_from_slice(&1i16.to_le_bytes());
    response.extend_from_slice(&(-2i16).to_le_bytes());
    let transport = transport_for(&cfg, &response);
    let mut client = Client::from_transport(transport, cfg);

    assert_eq!(client.read_internal_words(0, 2).await.unwrap(), vec![1, -2]);
}

#[tokio::test]
async fn write_internal_words_reports_success() {
    let cfg = config();
    let transport = transport_for(&cfg, &[unitelway::constants::RESPONSE_WRITE_OK]);
    let mut client = Client::from_transport(transport, cfg);

    assert!(client.write_internal_words(0, &[1, 2, 3]).await.unwrap());
}
