//! `%M` internal and `%S` system bit read/write, single and multi.

use unitelway::Client;

use crate::common::{config, transport_for};

#[tokio::test]
async fn read_internal_bit_reports_value_and_forcing() {
    let cfg = config();
    // response code 0x31, values byte bit0 set, forcing byte bit0 set
    let transport = transport_for(&cfg, &[0x31, 0b0000_0001, 0b0000_0001]);
    let mut client = Client::from_transport(transport, cfg);

    let (value, forcing, map) = client.read_internal_bit(0).await.unwrap();
    assert!(value);
    assert!(forcing);
    assert_eq!(map.len(), 8);
}

#[tokio::test]
async fn read_system_bit_has_no_forcing_concept() {
    let cfg = config();
    let transport = transport_for(&cfg, &[0x32, 0b0000_0010]);
    let mut client = Client::from_transport(transport, cfg);

    let (value, map) = client.read_system_bit(1).await.unwrap();
    assert!(value);
    assert_eq!(map.len(), 8);
}

#[tokio::test]
async fn write_internal_bit_reports_success() {
    let cfg = config();
    let transport = transport_for(&cfg, &[0xFE]);
    let mut client = Client::from_transport(transport, cfg);

    assert!(client.write_internal_bit(5, true).await.unwrap());
}

#[tokio::test]
async fn read_internal_bits_decodes_a_full_byte_range() {
    let cfg = config();
    let transport = transport_for(&cfg, &[0x33, unitelway::constants::object_type::INTERNAL_BIT, 0b1111_0000]);
    let mut client = Client::from_transport(transport, cfg);

    let map = client.read_internal_bits(0, 8).await.unwrap();
    assert_eq!(map.len(), 8);
    assert!(map[&7].0);
    assert!(!map[&0].0);
}
