//! `%MD` internal and `%KD` constant double word read/write, single and
//! multi, including the step-of-2 addressing quirk.

use unitelway::Client;
use unitelway::constants::object_type;
use unitelway::requests::dwords;

use crate::common::{config, transport_for};

#[tokio::test]
async fn read_internal_dword_decodes_negative_value() {
    let cfg = config();
    let transport = transport_for(&cfg, &[0x37, 0xFF, 0xFF, 0xFF, 0xFF]); // -1 LE
    let mut client = Client::from_transport(transport, cfg);

    assert_eq!(client.read_internal_dword(0).await.unwrap(), -1);
}

#[tokio::test]
async fn write_internal_dword_reports_success() {
    let cfg = config();
    let transport = transport_for(&cfg, &[0xFE]);
    let mut client = Client::from_transport(transport, cfg);

    assert!(client.write_internal_dword(0, -1).await.unwrap());
}

#[tokio::test]
async fn read_internal_dwords_pairs_with_stepped_addresses() {
    let cfg = config();
    let mut response = vec![0x33, object_type::DWORD];
    response.extend_from_slice(&1i32.to_le_bytes());
    response.extend_from_slice(&2i32.to_le_bytes());
    let transport = transport_for(&cfg, &response);
    let mut client = Client::from_transport(transport, cfg);

    let values = client.read_internal_dwords(10, 2).await.unwrap();
    assert_eq!(values, vec![1, 2]);
    assert_eq!(dwords::stepped_addresses(10, values.len()), vec![10, 12]);
}
