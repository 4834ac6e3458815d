//! `READ_IO_CHANNEL` / `WRITE_IO_CHANNEL`: `%I`/`%Q` bits and `%IW`/`%QW`
//! words read or written together.

use unitelway::Client;
use unitelway::constants::request;

use crate::common::{config, transport_for};

#[tokio::test]
async fn read_io_channel_decodes_all_four_sections() {
    let cfg = config();
    let mut response = vec![unitelway::constants::response_code_for(request::READ_IO_CHANNEL)];
    response.extend_from_slice(&[0, 0, 0, 0, 0, 0]); // general/default/reserved/operation report
    response.push(1); // %I length
    response.push(0b0000_0001);
    response.push(1); // %Q length
    response.push(0b0000_0000);
    response.extend_from_slice(&[1, 0]); // %IW length
    response.extend_from_slice(&(-7i16).to_le_bytes());
    response.extend_from_slice(&[0, 0]); // %QW length
    let transport = transport_for(&cfg, &response);
    let mut client = Client::from_transport(transport, cfg);

    let report = client.read_io_channel(&[0x7F, 0x00, 0x02], 0x0A, 8, 0).await.unwrap();
    assert!(report.inputs[&0]);
    assert!(!report.outputs[&0]);
    assert_eq!(report.input_words[&0], -7);
    assert!(report.output_words.is_empty());
}

#[tokio::test]
async fn write_io_channel_reports_success() {
    let cfg = config();
    let transport = transport_for(&cfg, &[unitelway::constants::response_code_for(request::WRITE_IO_CHANNEL), 0]);
    let mut client = Client::from_transport(transport, cfg);

    let ok = client
        .write_io_channel(&[0x7F], 0x0A, 0, 1, &[0b0000_0001], &[-1, 2])
        .await
        .unwrap();
    assert!(ok);
}
