//! Read the bits and words of one I/O channel in a single request.
//!
//! ```bash
//! cargo run --example read_io_channel -- 192.168.1.50 8234
//! ```

use std::net::Ipv4Addr;

use unitelway::{Client, ClientConfig, XwayAddress};

#[tokio::main]
async fn main() -> unitelway::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let ip: Ipv4Addr = args.next().expect("usage: <ip> <port>").parse().expect("bad ip");
    let port: u16 = args.next().expect("usage: <ip> <port>").parse().expect("bad port");

    let config = ClientConfig::builder()
        .slave_address(0x03)
        .category_code(2)
        .xway(XwayAddress {
            network: 0,
            station: 1,
            gate: 0,
            ext1: 0,
            ext2: 0,
        })
        .build()?;

    let mut client = Client::connect(ip, port, None, config).await?;
    // channel 0x7F/0x00/0x02, object type 0x0A (module), 8 points starting at 0
    let report = client.read_io_channel(&[0x7F, 0x00, 0x02], 0x0A, 8, 0).await?;

    for (address, value) in &report.inputs {
        println!("%I{address} = {value}");
    }
    for (address, value) in &report.outputs {
        println!("%Q{address} = {value}");
    }
    for (address, value) in &report.input_words {
        println!("%IW{address} = {value}");
    }
    for (address, value) in &report.output_words {
        println!("%QW{address} = {value}");
    }
    Ok(())
}
