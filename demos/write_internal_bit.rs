//! Set (or clear) one `%M` internal bit.
//!
//! ```bash
//! cargo run --example write_internal_bit -- 192.168.1.50 8234 5 true
//! ```

use std::net::Ipv4Addr;

use unitelway::{Client, ClientConfig, XwayAddress};

#[tokio::main]
async fn main() -> unitelway::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let usage = "usage: <ip> <port> <address> <true|false>";
    let ip: Ipv4Addr = args.next().expect(usage).parse().expect("bad ip");
    let port: u16 = args.next().expect(usage).parse().expect("bad port");
    let address: u16 = args.next().expect(usage).parse().expect("bad address");
    let value: bool = args.next().expect(usage).parse().expect("bad value");

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
    client.write_internal_bit(address, value).await?;
    println!("%M{address} <- {value}");
    Ok(())
}
