//! Read one `%MW` internal word from a PLC reachable through a TCP-to-serial
//! adapter.
//!
//! ```bash
//! cargo run --example read_internal_word -- 192.168.1.50 8234 10
//! ```

use std::net::Ipv4Addr;

use unitelway::{Client, ClientConfig, XwayAddress};

#[tokio::main]
async fn main() -> unitelway::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let ip: Ipv4Addr = args.next().expect("usage: <ip> <port> <address>").parse().expect("bad ip");
    let port: u16 = args.next().expect("usage: <ip> <port> <address>").parse().expect("bad port");
    let address: u16 = args.next().expect("usage: <ip> <port> <address>").parse().expect("bad address");

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
    let value = client.read_internal_word(address).await?;
    println!("%MW{address} = {value}");
    Ok(())
}
