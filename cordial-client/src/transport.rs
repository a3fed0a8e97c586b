use anyhow::Context;
use tokio::net::TcpStream;

use crate::Conn;

pub async fn connect(address: &str, port: u16) -> anyhow::Result<Conn<TcpStream>> {
    let addr = format!("{address}:{port}");
    let stream = TcpStream::connect(&addr)
        .await
        .with_context(|| format!("connecting to {addr}"))?;
    stream.set_nodelay(true)?;

    log::info!("connected to {addr} (TCP without TLS)");
    Ok(Conn::new(stream))
}
