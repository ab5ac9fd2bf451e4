mod logic;
mod protocol;

use anyhow::{ensure, Context, Result};
use bytes::BytesMut;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
};
use tracing::{debug, error, info, trace};
use tracing_subscriber::EnvFilter;

/// A minimal Kafka-compatible broker.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// port to listen on
    #[arg(short, long, default_value_t = 9092)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let listener = TcpListener::bind(("127.0.0.1", args.port))
        .await
        .with_context(|| format!("bind 127.0.0.1:{}", args.port))?;
    info!(port = args.port, "listening for connections");

    loop {
        let (stream, peer) = listener.accept().await?;

        tokio::spawn(async move {
            debug!(%peer, "accepted new connection");
            handle_connection(stream).await.unwrap_or_else(|e| {
                error!(%peer, "connection error: {e:?}");
            })
        });
    }
}

pub async fn handle_connection(mut stream: TcpStream) -> Result<()> {
    // peek into the stream to check whether the connection is still open
    while stream.peek(&mut [0; 4]).await? > 0 {
        let mut msg_size_buf = [0u8; 4];
        stream
            .read_exact(&mut msg_size_buf)
            .await
            .context("read message size")?;

        // https://kafka.apache.org/protocol.html#protocol_common
        let msg_size = i32::from_be_bytes(msg_size_buf);
        ensure!(msg_size >= 0, "negative message size {msg_size}");

        let mut msg = BytesMut::with_capacity(msg_size as usize);
        msg.resize(msg_size as usize, 0);
        stream
            .read_exact(&mut msg)
            .await
            .context("read message data")?;
        trace!(frame = %hex::encode(&msg), "request");

        let mut msg = msg.freeze();
        match logic::process(&mut msg) {
            Ok(Some(resp)) => {
                trace!(frame = %hex::encode(resp.as_bytes()), "response");
                stream
                    .write_all(resp.as_bytes())
                    .await
                    .context("write response")?;
            }
            // API keys without a handler are dropped without an answer
            Ok(None) => {}
            Err(e) => {
                error!("dropping connection: {e}");
                break;
            }
        }
    }

    Ok(())
}
