//! Loopback stop listener
//!
//! Any client that connects to the stop port and sends one line shuts the
//! server down gracefully. Only 127.0.0.1 is bound.

use std::io;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpListener;

/// Bind the stop listener on 127.0.0.1
///
/// # Errors
///
/// Returns the bind error, e.g. when the port is taken.
pub async fn bind(port: u16) -> io::Result<TcpListener> {
    TcpListener::bind(("127.0.0.1", port)).await
}

/// Accept one connection and read one line from it
///
/// # Errors
///
/// Returns the accept or read error.
pub async fn wait_for_stop(listener: TcpListener) -> io::Result<()> {
    let (stream, peer) = listener.accept().await?;
    let mut line = String::new();
    BufReader::new(stream).read_line(&mut line).await?;
    tracing::info!(%peer, "stop request received");
    Ok(())
}

/// Resolves on a stop request or Ctrl-C, whichever comes first
pub async fn shutdown_signal(listener: TcpListener) {
    tokio::select! {
        result = wait_for_stop(listener) => {
            if let Err(err) = result {
                tracing::error!(error = %err, "stop listener failed, shutting down");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("ctrl-c received");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpStream;

    #[tokio::test]
    async fn test_one_line_stops() {
        let listener = bind(0).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let waiter = tokio::spawn(wait_for_stop(listener));

        let mut client = TcpStream::connect(addr).await.unwrap();
        client.write_all(b"stop\r\n").await.unwrap();

        waiter.await.unwrap().unwrap();
    }
}
