use std::future::Future;
use std::net::SocketAddr;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, accept_async, connect_async};
use tokio_util::sync::CancellationToken;

/// Accepts WebSocket connections until `cancel` fires.
///
/// Every text frame is passed to `handler`; its return value is sent back as
/// one text frame on the same connection. Each connection runs in its own
/// task, requests on one connection are answered in order.
pub async fn serve_ws<H, Fut>(
    listener: TcpListener,
    cancel: CancellationToken,
    handler: H,
) -> anyhow::Result<()>
where
    H: Fn(String) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = String> + Send + 'static,
{
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("WebSocket server stopping");
                break;
            }
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(v) => v,
                    Err(e) => {
                        tracing::warn!("Failed to accept connection: {}", e);
                        continue;
                    }
                };

                let handler = handler.clone();
                let cancel = cancel.child_token();
                connections.spawn(async move {
                    if let Err(e) = serve_connection(stream, peer, cancel, handler).await {
                        tracing::warn!("Connection {} closed with error: {}", peer, e);
                    }
                });
            }
            // Reap finished connections so the set does not grow unbounded
            Some(_) = connections.join_next(), if !connections.is_empty() => {}
        }
    }

    connections.shutdown().await;
    Ok(())
}

async fn serve_connection<H, Fut>(
    stream: TcpStream,
    peer: SocketAddr,
    cancel: CancellationToken,
    handler: H,
) -> anyhow::Result<()>
where
    H: Fn(String) -> Fut,
    Fut: Future<Output = String>,
{
    let ws_stream = accept_async(stream).await?;
    tracing::debug!("WebSocket connection from {}", peer);
    let (mut write, mut read) = ws_stream.split();

    loop {
        let msg = tokio::select! {
            _ = cancel.cancelled() => {
                let _ = write.send(Message::Close(None)).await;
                break;
            }
            msg = read.next() => msg,
        };

        let Some(msg) = msg else { break };
        match msg? {
            Message::Text(text) => {
                let reply = handler(text.as_str().to_owned()).await;
                write.send(Message::text(reply)).await?;
            }
            Message::Close(_) => break,
            // Pings are answered by tungstenite itself
            _ => {}
        }
    }

    tracing::debug!("WebSocket connection from {} closed", peer);
    Ok(())
}

type ClientStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Request/response client for the API, one text frame each way.
///
/// The server does not use it; it is the client side for tooling and for
/// end-to-end tests of a running `serve_ws`.
pub struct WsClient {
    write: SplitSink<ClientStream, Message>,
    read: SplitStream<ClientStream>,
}

impl WsClient {
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let (ws_stream, _) = connect_async(url).await?;
        let (write, read) = ws_stream.split();
        Ok(Self { write, read })
    }

    pub async fn request(&mut self, text: String) -> anyhow::Result<String> {
        self.write.send(Message::text(text)).await?;

        while let Some(msg) = self.read.next().await {
            if let Message::Text(reply) = msg? {
                return Ok(reply.as_str().to_owned());
            }
        }

        anyhow::bail!("connection closed before a reply arrived")
    }

    pub async fn close(mut self) -> anyhow::Result<()> {
        self.write.send(Message::Close(None)).await?;
        Ok(())
    }
}
