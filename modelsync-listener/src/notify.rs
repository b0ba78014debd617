use anyhow::{Context, Result};
use futures::SinkExt;
use modelsync_core::{LoadRequest, Notification};
use tokio::net::TcpListener;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::info;

/// One-shot stand-in for the coordination service: push a single
/// `load_model` notification to the first listener that connects, then exit.
pub async fn push_once(port: u16, request: LoadRequest) -> Result<()> {
    let socket = TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("binding 127.0.0.1:{port}"))?;
    info!("Waiting for a listener on port {port}...");
    serve_one(socket, request).await
}

/// Accept one connection on an already-bound socket and deliver the request.
pub async fn serve_one(socket: TcpListener, request: LoadRequest) -> Result<()> {
    let (stream, peer) = socket.accept().await?;
    info!("Listener connected from {peer}");

    let mut ws = accept_async(stream).await?;
    let frame = serde_json::to_string(&Notification::LoadModel(request))?;
    ws.send(Message::Text(frame)).await?;
    ws.close(None).await?;
    info!("Notification delivered");
    Ok(())
}
