use std::sync::Arc;

use anyhow::{Context, Result};
use futures::StreamExt;
use modelsync_core::{ModelHost, Notification, NotifyError};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Long-lived subscription to the coordination service.
///
/// Owns the connection handle; dropping it closes the socket.
pub struct NotificationListener {
    stream: WsStream,
    host: Arc<dyn ModelHost>,
}

impl NotificationListener {
    /// Open the connection. Fatal if the service is unreachable; there is
    /// no reconnect policy.
    pub async fn connect(endpoint: &str, host: Arc<dyn ModelHost>) -> Result<Self> {
        let (stream, _) = connect_async(endpoint)
            .await
            .map_err(|e| NotifyError::Connection(e.to_string()))
            .with_context(|| format!("connecting to {endpoint}"))?;
        info!("Connected to coordination service at {endpoint}");
        Ok(Self { stream, host })
    }

    /// Consume frames until the peer closes or the socket errors. One bad
    /// message never stops the listener: decode and host failures are
    /// logged and the message is dropped.
    pub async fn run(mut self) -> Result<()> {
        while let Some(frame) = self.stream.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    if let Err(e) = dispatch(self.host.as_ref(), &text) {
                        warn!("Dropping notification: {e}");
                    }
                }
                Ok(Message::Close(_)) => {
                    info!("Coordination service closed the connection");
                    break;
                }
                // Ping/pong and binary frames are not part of the protocol.
                Ok(_) => {}
                Err(e) => {
                    warn!("Socket error, stopping listener: {e}");
                    break;
                }
            }
        }
        Ok(())
    }
}

/// Handle one text frame to completion before the caller reads the next,
/// so host invocations never overlap.
pub fn dispatch(host: &dyn ModelHost, text: &str) -> Result<(), NotifyError> {
    let notification = match serde_json::from_str::<Notification>(text) {
        Ok(notification) => notification,
        Err(e) => {
            // Another subscriber's event, or junk. Not ours to fail on.
            debug!("Ignoring unrecognized frame: {e}");
            return Ok(());
        }
    };

    match notification {
        Notification::LoadModel(req) => {
            let document = req.decode_model()?;
            host.show_transient_message(&format!("Loading {}...", req.name));
            host.load_model(document, &req.format, &req.name)
                .map_err(|reason| NotifyError::HostCall {
                    name: req.name.clone(),
                    reason,
                })?;
            info!("Loaded model '{}' ({})", req.name, req.format);
            Ok(())
        }
    }
}
