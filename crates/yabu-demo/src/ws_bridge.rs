//! WebSocket IPC bridge between the editor loop and the touch UI.
//!
//! The socket lives on its own thread with a current-thread tokio runtime.
//! The editor thread only sees two channels of JSON text, so it handles one
//! UI message to completion before looking at the next. When the server
//! stops, the inbound channel closes and the editor loop ends.

use std::net::{SocketAddr, TcpListener as StdTcpListener};

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

/// Channel endpoints for the editor side of the bridge.
pub struct WsBridge {
    /// Address the server is bound to.
    pub local_addr: SocketAddr,
    /// Send messages from the core to the WebSocket server (-> UI).
    pub outbound_tx: mpsc::UnboundedSender<String>,
    /// Receive messages from the WebSocket server (<- UI).
    pub inbound_rx: mpsc::UnboundedReceiver<String>,
}

/// Why a client connection ended.
enum ClientEnd {
    /// The UI went away; wait for the next one.
    Disconnected,
    /// The editor dropped its channel end; stop serving.
    EditorGone,
}

/// Bind `127.0.0.1:{port}` and serve the bridge on a dedicated thread.
///
/// Binding happens before returning so a taken port is reported to the
/// caller. One client is served at a time; when it disconnects the next
/// connection is accepted.
pub fn spawn_ws_server(port: u16) -> std::io::Result<WsBridge> {
    let std_listener = StdTcpListener::bind(("127.0.0.1", port))?;
    std_listener.set_nonblocking(true)?;
    let local_addr = std_listener.local_addr()?;

    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel::<String>();
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!("failed to build tokio runtime for WS bridge: {e}");
                return;
            }
        };
        // `inbound_tx` moves into `serve` and is dropped when it returns.
        rt.block_on(serve(std_listener, outbound_rx, inbound_tx));
        tracing::info!("WebSocket IPC server stopped");
    });

    Ok(WsBridge {
        local_addr,
        outbound_tx,
        inbound_rx,
    })
}

async fn serve(
    std_listener: StdTcpListener,
    mut outbound_rx: mpsc::UnboundedReceiver<String>,
    inbound_tx: mpsc::UnboundedSender<String>,
) {
    let listener = match TcpListener::from_std(std_listener) {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to register WebSocket listener: {e}");
            return;
        }
    };

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!("WebSocket listener failed: {e}");
                return;
            }
        };
        tracing::info!("WebSocket client connected: {peer}");

        match serve_client(stream, &mut outbound_rx, &inbound_tx).await {
            ClientEnd::Disconnected => tracing::info!("WebSocket client disconnected: {peer}"),
            ClientEnd::EditorGone => return,
        }
    }
}

/// Pump messages both ways until either side closes.
async fn serve_client(
    stream: TcpStream,
    outbound_rx: &mut mpsc::UnboundedReceiver<String>,
    inbound_tx: &mpsc::UnboundedSender<String>,
) -> ClientEnd {
    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            tracing::warn!("WebSocket handshake failed: {e}");
            return ClientEnd::Disconnected;
        }
    };
    let (mut to_ui, mut from_ui) = ws_stream.split();

    loop {
        tokio::select! {
            incoming = from_ui.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    if inbound_tx.send(text.to_string()).is_err() {
                        return ClientEnd::EditorGone;
                    }
                }
                Some(Ok(Message::Close(_))) | None => return ClientEnd::Disconnected,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read failed: {e}");
                    return ClientEnd::Disconnected;
                }
            },
            outgoing = outbound_rx.recv() => match outgoing {
                Some(text) => {
                    if let Err(e) = to_ui.send(Message::Text(text.into())).await {
                        tracing::warn!("WebSocket write failed: {e}");
                        return ClientEnd::Disconnected;
                    }
                }
                None => return ClientEnd::EditorGone,
            },
        }
    }
}
