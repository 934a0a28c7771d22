//! Yabu Demo: touch-driven image filtering behind a WebSocket UI.
//!
//! The browser UI forwards touch, motion, slider, and file events over a
//! WebSocket; this process runs the filtering core and streams rendered
//! frames and status text back.

mod config;
mod image_loader;
mod ipc;
mod presenter;
mod ws_bridge;

use std::path::Path;

use tracing_subscriber::EnvFilter;
use yabu_core::{Clock, CoreError, Editor, FilterCatalog, GestureController, ImageBuffer};

use crate::config::AppConfig;
use crate::image_loader::ImageLoadError;
use crate::ipc::{CoreToUi, UiToCore};
use crate::presenter::{WsPresenter, WsShareTarget};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("yabu=info")),
        )
        .init();

    tracing::info!("Yabu demo v{} starting", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env()?;
    let mut bridge = ws_bridge::spawn_ws_server(config.ws_port)?;
    tracing::info!("WebSocket IPC server listening on ws://{}", bridge.local_addr);

    let mut editor = Editor::new(
        FilterCatalog::builtin(),
        GestureController::new(config.gestures.clone()),
        WsPresenter::new(bridge.outbound_tx.clone()),
    );

    while let Some(json) = bridge.inbound_rx.blocking_recv() {
        match serde_json::from_str::<UiToCore>(&json) {
            Ok(msg) => dispatch_ui_message(msg, &mut editor),
            Err(e) => tracing::warn!("failed to parse UI message: {e}"),
        }
    }

    tracing::info!("UI bridge closed, shutting down");
    Ok(())
}

/// Route one UI message into the editor.
fn dispatch_ui_message<C: Clock>(msg: UiToCore, editor: &mut Editor<WsPresenter, C>) {
    match msg {
        UiToCore::RequestState => editor.presenter().resend_state(),
        UiToCore::LoadImage { path } => {
            let loaded = image_loader::load_image(Path::new(&path));
            handle_load(&path, loaded, editor);
        }
        UiToCore::LoadImageData { data } => {
            let loaded = image_loader::decode_base64_image(&data);
            handle_load("<upload>", loaded, editor);
        }
        UiToCore::TouchStart { x, touches } => editor.touch_start(x, touches),
        UiToCore::TouchEnd { x } => editor.touch_end(x),
        UiToCore::Motion { ax, ay, az } => editor.motion_sample(ax, ay, az),
        UiToCore::SetIntensity { value } => editor.set_intensity_percent(value),
        UiToCore::EnableShake { permission } => {
            if let Err(e) = editor.enable_shake(permission) {
                tracing::debug!("shake stays off: {e}");
            }
        }
        UiToCore::Share { supported } => {
            let mut target = WsShareTarget::new(supported, editor.presenter().sender());
            match editor.share(&mut target) {
                Ok(()) => {}
                Err(CoreError::NoImageLoaded) => {
                    report_error(editor, "Load an image before sharing".to_string());
                }
                // Other failures were already reported by the editor.
                Err(_) => {}
            }
        }
    }
}

fn handle_load<C: Clock>(
    source: &str,
    loaded: Result<ImageBuffer, ImageLoadError>,
    editor: &mut Editor<WsPresenter, C>,
) {
    let result = loaded
        .map_err(|e| e.to_string())
        .and_then(|image| editor.load_image(image).map_err(|e| e.to_string()));
    if let Err(message) = result {
        tracing::error!("failed to load image {source}: {message}");
        report_error(editor, format!("Failed to load image: {message}"));
    }
}

fn report_error<C: Clock>(editor: &Editor<WsPresenter, C>, message: String) {
    editor.presenter().send(&CoreToUi::Error { message });
}
