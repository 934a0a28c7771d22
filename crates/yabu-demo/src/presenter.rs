//! Core output adapters that serialize frames, status, and shares onto the bridge.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tokio::sync::mpsc;
use yabu_core::{
    CoreError, ExportAsset, ImageBuffer, Intensity, Notification, Presenter, ShareTarget,
};

use crate::ipc::CoreToUi;

/// Serialize `msg` and queue it for the UI. Returns `false` if the bridge is gone.
fn send_json(tx: &mpsc::UnboundedSender<String>, msg: &CoreToUi) -> bool {
    match serde_json::to_string(msg) {
        Ok(json) => tx.send(json).is_ok(),
        Err(e) => {
            tracing::error!("failed to serialize CoreToUi: {e}");
            false
        }
    }
}

/// Sends every render and status change to the UI.
pub struct WsPresenter {
    outbound_tx: mpsc::UnboundedSender<String>,
    last_frame: Option<Arc<ImageBuffer>>,
    last_filter: Option<String>,
    last_intensity: Option<Intensity>,
}

impl WsPresenter {
    pub fn new(outbound_tx: mpsc::UnboundedSender<String>) -> Self {
        Self {
            outbound_tx,
            last_frame: None,
            last_filter: None,
            last_intensity: None,
        }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<String> {
        self.outbound_tx.clone()
    }

    /// Queue an arbitrary message for the UI.
    pub fn send(&self, msg: &CoreToUi) {
        if !send_json(&self.outbound_tx, msg) {
            tracing::debug!("UI bridge closed; message dropped");
        }
    }

    /// Replay the latest frame, filter name, and intensity, e.g. for a reconnecting UI.
    pub fn resend_state(&self) {
        if let Some(frame) = &self.last_frame {
            self.send(&frame_message(frame));
        }
        if let Some(name) = &self.last_filter {
            let note = Notification::FilterChanged { name: name.clone() };
            self.send(&status_message(note));
        }
        if let Some(intensity) = self.last_intensity {
            let note = Notification::IntensityChanged { intensity };
            self.send(&status_message(note));
        }
    }
}

impl Presenter for WsPresenter {
    fn present(&mut self, frame: Arc<ImageBuffer>) {
        self.send(&frame_message(&frame));
        self.last_frame = Some(frame);
    }

    fn notify(&mut self, notification: Notification) {
        match &notification {
            Notification::FilterChanged { name } => self.last_filter = Some(name.clone()),
            Notification::IntensityChanged { intensity } => self.last_intensity = Some(*intensity),
            // A new image always starts at full intensity.
            Notification::ImageLoaded { .. } => self.last_intensity = Some(Intensity::FULL),
            _ => {}
        }
        self.send(&status_message(notification));
    }
}

fn frame_message(frame: &ImageBuffer) -> CoreToUi {
    CoreToUi::Frame {
        width: frame.width(),
        height: frame.height(),
        rgba: STANDARD.encode(frame.as_rgba()),
    }
}

fn status_message(notification: Notification) -> CoreToUi {
    CoreToUi::Status {
        message: notification.to_string(),
        notification,
    }
}

/// Share target that hands the PNG to the UI, which owns the share sheet.
pub struct WsShareTarget {
    supported: bool,
    outbound_tx: mpsc::UnboundedSender<String>,
}

impl WsShareTarget {
    pub fn new(supported: bool, outbound_tx: mpsc::UnboundedSender<String>) -> Self {
        Self {
            supported,
            outbound_tx,
        }
    }
}

impl ShareTarget for WsShareTarget {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn share(&mut self, asset: ExportAsset) -> Result<(), CoreError> {
        let msg = CoreToUi::ShareReady {
            file_name: asset.file_name,
            mime: asset.mime,
            title: asset.title,
            text: asset.text,
            data: STANDARD.encode(&asset.data),
        };
        if send_json(&self.outbound_tx, &msg) {
            Ok(())
        } else {
            Err(CoreError::ShareFailed("UI bridge closed".to_string()))
        }
    }
}
