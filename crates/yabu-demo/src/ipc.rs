//! IPC message contracts between the filtering core and the touch UI.
//!
//! Both directions use `#[serde(tag = "type", content = "data")]` so the UI
//! can switch on `msg.type`. Binary payloads travel as standard base64.

use serde::{Deserialize, Serialize};
use yabu_core::{Notification, PermissionOutcome};

/// Messages from the core to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CoreToUi {
    /// A complete rendered frame.
    Frame {
        /// Frame width in pixels.
        width: u32,
        /// Frame height in pixels.
        height: u32,
        /// Interleaved RGBA8 samples, base64.
        rgba: String,
    },

    /// Status line update.
    Status {
        /// Text to show.
        message: String,
        /// Structured form of the same update.
        notification: Notification,
    },

    /// Encoded image for the platform share sheet.
    ShareReady {
        file_name: String,
        mime: String,
        title: String,
        text: String,
        /// Encoded file bytes, base64.
        data: String,
    },

    /// An error occurred in the core.
    Error {
        /// Error description.
        message: String,
    },
}

/// Messages from the UI to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToCore {
    /// Re-send the current frame and filter name after the UI connects.
    RequestState,

    /// Load an image from a path on the host.
    LoadImage {
        /// File path to the image.
        path: String,
    },

    /// Load an image uploaded by the UI (file picker or camera).
    LoadImageData {
        /// Encoded image file, base64 or a `data:` URL.
        data: String,
    },

    /// A touch began.
    TouchStart {
        /// Horizontal position of the first contact.
        x: f32,
        /// Number of simultaneous contacts.
        touches: usize,
    },

    /// A touch ended.
    TouchEnd {
        /// Horizontal position where the contact lifted.
        x: f32,
    },

    /// Accelerometer sample including gravity. Missing axes read as zero.
    Motion {
        #[serde(default)]
        ax: f32,
        #[serde(default)]
        ay: f32,
        #[serde(default)]
        az: f32,
    },

    /// Intensity slider moved.
    SetIntensity {
        /// Slider value in `0..=100`. Fractional and out-of-range values are clamped.
        value: f64,
    },

    /// Outcome of the motion-permission prompt.
    EnableShake {
        permission: PermissionOutcome,
    },

    /// Share the current render.
    Share {
        /// Whether the UI's platform can share files.
        supported: bool,
    },
}
