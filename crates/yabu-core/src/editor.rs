//! Event entry point tying gestures, the session, and the display together.
//!
//! The `Editor` is the only object an event source talks to. It owns the
//! catalog, the gesture state machine, and the current [`Session`] (if an
//! image has been loaded), and forwards every render and status change to a
//! [`Presenter`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::export::{self, ShareTarget};
use crate::filter::{FilterCatalog, Intensity};
use crate::gesture::{Clock, GestureCommand, GestureController, MonotonicClock, PermissionOutcome};
use crate::image::ImageBuffer;
use crate::session::Session;

/// Human-readable state change for a status display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    ImageLoaded { width: u32, height: u32 },
    FilterChanged { name: String },
    IntensityChanged { intensity: Intensity },
    ShakeEnabled,
    ShakeDenied,
    ShareUnsupported,
    ExportFailed { reason: String },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoaded { width, height } => write!(f, "Image loaded ({width}x{height})"),
            Self::FilterChanged { name } => write!(f, "Current filter: {name}"),
            Self::IntensityChanged { intensity } => write!(f, "Filter intensity: {intensity}"),
            Self::ShakeEnabled => write!(f, "Shake to reset is enabled"),
            Self::ShakeDenied => write!(f, "Motion sensor permission was not granted"),
            Self::ShareUnsupported => write!(f, "Sharing is not supported on this device"),
            Self::ExportFailed { reason } => write!(f, "Could not export the image: {reason}"),
        }
    }
}

/// Receives rendered frames and status updates. Implemented by the display layer.
pub trait Presenter {
    /// Show a freshly rendered frame. Frames are complete and never mutated.
    fn present(&mut self, frame: Arc<ImageBuffer>);

    /// Show a status message.
    fn notify(&mut self, notification: Notification);
}

/// Owns all editing state and turns input events into renders.
pub struct Editor<P: Presenter, C: Clock = MonotonicClock> {
    catalog: FilterCatalog,
    gestures: GestureController<C>,
    session: Option<Session>,
    presenter: P,
}

impl<P: Presenter, C: Clock> Editor<P, C> {
    pub fn new(catalog: FilterCatalog, gestures: GestureController<C>, presenter: P) -> Self {
        Self {
            catalog,
            gestures,
            session: None,
            presenter,
        }
    }

    pub fn catalog(&self) -> &FilterCatalog {
        &self.catalog
    }

    pub fn gestures(&self) -> &GestureController<C> {
        &self.gestures
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Replace the current image and render it with the first filter at full intensity.
    pub fn load_image(&mut self, image: ImageBuffer) -> Result<(), CoreError> {
        if image.is_empty() {
            return Err(CoreError::EmptyImage);
        }

        let (width, height) = (image.width(), image.height());
        let session = Session::new(image, &self.catalog);
        let frame = Arc::clone(session.rendered());
        let name = session.current_filter(&self.catalog).name.clone();
        self.session = Some(session);

        tracing::info!("image loaded: {width}x{height}, filter {name}");
        self.presenter.present(frame);
        self.presenter
            .notify(Notification::ImageLoaded { width, height });
        self.presenter.notify(Notification::FilterChanged { name });
        Ok(())
    }

    pub fn touch_start(&mut self, x: f32, touches: usize) {
        self.gestures.touch_start(x, touches);
    }

    pub fn touch_end(&mut self, x: f32) {
        for command in self.gestures.touch_end(x) {
            self.run(command);
        }
    }

    pub fn motion_sample(&mut self, ax: f32, ay: f32, az: f32) {
        if let Some(command) = self.gestures.motion_sample(ax, ay, az) {
            tracing::debug!("shake detected");
            self.run(command);
        }
    }

    /// Slider input in `0..=100`. Out-of-range and NaN values are clamped.
    pub fn set_intensity_percent(&mut self, percent: f64) {
        let intensity = Intensity::from_percent(percent);
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("intensity {intensity} ignored: no image loaded");
            return;
        };
        let frame = Arc::clone(session.set_intensity(intensity, &self.catalog));
        self.presenter.present(frame);
        self.presenter
            .notify(Notification::IntensityChanged { intensity });
    }

    /// Apply the platform's answer to the motion-permission prompt.
    pub fn enable_shake(&mut self, outcome: PermissionOutcome) -> Result<(), CoreError> {
        match self.gestures.enable_shake(outcome) {
            Ok(()) => {
                tracing::info!("shake reset enabled ({outcome:?})");
                self.presenter.notify(Notification::ShakeEnabled);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("shake reset unavailable: {e}");
                self.presenter.notify(Notification::ShakeDenied);
                Err(e)
            }
        }
    }

    /// Encode the current render as PNG and hand it to `target`.
    pub fn share(&mut self, target: &mut dyn ShareTarget) -> Result<(), CoreError> {
        let Some(session) = self.session.as_ref() else {
            return Err(CoreError::NoImageLoaded);
        };

        let result = export::share(session.rendered(), target);
        match &result {
            Ok(()) => {}
            Err(CoreError::UnsupportedExport) => {
                tracing::warn!("share requested but not supported");
                self.presenter.notify(Notification::ShareUnsupported);
            }
            Err(e) => {
                tracing::error!("share failed: {e}");
                self.presenter.notify(Notification::ExportFailed {
                    reason: e.to_string(),
                });
            }
        }
        result
    }

    fn run(&mut self, command: GestureCommand) {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("{command:?} ignored: no image loaded");
            return;
        };
        let frame = Arc::clone(session.handle(command, &self.catalog));
        let name = session.current_filter(&self.catalog).name.clone();
        let intensity = session.intensity();
        self.presenter.present(frame);
        self.presenter.notify(Notification::FilterChanged { name });
        if command == GestureCommand::Reset {
            // Slider and label must follow the reset intensity.
            self.presenter
                .notify(Notification::IntensityChanged { intensity });
        }
    }
}
