//! Editing state for one loaded image.

use std::sync::Arc;

use crate::filter::{FilterCatalog, FilterDefinition, Intensity};
use crate::gesture::GestureCommand;
use crate::image::ImageBuffer;
use crate::pipeline;

/// Current filter and intensity for one original image.
///
/// The original is shared read-only; every change re-renders from it, so
/// filters never stack. A new image means a new `Session`.
#[derive(Debug, Clone)]
pub struct Session {
    original: Arc<ImageBuffer>,
    rendered: Arc<ImageBuffer>,
    filter_index: usize,
    intensity: Intensity,
}

impl Session {
    /// Start at the first filter, full intensity, and render once.
    pub fn new(original: ImageBuffer, catalog: &FilterCatalog) -> Self {
        let original = Arc::new(original);
        let rendered = Arc::new(pipeline::apply(&original, catalog.get(0), Intensity::FULL));
        Self {
            original,
            rendered,
            filter_index: 0,
            intensity: Intensity::FULL,
        }
    }

    pub fn original(&self) -> &Arc<ImageBuffer> {
        &self.original
    }

    /// The latest render. Replaced wholesale on every change.
    pub fn rendered(&self) -> &Arc<ImageBuffer> {
        &self.rendered
    }

    pub fn filter_index(&self) -> usize {
        self.filter_index
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    pub fn current_filter<'a>(&self, catalog: &'a FilterCatalog) -> &'a FilterDefinition {
        catalog.get(self.filter_index)
    }

    /// Apply a gesture command and re-render.
    pub fn handle(&mut self, command: GestureCommand, catalog: &FilterCatalog) -> &Arc<ImageBuffer> {
        match command {
            GestureCommand::NextFilter => {
                self.filter_index = catalog.next_index(self.filter_index);
            }
            GestureCommand::PrevFilter => {
                self.filter_index = catalog.prev_index(self.filter_index);
            }
            GestureCommand::Reset => {
                self.filter_index = 0;
                self.intensity = Intensity::FULL;
            }
        }
        tracing::debug!(
            "{command:?}: filter #{} ({}), intensity {}",
            self.filter_index,
            catalog.get(self.filter_index).name,
            self.intensity
        );
        self.render(catalog)
    }

    /// Change the blend amount and re-render.
    pub fn set_intensity(&mut self, intensity: Intensity, catalog: &FilterCatalog) -> &Arc<ImageBuffer> {
        self.intensity = intensity;
        self.render(catalog)
    }

    fn render(&mut self, catalog: &FilterCatalog) -> &Arc<ImageBuffer> {
        self.rendered = Arc::new(pipeline::apply(
            &self.original,
            catalog.get(self.filter_index),
            self.intensity,
        ));
        &self.rendered
    }
}
