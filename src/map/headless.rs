//! In-memory map used by the console host and by tests.

use std::collections::HashMap;

use super::{MapView, MarkerHandle, PopupConfig};
use crate::workouts::Coordinates;

/// Map that only remembers what was asked of it.
#[derive(Debug, Default)]
pub struct HeadlessMap {
    center: Option<Coordinates>,
    zoom: u8,
    markers: HashMap<MarkerHandle, (Coordinates, PopupConfig)>,
    next_handle: u64,
    last_bounds: Option<(Vec<Coordinates>, u32)>,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `create_map` has been called.
    pub fn is_created(&self) -> bool {
        self.center.is_some()
    }

    /// Current view center.
    pub fn center(&self) -> Option<Coordinates> {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn marker_position(&self, handle: MarkerHandle) -> Option<Coordinates> {
        self.markers.get(&handle).map(|(coords, _)| *coords)
    }

    pub fn popup(&self, handle: MarkerHandle) -> Option<&PopupConfig> {
        self.markers.get(&handle).map(|(_, popup)| popup)
    }

    /// Points and padding of the last `fit_bounds` call.
    pub fn last_bounds(&self) -> Option<(&[Coordinates], u32)> {
        self.last_bounds
            .as_ref()
            .map(|(coords, padding)| (coords.as_slice(), *padding))
    }
}

impl MapView for HeadlessMap {
    fn create_map(&mut self, center: Coordinates, zoom: u8) {
        tracing::debug!("Map created at {} (zoom {})", center, zoom);
        self.center = Some(center);
        self.zoom = zoom;
    }

    fn add_marker_with_popup(&mut self, coords: Coordinates, popup: PopupConfig) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle::new(self.next_handle);
        tracing::debug!("Marker {} at {}: {}", handle.raw(), coords, popup.content);
        self.markers.insert(handle, (coords, popup));
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.remove(&handle);
    }

    fn pan_to(&mut self, coords: Coordinates, zoom: u8) {
        self.center = Some(coords);
        self.zoom = zoom;
    }

    fn fit_bounds(&mut self, coords: &[Coordinates], padding_px: u32) {
        self.last_bounds = Some((coords.to_vec(), padding_px));
    }
}
