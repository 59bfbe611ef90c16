//! Map module: the map capability, workout markers and position lookup.
//!
//! The map itself (tiles, rendering, input) lives outside this crate. The
//! session drives it through [`MapView`] and receives clicks from whoever hosts
//! it via `Controller::on_map_click`.

pub mod geolocation;
pub mod headless;
pub mod markers;

use crate::storage::config::MapSettings;
use crate::workouts::{Coordinates, Workout};

pub use geolocation::{acquire_position, FixedPosition, GeolocationError, GeolocationProvider};
pub use headless::HeadlessMap;
pub use markers::MarkerRegistry;

/// Handle to a marker placed on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Popup attached to a workout marker.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupConfig {
    /// Maximum width in pixels
    pub max_width: u32,
    /// Minimum width in pixels
    pub min_width: u32,
    /// Close when another popup opens
    pub auto_close: bool,
    /// Close when the map is clicked
    pub close_on_click: bool,
    /// Style class, `running-popup` or `cycling-popup`
    pub class_name: String,
    /// Text shown in the popup
    pub content: String,
}

impl PopupConfig {
    /// Popup for `workout`: icon plus description, kept open.
    pub fn for_workout(workout: &Workout, settings: &MapSettings) -> Self {
        let kind = workout.kind();
        Self {
            max_width: settings.popup_max_width,
            min_width: settings.popup_min_width,
            auto_close: false,
            close_on_click: false,
            class_name: format!("{}-popup", kind.as_str()),
            content: format!("{} {}", kind.icon(), workout.describe()),
        }
    }
}

/// Map capability.
pub trait MapView {
    /// Create the map centered on `center`.
    fn create_map(&mut self, center: Coordinates, zoom: u8);

    /// Place a marker with an open popup and return its handle.
    fn add_marker_with_popup(&mut self, coords: Coordinates, popup: PopupConfig) -> MarkerHandle;

    /// Remove a marker previously returned by `add_marker_with_popup`.
    fn remove_marker(&mut self, handle: MarkerHandle);

    /// Center the view on `coords`.
    fn pan_to(&mut self, coords: Coordinates, zoom: u8);

    /// Fit the view so every point in `coords` is visible.
    fn fit_bounds(&mut self, coords: &[Coordinates], padding_px: u32);
}
