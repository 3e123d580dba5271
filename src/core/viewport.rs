use crate::core::{
    constants::{MAX_ZOOM, MIN_ZOOM},
    geo::LatLng,
};
use serde::{Deserialize, Serialize};

/// The unit of persisted and locked state: a map center plus zoom level.
///
/// Zoom is an integer bounded by the map provider's supported range; the
/// constructor clamps out-of-range values rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: u8,
}

impl Viewport {
    /// Creates a new viewport, clamping zoom to the supported range
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    /// Sets the center of the viewport
    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    /// Sets the zoom level, clamping to the supported range
    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// True when the center is a valid geographic coordinate
    pub fn is_valid(&self) -> bool {
        self.center.is_valid()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            crate::core::constants::DEFAULT_CENTER,
            crate::core::constants::DEFAULT_ZOOM,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(LatLng::new(40.7128, -74.0060), 10);

        assert_eq!(viewport.zoom, 10);
        assert_eq!(viewport.center.lat, 40.7128);
    }

    #[test]
    fn test_zoom_clamping() {
        let mut viewport = Viewport::default();

        viewport.set_zoom(1); // Below minimum
        assert_eq!(viewport.zoom, MIN_ZOOM);

        viewport.set_zoom(20); // Above maximum
        assert_eq!(viewport.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::default();
        assert_eq!(viewport.center, LatLng::new(40.0, -98.0));
        assert_eq!(viewport.zoom, 5);
        assert!(viewport.is_valid());
    }
}
