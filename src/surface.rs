//! Seams to the external map-provider widget.
//!
//! The lock engine never renders anything itself; it drives these traits.
//! The headless implementations back the test suite and headless hosts.

use crate::core::{geo::LatLng, viewport::Viewport};
use std::sync::{Arc, Mutex};

/// The external map widget: live view access plus the traffic overlay.
pub trait MapSurface: Send {
    fn center(&self) -> LatLng;
    fn zoom(&self) -> u8;
    /// Jump to a center and zoom in one step
    fn set_view(&mut self, center: LatLng, zoom: u8);
    /// Move the center, keeping the current zoom
    fn pan_to(&mut self, center: LatLng);
    /// (Re)composite the traffic overlay onto the map
    fn draw_traffic(&mut self);

    /// Current live viewport, for drift checks
    fn viewport(&self) -> Viewport {
        Viewport::new(self.center(), self.zoom())
    }
}

/// The device-position marker. At most one position is live; each draw
/// replaces it wholesale.
pub trait MarkerRenderer: Send {
    fn draw(&mut self, position: LatLng);
    fn position(&self) -> Option<LatLng>;
}

/// In-memory surface for tests and headless hosts
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSurface {
    viewport: Viewport,
    pub traffic_draws: u32,
}

impl HeadlessSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            traffic_draws: 0,
        }
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl MapSurface for HeadlessSurface {
    fn center(&self) -> LatLng {
        self.viewport.center
    }

    fn zoom(&self) -> u8 {
        self.viewport.zoom
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.viewport = Viewport::new(center, zoom);
    }

    fn pan_to(&mut self, center: LatLng) {
        self.viewport.set_center(center);
    }

    fn draw_traffic(&mut self) {
        log::info!("drawing traffic layer");
        self.traffic_draws += 1;
    }
}

/// In-memory marker for tests and headless hosts
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeadlessMarker {
    position: Option<LatLng>,
}

impl HeadlessMarker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MarkerRenderer for HeadlessMarker {
    fn draw(&mut self, position: LatLng) {
        self.position = Some(position);
    }

    fn position(&self) -> Option<LatLng> {
        self.position
    }
}

/// Shared handle around a surface. The host keeps one clone and mutates the
/// live view as real gestures land on the provider widget; the lock engine
/// holds the other end as its `MapSurface`.
pub struct SharedSurface<S: MapSurface> {
    inner: Arc<Mutex<S>>,
}

impl<S: MapSurface> SharedSurface<S> {
    pub fn new(surface: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(surface)),
        }
    }

    /// Run a closure against the wrapped surface
    pub fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut guard = self.inner.lock().expect("surface mutex poisoned");
        f(&mut guard)
    }
}

impl<S: MapSurface> Clone for SharedSurface<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: MapSurface> MapSurface for SharedSurface<S> {
    fn center(&self) -> LatLng {
        self.with(|s| s.center())
    }

    fn zoom(&self) -> u8 {
        self.with(|s| s.zoom())
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.with(|s| s.set_view(center, zoom));
    }

    fn pan_to(&mut self, center: LatLng) {
        self.with(|s| s.pan_to(center));
    }

    fn draw_traffic(&mut self) {
        self.with(|s| s.draw_traffic());
    }
}
