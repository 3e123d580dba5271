use crate::core::{constants::DRIFT_TOLERANCE_METERS, viewport::Viewport};

/// Pure predicate deciding whether the live view is close enough to the
/// locked viewport to count as static.
///
/// Static means: a lock exists, the zoom levels are exactly equal, and the
/// great-circle distance between centers is strictly below the tolerance.
/// No lock means never static.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftDetector {
    pub tolerance_meters: f64,
}

impl DriftDetector {
    pub fn new(tolerance_meters: f64) -> Self {
        Self { tolerance_meters }
    }

    pub fn is_static(&self, live: &Viewport, locked: Option<&Viewport>) -> bool {
        let Some(locked) = locked else {
            return false;
        };

        live.zoom == locked.zoom
            && live.center.distance_to(&locked.center) < self.tolerance_meters
    }
}

impl Default for DriftDetector {
    fn default() -> Self {
        Self::new(DRIFT_TOLERANCE_METERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    // One degree of latitude is ~111.2 km; scale the offset to land just
    // inside or outside the 5 km tolerance.
    fn offset_by_meters(base: &Viewport, meters: f64) -> Viewport {
        let degrees = meters / 111_195.0;
        Viewport::new(LatLng::new(base.center.lat + degrees, base.center.lng), base.zoom)
    }

    #[test]
    fn test_static_within_tolerance() {
        let detector = DriftDetector::default();
        let locked = Viewport::new(LatLng::new(40.0, -98.0), 5);

        let near = offset_by_meters(&locked, 4_990.0);
        assert!(detector.is_static(&near, Some(&locked)));
    }

    #[test]
    fn test_drifted_beyond_tolerance() {
        let detector = DriftDetector::default();
        let locked = Viewport::new(LatLng::new(40.0, -98.0), 5);

        let far = offset_by_meters(&locked, 5_010.0);
        assert!(!detector.is_static(&far, Some(&locked)));
    }

    #[test]
    fn test_zoom_mismatch_always_drifted() {
        let detector = DriftDetector::default();
        let locked = Viewport::new(LatLng::new(40.0, -98.0), 5);
        let live = Viewport::new(locked.center, 6);

        assert!(!detector.is_static(&live, Some(&locked)));
    }

    #[test]
    fn test_never_static_without_lock() {
        let detector = DriftDetector::default();
        let live = Viewport::new(LatLng::new(40.0, -98.0), 5);

        assert!(!detector.is_static(&live, None));
    }

    #[test]
    fn test_identical_viewports_are_static() {
        let detector = DriftDetector::default();
        let viewport = Viewport::new(LatLng::new(40.0, -98.0), 5);

        assert!(detector.is_static(&viewport, Some(&viewport)));
    }
}
