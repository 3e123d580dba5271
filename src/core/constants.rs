//! Engine-wide constants. Keeping them in a single place makes it easier to
//! tweak the lock engine's magic numbers.

use crate::core::geo::LatLng;

/// Fallback map center when nothing is persisted (continental US).
pub const DEFAULT_CENTER: LatLng = LatLng { lat: 40.0, lng: -98.0 };

/// Fallback zoom when nothing is persisted.
pub const DEFAULT_ZOOM: u8 = 5;

/// Wide zoom adopted when the first geolocation fix seeds the map.
pub const INITIAL_FIX_ZOOM: u8 = 11;

/// Zoom range supported by the map provider.
pub const MIN_ZOOM: u8 = 4;
pub const MAX_ZOOM: u8 = 17;

/// Live view counts as static while it stays within this distance of the lock.
pub const DRIFT_TOLERANCE_METERS: f64 = 5_000.0;

/// Seconds of grace between drift detection and forced snap-back.
pub const GRACE_PERIOD_SECS: u32 = 10;

/// Countdown message is only shown at or below this many remaining seconds.
pub const MESSAGE_THRESHOLD_SECS: u32 = 5;

/// Minimum timestamp advance between accepted fixes in continuous-watch mode.
pub const MIN_FIX_INTERVAL_MILLIS: u64 = 4 * 60 * 1000;

/// Persistent storage keys. Presence of `lat` is the lock-state discriminant.
pub const KEY_LAT: &str = "lat";
pub const KEY_LNG: &str = "lng";
pub const KEY_ZOOM: &str = "zoom";
