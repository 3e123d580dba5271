//! Configuration system for lock and geolocation behavior tuning
//!
//! This module provides options structs with sensible defaults plus a small
//! set of presets for common deployments, resolvable into concrete options.

use crate::core::{constants, viewport::Viewport};

/// Preset behavior profiles for the lock engine.
#[derive(Debug, Clone, PartialEq)]
pub enum LockProfile {
    /// Defaults from the design: 5 km tolerance, 10 s grace, continuous watch.
    Balanced,
    /// Longer grace and looser tolerance for passive wall displays.
    Patient,
    /// Short grace and tight tolerance for operator consoles.
    Eager,
    Custom(LockOptions),
}

impl LockProfile {
    pub fn resolve(&self) -> LockOptions {
        match self {
            Self::Balanced => LockOptions::default(),
            Self::Patient => LockOptions {
                drift_tolerance_meters: 10_000.0,
                grace_period_secs: 20,
                message_threshold_secs: 10,
                ..LockOptions::default()
            },
            Self::Eager => LockOptions {
                drift_tolerance_meters: 1_000.0,
                grace_period_secs: 5,
                message_threshold_secs: 5,
                ..LockOptions::default()
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for LockProfile {
    fn default() -> Self {
        Self::Balanced
    }
}

/// Tunables for the lock / snap-back state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct LockOptions {
    /// Live view counts as static within this distance of the locked center.
    pub drift_tolerance_meters: f64,
    /// Seconds between drift detection and forced snap-back.
    pub grace_period_secs: u32,
    /// Countdown message is only shown at or below this remaining count.
    pub message_threshold_secs: u32,
    /// Viewport applied when nothing is persisted.
    pub default_viewport: Viewport,
    /// Geolocation behavior.
    pub geolocation: GeolocationOptions,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            drift_tolerance_meters: constants::DRIFT_TOLERANCE_METERS,
            grace_period_secs: constants::GRACE_PERIOD_SECS,
            message_threshold_secs: constants::MESSAGE_THRESHOLD_SECS,
            default_viewport: Viewport::default(),
            geolocation: GeolocationOptions::default(),
        }
    }
}

/// How the host delivers position fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchMode {
    /// Continuous watch subscription; near-duplicate fixes are filtered.
    Continuous,
    /// Host polls on its own schedule; every fix is accepted.
    Polled,
}

/// Whether geolocation fixes may recenter an unlocked map after the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecenterPolicy {
    /// Only the very first fix seeds the map center.
    FirstFixOnly,
    /// Every accepted fix recenters the map while no lock is held.
    EveryFixWhenUnlocked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeolocationOptions {
    pub watch_mode: WatchMode,
    pub recenter: RecenterPolicy,
    /// Minimum timestamp advance between accepted fixes. `None` picks the
    /// mode default: 4 minutes for continuous watch, always-accept for polled.
    pub min_fix_interval_millis: Option<u64>,
    /// Zoom adopted when the first fix seeds the map.
    pub initial_fix_zoom: u8,
}

impl GeolocationOptions {
    /// Effective minimum interval for the staleness filter.
    pub fn effective_min_interval(&self) -> u64 {
        self.min_fix_interval_millis.unwrap_or(match self.watch_mode {
            WatchMode::Continuous => constants::MIN_FIX_INTERVAL_MILLIS,
            WatchMode::Polled => 0,
        })
    }
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            watch_mode: WatchMode::Continuous,
            recenter: RecenterPolicy::FirstFixOnly,
            min_fix_interval_millis: None,
            initial_fix_zoom: constants::INITIAL_FIX_ZOOM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_resolution() {
        let balanced = LockProfile::Balanced.resolve();
        assert_eq!(balanced.grace_period_secs, 10);
        assert_eq!(balanced.drift_tolerance_meters, 5_000.0);

        let patient = LockProfile::Patient.resolve();
        assert!(patient.grace_period_secs > balanced.grace_period_secs);

        let custom = LockOptions {
            grace_period_secs: 3,
            ..LockOptions::default()
        };
        assert_eq!(LockProfile::Custom(custom.clone()).resolve(), custom);
    }

    #[test]
    fn test_mode_default_intervals() {
        let continuous = GeolocationOptions::default();
        assert_eq!(continuous.effective_min_interval(), 240_000);

        let polled = GeolocationOptions {
            watch_mode: WatchMode::Polled,
            ..GeolocationOptions::default()
        };
        assert_eq!(polled.effective_min_interval(), 0);

        let tuned = GeolocationOptions {
            min_fix_interval_millis: Some(1_000),
            ..GeolocationOptions::default()
        };
        assert_eq!(tuned.effective_min_interval(), 1_000);
    }
}
