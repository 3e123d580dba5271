//! Geolocation fix stream consumer.
//!
//! The host's watch-or-poll mechanism delivers fixes over a channel; the
//! tracker applies the staleness filter and decides what each accepted fix
//! means for the marker and, conditionally, the map view. Failures are
//! logged and swallowed: the widget stays usable without location services.

use crate::core::{
    config::{GeolocationOptions, RecenterPolicy},
    geo::LatLng,
    viewport::Viewport,
};
use crossbeam_channel::{unbounded, Receiver, Sender};

/// A single position report from the host platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub coordinate: LatLng,
    pub timestamp_millis: u64,
}

/// Error codes the host's geolocation provider can yield
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("request timeout")]
    Timeout,
}

/// What the host sends per watch/poll attempt
pub type FixResult = std::result::Result<PositionFix, GeolocationError>;

/// Channel pair connecting the host's geolocation callback to the tracker
pub fn fix_channel() -> (Sender<FixResult>, Receiver<FixResult>) {
    unbounded()
}

/// What an accepted (or rejected) fix amounts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixDisposition {
    /// First ever fix with no lock held: seed the map view and draw the marker
    Initialize(Viewport),
    /// Accepted fix while unlocked under `EveryFixWhenUnlocked`: pan the map
    /// to the coordinate and move the marker
    Recenter(LatLng),
    /// Accepted fix: move the marker, leave the view alone
    MarkerOnly(LatLng),
    /// Rejected by the staleness filter or invalid; marker unchanged
    Stale,
}

/// Applies the staleness filter and forwards accepted fixes.
///
/// Only the last accepted fix is retained, for timestamp comparison; fixes
/// are never logged historically.
pub struct GeolocationTracker {
    options: GeolocationOptions,
    last_fix: Option<PositionFix>,
    marker_drawn: bool,
}

impl GeolocationTracker {
    pub fn new(options: GeolocationOptions) -> Self {
        Self {
            options,
            last_fix: None,
            marker_drawn: false,
        }
    }

    pub fn last_fix(&self) -> Option<PositionFix> {
        self.last_fix
    }

    /// Classify one delivered fix against the current lock state
    pub fn observe(&mut self, fix: PositionFix, locked: bool) -> FixDisposition {
        if !fix.coordinate.is_valid() {
            log::warn!(
                "discarding fix with invalid coordinate ({}, {})",
                fix.coordinate.lat,
                fix.coordinate.lng
            );
            return FixDisposition::Stale;
        }

        // Accept only when no prior fix exists or the timestamp advanced by
        // at least the configured minimum interval.
        if let Some(last) = self.last_fix {
            let min_interval = self.options.effective_min_interval();
            if fix.timestamp_millis.saturating_sub(last.timestamp_millis) < min_interval {
                log::debug!("fix rejected as stale ({}ms since last)", fix.timestamp_millis.saturating_sub(last.timestamp_millis));
                return FixDisposition::Stale;
            }
        }

        let first_ever = self.last_fix.is_none() && !self.marker_drawn;
        self.last_fix = Some(fix);
        self.marker_drawn = true;

        if locked {
            return FixDisposition::MarkerOnly(fix.coordinate);
        }

        if first_ever {
            return FixDisposition::Initialize(Viewport::new(
                fix.coordinate,
                self.options.initial_fix_zoom,
            ));
        }

        match self.options.recenter {
            RecenterPolicy::EveryFixWhenUnlocked => FixDisposition::Recenter(fix.coordinate),
            RecenterPolicy::FirstFixOnly => FixDisposition::MarkerOnly(fix.coordinate),
        }
    }

    /// Log a provider failure. Never fatal; the next scheduled attempt is the
    /// only retry policy.
    pub fn on_error(&self, error: GeolocationError) {
        log::warn!("geolocation failed: {}", error);
    }
}
