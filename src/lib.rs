//! # maplock
//!
//! A viewport lock / snap-back engine for interactive traffic maps.
//!
//! A user "locks" a chosen viewport (center + zoom); background events such
//! as geolocation fixes, resize and orientation change then never silently move
//! the view, while manual panning and zooming are allowed with automatic,
//! delayed recovery back to the locked viewport. Tile rendering, traffic
//! compositing, geolocation sampling, and raw key-value storage stay with
//! the host, reached only through traits.

pub mod core;
pub mod geolocate;
pub mod input;
pub mod lock;
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
pub mod surface;
pub mod widget;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{GeolocationOptions, LockOptions, LockProfile, RecenterPolicy, WatchMode},
    geo::LatLng,
    viewport::Viewport,
};

pub use crate::input::{events::EventManager, MapEvent, WidgetEvent};

pub use crate::lock::{
    DriftDetector, KeyValueStorage, LockController, LockLabel, LockTransition, MemoryStorage,
    SnapBackScheduler, SnapBackState, TickHandle, TickOutcome, ViewportStore,
};

pub use crate::geolocate::{
    fix_channel, FixDisposition, FixResult, GeolocationError, GeolocationTracker, PositionFix,
};

pub use crate::surface::{
    HeadlessMarker, HeadlessSurface, MapSurface, MarkerRenderer, SharedSurface,
};

pub use crate::widget::LockWidget;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The host offers no persistent storage; the widget refuses to start
    #[error("persistent storage is not supported by the host")]
    StorageUnsupported,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

/// Error type alias for convenience
pub type Error = MapError;
