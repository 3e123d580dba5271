//! Orchestration of the lock / snap-back behavior.
//!
//! `LockWidget` wires the store-backed lock controller, the drift detector,
//! the snap-back scheduler, and the geolocation tracker to the external map
//! surface. Everything runs on the caller's thread; the only asynchronous
//! inputs are countdown ticks (`on_tick`) and geolocation fixes
//! (`pump_geolocation`), both delivered by the host loop.

use crate::{
    core::{
        config::{LockOptions, LockProfile},
        viewport::Viewport,
    },
    geolocate::{FixDisposition, FixResult, GeolocationTracker},
    input::events::{EventManager, MapEvent, WidgetEvent},
    lock::{
        controller::{LockController, LockLabel, LockTransition},
        drift::DriftDetector,
        snapback::{SnapBackScheduler, TickHandle, TickOutcome},
        store::{KeyValueStorage, ViewportStore},
    },
    surface::{MapSurface, MarkerRenderer},
    MapError, Result,
};
use crossbeam_channel::Receiver;

pub struct LockWidget {
    lock: LockController,
    drift: DriftDetector,
    scheduler: SnapBackScheduler,
    tracker: GeolocationTracker,
    surface: Box<dyn MapSurface>,
    marker: Box<dyn MarkerRenderer>,
    events: EventManager,
    options: LockOptions,
    fix_rx: Option<Receiver<FixResult>>,
    armed: Option<TickHandle>,
    status: Option<String>,
}

impl LockWidget {
    /// Build the widget and draw the initial view.
    ///
    /// Refuses to initialize without host storage: without it the lock has
    /// nowhere to live and no partial functionality is offered. Otherwise the
    /// persisted viewport (malformed entries read as absent) or the default
    /// is applied and the traffic overlay drawn.
    pub fn initialize(
        storage: Option<Box<dyn KeyValueStorage>>,
        surface: Box<dyn MapSurface>,
        marker: Box<dyn MarkerRenderer>,
        options: LockOptions,
    ) -> Result<Self> {
        let storage = storage.ok_or(MapError::StorageUnsupported)?;
        let lock = LockController::new(ViewportStore::new(storage));

        let mut widget = Self {
            drift: DriftDetector::new(options.drift_tolerance_meters),
            scheduler: SnapBackScheduler::new(
                options.grace_period_secs,
                options.message_threshold_secs,
            ),
            tracker: GeolocationTracker::new(options.geolocation.clone()),
            lock,
            surface,
            marker,
            events: EventManager::new(),
            options,
            fix_rx: None,
            armed: None,
            status: None,
        };

        let initial = widget
            .lock
            .locked_viewport()
            .unwrap_or(widget.options.default_viewport);
        widget.surface.set_view(initial.center, initial.zoom);
        widget.surface.draw_traffic();
        widget
            .events
            .emit(WidgetEvent::ViewInitialized { viewport: initial });

        Ok(widget)
    }

    /// `initialize` with a preset profile
    pub fn with_profile(
        storage: Option<Box<dyn KeyValueStorage>>,
        surface: Box<dyn MapSurface>,
        marker: Box<dyn MarkerRenderer>,
        profile: LockProfile,
    ) -> Result<Self> {
        Self::initialize(storage, surface, marker, profile.resolve())
    }

    /// Wire the geolocation fix stream. A host without location services
    /// simply never calls this; the widget stays fully usable.
    pub fn set_fix_source(&mut self, rx: Receiver<FixResult>) {
        self.fix_rx = Some(rx);
    }

    /// Flip the lock state from the current live viewport
    pub fn toggle_lock(&mut self) -> Result<LockTransition> {
        let live = self.surface.viewport();
        let transition = self.lock.toggle(&live)?;

        if transition == LockTransition::Unlocked {
            self.scheduler.cancel();
            self.armed = None;
            self.status = None;
        }

        self.events.emit(WidgetEvent::LockChanged {
            locked: transition == LockTransition::Locked,
        });
        Ok(transition)
    }

    /// Re-render the traffic overlay only; no state change
    pub fn refresh_traffic(&mut self) {
        log::info!("refreshing traffic layer");
        self.surface.draw_traffic();
    }

    /// React to a map-interaction event. Lock and drift status are read
    /// fresh here each time; nothing is cached across events.
    pub fn handle_event(&mut self, event: MapEvent) {
        match event {
            MapEvent::DragStart | MapEvent::Drag | MapEvent::ZoomChanged { .. } => {
                // The user is interacting; do not fight them until idle
                self.scheduler.cancel();
                self.armed = None;
                self.status = None;
            }
            MapEvent::Idle => self.on_idle(),
            MapEvent::Resize => {
                // A resize is background noise, not a gesture; it must never
                // move a locked view
                if let Some(locked) = self.lock.locked_viewport() {
                    self.surface.set_view(locked.center, locked.zoom);
                    self.scheduler.cancel();
                    self.armed = None;
                    self.status = None;
                }
            }
        }
    }

    fn on_idle(&mut self) {
        let live = self.surface.viewport();
        let locked = self.lock.locked_viewport();

        if locked.is_some() && !self.drift.is_static(&live, locked.as_ref()) {
            // Locked and drifted: start (or restart) the grace countdown
            let handle = self.scheduler.arm();
            self.armed = Some(handle);
            self.status = self.scheduler.message();
            self.events.emit(WidgetEvent::CountdownStarted {
                remaining: self.options.grace_period_secs,
            });
        } else {
            // Unlocked, or back within tolerance before expiry
            self.scheduler.cancel();
            self.armed = None;
            self.status = None;
        }
    }

    /// Advance the snap-back countdown by one second. Safe to call from a
    /// ticker that may fire late: a tick for a canceled countdown is a no-op.
    pub fn on_tick(&mut self) {
        let Some(handle) = self.armed else {
            return;
        };

        match self.scheduler.tick(handle) {
            TickOutcome::Stale => {
                self.armed = None;
            }
            TickOutcome::CountingDown { remaining } => {
                self.status = self.scheduler.message();
                self.events.emit(WidgetEvent::CountdownTick { remaining });
            }
            TickOutcome::SnapNow => {
                self.armed = None;
                self.status = None;
                // Re-read the lock; it may have cleared during the last tick
                if let Some(locked) = self.lock.locked_viewport() {
                    self.surface.set_view(locked.center, locked.zoom);
                    self.events
                        .emit(WidgetEvent::SnappedBack { viewport: locked });
                }
            }
        }
    }

    /// Drain pending geolocation results and apply them
    pub fn pump_geolocation(&mut self) {
        let Some(rx) = &self.fix_rx else {
            return;
        };
        let pending: Vec<FixResult> = rx.try_iter().collect();

        for result in pending {
            match result {
                Ok(fix) => {
                    // Lock state is re-read per fix; a fix can race a toggle
                    let disposition = self.tracker.observe(fix, self.lock.is_locked());
                    match disposition {
                        FixDisposition::Initialize(viewport) => {
                            self.surface.set_view(viewport.center, viewport.zoom);
                            self.marker.draw(viewport.center);
                            self.events
                                .emit(WidgetEvent::ViewInitialized { viewport });
                            self.events.emit(WidgetEvent::MarkerMoved {
                                position: viewport.center,
                            });
                        }
                        FixDisposition::Recenter(position) => {
                            self.surface.pan_to(position);
                            self.marker.draw(position);
                            self.events.emit(WidgetEvent::MarkerMoved { position });
                        }
                        FixDisposition::MarkerOnly(position) => {
                            self.marker.draw(position);
                            self.events.emit(WidgetEvent::MarkerMoved { position });
                        }
                        FixDisposition::Stale => {}
                    }
                }
                Err(error) => self.tracker.on_error(error),
            }
        }
    }

    /// Register a widget-event listener
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&WidgetEvent) + Send + Sync + 'static,
    {
        self.events.on(event_type, callback);
    }

    /// Process queued widget events, invoking listeners
    pub fn process_events(&mut self) -> Vec<WidgetEvent> {
        self.events.process_events()
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn lock_label(&self) -> LockLabel {
        self.lock.label()
    }

    pub fn locked_viewport(&self) -> Option<Viewport> {
        self.lock.locked_viewport()
    }

    /// Current status-line text; `None` means the line is cleared
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_counting_down(&self) -> bool {
        self.scheduler.is_counting_down()
    }

    pub fn live_viewport(&self) -> Viewport {
        self.surface.viewport()
    }

    pub fn marker_position(&self) -> Option<crate::core::geo::LatLng> {
        self.marker.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lock::store::MemoryStorage,
        surface::{HeadlessMarker, HeadlessSurface},
    };

    fn widget() -> LockWidget {
        LockWidget::initialize(
            Some(Box::new(MemoryStorage::new())),
            Box::new(HeadlessSurface::default()),
            Box::new(HeadlessMarker::new()),
            LockOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_refuses_without_storage() {
        let result = LockWidget::initialize(
            None,
            Box::new(HeadlessSurface::default()),
            Box::new(HeadlessMarker::new()),
            LockOptions::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_initializes_with_default_viewport() {
        let widget = widget();
        assert_eq!(widget.live_viewport(), Viewport::default());
        assert!(!widget.is_locked());
        assert_eq!(widget.lock_label(), LockLabel::Lock);
    }

    #[test]
    fn test_idle_while_unlocked_never_arms() {
        let mut widget = widget();
        widget.handle_event(MapEvent::Idle);
        assert!(!widget.is_counting_down());
    }

    #[test]
    fn test_refresh_is_state_free() {
        let mut widget = widget();
        let before = widget.live_viewport();
        widget.toggle_lock().unwrap();

        widget.refresh_traffic();
        assert_eq!(widget.live_viewport(), before);
        assert!(widget.is_locked());
        assert!(!widget.is_counting_down());
    }
}
