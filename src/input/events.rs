use crate::core::{geo::LatLng, viewport::Viewport};
use fxhash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Map-interaction events delivered by the surface provider.
///
/// Within one user gesture `Idle` always follows `DragStart`/`Drag`/
/// `ZoomChanged`; the snap-back scheduler relies on that ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// The map has settled after a gesture or programmatic move
    Idle,
    /// Start of a drag gesture
    DragStart,
    /// Drag in progress
    Drag,
    /// Zoom level changed
    ZoomChanged { zoom: u8 },
    /// Container resized or device orientation changed
    Resize,
}

/// Events emitted by the lock widget for host UI consumption
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// Lock state flipped; the button label must follow
    LockChanged { locked: bool },
    /// A snap-back countdown was armed
    CountdownStarted { remaining: u32 },
    /// One second elapsed on an active countdown
    CountdownTick { remaining: u32 },
    /// The live viewport was forced back to the locked viewport
    SnappedBack { viewport: Viewport },
    /// The device marker moved to a new accepted fix
    MarkerMoved { position: LatLng },
    /// The map surface was (re)initialized with a viewport
    ViewInitialized { viewport: Viewport },
}

impl WidgetEvent {
    /// Listener registry key for this event
    pub fn event_type(&self) -> &'static str {
        match self {
            WidgetEvent::LockChanged { .. } => "lockchanged",
            WidgetEvent::CountdownStarted { .. } => "countdownstart",
            WidgetEvent::CountdownTick { .. } => "countdowntick",
            WidgetEvent::SnappedBack { .. } => "snapback",
            WidgetEvent::MarkerMoved { .. } => "markermoved",
            WidgetEvent::ViewInitialized { .. } => "viewinitialized",
        }
    }
}

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&WidgetEvent) + Send + Sync>;

/// Event management system for the widget
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event type
    listeners: HashMap<String, Vec<EventCallback>>,
    /// Event queue for processing
    event_queue: VecDeque<WidgetEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&WidgetEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(event_type.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: WidgetEvent) {
        self.event_queue.push_back(event);
    }

    /// Process all queued events, invoking matching listeners
    pub fn process_events(&mut self) -> Vec<WidgetEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(event.event_type()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Clear all events from the queue
    pub fn clear_events(&mut self) {
        self.event_queue.clear();
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[test]
    fn test_event_type_keys() {
        let event = WidgetEvent::LockChanged { locked: true };
        assert_eq!(event.event_type(), "lockchanged");

        let event = WidgetEvent::SnappedBack {
            viewport: Viewport::default(),
        };
        assert_eq!(event.event_type(), "snapback");
    }

    #[test]
    fn test_listener_dispatch() {
        let mut manager = EventManager::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        manager.on("lockchanged", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        manager.emit(WidgetEvent::LockChanged { locked: true });
        manager.emit(WidgetEvent::CountdownTick { remaining: 3 });
        assert_eq!(manager.pending_events(), 2);

        let processed = manager.process_events();
        assert_eq!(processed.len(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(manager.pending_events(), 0);
    }
}
