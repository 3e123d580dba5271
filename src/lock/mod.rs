pub mod controller;
pub mod drift;
pub mod snapback;
pub mod store;

// Re-export the essential types
pub use controller::{LockController, LockLabel, LockTransition};
pub use drift::DriftDetector;
pub use snapback::{SnapBackScheduler, SnapBackState, TickHandle, TickOutcome};
pub use store::{KeyValueStorage, MemoryStorage, ViewportStore};
