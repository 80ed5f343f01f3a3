mod coords;
mod events;
mod gesture;
mod inventory;
mod lifecycle;
mod matching;
mod object;
mod rect;
mod track_state;

pub use coords::{CoordinateContext, Size};
pub use events::{EventSink, TrackerEvent};
pub use gesture::{CurlGraspAnalyzer, GestureAnalyzer, HandGesture};
pub use inventory::{Inventory, MemoryInventory};
pub use lifecycle::{FrameReport, LifecycleTracker, ScoringConfig, TrackerConfig};
pub use matching::{hand_distance, representative_points};
pub(crate) use matching::{AssignmentResult, linear_assignment};
pub use object::{CarriedItem, TrackedObject};
pub use rect::Rect;
pub use track_state::ObjectState;
