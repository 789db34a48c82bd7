//! Page-wide scroll snap
//!
//! - `targets` - Normalized pinned ranges and the snap function over them
//! - `collector` - Builds the target set from pin records once layout settles
//! - `coordinator` - The installed snap behavior: target choice and transition timing
//! - `transition` - Re-targetable eased scroll transition

pub mod collector;
pub mod coordinator;
pub mod targets;
pub mod transition;

pub use collector::collect_snap_targets;
pub use coordinator::{SnapCoordinator, SnapPlan};
pub use targets::{SnapRange, SnapTargetSet};
pub use transition::ScrollTransition;
