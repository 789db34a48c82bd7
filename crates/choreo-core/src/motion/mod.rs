//! Motion primitives shared by scrubbed timelines and scroll transitions
//!
//! - `easing` - Pure easing curves mapping [0, 1] to [0, 1]
//! - `timing` - Progress and interpolation helpers
//! - `follower` - Exponential catch-up used for scrub smoothing

pub mod easing;
pub mod follower;
pub mod timing;

pub use easing::EasingTypeExt;
pub use follower::ScrubFollower;
pub use timing::{lerp, local_progress, normalize};
