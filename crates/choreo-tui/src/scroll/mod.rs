//! Page scrolling for the preview
//!
//! - `config` - Frame timing helpers over the core `ScrollConfig`
//! - `animation` - Keyboard scroll and snap transitions over page pixels
//!
//! Easing and interpolation come from `choreo_core::motion`, shared with the
//! snap coordinator, so a keyboard scroll and a snap move with the same curves.

pub mod animation;
pub mod config;

pub use animation::ScrollAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
