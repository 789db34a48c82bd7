//! Section timelines
//!
//! A timeline is a list of keyframe tracks. Resolving it at a position yields
//! the visual state of every element it animates; nothing is cached between
//! calls.

pub mod style;
#[allow(clippy::module_inception)]
pub mod timeline;
pub mod track;
pub mod value;

pub use style::{ElementKey, ElementStyle, InlineStyles, StyleContext, StyleSink};
pub use timeline::{ResolvedElement, Timeline, VisualState};
pub use track::{KeyframeTrack, TrackBuilder, DEFAULT_TRACK_DURATION};
pub use value::{Property, Tween, Unit, Value};
