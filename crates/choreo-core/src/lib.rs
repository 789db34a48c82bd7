pub mod cancellation;
pub mod config;
pub mod error;
pub mod layout;
pub mod motion;
pub mod orchestrator;
pub mod page;
pub mod section;
pub mod snap;
pub mod timeline;
pub mod trigger;
pub mod viewport;

pub use cancellation::CancellationToken;
pub use config::{AppConfig, EasingType, ScrollConfig};
pub use error::{Error, Result};
pub use orchestrator::{DeferredSnapshot, Orchestrator};
pub use section::{SectionId, SectionSpec};
pub use viewport::{ScrollPosition, ScrollSource};
