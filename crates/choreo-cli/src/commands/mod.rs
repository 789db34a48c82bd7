pub mod layout;
pub mod preview;
pub mod sample;
pub mod snap;
pub mod targets;

use anyhow::Result;
use choreo_core::page;
use choreo_core::timeline::InlineStyles;
use choreo_core::{AppConfig, Orchestrator};

/// Mount the landing page headlessly and let the snap snapshot complete
pub(crate) async fn settled_page(config: &AppConfig) -> Result<Orchestrator> {
    let mut styles = InlineStyles::new();
    let mut orchestrator = Orchestrator::new(config);
    for spec in page::landing_page()? {
        styles.mount(spec.elements());
        orchestrator.mount(spec, &mut styles);
    }

    let snapshot = orchestrator.schedule_snapshot();
    if snapshot.wait().await {
        orchestrator.complete_snapshot(&snapshot);
    }
    Ok(orchestrator)
}
