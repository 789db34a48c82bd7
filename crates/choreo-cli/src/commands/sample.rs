use anyhow::{bail, Result};

use choreo_core::page;
use choreo_core::timeline::VisualState;
use choreo_core::{AppConfig, Error, SectionId};

pub fn run(config: &AppConfig, section: &str, progress: f64, json: bool) -> Result<()> {
    if !(0.0..=1.0).contains(&progress) {
        bail!("progress must be in 0.0..=1.0, got {}", progress);
    }
    let spec = page::section(&SectionId::from(section))?
        .ok_or_else(|| Error::UnknownSection(section.to_string()))?;

    let mut state = VisualState::default();
    for scrubbed in &spec.timelines {
        state.merge(scrubbed.timeline.resolve(progress));
    }
    let entries = state.to_entries();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!(
        "#{} at progress {:.3} ({} elements, viewport {}x{}):\n",
        spec.id,
        progress,
        entries.len(),
        config.viewport.width,
        config.viewport.height
    );
    for entry in &entries {
        let props: Vec<String> = entry
            .properties
            .iter()
            .map(|(p, v)| format!("{}={}", p, v))
            .collect();
        println!("  {}[{}]  {}", entry.element, entry.index, props.join(" "));
    }
    Ok(())
}
