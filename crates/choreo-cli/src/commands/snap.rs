use anyhow::{bail, Result};

use choreo_core::AppConfig;

use super::settled_page;

pub async fn run(config: &AppConfig, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        bail!("value must be in 0.0..=1.0, got {}", value);
    }

    let orchestrator = settled_page(config).await?;
    let max_scroll = orchestrator.max_scroll();
    let scroll_y = value * max_scroll;

    match orchestrator.snap_target(scroll_y) {
        Some(target) => {
            let settled = if max_scroll > 0.0 { target / max_scroll } else { 0.0 };
            println!(
                "{:.4} ({:.0}px) -> {:.4} ({:.0}px)",
                value, scroll_y, settled, target
            );
            if let Some(plan) = orchestrator.snap_plan(scroll_y) {
                println!(
                    "  transition {}ms {:?}",
                    plan.duration.as_millis(),
                    plan.easing
                );
            }
        }
        None => println!("{:.4} ({:.0}px) -> not snapping", value, scroll_y),
    }
    Ok(())
}
