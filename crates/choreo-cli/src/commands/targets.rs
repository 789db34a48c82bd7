use anyhow::Result;
use serde::Serialize;

use choreo_core::AppConfig;

use super::settled_page;

#[derive(Serialize)]
struct TargetReport {
    max_scroll: f64,
    buffer: f64,
    ranges: Vec<TargetRow>,
}

#[derive(Serialize)]
struct TargetRow {
    start: f64,
    end: f64,
    center: f64,
    center_px: f64,
}

pub async fn run(config: &AppConfig, json: bool) -> Result<()> {
    let orchestrator = settled_page(config).await?;
    let max_scroll = orchestrator.max_scroll();

    let Some(targets) = orchestrator.snap_targets() else {
        if json {
            println!("[]");
        } else {
            println!("No snap targets (snapping disabled or nothing pinned).");
        }
        return Ok(());
    };

    let report = TargetReport {
        max_scroll,
        buffer: config.snap.buffer,
        ranges: targets
            .ranges()
            .iter()
            .map(|r| TargetRow {
                start: r.start,
                end: r.end,
                center: r.center,
                center_px: r.center * max_scroll,
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Snap targets ({}), max scroll {:.0}px, buffer {}:\n",
        report.ranges.len(),
        max_scroll,
        report.buffer
    );
    for row in &report.ranges {
        println!(
            "  {:.4} .. {:.4}  center {:.4} ({:.0}px)",
            row.start, row.end, row.center, row.center_px
        );
    }
    Ok(())
}
