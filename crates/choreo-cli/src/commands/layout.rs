use anyhow::Result;

use choreo_core::layout::PageLayout;
use choreo_core::{page, AppConfig};

pub fn run(config: &AppConfig, json: bool) -> Result<()> {
    let sections = page::landing_page()?;
    let layout = PageLayout::compute(&sections, config.viewport.height);

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    println!(
        "Viewport {}x{}, document {:.0}px, max scroll {:.0}px\n",
        config.viewport.width, config.viewport.height, layout.document_height, layout.max_scroll
    );
    for bounds in &layout.sections {
        let pin = match bounds.pin {
            Some((start, end)) => format!("  pinned {:.0}..{:.0}", start, end),
            None => String::new(),
        };
        println!(
            "  #{:<10} {:>6.0} .. {:>6.0}{}",
            bounds.id, bounds.top, bounds.bottom, pin
        );
    }
    Ok(())
}
