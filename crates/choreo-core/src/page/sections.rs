use crate::config::EasingType;
use crate::section::SectionSpec;
use crate::timeline::{ElementKey, KeyframeTrack, Property, Timeline, TrackBuilder, Value};
use crate::trigger::{RestState, Scrub, ScrubbedTimeline, Trigger};
use crate::Result;

use super::intro::hero_intro;

/// Lag of every pinned section's scrub
const PIN_SCRUB_SECS: f64 = 0.6;
/// Lag of viewport-scrubbed reveals
const REVEAL_SCRUB_SECS: f64 = 1.0;

/// Exit tracks start here and run to the end of the pin
const EXIT_AT: f64 = 0.7;

fn one(element: &str) -> [ElementKey; 1] {
    [ElementKey::single(element)]
}

fn track<I>(targets: I, offset: f64) -> TrackBuilder
where
    I: IntoIterator<Item = ElementKey>,
{
    KeyframeTrack::builder(targets, offset)
}

/// Exit track ending exactly at progress 1
fn exit<I>(targets: I, offset: f64) -> TrackBuilder
where
    I: IntoIterator<Item = ElementKey>,
{
    track(targets, offset)
        .duration(1.0 - offset)
        .ease(EasingType::Power2In)
}

fn pin(distance: f64, timeline: Timeline) -> ScrubbedTimeline {
    ScrubbedTimeline::new(Trigger::Pin { distance }, Scrub::seconds(PIN_SCRUB_SECS), timeline)
}

fn reveal(anchor: f64, start: f64, end: f64, timeline: Timeline) -> ScrubbedTimeline {
    ScrubbedTimeline::new(
        Trigger::Viewport { anchor, start, end },
        Scrub::seconds(REVEAL_SCRUB_SECS),
        timeline,
    )
}

/// Full-screen hero: load intro, slow background push while pinned, then
/// content and HUD lift away
pub fn hero() -> Result<SectionSpec> {
    let scroll = Timeline::new()
        .with_track(
            track(one("hero.bg"), 0.0)
                .duration(EXIT_AT)
                .tween(Property::Scale, Value::num(1.0), Value::num(1.03))
                .build()?,
        )
        .with_track(
            exit(one("hero.content"), EXIT_AT)
                .tween(Property::Y, Value::num(0.0), Value::vh(-18.0))
                .tween(Property::Opacity, Value::num(1.0), Value::num(0.0))
                .build()?,
        )
        .with_track(
            exit(one("hero.hud"), 0.75)
                .tween(Property::Opacity, Value::num(1.0), Value::num(0.0))
                .build()?,
        )
        .with_track(
            exit(one("hero.bg"), EXIT_AT)
                .tween(Property::Scale, Value::num(1.03), Value::num(1.1))
                .tween(Property::Y, Value::num(0.0), Value::vh(-6.0))
                .build()?,
        );

    let settled = [
        (Property::Opacity, Value::num(1.0)),
        (Property::X, Value::px(0.0)),
        (Property::Y, Value::vh(0.0)),
    ];
    let rest = RestState::new()
        .set(ElementKey::single("hero.content"), &settled)
        .set(ElementKey::single("hero.hud"), &settled)
        .set(
            ElementKey::single("hero.bg"),
            &[(Property::Scale, Value::num(1.0)), (Property::Y, Value::vh(0.0))],
        );

    Ok(SectionSpec::new("hero", 1.0)
        .with_timeline(pin(1.3, scroll).reset_on_leave_back(rest))
        .with_intro(hero_intro()?))
}

/// Three service cards sliding in from the sides
pub fn services() -> Result<SectionSpec> {
    let cards = [
        ("services.left_card", -60.0, 0.0, 0.12),
        ("services.right_top", 60.0, 0.05, 0.16),
        ("services.right_bottom", 60.0, 0.1, 0.2),
    ];

    let mut timeline = Timeline::new().with_track(
        track(one("services.label"), 0.0)
            .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
            .tween(Property::Y, Value::px(-20.0), Value::px(0.0))
            .build()?,
    );

    for (card, from_x, offset, content_at) in cards {
        timeline.push(
            track(one(card), offset)
                .duration(0.3 - offset)
                .ease(EasingType::Power2Out)
                .tween(Property::X, Value::vw(from_x), Value::num(0.0))
                .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
                .tween(Property::Scale, Value::num(0.96), Value::num(1.0))
                .build()?,
        );
        timeline.push(
            track(ElementKey::group(&format!("{card}.content"), 3), content_at)
                .duration(0.1)
                .stagger(0.02)
                .tween(Property::Y, Value::px(18.0), Value::px(0.0))
                .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
                .build()?,
        );
    }

    let exits = [
        ("services.left_card", -18.0, EXIT_AT),
        ("services.right_top", 18.0, EXIT_AT),
        ("services.right_bottom", 18.0, 0.72),
    ];
    for (card, to_x, offset) in exits {
        timeline.push(
            exit(one(card), offset)
                .tween(Property::X, Value::num(0.0), Value::vw(to_x))
                .tween(Property::Opacity, Value::num(1.0), Value::num(0.0))
                .build()?,
        );
    }
    timeline.push(
        exit(one("services.label"), 0.75)
            .tween(Property::Opacity, Value::num(1.0), Value::num(0.0))
            .build()?,
    );

    Ok(SectionSpec::new("services", 1.0).with_timeline(pin(1.3, timeline)))
}

/// Image panel section; `side` is +1 for a panel entering from the right
fn panel_section(id: &str, side: f64) -> Result<SectionSpec> {
    let key = |name: &str| ElementKey::single(format!("{id}.{name}"));

    let timeline = Timeline::new()
        .with_track(
            track([key("bg")], 0.0)
                .tween(Property::Scale, Value::num(1.1), Value::num(1.0))
                .tween(Property::Opacity, Value::num(0.6), Value::num(1.0))
                .build()?,
        )
        .with_track(
            track([key("label")], 0.05)
                .duration(0.25)
                .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
                .tween(Property::Y, Value::px(-20.0), Value::px(0.0))
                .build()?,
        )
        .with_track(
            track([key("panel")], 0.0)
                .ease(EasingType::Power2Out)
                .tween(Property::X, Value::vw(55.0 * side), Value::num(0.0))
                .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
                .build()?,
        )
        .with_track(
            track(ElementKey::group(&format!("{id}.panel.content"), 5), 0.08)
                .duration(0.1)
                .stagger(0.03)
                .tween(Property::Y, Value::px(20.0), Value::px(0.0))
                .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
                .build()?,
        )
        .with_track(
            track([key("caption")], 0.15)
                .duration(0.15)
                .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
                .tween(Property::Y, Value::px(20.0), Value::px(0.0))
                .build()?,
        )
        .with_track(
            exit([key("bg")], EXIT_AT)
                .tween(Property::Scale, Value::num(1.0), Value::num(1.06))
                .tween(Property::Opacity, Value::num(1.0), Value::num(0.0))
                .build()?,
        )
        .with_track(
            exit([key("panel")], EXIT_AT)
                .tween(Property::X, Value::num(0.0), Value::vw(22.0 * side))
                .tween(Property::Opacity, Value::num(1.0), Value::num(0.0))
                .build()?,
        )
        .with_track(
            exit([key("label"), key("caption")], 0.75)
                .tween(Property::Opacity, Value::num(1.0), Value::num(0.0))
                .build()?,
        );

    Ok(SectionSpec::new(id, 1.0).with_timeline(pin(1.25, timeline)))
}

pub fn about() -> Result<SectionSpec> {
    panel_section("about", 1.0)
}

pub fn feature() -> Result<SectionSpec> {
    panel_section("feature", -1.0)
}

/// Solutions grid: a header and six tiles in two rows of three, each tile
/// revealed by its own trigger
pub fn solutions() -> Result<SectionSpec> {
    let header = Timeline::new().with_track(
        track(one("solutions.header"), 0.0)
            .duration(1.0)
            .ease(EasingType::Power2Out)
            .tween(Property::Y, Value::px(24.0), Value::px(0.0))
            .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
            .build()?,
    );
    let mut spec = SectionSpec::new("solutions", 1.6).with_timeline(reveal(0.15, 0.8, 0.55, header));

    const TILES: usize = 6;
    const ROW_ANCHORS: [f64; 2] = [0.45, 0.95];
    for index in 0..TILES {
        let tile = Timeline::new().with_track(
            track([ElementKey::new("solutions.tile", index)], 0.0)
                .duration(1.0)
                .ease(EasingType::Power2Out)
                .tween(Property::Y, Value::px(30.0), Value::px(0.0))
                .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
                .tween(Property::Scale, Value::num(0.98), Value::num(1.0))
                .build()?,
        );
        spec = spec.with_timeline(reveal(ROW_ANCHORS[index / 3], 0.85, 0.55, tile));
    }
    Ok(spec)
}

/// Contact columns slide in together; the form fields follow in sequence
pub fn contact() -> Result<SectionSpec> {
    let columns = Timeline::new()
        .with_track(
            track(one("contact.left"), 0.0)
                .duration(1.0)
                .ease(EasingType::Power2Out)
                .tween(Property::X, Value::vw(-6.0), Value::num(0.0))
                .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
                .build()?,
        )
        .with_track(
            track(one("contact.right"), 0.0)
                .duration(1.0)
                .ease(EasingType::Power2Out)
                .tween(Property::X, Value::vw(6.0), Value::num(0.0))
                .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
                .build()?,
        );

    // eight fields, 0.5 each, 0.05 apart, squeezed into the trigger range
    const FIELDS: usize = 8;
    let span = 0.5 + 0.05 * (FIELDS - 1) as f64;
    let fields = Timeline::new().with_track(
        track(ElementKey::group("contact.field", FIELDS), 0.0)
            .duration(0.5 / span)
            .stagger(0.05 / span)
            .ease(EasingType::Power2Out)
            .tween(Property::Y, Value::px(12.0), Value::px(0.0))
            .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
            .build()?,
    );

    Ok(SectionSpec::new("contact", 1.2)
        .with_timeline(reveal(0.0, 0.8, 0.5, columns))
        .with_timeline(reveal(0.15, 0.7, 0.4, fields)))
}

pub fn footer() -> SectionSpec {
    SectionSpec::new("footer", 0.45)
}
