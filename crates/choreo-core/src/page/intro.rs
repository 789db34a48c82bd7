use crate::config::EasingType;
use crate::timeline::{ElementKey, KeyframeTrack, Property, Timeline, Value};
use crate::Result;

/// Hero load sequence, positioned in seconds after mount
///
/// Background fades in first; the HUD lines draw on while it settles, then
/// the HUD markers pop, the headline words rise and finally the subheadline
/// and call to action.
pub fn hero_intro() -> Result<Timeline> {
    let ease = EasingType::Power2Out;
    Ok(Timeline::new()
        .with_track(
            KeyframeTrack::builder([ElementKey::single("hero.bg")], 0.0)
                .duration(1.1)
                .ease(ease)
                .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
                .tween(Property::Scale, Value::num(1.08), Value::num(1.0))
                .build()?,
        )
        .with_track(
            KeyframeTrack::builder(ElementKey::group("hero.hud.line", 4), 0.5)
                .duration(0.9)
                .stagger(0.08)
                .ease(ease)
                .tween(Property::StrokeDashoffset, Value::num(200.0), Value::num(0.0))
                .build()?,
        )
        .with_track(
            KeyframeTrack::builder(ElementKey::group("hero.hud.element", 3), 1.14)
                .duration(0.6)
                .ease(ease)
                .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
                .tween(Property::Scale, Value::num(0.85), Value::num(1.0))
                .build()?,
        )
        .with_track(
            KeyframeTrack::builder(ElementKey::group("hero.headline.word", 3), 1.34)
                .duration(0.9)
                .stagger(0.05)
                .ease(ease)
                .tween(Property::Y, Value::px(24.0), Value::px(0.0))
                .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
                .build()?,
        )
        .with_track(
            KeyframeTrack::builder([ElementKey::single("hero.sub"), ElementKey::single("hero.cta")], 1.84)
                .duration(0.7)
                .stagger(0.1)
                .ease(ease)
                .tween(Property::Y, Value::px(14.0), Value::px(0.0))
                .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
                .build()?,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intro_schedule() {
        let intro = hero_intro().unwrap();
        // sub/cta: 1.84 + 0.1 + 0.7
        assert!((intro.duration() - 2.64).abs() < 1e-9);
        assert_eq!(intro.elements().len(), 1 + 4 + 3 + 3 + 2);
    }

    #[test]
    fn test_intro_start_and_end_states() {
        let intro = hero_intro().unwrap();
        let bg = ElementKey::single("hero.bg");
        let cta = ElementKey::single("hero.cta");

        let start = intro.resolve(0.0);
        assert_eq!(start.get(&bg, Property::Opacity), Some(Value::num(0.0)));
        assert_eq!(start.get(&cta, Property::Y), Some(Value::px(14.0)));

        let end = intro.resolve(intro.duration());
        assert_eq!(end.get(&bg, Property::Scale), Some(Value::num(1.0)));
        assert_eq!(end.get(&cta, Property::Opacity), Some(Value::num(1.0)));
        let line = ElementKey::new("hero.hud.line", 3);
        assert_eq!(end.get(&line, Property::StrokeDashoffset), Some(Value::num(0.0)));
    }
}
