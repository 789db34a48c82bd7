//! Element handles and the style surface the engine writes to
//!
//! The rendering layer is external; it only has to answer whether an element
//! is mounted and store inline style values. `StyleContext` remembers what a
//! section overwrote so unmounting restores the element exactly.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::{Property, Value};

/// One animated element: a named handle plus its index inside a staggered group
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementKey {
    pub element: String,
    pub index: usize,
}

impl ElementKey {
    pub fn new(element: impl Into<String>, index: usize) -> Self {
        Self {
            element: element.into(),
            index,
        }
    }

    /// A lone element (index 0)
    pub fn single(element: impl Into<String>) -> Self {
        Self::new(element, 0)
    }

    /// Every member of a group of `count` siblings
    pub fn group(element: &str, count: usize) -> Vec<Self> {
        (0..count).map(|i| Self::new(element, i)).collect()
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.element, self.index)
    }
}

/// Inline style storage provided by the rendering layer
pub trait StyleSink {
    /// Whether the element handle exists yet
    fn is_mounted(&self, key: &ElementKey) -> bool;

    /// Current inline value, if any
    fn get(&self, key: &ElementKey, property: Property) -> Option<Value>;

    fn set(&mut self, key: &ElementKey, property: Property, value: Value);

    /// Drop the inline value so the element falls back to its stylesheet
    fn remove(&mut self, key: &ElementKey, property: Property);
}

pub type ElementStyle = BTreeMap<Property, Value>;

/// In-memory rendering surface used by the preview and tests
#[derive(Debug, Clone, Default)]
pub struct InlineStyles {
    mounted: BTreeSet<ElementKey>,
    styles: BTreeMap<ElementKey, ElementStyle>,
    writes: u64,
}

impl InlineStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount element handles (the markup for a section rendered)
    pub fn mount<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = ElementKey>,
    {
        self.mounted.extend(keys);
    }

    /// Remove an element handle and whatever inline style it carried
    pub fn unmount(&mut self, key: &ElementKey) {
        self.mounted.remove(key);
        self.styles.remove(key);
    }

    /// Inline style of an element (empty elements are not listed)
    pub fn style_of(&self, key: &ElementKey) -> Option<&ElementStyle> {
        self.styles.get(key)
    }

    /// Inline value, or the property's natural value when unset
    pub fn effective(&self, key: &ElementKey, property: Property) -> Value {
        self.get(key, property).unwrap_or_else(|| property.natural())
    }

    pub fn styles(&self) -> &BTreeMap<ElementKey, ElementStyle> {
        &self.styles
    }

    /// True when no element carries any inline style
    pub fn is_clean(&self) -> bool {
        self.styles.is_empty()
    }

    /// Number of `set`/`remove` calls so far
    pub fn write_count(&self) -> u64 {
        self.writes
    }
}

impl StyleSink for InlineStyles {
    fn is_mounted(&self, key: &ElementKey) -> bool {
        self.mounted.contains(key)
    }

    fn get(&self, key: &ElementKey, property: Property) -> Option<Value> {
        self.styles.get(key).and_then(|s| s.get(&property)).copied()
    }

    fn set(&mut self, key: &ElementKey, property: Property, value: Value) {
        self.writes += 1;
        self.styles
            .entry(key.clone())
            .or_default()
            .insert(property, value);
    }

    fn remove(&mut self, key: &ElementKey, property: Property) {
        self.writes += 1;
        if let Some(style) = self.styles.get_mut(key) {
            style.remove(&property);
            if style.is_empty() {
                self.styles.remove(key);
            }
        }
    }
}

/// Record of every inline value a section overwrote
#[derive(Debug, Clone, Default)]
pub struct StyleContext {
    originals: BTreeMap<(ElementKey, Property), Option<Value>>,
}

impl StyleContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a value, remembering the element's prior inline value the first
    /// time this property is touched
    pub fn apply(&mut self, sink: &mut dyn StyleSink, key: &ElementKey, property: Property, value: Value) {
        self.originals
            .entry((key.clone(), property))
            .or_insert_with(|| sink.get(key, property));
        if sink.get(key, property) != Some(value) {
            sink.set(key, property, value);
        }
    }

    /// Restore every touched property and forget them
    pub fn revert(&mut self, sink: &mut dyn StyleSink) {
        for ((key, property), original) in std::mem::take(&mut self.originals) {
            match original {
                Some(value) => sink.set(&key, property, value),
                None => sink.remove(&key, property),
            }
        }
    }

    pub fn touched(&self) -> usize {
        self.originals.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_keys() {
        let keys = ElementKey::group("services.card_content", 3);
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[2].to_string(), "services.card_content[2]");
    }

    #[test]
    fn test_revert_restores_prior_inline_values() {
        let bg = ElementKey::single("hero.bg");
        let mut sink = InlineStyles::new();
        sink.mount([bg.clone()]);
        sink.set(&bg, Property::Opacity, Value::num(0.0));

        let mut ctx = StyleContext::new();
        ctx.apply(&mut sink, &bg, Property::Opacity, Value::num(0.5));
        ctx.apply(&mut sink, &bg, Property::Opacity, Value::num(0.8));
        ctx.apply(&mut sink, &bg, Property::Scale, Value::num(1.1));
        assert_eq!(ctx.touched(), 2);

        ctx.revert(&mut sink);
        assert_eq!(sink.get(&bg, Property::Opacity), Some(Value::num(0.0)));
        assert_eq!(sink.get(&bg, Property::Scale), None);
        assert_eq!(ctx.touched(), 0);
    }

    #[test]
    fn test_unchanged_values_are_not_rewritten() {
        let label = ElementKey::single("services.label");
        let mut sink = InlineStyles::new();
        let mut ctx = StyleContext::new();
        ctx.apply(&mut sink, &label, Property::Opacity, Value::num(1.0));
        ctx.apply(&mut sink, &label, Property::Opacity, Value::num(1.0));
        assert_eq!(sink.write_count(), 1);
    }

    #[test]
    fn test_effective_falls_back_to_natural() {
        let sink = InlineStyles::new();
        let key = ElementKey::single("x");
        assert_eq!(sink.effective(&key, Property::Opacity), Value::num(1.0));
        assert_eq!(sink.effective(&key, Property::Y), Value::px(0.0));
    }
}
