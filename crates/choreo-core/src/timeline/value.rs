use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ViewportConfig;
use crate::motion::lerp;
use crate::{Error, Result};

/// Animatable style properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    Scale,
    X,
    Y,
    StrokeDashoffset,
}

impl Property {
    /// Value the element shows with no inline style applied
    pub fn natural(self) -> Value {
        match self {
            Property::Opacity | Property::Scale => Value::num(1.0),
            Property::X | Property::Y => Value::px(0.0),
            Property::StrokeDashoffset => Value::num(0.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Property::Opacity => "opacity",
            Property::Scale => "scale",
            Property::X => "x",
            Property::Y => "y",
            Property::StrokeDashoffset => "stroke-dashoffset",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    None,
    Px,
    /// Percent of viewport width
    Vw,
    /// Percent of viewport height
    Vh,
}

impl Unit {
    fn suffix(self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::Px => "px",
            Unit::Vw => "vw",
            Unit::Vh => "vh",
        }
    }
}

/// A style value with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub amount: f64,
    pub unit: Unit,
}

impl Value {
    pub const fn new(amount: f64, unit: Unit) -> Self {
        Self { amount, unit }
    }

    pub const fn num(amount: f64) -> Self {
        Self::new(amount, Unit::None)
    }

    pub const fn px(amount: f64) -> Self {
        Self::new(amount, Unit::Px)
    }

    pub const fn vw(amount: f64) -> Self {
        Self::new(amount, Unit::Vw)
    }

    pub const fn vh(amount: f64) -> Self {
        Self::new(amount, Unit::Vh)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.amount == 0.0
    }

    /// Same amount expressed in `unit`. Only zero converts freely.
    fn coerce(self, unit: Unit) -> Option<Self> {
        if self.unit == unit {
            Some(self)
        } else if self.is_zero() {
            Some(Value::new(0.0, unit))
        } else {
            None
        }
    }

    /// Resolve to CSS pixels for the given viewport. Unitless values pass through.
    pub fn to_px(&self, viewport: &ViewportConfig) -> f64 {
        match self.unit {
            Unit::None | Unit::Px => self.amount,
            Unit::Vw => self.amount * viewport.width / 100.0,
            Unit::Vh => self.amount * viewport.height / 100.0,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // trim float noise like 0.30000000000000004
        let rounded = (self.amount * 1000.0).round() / 1000.0;
        write!(f, "{}{}", rounded, self.unit.suffix())
    }
}

/// Interpolation of one property between two values sharing a unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub property: Property,
    pub from: Value,
    pub to: Value,
}

impl Tween {
    /// Build a tween, unifying units. `0 -> -18vw` becomes `0vw -> -18vw`;
    /// two non-zero values with different units are rejected.
    pub fn new(property: Property, from: Value, to: Value) -> Result<Self> {
        let unit = if from.unit == to.unit || from.is_zero() {
            to.unit
        } else {
            from.unit
        };
        match (from.coerce(unit), to.coerce(unit)) {
            (Some(from), Some(to)) => Ok(Self { property, from, to }),
            _ => Err(Error::UnitMismatch {
                from: from.unit,
                to: to.unit,
            }),
        }
    }

    /// Value at eased progress `t`
    #[inline]
    pub fn value_at(&self, t: f64) -> Value {
        Value::new(lerp(self.from.amount, self.to.amount, t), self.to.unit)
    }
}
