//! Unit definitions: how one named unit relates to its group's base unit

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use unitflow_core::{Number, NumberError};

/// A decimal-to-decimal conversion formula
pub type Formula = Arc<dyn Fn(&Number) -> Result<Number, NumberError> + Send + Sync>;

/// The two ways a unit can reach its group's base unit
#[derive(Clone)]
pub enum Conversion {
    /// value_base = value * factor
    Linear(Number),
    /// Arbitrary formula pair, e.g. Fahrenheit around a Celsius base
    Formula {
        to_base: Formula,
        from_base: Formula,
    },
}

impl Conversion {
    /// Convert a value in this unit to the group's base unit
    pub fn to_base(&self, value: &Number) -> Result<Number, NumberError> {
        match self {
            Conversion::Linear(factor) => Ok(value.mul(factor)),
            Conversion::Formula { to_base, .. } => to_base(value),
        }
    }

    /// Convert a value in the group's base unit to this unit
    pub fn from_base(&self, value: &Number) -> Result<Number, NumberError> {
        match self {
            Conversion::Linear(factor) => value.checked_div(factor),
            Conversion::Formula { from_base, .. } => from_base(value),
        }
    }

    /// The linear factor, if this is a linear conversion
    pub fn factor(&self) -> Option<&Number> {
        match self {
            Conversion::Linear(factor) => Some(factor),
            Conversion::Formula { .. } => None,
        }
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conversion::Linear(factor) => f.debug_tuple("Linear").field(&factor.to_string()).finish(),
            Conversion::Formula { .. } => f.write_str("Formula(..)"),
        }
    }
}

/// A named unit's conversion plus its optional display label
///
/// Deserializes from `{"factor": 1000, "display": "m³"}`; both fields are
/// optional and a missing factor means the unit is its group's base.
/// Formulas can only be attached in code.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "LinearRepr")]
pub struct UnitDefinition {
    pub conversion: Conversion,
    pub display: Option<String>,
}

impl UnitDefinition {
    /// The base unit of a group (factor 1)
    pub fn base() -> Self {
        Self::linear(Number::from_i64(1))
    }

    /// A unit that is `factor` base units
    pub fn linear(factor: Number) -> Self {
        UnitDefinition {
            conversion: Conversion::Linear(factor),
            display: None,
        }
    }

    /// A unit converted by a formula pair
    pub fn formula<T, F>(to_base: T, from_base: F) -> Self
    where
        T: Fn(&Number) -> Result<Number, NumberError> + Send + Sync + 'static,
        F: Fn(&Number) -> Result<Number, NumberError> + Send + Sync + 'static,
    {
        UnitDefinition {
            conversion: Conversion::Formula {
                to_base: Arc::new(to_base),
                from_base: Arc::new(from_base),
            },
            display: None,
        }
    }

    /// Builder: attach a display label
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Check if this is the base unit of its group
    pub fn is_base(&self) -> bool {
        self.conversion.factor() == Some(&Number::from_i64(1))
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LinearRepr {
    #[serde(default, alias = "base")]
    factor: Option<Number>,
    #[serde(default)]
    display: Option<String>,
}

impl From<LinearRepr> for UnitDefinition {
    fn from(repr: LinearRepr) -> Self {
        UnitDefinition {
            conversion: Conversion::Linear(repr.factor.unwrap_or_else(|| Number::from_i64(1))),
            display: repr.display,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fahrenheit() -> UnitDefinition {
        let n = Number::from_i64;
        UnitDefinition::formula(
            move |v| v.sub(&n(32)).mul(&n(5)).checked_div(&n(9)),
            move |v| Ok(v.mul(&n(9)).checked_div(&n(5))?.add(&n(32))),
        )
    }

    #[test]
    fn test_base_unit() {
        let c = UnitDefinition::base();
        assert!(c.is_base());
        assert!(c.display.is_none());

        let kw = UnitDefinition::linear(Number::from_i64(1000));
        assert!(!kw.is_base());
    }

    #[test]
    fn test_linear_to_and_from_base() {
        let mw = UnitDefinition::linear(Number::from_i64(1000));
        let value = Number::from_i64(5);

        let base = mw.conversion.to_base(&value).unwrap();
        assert_eq!(base, Number::from_i64(5000));
        assert_eq!(mw.conversion.from_base(&base).unwrap(), value);
    }

    #[test]
    fn test_zero_factor_fails_on_the_way_back() {
        let broken = UnitDefinition::linear(Number::from_i64(0));
        let result = broken.conversion.from_base(&Number::from_i64(1));
        assert!(matches!(result, Err(NumberError::DivisionByZero)));
    }

    #[test]
    fn test_formula_conversion() {
        let f = fahrenheit();
        assert!(f.conversion.factor().is_none());
        assert!(!f.is_base());

        let celsius = f.conversion.to_base(&Number::from_i64(212)).unwrap();
        assert_eq!(celsius, Number::from_i64(100));

        let back = f.conversion.from_base(&Number::from_i64(100)).unwrap();
        assert_eq!(back, Number::from_i64(212));
    }

    #[test]
    fn test_display_builder() {
        let m3 = UnitDefinition::linear(Number::from_i64(1000)).with_display("m\u{00b3}");
        assert_eq!(m3.display.as_deref(), Some("m³"));
    }

    #[test]
    fn test_debug_hides_formulas() {
        assert_eq!(format!("{:?}", fahrenheit().conversion), "Formula(..)");
        assert_eq!(format!("{:?}", UnitDefinition::base().conversion), "Linear(\"1\")");
    }

    #[test]
    fn test_deserialize() {
        let def: UnitDefinition = serde_json::from_str(r#"{"factor": 3.6, "display": "m³/h"}"#).unwrap();
        assert_eq!(def.conversion.factor(), Some(&Number::from_scaled(36, -1)));
        assert_eq!(def.display.as_deref(), Some("m³/h"));

        let def: UnitDefinition = serde_json::from_str(r#"{"base": "0.001"}"#).unwrap();
        assert_eq!(def.conversion.factor(), Some(&Number::from_scaled(1, -3)));

        let def: UnitDefinition = serde_json::from_str("{}").unwrap();
        assert!(def.is_base());

        assert!(serde_json::from_str::<UnitDefinition>(r#"{"to": 1}"#).is_err());
    }
}
