//! Conversion sessions
//!
//! A `Converter` holds one current value tagged with a unit. Mutators work in
//! place and return `&mut Self`, so a whole workflow chains with `?`:
//!
//! ```
//! # use unitflow::Converter;
//! # fn main() -> unitflow::Result<()> {
//! let mut c = Converter::new();
//! assert_eq!(c.from(12.0, "GW")?.sub(1.0)?.mul(2.0)?.to("kW")?, 22_000_000.0);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::{debug, trace};
use unitflow_core::{ConvertError, Number, NumberError, Result};

use crate::library::DEFAULT_UNITS;
use crate::{ConverterConfig, RegistryEntry, UnitRegistry, UnitSource, UnitTable};

/// Decimal places kept by `to` and `value` unless told otherwise
pub const DEFAULT_PRECISION: u32 = 3;

/// The current value and the unit it is expressed in
#[derive(Debug, Clone)]
struct Source {
    value: Number,
    unit: String,
}

/// A chainable conversion session over its own unit registry
#[derive(Debug, Clone)]
pub struct Converter {
    registry: UnitRegistry,
    library: Arc<UnitTable>,
    precision: u32,
    source: Option<Source>,
}

impl Converter {
    /// Session with the whole default library loaded
    pub fn new() -> Self {
        Converter {
            registry: UnitRegistry::from_table(&DEFAULT_UNITS),
            library: Arc::clone(&DEFAULT_UNITS),
            precision: DEFAULT_PRECISION,
            source: None,
        }
    }

    /// Session with no units loaded
    pub fn empty() -> Self {
        Converter {
            registry: UnitRegistry::new(),
            library: Arc::clone(&DEFAULT_UNITS),
            precision: DEFAULT_PRECISION,
            source: None,
        }
    }

    /// Session with only `units` loaded, e.g. `Converter::with_units("energy")`
    pub fn with_units(units: impl Into<UnitSource>) -> Result<Self> {
        let mut converter = Self::empty();
        converter.load(units, false)?;
        Ok(converter)
    }

    /// Build a session from configuration
    pub fn from_config(config: &ConverterConfig) -> Result<Self> {
        let mut converter = match &config.groups {
            None => Self::new(),
            Some(groups) => Self::with_units(groups.clone())?,
        };
        if let Some(units) = &config.units {
            converter.load(units, config.overwrite)?;
        }
        converter.set_precision(config.precision);
        Ok(converter)
    }

    /// Builder: resolve group names against `library` instead of the defaults.
    /// Already-loaded units are kept.
    pub fn with_library(mut self, library: UnitTable) -> Self {
        self.library = Arc::new(library);
        self
    }

    /// Builder: default precision for `to` and `value`
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    // ========== Registry ==========

    /// Load unit definitions: a table, a library group name, or several names
    pub fn load(&mut self, units: impl Into<UnitSource>, overwrite: bool) -> Result<&mut Self> {
        let source = units.into();
        debug!(kind = source.kind(), overwrite, "loading units");
        let table = source.resolve(&self.library)?;
        self.registry.load(&table, overwrite)?;
        Ok(self)
    }

    /// Remove one group's units, or all units when `group` is `None`
    pub fn clear(&mut self, group: Option<&str>) -> &mut Self {
        self.registry.clear(group);
        self
    }

    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    // ========== Precision ==========

    /// Set the default precision for subsequent calls
    pub fn set_precision(&mut self, precision: u32) -> &mut Self {
        self.precision = precision;
        self
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    // ========== Source ==========

    /// Start a conversion from `value` expressed in `unit`
    pub fn from(&mut self, value: f64, unit: &str) -> Result<&mut Self> {
        self.registry.verify(unit)?;
        let value = Number::try_from_f64(value)?;
        self.source = Some(Source { value, unit: unit.to_string() });
        Ok(self)
    }

    /// Start a conversion from an exact decimal value
    pub fn from_number(&mut self, value: Number, unit: &str) -> Result<&mut Self> {
        self.registry.verify(unit)?;
        self.source = Some(Source { value, unit: unit.to_string() });
        Ok(self)
    }

    /// Current source unit, if `from` has been called
    pub fn unit(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.unit.as_str())
    }

    // ========== Arithmetic ==========

    fn apply<F>(&mut self, op: F) -> Result<&mut Self>
    where
        F: FnOnce(&Number) -> std::result::Result<Number, NumberError>,
    {
        let source = self.source.as_mut().ok_or(ConvertError::ValueNotSpecified)?;
        source.value = op(&source.value)?;
        Ok(self)
    }

    pub fn add(&mut self, value: f64) -> Result<&mut Self> {
        self.apply(|current| Ok(current.add(&Number::try_from_f64(value)?)))
    }

    pub fn sub(&mut self, value: f64) -> Result<&mut Self> {
        self.apply(|current| Ok(current.sub(&Number::try_from_f64(value)?)))
    }

    pub fn mul(&mut self, value: f64) -> Result<&mut Self> {
        self.apply(|current| Ok(current.mul(&Number::try_from_f64(value)?)))
    }

    /// Divide the current value; dividing by zero fails and leaves it unchanged
    pub fn div(&mut self, value: f64) -> Result<&mut Self> {
        self.apply(|current| current.checked_div(&Number::try_from_f64(value)?))
    }

    // ========== Output ==========

    /// Convert the current value to `unit` at the session precision
    pub fn to(&self, unit: &str) -> Result<f64> {
        self.to_with_precision(unit, self.precision)
    }

    /// Convert the current value to `unit`, rounded to `precision` places.
    ///
    /// The session keeps its own value and unit; only the result is converted.
    pub fn to_with_precision(&self, unit: &str, precision: u32) -> Result<f64> {
        let source = self.source.as_ref().ok_or(ConvertError::SourceNotSpecified)?;
        let target = self.registry.verify(unit)?;
        let origin = self.origin(source)?;

        if origin.group != target.group {
            return Err(ConvertError::IncompatibleGroups {
                from: source.unit.clone(),
                to: unit.to_string(),
                from_group: origin.group.clone(),
                to_group: target.group.clone(),
            });
        }

        let base = origin.definition.conversion.to_base(&source.value)?;
        let converted = target.definition.conversion.from_base(&base)?;
        trace!(from = %source.unit, to = unit, value = %source.value, result = %converted, "converted");
        round_to_f64(&converted, precision)
    }

    /// The source unit may have been cleared since `from`
    fn origin(&self, source: &Source) -> Result<&RegistryEntry> {
        self.registry.get(&source.unit)
            .ok_or_else(|| ConvertError::unit_not_recognized(&source.unit))
    }

    /// Current value, unconverted, at the session precision
    pub fn value(&self) -> Result<f64> {
        self.value_with_precision(self.precision)
    }

    pub fn value_with_precision(&self, precision: u32) -> Result<f64> {
        let source = self.source.as_ref().ok_or(ConvertError::ValueNotSpecified)?;
        round_to_f64(&source.value, precision)
    }

    /// Current value as an exact decimal
    pub fn number(&self) -> Option<&Number> {
        self.source.as_ref().map(|s| &s.value)
    }

    // ========== Units ==========

    pub fn display(&self, unit: &str) -> String {
        self.registry.display(unit)
    }

    /// Fail unless `unit` is non-empty and registered
    pub fn verify_unit(&self, unit: &str) -> Result<()> {
        self.registry.verify(unit).map(|_| ())
    }

    pub fn is_valid(&self, unit: &str) -> bool {
        !unit.is_empty() && self.registry.has(unit)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

fn round_to_f64(value: &Number, precision: u32) -> Result<f64> {
    value.round_half_up(precision)
        .to_f64()
        .ok_or(ConvertError::Number(NumberError::Overflow))
}
