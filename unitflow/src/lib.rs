//! unitflow - Unit conversion within measurement groups
//!
//! Converts values between units of the same group (power, energy,
//! temperature, ...) using a configurable table of unit definitions.
//! Arithmetic is exact decimal until the final rounding step.
//!
//! Pieces:
//! - `UnitDefinition`: linear factor or formula pair, plus a display label
//! - `UnitTable` / `UnitGroup`: group-keyed definitions, built in code or from JSON
//! - `UnitRegistry`: the flat unit-name cache with load/clear
//! - `Converter`: a chainable session (`from`, arithmetic, `to`, `value`)
//! - `global`: a lazily created process-wide converter
//! - `library`: the default unit library

mod unit;
mod table;
mod registry;
mod convert;
mod config;
pub mod library;
pub mod global;

pub use unit::{Conversion, Formula, UnitDefinition};
pub use table::{UnitGroup, UnitSource, UnitTable};
pub use registry::{RegistryEntry, UnitRegistry};
pub use convert::{Converter, DEFAULT_PRECISION};
pub use config::ConverterConfig;
pub use library::DEFAULT_UNITS;

pub use unitflow_core::{codes, ConvertError, Number, NumberError, Result};
