//! Default unit library, organized by group
//!
//! Linear factors are exact decimals relative to each group's base unit
//! (kW for power, kWh for energy, litres for volume, C for temperature).

use std::sync::{Arc, LazyLock};

use unitflow_core::Number;

use crate::{UnitDefinition, UnitGroup, UnitTable};

/// Global default library, used to resolve group names given to `load`
pub static DEFAULT_UNITS: LazyLock<Arc<UnitTable>> = LazyLock::new(|| Arc::new(default_units()));

/// Build the default library
pub fn default_units() -> UnitTable {
    UnitTable::new()
        .with_group("none", UnitGroup::new().with_unit("none", UnitDefinition::base()))
        .with_group("boolean", UnitGroup::new().with_unit("boolean", UnitDefinition::base()))
        .with_group("current", current_units())
        .with_group("energyTh", energy_units("(th)"))
        .with_group("energy", energy_units(""))
        .with_group("flow", flow_units())
        .with_group("percent", UnitGroup::new().with_unit("%", UnitDefinition::base()))
        .with_group("powerTh", thermal_power_units())
        .with_group("power", power_units())
        .with_group("pressure", UnitGroup::new().with_unit("bar", UnitDefinition::base()))
        .with_group("temperature", temperature_units())
        .with_group("voltage", voltage_units())
        .with_group("volume", volume_units())
}

/// `significand * 10^exponent` base units
fn scaled(significand: i64, exponent: isize) -> UnitDefinition {
    UnitDefinition::linear(Number::from_scaled(significand, exponent))
}

fn current_units() -> UnitGroup {
    UnitGroup::new()
        .with_unit("mA", scaled(1, -3))
        .with_unit("A", UnitDefinition::base())
        .with_unit("kA", scaled(1, 3))
}

/// Electrical and thermal energy share factors; thermal names carry "(th)"
fn energy_units(suffix: &str) -> UnitGroup {
    UnitGroup::new()
        .with_unit(format!("mWh{}", suffix), scaled(1, -6))
        .with_unit(format!("Wh{}", suffix), scaled(1, -3))
        .with_unit(format!("kWh{}", suffix), UnitDefinition::base())
        .with_unit(format!("MWh{}", suffix), scaled(1, 3))
        .with_unit(format!("GWh{}", suffix), scaled(1, 6))
}

/// 1 m³/h is 1000 l over 3600 s, i.e. 5/18 l/s. A linear factor would have
/// to be rounded, so the pair is kept as exact formulas.
fn flow_units() -> UnitGroup {
    let n = Number::from_i64;
    let cubic_metres_per_hour = UnitDefinition::formula(
        move |v| v.mul(&n(5)).checked_div(&n(18)),
        move |v| v.mul(&n(18)).checked_div(&n(5)),
    );

    UnitGroup::new()
        .with_unit("litres/sec", UnitDefinition::base())
        .with_unit("liters/sec", UnitDefinition::base())
        .with_unit("m^3/hour", cubic_metres_per_hour.with_display("m\u{00b3}/h"))
}

fn thermal_power_units() -> UnitGroup {
    UnitGroup::new()
        .with_unit("W(th)", scaled(1, -3))
        .with_unit("kW(th)", UnitDefinition::base())
        .with_unit("MW(th)", scaled(1, 3))
        .with_unit("GW(th)", scaled(1, 6))
}

fn power_units() -> UnitGroup {
    UnitGroup::new()
        .with_unit("mW", scaled(1, -6))
        .with_unit("W", scaled(1, -3))
        .with_unit("kW", UnitDefinition::base())
        .with_unit("MW", scaled(1, 3))
        .with_unit("GW", scaled(1, 6))
}

fn temperature_units() -> UnitGroup {
    let n = Number::from_i64;
    let fahrenheit = UnitDefinition::formula(
        move |v| v.sub(&n(32)).mul(&n(5)).checked_div(&n(9)),
        move |v| Ok(v.mul(&n(9)).checked_div(&n(5))?.add(&n(32))),
    );

    UnitGroup::new()
        .with_unit("C", UnitDefinition::base())
        .with_unit("F", fahrenheit)
}

fn voltage_units() -> UnitGroup {
    UnitGroup::new()
        .with_unit("mV", scaled(1, -3))
        .with_unit("V", UnitDefinition::base())
        .with_unit("kV", scaled(1, 3))
}

fn volume_units() -> UnitGroup {
    UnitGroup::new()
        .with_unit("litres", UnitDefinition::base())
        .with_unit("liters", UnitDefinition::base())
        .with_unit("m^3", scaled(1, 3).with_display("m\u{00b3}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_groups_present() {
        let names = DEFAULT_UNITS.group_names();
        for group in ["none", "boolean", "current", "energyTh", "energy", "flow", "percent",
                      "powerTh", "power", "pressure", "temperature", "voltage", "volume"] {
            assert!(names.contains(&group), "missing group {}", group);
        }
    }

    #[test]
    fn test_unit_names_unique_across_groups() {
        let mut seen = HashSet::new();
        for (_, group) in DEFAULT_UNITS.iter() {
            for (name, _) in group.iter() {
                assert!(seen.insert(name.to_string()), "duplicate unit {}", name);
            }
        }
        assert_eq!(seen.len(), DEFAULT_UNITS.unit_count());
    }

    #[test]
    fn test_thermal_energy_names() {
        let energy_th = DEFAULT_UNITS.group("energyTh").unwrap();
        assert!(energy_th.get("kWh(th)").unwrap().is_base());
        assert_eq!(
            energy_th.get("GWh(th)").unwrap().conversion.factor(),
            Some(&Number::from_i64(1_000_000))
        );
    }

    #[test]
    fn test_display_labels() {
        let flow = DEFAULT_UNITS.group("flow").unwrap();
        assert_eq!(flow.get("m^3/hour").unwrap().display.as_deref(), Some("m³/h"));
        assert!(flow.get("liters/sec").unwrap().display.is_none());
    }

    #[test]
    fn test_each_group_has_one_base_unit_or_more() {
        for (name, group) in DEFAULT_UNITS.iter() {
            assert!(group.iter().any(|(_, def)| def.is_base()), "group {} has no base unit", name);
        }
    }
}
