//! Static per-class field definition tables (spec.md §4.1).
//!
//! Each submodule carries a representative subset of one register class's
//! definitions, built with the same struct-literal shape the real device
//! exposes for that class. Ground truth: `examples/original_source/
//! luxtronik/definitions/{holdings,inputs}.py` (SHI) and
//! `examples/original_source/luxtronik/cfi/{parameters,calculations,
//! visibilities}.py` (CFI) — the full upstream tables run to several
//! hundred entries per CFI class and 40-90 per SHI class; extending these
//! is a mechanical, data-only change, not a structural one.

pub mod calculations;
pub mod holdings;
pub mod inputs;
pub mod parameters;
pub mod visibilities;

use std::sync::OnceLock;

use crate::definition::{FieldDefinitionRegistry, RawFieldDef};

/// Register class identifiers (spec.md GLOSSARY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterClass {
    Parameter,
    Calculation,
    Visibility,
    Holding,
    Input,
}

impl RegisterClass {
    pub fn name(self) -> &'static str {
        match self {
            RegisterClass::Parameter => "parameter",
            RegisterClass::Calculation => "calculation",
            RegisterClass::Visibility => "visibility",
            RegisterClass::Holding => "holding",
            RegisterClass::Input => "input",
        }
    }

    /// Address base added to every index in this class (spec.md §3).
    /// CFI classes address implicitly via the protocol's own framing
    /// (response arrays are zero-based), so their offset is 0; both SHI
    /// classes share the well-known Modbus offset of 10000 (spec.md §6).
    pub fn offset(self) -> u32 {
        match self {
            RegisterClass::Parameter | RegisterClass::Calculation | RegisterClass::Visibility => 0,
            RegisterClass::Holding | RegisterClass::Input => 10000,
        }
    }

    fn raw_defs(self) -> &'static [RawFieldDef] {
        match self {
            RegisterClass::Parameter => parameters::DEFINITIONS,
            RegisterClass::Calculation => calculations::DEFINITIONS,
            RegisterClass::Visibility => visibilities::DEFINITIONS,
            RegisterClass::Holding => holdings::DEFINITIONS,
            RegisterClass::Input => inputs::DEFINITIONS,
        }
    }

    /// The class-wide static registry, built once and shared by every
    /// `DataVector` constructed for this class (spec.md §4.1).
    pub fn registry(self) -> &'static FieldDefinitionRegistry {
        static PARAMETER: OnceLock<FieldDefinitionRegistry> = OnceLock::new();
        static CALCULATION: OnceLock<FieldDefinitionRegistry> = OnceLock::new();
        static VISIBILITY: OnceLock<FieldDefinitionRegistry> = OnceLock::new();
        static HOLDING: OnceLock<FieldDefinitionRegistry> = OnceLock::new();
        static INPUT: OnceLock<FieldDefinitionRegistry> = OnceLock::new();

        let cell = match self {
            RegisterClass::Parameter => &PARAMETER,
            RegisterClass::Calculation => &CALCULATION,
            RegisterClass::Visibility => &VISIBILITY,
            RegisterClass::Holding => &HOLDING,
            RegisterClass::Input => &INPUT,
        };
        cell.get_or_init(|| FieldDefinitionRegistry::build(self.raw_defs(), self.name(), self.offset()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_class_registry_builds_without_panicking() {
        for class in [
            RegisterClass::Parameter,
            RegisterClass::Calculation,
            RegisterClass::Visibility,
            RegisterClass::Holding,
            RegisterClass::Input,
        ] {
            assert!(class.registry().iter().count() > 0, "{} has no definitions", class.name());
        }
    }

    #[test]
    fn holding_offsets_registers_at_10000() {
        let def = RegisterClass::Holding.registry().get("heating_setpoint").unwrap();
        assert_eq!(def.definition.address(), 10001);
    }
}
