//! SHI "holding" registers: read/write, used to control the heat pump
//! externally. Ground truth: `examples/original_source/luxtronik/
//! definitions/holdings.py` (`HOLDINGS_DEFINITIONS_LIST`).

use crate::datatypes::FieldKind::*;
use crate::datatypes::SelectionKind;
use crate::definition::RawFieldDef;

pub const DEFINITIONS: &[RawFieldDef] = &[
    RawFieldDef {
        index: 0,
        count: 1,
        names: &["heating_mode"],
        kind: Selection(SelectionKind::ControlMode),
        writeable: true,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 1,
        count: 1,
        names: &["heating_setpoint"],
        kind: Celsius,
        writeable: true,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 2,
        count: 1,
        names: &["heating_offset"],
        kind: Kelvin,
        writeable: true,
        data_type: "INT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 5,
        count: 1,
        names: &["hot_water_mode", "dhw_mode"],
        kind: Selection(SelectionKind::ControlMode),
        writeable: true,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 6,
        count: 1,
        names: &["hot_water_setpoint", "dhw_setpoint"],
        kind: Celsius,
        writeable: true,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 7,
        count: 1,
        names: &["hot_water_offset", "dhw_offset"],
        kind: Kelvin,
        writeable: true,
        data_type: "INT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 10,
        count: 1,
        names: &["mc1_heat_mode"],
        kind: Selection(SelectionKind::ControlMode),
        writeable: true,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 11,
        count: 1,
        names: &["mc1_heat_setpoint"],
        kind: Celsius,
        writeable: true,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 12,
        count: 1,
        names: &["mc1_heat_offset"],
        kind: Kelvin,
        writeable: true,
        data_type: "INT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 15,
        count: 1,
        names: &["mc1_cool_mode"],
        kind: Selection(SelectionKind::ControlMode),
        writeable: true,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 16,
        count: 1,
        names: &["mc1_cool_setpoint"],
        kind: Celsius,
        writeable: true,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 17,
        count: 1,
        names: &["mc1_cool_offset"],
        kind: Kelvin,
        writeable: true,
        data_type: "INT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 20,
        count: 1,
        names: &["mc2_heat_mode"],
        kind: Selection(SelectionKind::ControlMode),
        writeable: true,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 21,
        count: 1,
        names: &["mc2_heat_setpoint"],
        kind: Celsius,
        writeable: true,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 22,
        count: 1,
        names: &["mc2_heat_offset"],
        kind: Kelvin,
        writeable: true,
        data_type: "INT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 40,
        count: 1,
        names: &["lpc_mode"],
        kind: Selection(SelectionKind::LpcMode),
        writeable: true,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 41,
        count: 1,
        names: &["pc_limit"],
        kind: Power,
        writeable: true,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 52,
        count: 1,
        names: &["lock_cooling"],
        kind: Selection(SelectionKind::LockMode),
        writeable: true,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 53,
        count: 1,
        names: &["lock_swimming_pool"],
        kind: Selection(SelectionKind::LockMode),
        writeable: true,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 66,
        count: 1,
        names: &["heat_overall_offset"],
        kind: Kelvin,
        writeable: true,
        data_type: "INT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 70,
        count: 1,
        names: &["mc1_level_mode"],
        kind: Selection(SelectionKind::LevelMode),
        writeable: true,
        data_type: "UINT16",
        since: Some("3.91.0"),
        until: None,
    },
    RawFieldDef {
        index: 71,
        count: 1,
        names: &["remote_on_off"],
        kind: Selection(SelectionKind::OnOffMode),
        writeable: true,
        data_type: "UINT16",
        since: Some("3.91.0"),
        until: None,
    },
];
