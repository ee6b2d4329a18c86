//! SHI "input" registers: read-only telemetry. Ground truth: `examples/
//! original_source/luxtronik/definitions/inputs.py`
//! (`INPUTS_DEFINITIONS_LIST`). Index 0 is overloaded five times in the
//! upstream table (per-compressor/auxiliary-heater status bits plus the
//! combined status enum) — kept here verbatim to exercise the "multiple
//! definitions per index" invariant (spec.md §3, §9).

use crate::datatypes::FieldKind::*;
use crate::datatypes::SelectionKind;
use crate::definition::RawFieldDef;

pub const DEFINITIONS: &[RawFieldDef] = &[
    RawFieldDef {
        index: 0,
        count: 1,
        names: &["heatpump_vd1_status"],
        kind: Bool,
        writeable: false,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 0,
        count: 1,
        names: &["heatpump_vd2_status"],
        kind: Bool,
        writeable: false,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 0,
        count: 1,
        names: &["heatpump_zwe1_status"],
        kind: Bool,
        writeable: false,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 0,
        count: 1,
        names: &["heatpump_zwe2_status"],
        kind: Bool,
        writeable: false,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 0,
        count: 1,
        names: &["heatpump_status"],
        kind: Selection(SelectionKind::HeatPumpStatus),
        writeable: false,
        data_type: "UINT16",
        since: Some("3.91.0"),
        until: None,
    },
    RawFieldDef {
        index: 2,
        count: 1,
        names: &["operation_mode"],
        kind: Selection(SelectionKind::OperationMode),
        writeable: false,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 3,
        count: 1,
        names: &["heating_status"],
        kind: Selection(SelectionKind::ModeStatus),
        writeable: false,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 4,
        count: 1,
        names: &["hot_water_status", "dhw_status"],
        kind: Selection(SelectionKind::ModeStatus),
        writeable: false,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 6,
        count: 1,
        names: &["cooling_status"],
        kind: Selection(SelectionKind::ModeStatus),
        writeable: false,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 100,
        count: 1,
        names: &["return_line_temp"],
        kind: Celsius,
        writeable: false,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 101,
        count: 1,
        names: &["return_line_target"],
        kind: Celsius,
        writeable: false,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 103,
        count: 1,
        names: &["return_line_limit"],
        kind: Celsius,
        writeable: false,
        data_type: "INT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 105,
        count: 1,
        names: &["flow_line_temp"],
        kind: Celsius,
        writeable: false,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 106,
        count: 1,
        names: &["room_temperature"],
        kind: Celsius,
        writeable: false,
        data_type: "INT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 108,
        count: 1,
        names: &["outside_temp"],
        kind: Celsius,
        writeable: false,
        data_type: "INT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 109,
        count: 1,
        names: &["outside_temp_average"],
        kind: Celsius,
        writeable: false,
        data_type: "INT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 120,
        count: 1,
        names: &["hot_water_temp", "dhw_temp"],
        kind: Celsius,
        writeable: false,
        data_type: "INT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 121,
        count: 1,
        names: &["hot_water_target", "dhw_target"],
        kind: Celsius,
        writeable: false,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 300,
        count: 1,
        names: &["electric_power"],
        kind: Power,
        writeable: false,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 310,
        count: 2,
        names: &["electric_energy_total"],
        kind: Energy,
        writeable: false,
        data_type: "INT32",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 312,
        count: 2,
        names: &["electric_energy_heating"],
        kind: Energy,
        writeable: false,
        data_type: "INT32",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 314,
        count: 2,
        names: &["electric_energy_dhw"],
        kind: Energy,
        writeable: false,
        data_type: "INT32",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 320,
        count: 2,
        names: &["thermal_energy_total"],
        kind: Energy,
        writeable: false,
        data_type: "INT32",
        since: Some("3.92.0"),
        until: None,
    },
    RawFieldDef {
        index: 350,
        count: 1,
        names: &["unknown_input_350"],
        kind: Unknown,
        writeable: false,
        data_type: "",
        since: Some("3.92.0"),
        until: None,
    },
    RawFieldDef {
        index: 400,
        count: 3,
        names: &["version"],
        kind: FullVersion,
        writeable: false,
        data_type: "",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 403,
        count: 1,
        names: &["buffer_type"],
        kind: Selection(SelectionKind::BufferType),
        writeable: false,
        data_type: "UINT16",
        since: Some("3.91.0"),
        until: None,
    },
];
