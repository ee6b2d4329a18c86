//! CFI "calculation" registers: read-only values computed by the
//! controller (temperatures, statuses, energy counters, firmware version
//! chunks). Ground truth: `examples/original_source/luxtronik/cfi/
//! calculations.py` and the real upstream `CALCULATIONS_DEFINITIONS_LIST`
//! (not retrieved in full — several hundred entries; this is a
//! representative sample spanning every codec variant CFI calculations
//! actually use).

use crate::datatypes::FieldKind::*;
use crate::datatypes::SelectionKind;
use crate::definition::RawFieldDef;

/// `ID_WEB_SoftStand` was retired in favor of the derived
/// `get_firmware_version()` accessor on the calculations vector (spec.md
/// §9 "Obsolete name rename"; see `examples/original_source/luxtronik/
/// cfi/calculations.py`'s `_obsolete` dict). It does not name a plain
/// field, so it is not in `DEFINITIONS` — `DataVector::get` consults this
/// table first and logs a pointer to the replacement instead of failing
/// silently.
pub const OBSOLETE_METHOD_ALIASES: &[(&str, &str)] = &[("id_web_softstand", "get_firmware_version()")];

/// Index of the first of ten consecutive one-byte ASCII chunks making up
/// the firmware version string (spec.md §2 "Supplemented features").
pub const FIRMWARE_VERSION_FIRST_INDEX: i64 = 81;
pub const FIRMWARE_VERSION_CHUNK_COUNT: usize = 10;

pub const DEFINITIONS: &[RawFieldDef] = &[
    RawFieldDef {
        index: 0,
        count: 1,
        names: &["ID_WEB_Temperatur_TVL"],
        kind: Celsius,
        writeable: false,
        data_type: "INT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 1,
        count: 1,
        names: &["ID_WEB_Temperatur_TRL"],
        kind: Celsius,
        writeable: false,
        data_type: "INT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 2,
        count: 1,
        names: &["ID_WEB_Sollwert_TRL_HZ"],
        kind: Celsius,
        writeable: false,
        data_type: "INT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 3,
        count: 1,
        names: &["ID_WEB_Temperatur_TRL_ext"],
        kind: Celsius,
        writeable: false,
        data_type: "INT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 4,
        count: 1,
        names: &["ID_WEB_Temperatur_THG"],
        kind: Celsius,
        writeable: false,
        data_type: "INT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 5,
        count: 1,
        names: &["ID_WEB_Temperatur_TA"],
        kind: Celsius,
        writeable: false,
        data_type: "INT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 6,
        count: 1,
        names: &["ID_WEB_Mitteltemperatur"],
        kind: Celsius,
        writeable: false,
        data_type: "INT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 7,
        count: 1,
        names: &["ID_WEB_Temperatur_TBW"],
        kind: Celsius,
        writeable: false,
        data_type: "INT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 15,
        count: 1,
        names: &["ID_WEB_ASDin"],
        kind: Bool,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 16,
        count: 1,
        names: &["ID_WEB_BWTin"],
        kind: Bool,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 40,
        count: 1,
        names: &["ID_WEB_WP_BZ_akt"],
        kind: Selection(SelectionKind::OperationMode),
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 41,
        count: 1,
        names: &["ID_WEB_HauptMenuStatus_Zeile1"],
        kind: Selection(SelectionKind::MainMenuStatusLine1),
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 42,
        count: 1,
        names: &["ID_WEB_HauptMenuStatus_Zeile2"],
        kind: Selection(SelectionKind::MainMenuStatusLine2),
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 43,
        count: 1,
        names: &["ID_WEB_HauptMenuStatus_Zeile3"],
        kind: Selection(SelectionKind::MainMenuStatusLine3),
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 44,
        count: 1,
        names: &["ID_WEB_HauptMenuStatus_Zeit"],
        kind: Hours,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 45,
        count: 1,
        names: &["ID_WEB_HauptMenuAHP_Stufe"],
        kind: Selection(SelectionKind::BivalenceLevel),
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 48,
        count: 1,
        names: &["ID_WEB_SwitchoffFile_Reason_0"],
        kind: Selection(SelectionKind::SwitchoffFile),
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 56,
        count: 1,
        names: &["ID_WEB_Heatpump_Code"],
        kind: Selection(SelectionKind::HeatpumpCode),
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 57,
        count: 1,
        names: &["ID_WEB_BIV_Stufe_akt"],
        kind: Selection(SelectionKind::BivalenceLevel),
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 58,
        count: 1,
        names: &["ID_WEB_ERROR_Time0"],
        kind: Timestamp,
        writeable: false,
        data_type: "UINT32",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 80,
        count: 1,
        names: &["ID_WEB_IP_Adresse"],
        kind: Ipv4Address,
        writeable: false,
        data_type: "INT32",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 81,
        count: 1,
        names: &["firmware_version_0"],
        kind: Character,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 82,
        count: 1,
        names: &["firmware_version_1"],
        kind: Character,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 83,
        count: 1,
        names: &["firmware_version_2"],
        kind: Character,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 84,
        count: 1,
        names: &["firmware_version_3"],
        kind: Character,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 85,
        count: 1,
        names: &["firmware_version_4"],
        kind: Character,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 86,
        count: 1,
        names: &["firmware_version_5"],
        kind: Character,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 87,
        count: 1,
        names: &["firmware_version_6"],
        kind: Character,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 88,
        count: 1,
        names: &["firmware_version_7"],
        kind: Character,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 89,
        count: 1,
        names: &["firmware_version_8"],
        kind: Character,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 90,
        count: 1,
        names: &["firmware_version_9"],
        kind: Character,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 120,
        count: 1,
        names: &["ID_WEB_AnzahlFehlerInSpeicher"],
        kind: Count,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 151,
        count: 1,
        names: &["ID_WEB_Time_WPein_akt"],
        kind: Timestamp,
        writeable: false,
        data_type: "UINT32",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 152,
        count: 1,
        names: &["ID_WEB_Zeit_Heizbetrieb"],
        kind: Hours2,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 180,
        count: 1,
        names: &["ID_WEB_SecOpMode"],
        kind: Selection(SelectionKind::SecOperationMode),
        writeable: false,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
];
