//! CFi "parameter" registers: writeable settings pushed to the
//! controller. Ground truth: `examples/original_source/luxtronik/cfi/
//! parameters.py` and the real upstream `PARAMETERS_DEFINITIONS_LIST`
//! (not retrieved in full; this is a representative sample).

use crate::datatypes::FieldKind::*;
use crate::datatypes::SelectionKind;
use crate::definition::RawFieldDef;

pub const DEFINITIONS: &[RawFieldDef] = &[
    RawFieldDef {
        index: 1,
        count: 1,
        names: &["ID_Einst_WK_akt"],
        kind: Celsius,
        writeable: true,
        data_type: "INT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 2,
        count: 1,
        names: &["ID_Einst_BWS_akt"],
        kind: Celsius,
        writeable: true,
        data_type: "INT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 3,
        count: 1,
        names: &["ID_Einst_KuCft1_akt", "ID_Ba_Kuehl_akt"],
        kind: Bool,
        writeable: true,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 4,
        count: 1,
        names: &["ID_Einst_BA_Hz_akt"],
        kind: Selection(SelectionKind::HeatingMode),
        writeable: true,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 5,
        count: 1,
        names: &["ID_Einst_BA_Bw_akt"],
        kind: Selection(SelectionKind::HotWaterMode),
        writeable: true,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 6,
        count: 1,
        names: &["ID_Einst_BA_Sw_akt"],
        kind: Selection(SelectionKind::PoolMode),
        writeable: true,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 7,
        count: 1,
        names: &["ID_Einst_Kuhl_Zeit_Ein_akt"],
        kind: TimeOfDay,
        writeable: true,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 8,
        count: 1,
        names: &["ID_Einst_Heizgrenze_Temp"],
        kind: Celsius,
        writeable: true,
        data_type: "INT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 9,
        count: 1,
        names: &["ID_Einst_Durchfluss_BA"],
        kind: Selection(SelectionKind::OnOffMode),
        writeable: true,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 10,
        count: 1,
        names: &["ID_Einst_Urlaub_Zeit"],
        kind: TimeOfDay2,
        writeable: true,
        data_type: "UINT32",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 11,
        count: 1,
        names: &["ID_Einst_Servicewasser_Minmenge"],
        kind: Flow,
        writeable: true,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 12,
        count: 1,
        names: &["ID_Einst_Ventilationsstufe", "ID_Einst_Lueftung_BA"],
        kind: Selection(SelectionKind::VentilationMode),
        writeable: true,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 13,
        count: 1,
        names: &["ID_Einst_MK1_Heizkurve_Offset"],
        kind: Kelvin,
        writeable: true,
        data_type: "INT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 104,
        count: 1,
        names: &["ID_Einst_BWS_Hyst_akt"],
        kind: Celsius,
        writeable: true,
        data_type: "INT16",
        since: None,
        until: None,
    },
];
