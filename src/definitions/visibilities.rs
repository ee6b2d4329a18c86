//! CFI "visibility" registers: single-byte flags controlling which menu
//! items/fields the controller's own display exposes. Ground truth:
//! `examples/original_source/luxtronik/cfi/visibilities.py` and the real
//! upstream `VISIBILITIES_DEFINITIONS_LIST` (not retrieved in full; this
//! is a representative sample). The wire response carries one signed
//! byte per entry (spec.md §4.5 READ_VISIBILITIES), decoded the same way
//! as any other `Bool` field.

use crate::datatypes::FieldKind::*;
use crate::definition::RawFieldDef;

pub const DEFINITIONS: &[RawFieldDef] = &[
    RawFieldDef {
        index: 0,
        count: 1,
        names: &["ID_Visi_Heizung"],
        kind: Bool,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 1,
        count: 1,
        names: &["ID_Visi_Brauchwarmwasser"],
        kind: Bool,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 2,
        count: 1,
        names: &["ID_Visi_Schwimmbad"],
        kind: Bool,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 3,
        count: 1,
        names: &["ID_Visi_Lueftung"],
        kind: Bool,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 4,
        count: 1,
        names: &["ID_Visi_KuehlungAktiv", "ID_Visi_Kuehlung"],
        kind: Bool,
        writeable: false,
        data_type: "UINT16",
        since: Some("3.90.1"),
        until: None,
    },
    RawFieldDef {
        index: 5,
        count: 1,
        names: &["ID_Visi_MK1"],
        kind: Bool,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 6,
        count: 1,
        names: &["ID_Visi_MK2"],
        kind: Bool,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 7,
        count: 1,
        names: &["ID_Visi_Zweiter_Waermeerzeuger"],
        kind: Bool,
        writeable: false,
        data_type: "UINT16",
        since: None,
        until: None,
    },
    RawFieldDef {
        index: 8,
        count: 1,
        names: &["ID_Visi_Photovoltaik"],
        kind: Bool,
        writeable: false,
        data_type: "UINT16",
        since: Some("3.91.0"),
        until: None,
    },
];
