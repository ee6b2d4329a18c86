//! Field definitions and the per-class definition registry (spec.md §3,
//! §4.1). Ground truth: `examples/original_source/luxtronik/definitions/
//! __init__.py` (`LuxtronikDefinition`, `LuxtronikDefinitionsDictionary`).

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::datatypes::FieldKind;
use crate::version::{version_in_range, Version};

/// One of the {"", UINT16, UINT32, UINT64, INT16, INT32, INT64} data-type
/// tags. Only `Int16` honors the `0x7FFF` sentinel (spec.md §9 Open
/// Question, resolved in DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Unspecified,
    Uint16,
    Uint32,
    Uint64,
    Int16,
    Int32,
    Int64,
}

impl DataType {
    pub fn parse(tag: &str) -> Option<DataType> {
        match tag {
            "" => Some(DataType::Unspecified),
            "UINT16" => Some(DataType::Uint16),
            "UINT32" => Some(DataType::Uint32),
            "UINT64" => Some(DataType::Uint64),
            "INT16" => Some(DataType::Int16),
            "INT32" => Some(DataType::Int32),
            "INT64" => Some(DataType::Int64),
            _ => None,
        }
    }

    pub fn honors_sentinel(self) -> bool {
        matches!(self, DataType::Int16)
    }
}

/// A compile-time literal describing a single field, as laid out in the
/// static per-class tables under `src/definitions/`. Normalized into a
/// [`FieldDefinition`] by [`FieldDefinitionRegistry::build`].
#[derive(Debug, Clone, Copy)]
pub struct RawFieldDef {
    pub index: i64,
    pub count: u32,
    pub names: &'static [&'static str],
    pub kind: FieldKind,
    pub writeable: bool,
    pub data_type: &'static str,
    pub since: Option<&'static str>,
    pub until: Option<&'static str>,
}

/// Any value usable to alias a field: register index or a string key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AliasKey {
    Name(String),
    Index(i64),
}

impl From<&str> for AliasKey {
    fn from(s: &str) -> Self {
        AliasKey::Name(s.to_lowercase())
    }
}

impl From<i64> for AliasKey {
    fn from(i: i64) -> Self {
        AliasKey::Index(i)
    }
}

/// Immutable metadata for one field (spec.md §3).
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub index: i64,
    pub count: u32,
    pub names: Vec<String>,
    pub kind: FieldKind,
    pub writeable: bool,
    pub data_type: DataType,
    pub since: Option<Version>,
    pub until: Option<Version>,
    pub offset: u32,
    pub aliases: Vec<AliasKey>,
    /// Opt-in flag for collapsing a multi-register field's raw chunks into
    /// one packed integer (spec.md §9 Open Question; default true here).
    pub concatenate_multiple_data_chunks: bool,
    /// Sequence number at which this definition was added to its
    /// registry; used only to break lookup ties ("last added wins").
    pub(crate) generation: usize,
}

impl FieldDefinition {
    pub fn preferred_name(&self) -> &str {
        &self.names[0]
    }

    pub fn address(&self) -> u32 {
        self.offset + self.index as u32
    }

    pub fn in_range(&self, version: Option<Version>) -> bool {
        version_in_range(version, self.since, self.until)
    }

    /// Build a synthetic `unknown_<class>_<index>` definition: count 1,
    /// type Unknown, not writeable (spec.md §4.1 `create_unknown`).
    pub fn synthesize_unknown(class_name: &str, index: i64, offset: u32) -> FieldDefinition {
        FieldDefinition {
            index,
            count: 1,
            names: vec![format!("unknown_{}_{}", class_name, index)],
            kind: FieldKind::Unknown,
            writeable: false,
            data_type: DataType::Unspecified,
            since: None,
            until: None,
            offset,
            aliases: Vec::new(),
            concatenate_multiple_data_chunks: true,
            generation: usize::MAX,
        }
    }
}

/// Outcome of a name/index/alias lookup: the matched definition plus,
/// when the caller used an obsolete alias name, the preferred name they
/// should switch to (spec.md §3, §9 "Obsolete name rename").
pub struct Lookup<'a> {
    pub definition: &'a FieldDefinition,
    pub deprecated_in_favor_of: Option<String>,
}

/// A class-level static registry of field definitions plus lookup
/// indices (spec.md §4.1). One instance per register class (parameter,
/// calculation, visibility, holding, input).
pub struct FieldDefinitionRegistry {
    class_name: &'static str,
    offset: u32,
    /// All entries in ascending-index order; overloaded indices retain
    /// every entry (iteration needs all of them).
    definitions: Vec<FieldDefinition>,
    /// name (lowercased) -> index into `definitions`. Last-added wins.
    by_name: HashMap<String, usize>,
    /// register index -> index into `definitions`. Last-added wins.
    by_index: HashMap<i64, usize>,
    /// globally registered aliases -> index into `definitions`.
    by_alias: HashMap<AliasKey, usize>,
}

impl FieldDefinitionRegistry {
    /// Normalize a static table into a registry. Malformed entries are
    /// logged and discarded, never raised (spec.md §4.1).
    pub fn build(raw: &[RawFieldDef], class_name: &'static str, offset: u32) -> FieldDefinitionRegistry {
        let mut definitions = Vec::new();
        let mut by_name = HashMap::new();
        let mut by_index = HashMap::new();

        for (generation, entry) in raw.iter().enumerate() {
            if entry.index < 0 {
                warn!(class = class_name, index = entry.index, "discarding definition with negative index");
                continue;
            }
            let data_type = match DataType::parse(entry.data_type) {
                Some(dt) => dt,
                None => {
                    warn!(class = class_name, tag = entry.data_type, "discarding definition with invalid data type tag");
                    continue;
                }
            };
            let names: Vec<String> = entry
                .names
                .iter()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect();
            let names = if names.is_empty() {
                vec!["_invalid_".to_string()]
            } else {
                names
            };
            let since = entry.since.and_then(Version::parse);
            let until = entry.until.and_then(Version::parse);

            let def = FieldDefinition {
                index: entry.index,
                count: entry.count.max(1),
                names,
                kind: entry.kind,
                writeable: entry.writeable,
                data_type,
                since,
                until,
                offset,
                aliases: Vec::new(),
                concatenate_multiple_data_chunks: !entry.kind.prefers_list_representation(),
                generation,
            };

            let slot = definitions.len();
            for (i, name) in def.names.iter().enumerate() {
                let key = name.to_lowercase();
                by_name.insert(key, slot);
                if i > 0 {
                    debug!(class = class_name, name = name.as_str(), "registered as obsolete alias");
                }
            }
            by_index.insert(def.index, slot);
            definitions.push(def);
        }

        definitions.sort_by_key(|d| d.index);
        // Re-derive name/index maps post-sort since `slot` shifted.
        let mut by_name2 = HashMap::new();
        let mut by_index2 = HashMap::new();
        for (slot, def) in definitions.iter().enumerate() {
            for name in &def.names {
                by_name2.insert(name.to_lowercase(), slot);
            }
            by_index2.insert(def.index, slot);
        }
        let _ = (by_name, by_index);

        FieldDefinitionRegistry {
            class_name,
            offset,
            definitions,
            by_name: by_name2,
            by_index: by_index2,
            by_alias: HashMap::new(),
        }
    }

    pub fn class_name(&self) -> &'static str {
        self.class_name
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.definitions.iter()
    }

    /// Register a global alias, visible to every data vector built from
    /// this registry from now on.
    pub fn register_alias(&mut self, target: &str, key: impl Into<AliasKey>) -> bool {
        let Some(slot) = self.resolve_slot(target) else {
            return false;
        };
        self.by_alias.insert(key.into(), slot);
        true
    }

    pub fn create_unknown(&self, index: i64) -> FieldDefinition {
        FieldDefinition::synthesize_unknown(self.class_name, index, self.offset)
    }

    fn resolve_slot(&self, key: &str) -> Option<usize> {
        if let Ok(idx) = key.parse::<i64>() {
            return self.by_index.get(&idx).copied();
        }
        self.by_name.get(&key.to_lowercase()).copied()
    }

    /// Look up a definition by preferred name, obsolete name (emits a
    /// deprecation notice), numeric index, stringified index, or a
    /// previously registered alias.
    pub fn get(&self, key: &str) -> Option<Lookup<'_>> {
        if let Some(slot) = self.by_alias.get(&AliasKey::from(key)) {
            return Some(Lookup { definition: &self.definitions[*slot], deprecated_in_favor_of: None });
        }
        if let Ok(idx) = key.parse::<i64>() {
            if let Some(lookup) = self.get_by_index(idx) {
                return Some(lookup);
            }
        }
        let lower = key.to_lowercase();
        if let Some(slot) = self.by_name.get(&lower) {
            let def = &self.definitions[*slot];
            let deprecated = if def.preferred_name().to_lowercase() != lower {
                debug!(class = self.class_name, requested = key, preferred = def.preferred_name(), "obsolete name used");
                Some(def.preferred_name().to_string())
            } else {
                None
            };
            return Some(Lookup { definition: def, deprecated_in_favor_of: deprecated });
        }
        None
    }

    pub fn get_by_index(&self, index: i64) -> Option<Lookup<'_>> {
        if let Some(slot) = self.by_index.get(&index) {
            return Some(Lookup { definition: &self.definitions[*slot], deprecated_in_favor_of: None });
        }
        if let Some(slot) = self.by_alias.get(&AliasKey::from(index)) {
            return Some(Lookup { definition: &self.definitions[*slot], deprecated_in_favor_of: None });
        }
        None
    }

    /// A version-filtered view: only entries whose `[since, until]` window
    /// contains `version`. `None` means "no filtering" (trial-and-error
    /// mode upstream still applies — this just returns everything).
    pub fn filtered(&self, version: Option<Version>) -> Vec<&FieldDefinition> {
        self.definitions.iter().filter(|d| d.in_range(version)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFS: &[RawFieldDef] = &[
        RawFieldDef {
            index: 0,
            count: 1,
            names: &["heating_mode"],
            kind: FieldKind::Bool,
            writeable: true,
            data_type: "UINT16",
            since: Some("3.90.1"),
            until: None,
        },
        RawFieldDef {
            index: 1,
            count: 1,
            names: &["heating_setpoint", "old_heating_setpoint"],
            kind: FieldKind::Celsius,
            writeable: true,
            data_type: "UINT16",
            since: None,
            until: None,
        },
        RawFieldDef {
            index: -1,
            count: 1,
            names: &["broken"],
            kind: FieldKind::Unknown,
            writeable: false,
            data_type: "UINT16",
            since: None,
            until: None,
        },
    ];

    #[test]
    fn malformed_entries_are_discarded_not_raised() {
        let registry = FieldDefinitionRegistry::build(DEFS, "holding", 10000);
        assert_eq!(registry.iter().count(), 2);
    }

    #[test]
    fn lookup_by_name_index_and_stringified_index_agree() {
        let registry = FieldDefinitionRegistry::build(DEFS, "holding", 10000);
        let by_name = registry.get("heating_setpoint").unwrap().definition as *const _;
        let by_index = registry.get_by_index(1).unwrap().definition as *const _;
        let by_str_index = registry.get("1").unwrap().definition as *const _;
        assert_eq!(by_name, by_index);
        assert_eq!(by_name, by_str_index);
    }

    #[test]
    fn obsolete_name_resolves_with_deprecation_notice() {
        let registry = FieldDefinitionRegistry::build(DEFS, "holding", 10000);
        let lookup = registry.get("old_heating_setpoint").unwrap();
        assert_eq!(lookup.definition.preferred_name(), "heating_setpoint");
        assert_eq!(lookup.deprecated_in_favor_of.as_deref(), Some("heating_setpoint"));
    }

    #[test]
    fn address_is_offset_plus_index() {
        let registry = FieldDefinitionRegistry::build(DEFS, "holding", 10000);
        let def = registry.get_by_index(1).unwrap().definition;
        assert_eq!(def.address(), 10001);
    }

    #[test]
    fn version_filter_respects_since_until() {
        let registry = FieldDefinitionRegistry::build(DEFS, "holding", 10000);
        let early = Version::new(3, 0, 0, 0);
        let filtered = registry.filtered(Some(early));
        assert!(!filtered.iter().any(|d| d.preferred_name() == "heating_mode"));
        assert!(filtered.iter().any(|d| d.preferred_name() == "heating_setpoint"));
    }

    #[test]
    fn create_unknown_is_not_writeable() {
        let registry = FieldDefinitionRegistry::build(DEFS, "holding", 10000);
        let unknown = registry.create_unknown(999);
        assert_eq!(unknown.preferred_name(), "unknown_holding_999");
        assert!(!unknown.writeable);
        assert_eq!(unknown.count, 1);
    }
}
