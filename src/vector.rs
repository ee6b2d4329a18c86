//! `DataVector`: an index-ordered, version-filtered collection of fields
//! for one register class (spec.md §3, §4.3). Ground truth: `examples/
//! original_source/luxtronik/data_vector.py` (`DataVector`) and
//! `examples/original_source/luxtronik/shi/vector.py`
//! (`DataVectorSmartHome`) — both subclasses collapse into this one type
//! here, parameterized by [`RegisterClass`] instead of Python inheritance.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::block::{
    assemble_block_payload, field_get_data_arr, field_integrate_data, integrate_block_data, BlockList, BlockPart,
    ContiguousBlock,
};
use crate::datatypes::{RawValue, Value};
use crate::definition::{AliasKey, FieldDefinition};
use crate::definitions::{calculations, RegisterClass};
use crate::field::Field;
use crate::version::Version;

/// One (definition, field) pair plus a stable position used by the block
/// planner to scatter/gather against the caller's vector.
struct Item {
    def: FieldDefinition,
    field: Field,
}

/// An index-ordered collection of fields for one register class, bound to
/// a controller version (spec.md §3 `DataVector`).
pub struct DataVector {
    class: RegisterClass,
    version: Option<Version>,
    /// Write refusals for non-writeable fields are rejected when true
    /// (spec.md §4.3 `set`).
    safe: bool,
    /// `version == None` puts the vector into trial-and-error mode
    /// (spec.md §4.7, §9 Glossary): unknown names/indices are
    /// synthesized on demand instead of being dropped, and the block
    /// planner emits one telegram per field.
    trial_and_error: bool,
    items: Vec<Item>,
    local_aliases: HashMap<AliasKey, usize>,
    block_cache: Option<BlockList>,
}

impl DataVector {
    /// Build a vector by filtering the class's static registry through
    /// `version_in_range` (spec.md §4.3).
    pub fn new(class: RegisterClass, version: Option<Version>, safe: bool) -> DataVector {
        let registry = class.registry();
        let items = registry
            .filtered(version)
            .into_iter()
            .map(|def| Item { def: def.clone(), field: Field::new(def.preferred_name(), def.writeable, def.kind) })
            .collect();
        DataVector {
            class,
            version,
            safe,
            trial_and_error: version.is_none(),
            items,
            local_aliases: HashMap::new(),
            block_cache: None,
        }
    }

    /// An empty vector with no fields yet; populated via [`DataVector::add`]
    /// (spec.md §4.3 `empty(version)` constructor).
    pub fn empty(class: RegisterClass, version: Option<Version>, safe: bool) -> DataVector {
        DataVector {
            class,
            version,
            safe,
            trial_and_error: version.is_none(),
            items: Vec::new(),
            local_aliases: HashMap::new(),
            block_cache: None,
        }
    }

    pub fn class(&self) -> RegisterClass {
        self.class
    }

    pub fn version(&self) -> Option<Version> {
        self.version
    }

    pub fn safe(&self) -> bool {
        self.safe
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ascending-index iteration (spec.md §3, §4.3).
    pub fn iter(&self) -> impl Iterator<Item = (&FieldDefinition, &Field)> {
        self.items.iter().map(|item| (&item.def, &item.field))
    }

    fn resolve_index(&self, key: &str) -> Option<usize> {
        if let Some(slot) = self.local_aliases.get(&AliasKey::from(key)) {
            return Some(*slot);
        }
        if let Ok(idx) = key.parse::<i64>() {
            if let Some(slot) = self.local_aliases.get(&AliasKey::Index(idx)) {
                return Some(*slot);
            }
            // Last-added wins on ambiguous lookup (firmware overloads
            // sharing an index), same as the name-keyed branch below.
            return self.items.iter().rposition(|item| item.def.index == idx);
        }
        let lower = key.to_lowercase();
        // Last-added wins on ambiguous lookup: scan in reverse.
        let slot = self.items.iter().rposition(|item| item.def.names.iter().any(|n| n.to_lowercase() == lower))?;
        let def = &self.items[slot].def;
        if def.preferred_name().to_lowercase() != lower {
            debug!(class = self.class.name(), requested = key, preferred = def.preferred_name(), "obsolete name used");
        }
        Some(slot)
    }

    /// Obsolete-method aliases (spec.md §9 "Obsolete name rename",
    /// `examples/original_source/luxtronik/cfi/calculations.py`'s
    /// `_obsolete` dict): a name that doesn't resolve to a plain field at
    /// all but to a derived accessor elsewhere. Only meaningful for the
    /// calculations class today (`ID_WEB_SoftStand` -> `get_firmware_version()`).
    fn obsolete_method_alias(&self, key: &str) -> Option<&'static str> {
        if !matches!(self.class, RegisterClass::Calculation) {
            return None;
        }
        let lower = key.to_lowercase();
        calculations::OBSOLETE_METHOD_ALIASES
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, replacement)| *replacement)
    }

    /// Look up a field by preferred name, obsolete name, numeric index,
    /// stringified index, alias, or — in trial-and-error mode — a
    /// synthesized `unknown_<class>_<i>` definition (spec.md §4.3, §4.7).
    pub fn get(&mut self, target: &str) -> Option<&Field> {
        self.resolve(target).map(|idx| &self.items[idx].field)
    }

    pub fn get_mut(&mut self, target: &str) -> Option<&mut Field> {
        self.resolve(target).map(move |idx| &mut self.items[idx].field)
    }

    pub fn definition(&self, target: &str) -> Option<&FieldDefinition> {
        self.resolve_index(target).map(|idx| &self.items[idx].def)
    }

    fn resolve(&mut self, target: &str) -> Option<usize> {
        if let Some(replacement) = self.obsolete_method_alias(target) {
            debug!(class = self.class.name(), requested = target, replacement, "obsolete name used; call the replacement accessor instead");
            return None;
        }
        if let Some(idx) = self.resolve_index(target) {
            return Some(idx);
        }
        if self.trial_and_error {
            return self.synthesize_from_trial_and_error(target);
        }
        warn!(class = self.class.name(), target, "field not found");
        None
    }

    fn synthesize_from_trial_and_error(&mut self, target: &str) -> Option<usize> {
        let prefix = format!("unknown_{}_", self.class.name());
        let index = if let Ok(idx) = target.parse::<i64>() {
            Some(idx)
        } else {
            target.strip_prefix(prefix.as_str()).and_then(|rest| rest.parse::<i64>().ok())
        }?;
        let def = self.class.registry().create_unknown(index);
        let field = Field::new(def.preferred_name(), def.writeable, def.kind);
        self.items.push(Item { def, field });
        self.block_cache = None;
        Some(self.items.len() - 1)
    }

    /// Version-filtered additive insertion (spec.md §4.3 `add`). Looks
    /// `target` up in the class-wide static registry, refuses to
    /// duplicate an already-present index+name pair, and re-sorts to
    /// preserve ascending-index iteration.
    pub fn add(&mut self, target: &str, alias: Option<AliasKey>) -> bool {
        let Some(lookup) = self.class.registry().get(target) else {
            warn!(class = self.class.name(), target, "cannot add unknown definition");
            return false;
        };
        let def = lookup.definition;
        if !def.in_range(self.version) {
            warn!(class = self.class.name(), target, "definition not valid for this vector's version");
            return false;
        }
        if self.items.iter().any(|item| item.def.index == def.index && item.def.preferred_name() == def.preferred_name()) {
            warn!(class = self.class.name(), target, "definition already present");
            return false;
        }
        let def = def.clone();
        let field = Field::new(def.preferred_name(), def.writeable, def.kind);
        let insert_at = self.items.partition_point(|item| item.def.index <= def.index);
        let slot = insert_at;
        self.items.insert(insert_at, Item { def, field });
        if let Some(alias) = alias {
            self.local_aliases.insert(alias, slot);
        }
        self.block_cache = None;
        true
    }

    /// Register a local (per-vector) alias (spec.md §4.1, §4.3).
    pub fn register_alias(&mut self, target: &str, key: impl Into<AliasKey>) -> bool {
        let Some(idx) = self.resolve_index(target) else {
            return false;
        };
        self.local_aliases.insert(key.into(), idx);
        true
    }

    /// Assign a decoded value, respecting `safe` (spec.md §4.3 `set`).
    /// Returns `false` if the field doesn't resolve, `safe` refuses the
    /// write, or the codec rejects the value.
    pub fn set(&mut self, target: &str, value: &Value) -> bool {
        let Some(idx) = self.resolve(target) else {
            return false;
        };
        let item = &mut self.items[idx];
        if self.safe && !item.def.writeable {
            warn!(class = self.class.name(), field = item.field.name(), "field not safe for writing");
            return false;
        }
        if !item.field.assign(value) {
            tracing::error!(class = self.class.name(), field = item.field.name(), "value rejected by codec");
            return false;
        }
        self.block_cache = None;
        true
    }

    /// Force write-pending on an already-valued field without a fresh
    /// assignment (spec.md §4.4 write pre-filter "explicitly overridden").
    pub fn mark_write_pending(&mut self, target: &str) -> bool {
        let Some(idx) = self.resolve(target) else {
            return false;
        };
        self.items[idx].field.mark_write_pending();
        true
    }

    /// Integrate a response whose offset is implicit zero: `raw_data[i]`
    /// belongs to whichever field's index/count span covers position `i`
    /// (spec.md §4.3 `parse`). Used by the CFI transport, which always
    /// reads every register of a class in one telegram.
    pub fn parse(&mut self, raw_data: &[i64]) {
        for item in &mut self.items {
            let start = item.def.index as usize;
            let end = start + item.def.count as usize;
            if end <= raw_data.len() {
                field_integrate_data(&item.def, &mut item.field, &raw_data[start..], 32);
            } else {
                item.field.set_raw(None);
            }
        }
    }

    /// Build (or reuse the cached) contiguous read-block plan (spec.md
    /// §3 "cached, lazily-invalidated list of contiguous read-blocks",
    /// §4.4).
    pub fn read_blocks(&mut self) -> &BlockList {
        if self.block_cache.is_none() {
            let mut list = BlockList::new(self.class.name(), true);
            for (item_index, item) in self.items.iter().enumerate() {
                let part = BlockPart {
                    item_index,
                    def_index: item.def.index,
                    def_count: item.def.count,
                    addr: item.def.address(),
                };
                if self.trial_and_error {
                    list.append_single(part);
                } else {
                    list.collect(part);
                }
            }
            self.block_cache = Some(list);
        }
        self.block_cache.as_ref().unwrap()
    }

    /// Integrate one read block's response back into its parts (spec.md
    /// §4.4). Returns `false` (and leaves every part's `raw` untouched)
    /// on a response-length mismatch.
    pub fn integrate_read_block(&mut self, block: &ContiguousBlock, data: &[i64], chunk_bits: u32) -> bool {
        let items = &mut self.items;
        integrate_block_data(block, data, |part, slice| {
            let item = &mut items[part.item_index];
            field_integrate_data(&item.def, &mut item.field, slice, chunk_bits);
            item.field.clear_write_pending();
        })
    }

    /// Build the write-block plan from every write-pending (or
    /// explicitly overridden) field (spec.md §4.4 write pre-filter).
    /// Fields that fail the `safe` check are dropped with a warning, not
    /// aborted wholesale.
    pub fn write_blocks(&self) -> BlockList {
        let mut list = BlockList::new(self.class.name(), false);
        for (item_index, item) in self.items.iter().enumerate() {
            if !item.field.write_pending() {
                continue;
            }
            if self.safe && !item.def.writeable {
                warn!(class = self.class.name(), field = item.field.name(), "refusing to write non-writeable field under safe mode");
                continue;
            }
            let part = BlockPart {
                item_index,
                def_index: item.def.index,
                def_count: item.def.count,
                addr: item.def.address(),
            };
            if self.trial_and_error {
                list.append_single(part);
            } else {
                list.collect(part);
            }
        }
        list
    }

    /// Assemble a write block's payload from its parts' current raw data
    /// (spec.md §4.4). `chunk_bits` selects 16 (SHI) or 32 (CFI).
    pub fn assemble_write_payload(&self, block: &ContiguousBlock, chunk_bits: u32) -> Option<Vec<i64>> {
        let items = &self.items;
        assemble_block_payload(block, |part| field_get_data_arr(&items[part.item_index].def, &items[part.item_index].field, chunk_bits))
    }

    /// Clear `write_pending` on every part of a block after a successful
    /// write ack, independent of any subsequent read (spec.md §4.4).
    pub fn clear_write_pending_for_block(&mut self, block: &ContiguousBlock) {
        for part in block.parts() {
            self.items[part.item_index].field.clear_write_pending();
        }
    }

    /// Every currently write-pending field's `(address, raw value)` —
    /// used by the CFI transport, which writes one register at a time
    /// instead of through the block planner (spec.md §4.5).
    pub fn pending_single_writes(&self) -> Vec<(i64, i64)> {
        self.items
            .iter()
            .filter(|item| item.field.write_pending())
            .filter_map(|item| item.field.raw().and_then(RawValue::as_int).map(|raw| (item.def.index, raw)))
            .collect()
    }

    pub fn clear_write_pending_by_index(&mut self, index: i64) {
        if let Some(item) = self.items.iter_mut().find(|item| item.def.index == index) {
            item.field.clear_write_pending();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::Value;

    #[test]
    fn iteration_is_ascending_by_index() {
        let vector = DataVector::new(RegisterClass::Holding, None, true);
        let indices: Vec<i64> = vector.iter().map(|(def, _)| def.index).collect();
        let mut sorted = indices.clone();
        sorted.sort();
        assert_eq!(indices, sorted);
    }

    #[test]
    fn lookup_by_name_index_and_string_index_agree() {
        let mut vector = DataVector::new(RegisterClass::Holding, Some(crate::version::LATEST_VERSION), true);
        let by_name = vector.get("heating_setpoint").map(|f| f.name().to_string());
        let def_index = vector.definition("heating_setpoint").unwrap().index;
        let by_index = vector.get(&def_index.to_string()).map(|f| f.name().to_string());
        assert_eq!(by_name, by_index);
    }

    #[test]
    fn version_filtering_excludes_out_of_range_fields() {
        let early = Version::new(3, 0, 0, 0);
        let mut vector = DataVector::new(RegisterClass::Holding, Some(early), true);
        assert!(vector.get("heating_setpoint").is_none());
    }

    #[test]
    fn safe_mode_refuses_write_to_non_writeable_field() {
        let mut vector = DataVector::new(RegisterClass::Input, Some(crate::version::LATEST_VERSION), true);
        let ok = vector.set("operation_mode", &Value::Enum("heating".to_string()));
        assert!(!ok);
    }

    #[test]
    fn unsafe_mode_allows_write_to_non_writeable_field() {
        let mut vector = DataVector::new(RegisterClass::Input, Some(crate::version::LATEST_VERSION), false);
        let ok = vector.set("operation_mode", &Value::Enum("heating".to_string()));
        assert!(ok);
        assert!(vector.get("operation_mode").unwrap().write_pending());
    }

    #[test]
    fn trial_and_error_mode_synthesizes_unknown_fields_on_the_fly() {
        let mut vector = DataVector::new(RegisterClass::Holding, None, true);
        assert!(vector.get("4").is_some());
        assert_eq!(vector.get("unknown_holding_4").unwrap().name(), "unknown_holding_4");
    }

    #[test]
    fn trial_and_error_mode_plans_one_block_per_field() {
        let mut vector = DataVector::new(RegisterClass::Holding, None, true);
        vector.get("0");
        vector.get("1");
        let blocks = vector.read_blocks();
        assert_eq!(blocks.iter().count(), 2);
    }

    #[test]
    fn versioned_mode_groups_contiguous_fields_into_one_block() {
        let mut vector = DataVector::new(RegisterClass::Holding, Some(crate::version::LATEST_VERSION), true);
        let blocks = vector.read_blocks();
        // heating_mode(0), heating_setpoint(1), heating_offset(2) are contiguous.
        assert!(blocks.iter().next().unwrap().overall_count() >= 3);
    }

    #[test]
    fn obsolete_calculations_name_resolves_to_replacement_hint_not_a_field() {
        let mut vector = DataVector::new(RegisterClass::Calculation, Some(crate::version::LATEST_VERSION), true);
        assert!(vector.get("ID_WEB_SoftStand").is_none());
    }

    #[test]
    fn write_blocks_clear_pending_after_ack() {
        let mut vector = DataVector::new(RegisterClass::Holding, Some(crate::version::LATEST_VERSION), true);
        vector.set("heating_setpoint", &Value::Number(20.0));
        let blocks = vector.write_blocks();
        let block = blocks.iter().next().unwrap();
        vector.clear_write_pending_for_block(block);
        assert!(!vector.get("heating_setpoint").unwrap().write_pending());
    }
}
