//! The contiguous-block planner (spec.md §4.4) and the big-endian
//! multi-register packing helpers (spec.md §9). Ground truth:
//! `examples/original_source/luxtronik/shi/contiguous.py` and
//! `luxtronik/shi/definitions.py` (`pack_values`/`unpack_values`,
//! `get_data_arr`/`integrate_data`).

use tracing::error;

use crate::datatypes::{RawValue, FUNCTION_NOT_AVAILABLE};
use crate::definition::FieldDefinition;
use crate::field::Field;

/// Pack `values` (one per register chunk) into a single wide integer.
/// `chunk_bits` is 16 for SHI, 32 for CFI. MSB-first (`big_endian = true`)
/// is the default wire order. Widened to `i128`: at `chunk_bits = 32` a
/// 3- or 4-chunk CFI field needs 96/128 bits, which an `i64` accumulator
/// cannot shift into (spec.md §8 packing-identity law covers `n ∈
/// {2,3,4}` at both chunk sizes).
pub fn pack_values(values: &[i64], chunk_bits: u32, big_endian: bool) -> i128 {
    let mask: i128 = (1i128 << chunk_bits) - 1;
    let count = values.len();
    let mut result: i128 = 0;
    for (idx, value) in values.iter().enumerate() {
        let bit_index = if big_endian { count - 1 - idx } else { idx };
        result |= (*value as i128 & mask) << (chunk_bits as usize * bit_index);
    }
    result
}

/// Inverse of [`pack_values`]: split `packed` back into `count` chunks.
pub fn unpack_values(packed: i128, count: usize, chunk_bits: u32, big_endian: bool) -> Vec<i64> {
    let mask: i128 = (1i128 << chunk_bits) - 1;
    (0..count)
        .map(|idx| {
            let bit_index = if big_endian { count - 1 - idx } else { idx };
            ((packed >> (chunk_bits as usize * bit_index)) & mask) as i64
        })
        .collect()
}

/// Normalize a field's raw data to a list of `definition.count` chunks,
/// unpacking a concatenated integer if needed. Returns `None` if the data
/// is missing or the wrong size (spec.md §4.2, §4.4).
pub fn field_get_data_arr(def: &FieldDefinition, field: &Field, chunk_bits: u32) -> Option<Vec<i64>> {
    let raw = field.raw()?;
    let list = match raw {
        RawValue::List(list) => list.clone(),
        RawValue::Int(v) if def.count > 1 && def.concatenate_multiple_data_chunks => {
            unpack_values(*v as i128, def.count as usize, chunk_bits, true)
        }
        RawValue::Int(v) => vec![*v],
    };
    if list.len() == def.count as usize {
        Some(list)
    } else {
        None
    }
}

/// Integrate a slice of `raw_data` (offset already applied by the caller)
/// into `field`, mapping the sentinel to `None` for INT16-tagged fields
/// and re-packing multi-register chunks when the field opted in.
pub fn field_integrate_data(def: &FieldDefinition, field: &mut Field, raw_data: &[i64], chunk_bits: u32) {
    if raw_data.len() < def.count as usize {
        field.set_raw(None);
        return;
    }
    let chunk = &raw_data[..def.count as usize];
    let sentinel_hit = def.data_type.honors_sentinel() && chunk.contains(&FUNCTION_NOT_AVAILABLE);
    if sentinel_hit {
        field.set_raw(None);
        return;
    }
    if def.count == 1 {
        field.set_raw(Some(RawValue::Int(chunk[0])));
    } else if def.concatenate_multiple_data_chunks {
        // `RawValue::Int` stores a 64-bit register value; every current
        // definition with `count > 1` fits its packed form in 64 bits
        // (SHI's widest is 2x16-bit), so this narrowing is exact today.
        field.set_raw(Some(RawValue::Int(pack_values(chunk, chunk_bits, true) as i64)));
    } else {
        field.set_raw(Some(RawValue::List(chunk.to_vec())));
    }
}

/// One field's position within a [`ContiguousBlock`].
#[derive(Debug, Clone, Copy)]
pub struct BlockPart {
    /// Position of the (definition, field) pair in the owning
    /// `DataVector`'s item list.
    pub item_index: usize,
    pub def_index: i64,
    pub def_count: u32,
    pub addr: u32,
}

/// One telegram's worth of contiguous work (spec.md §3).
#[derive(Debug, Clone, Default)]
pub struct ContiguousBlock {
    parts: Vec<BlockPart>,
    last_idx: i64,
}

impl ContiguousBlock {
    fn new() -> Self {
        ContiguousBlock { parts: Vec::new(), last_idx: -1 }
    }

    /// Whether `def_index` could be appended without creating a gap.
    pub fn can_add(&self, def_index: i64) -> bool {
        if self.parts.is_empty() {
            return true;
        }
        def_index >= self.first_index() && def_index <= self.last_idx + 1
    }

    pub fn add(&mut self, part: BlockPart) {
        self.last_idx = self.last_idx.max(part.def_index + part.def_count as i64 - 1);
        self.parts.push(part);
    }

    pub fn first_index(&self) -> i64 {
        self.parts.first().map(|p| p.def_index).unwrap_or(0)
    }

    pub fn first_addr(&self) -> u32 {
        self.parts.first().map(|p| p.addr).unwrap_or(0)
    }

    pub fn overall_count(&self) -> u32 {
        if self.parts.is_empty() {
            0
        } else {
            (self.last_idx - self.first_index() + 1) as u32
        }
    }

    pub fn parts(&self) -> &[BlockPart] {
        &self.parts
    }
}

/// Ordered contiguous blocks for one register class and direction
/// (spec.md §3 `BlockList`).
#[derive(Debug, Clone)]
pub struct BlockList {
    class_name: &'static str,
    read_not_write: bool,
    blocks: Vec<ContiguousBlock>,
    can_add: bool,
}

impl BlockList {
    pub fn new(class_name: &'static str, read_not_write: bool) -> Self {
        BlockList { class_name, read_not_write, blocks: Vec::new(), can_add: true }
    }

    pub fn class_name(&self) -> &'static str {
        self.class_name
    }

    pub fn read_not_write(&self) -> bool {
        self.read_not_write
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContiguousBlock> {
        self.blocks.iter()
    }

    /// Add `part` into the last block if it fits contiguously, otherwise
    /// open a new one. Assumes parts arrive in ascending-index order.
    pub fn collect(&mut self, part: BlockPart) {
        let needs_new_block = match self.blocks.last() {
            Some(block) => !self.can_add || !block.can_add(part.def_index),
            None => true,
        };
        if needs_new_block {
            self.blocks.push(ContiguousBlock::new());
        }
        self.can_add = true;
        self.blocks.last_mut().unwrap().add(part);
    }

    /// Force a new single-part block, e.g. for trial-and-error mode where
    /// every field gets its own telegram.
    pub fn append_single(&mut self, part: BlockPart) {
        let mut block = ContiguousBlock::new();
        block.add(part);
        self.blocks.push(block);
        self.can_add = false;
    }
}

/// Validate a response array against a block's expected span and scatter
/// it back into the owning items via `integrate`. Returns `false` (and
/// leaves every part's `raw` untouched) on a length mismatch.
pub fn integrate_block_data<F>(block: &ContiguousBlock, data: &[i64], mut integrate: F) -> bool
where
    F: FnMut(&BlockPart, &[i64]),
{
    if data.len() != block.overall_count() as usize {
        error!(
            expected = block.overall_count(),
            got = data.len(),
            "block integration failed: response length mismatch"
        );
        return false;
    }
    let first = block.first_index();
    for part in block.parts() {
        let offset = (part.def_index - first) as usize;
        let end = offset + part.def_count as usize;
        integrate(part, &data[offset..end]);
    }
    true
}

/// Assemble a block's write payload from each part's data, detecting
/// overlaps between overloaded definitions sharing an index.
pub fn assemble_block_payload<F>(block: &ContiguousBlock, mut get_part_data: F) -> Option<Vec<i64>>
where
    F: FnMut(&BlockPart) -> Option<Vec<i64>>,
{
    if block.parts().is_empty() {
        return None;
    }
    let total = block.overall_count() as usize;
    let mut data_arr: Vec<Option<i64>> = vec![None; total];
    let first = block.first_index();
    let mut valid = true;

    for part in block.parts() {
        let Some(data) = get_part_data(part) else {
            error!(item = part.item_index, "no data provided for write part");
            valid = false;
            continue;
        };
        let offset = (part.def_index - first) as usize;
        let end = offset + part.def_count as usize;
        if end > total {
            error!(item = part.item_index, "write part would overflow block");
            valid = false;
            continue;
        }
        for (i, value) in data.into_iter().enumerate() {
            let slot = offset + i;
            match data_arr[slot] {
                None => data_arr[slot] = Some(value),
                Some(_) => {
                    error!(slot, "overlapping write detected for block slot");
                    valid = false;
                }
            }
        }
    }

    if !valid {
        return None;
    }
    if data_arr.iter().any(Option::is_none) {
        error!("missing data after block assembly");
        return None;
    }
    Some(data_arr.into_iter().map(Option::unwrap).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::FieldKind;
    use crate::definition::DataType;

    fn mk_def(data_type: DataType) -> FieldDefinition {
        FieldDefinition {
            index: 5,
            count: 1,
            names: vec!["holding_5".to_string()],
            kind: FieldKind::Count,
            writeable: false,
            data_type,
            since: None,
            until: None,
            offset: 10000,
            aliases: Vec::new(),
            concatenate_multiple_data_chunks: true,
            generation: 0,
        }
    }

    #[test]
    fn sentinel_maps_to_null_raw_only_for_int16_tagged_fields() {
        let mut field = Field::new("holding_5", false, FieldKind::Count);
        let int16_def = mk_def(DataType::Int16);
        field_integrate_data(&int16_def, &mut field, &[FUNCTION_NOT_AVAILABLE], 16);
        assert_eq!(field.raw(), None);

        let mut field = Field::new("holding_5", false, FieldKind::Count);
        let uint16_def = mk_def(DataType::Uint16);
        field_integrate_data(&uint16_def, &mut field, &[FUNCTION_NOT_AVAILABLE], 16);
        assert_eq!(field.raw(), Some(&RawValue::Int(FUNCTION_NOT_AVAILABLE)));
    }

    #[test]
    fn pack_unpack_is_an_identity_for_shi_and_cfi_chunk_sizes() {
        for &chunk_bits in &[16u32, 32u32] {
            for n in [2usize, 3, 4] {
                let values: Vec<i64> = (0..n as i64).map(|i| (i + 1) * 7 % (1 << chunk_bits.min(20))).collect();
                let packed = pack_values(&values, chunk_bits, true);
                let unpacked = unpack_values(packed, n, chunk_bits, true);
                assert_eq!(unpacked, values);
                let repacked = pack_values(&unpacked, chunk_bits, true);
                assert_eq!(repacked, packed);
            }
        }
    }

    fn mk_part(item_index: usize, def_index: i64, def_count: u32, offset: u32) -> BlockPart {
        BlockPart { item_index, def_index, def_count, addr: offset + def_index as u32 }
    }

    #[test]
    fn contiguous_blocks_have_no_gaps_and_cover_their_span() {
        let mut list = BlockList::new("holding", true);
        for (idx, count) in [(100i64, 1u32), (101, 1), (105, 1), (106, 1), (107, 1)] {
            list.collect(mk_part(idx as usize, idx, count, 10000));
        }
        let blocks: Vec<&ContiguousBlock> = list.iter().collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].first_index(), 100);
        assert_eq!(blocks[0].overall_count(), 2);
        assert_eq!(blocks[1].first_index(), 105);
        assert_eq!(blocks[1].overall_count(), 3);
        for block in &blocks {
            let last_part = block.parts().last().unwrap();
            assert_eq!(
                block.first_index() + block.overall_count() as i64 - 1,
                last_part.def_index + last_part.def_count as i64 - 1
            );
        }
    }

    #[test]
    fn integrate_block_data_rejects_short_response() {
        let mut list = BlockList::new("holding", true);
        list.collect(mk_part(0, 0, 2, 10000));
        let block = list.iter().next().unwrap();
        let mut touched = false;
        let ok = integrate_block_data(block, &[1], |_, _| touched = true);
        assert!(!ok);
        assert!(!touched);
    }

    #[test]
    fn integrate_block_data_scatters_per_part() {
        let mut list = BlockList::new("holding", true);
        list.collect(mk_part(0, 100, 2, 10000));
        list.collect(mk_part(1, 105, 3, 10000));
        let block = list.iter().nth(1).unwrap();
        let mut seen = Vec::new();
        let ok = integrate_block_data(block, &[1, 2, 3], |part, slice| seen.push((part.item_index, slice.to_vec())));
        assert!(ok);
        assert_eq!(seen, vec![(1, vec![1, 2, 3])]);
    }
}
