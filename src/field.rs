//! Per-instance field runtime state (spec.md §3). A `Field` only holds its
//! name and writeability directly; its definition is looked up through the
//! owning [`crate::vector::DataVector`], avoiding a back-reference cycle
//! (spec.md §9).

use crate::datatypes::{FieldKind, RawValue, Value};

#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    writeable: bool,
    kind: FieldKind,
    raw: Option<RawValue>,
    write_pending: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, writeable: bool, kind: FieldKind) -> Field {
        Field {
            name: name.into(),
            writeable,
            kind,
            raw: None,
            write_pending: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn writeable(&self) -> bool {
        self.writeable
    }

    pub fn raw(&self) -> Option<&RawValue> {
        self.raw.as_ref()
    }

    pub fn write_pending(&self) -> bool {
        self.write_pending
    }

    /// Derived, codec-decoded value. Read-only: assigning a value goes
    /// through [`Field::assign`], which re-encodes via the codec.
    pub fn value(&self) -> Option<Value> {
        self.raw.as_ref().and_then(|r| self.kind.decode(r))
    }

    /// Reset `raw` to `None`, e.g. when a read targets this field but the
    /// response carried no data for it (spec.md §3 lifecycle).
    pub fn clear_raw(&mut self) {
        self.raw = None;
    }

    pub fn set_raw(&mut self, raw: Option<RawValue>) {
        self.raw = raw;
    }

    /// Caller mutation: encode `value` via the codec and mark the field
    /// write-pending. Returns `false` if the codec rejects the value
    /// (spec.md §7 "Value-conversion failure").
    pub fn assign(&mut self, value: &Value) -> bool {
        match self.kind.encode(value) {
            Some(raw) => {
                self.raw = Some(raw);
                self.write_pending = true;
                true
            }
            None => false,
        }
    }

    /// Mark cleared after a successful write ack.
    pub fn clear_write_pending(&mut self) {
        self.write_pending = false;
    }

    /// Force write-pending even without a fresh assignment (used for
    /// explicit write overrides during block planning).
    pub fn mark_write_pending(&mut self) {
        self.write_pending = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_field_has_no_raw_and_no_pending_write() {
        let f = Field::new("x", true, FieldKind::Bool);
        assert!(f.raw().is_none());
        assert!(!f.write_pending());
        assert!(f.value().is_none());
    }

    #[test]
    fn assign_sets_raw_and_pending_then_ack_clears_pending() {
        let mut f = Field::new("x", true, FieldKind::Bool);
        assert!(f.assign(&Value::Bool(true)));
        assert!(f.write_pending());
        assert_eq!(f.value(), Some(Value::Bool(true)));
        f.clear_write_pending();
        assert!(!f.write_pending());
    }

    #[test]
    fn rejected_assignment_leaves_field_untouched() {
        let mut f = Field::new("x", true, FieldKind::Bool);
        assert!(!f.assign(&Value::Text("nope".into())));
        assert!(f.raw().is_none());
        assert!(!f.write_pending());
    }
}
