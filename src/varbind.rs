//! Variable binding (VarBind) type.
//!
//! A VarBind pairs a rendered object name with a value. The name is split
//! the way the engine splits it: `tag` is the object part (leaf name, fully
//! qualified path, or dotted-numeric OID depending on the request mode) and
//! `index` is the instance suffix.

use crate::value::{Value, ValueType};

/// Variable binding - a `(tag, index, value, type)` record.
///
/// Immutable once received from the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct VarBind {
    /// Object name without the instance suffix, e.g. `sysDescr` or
    /// `.iso.org.dod.internet.mgmt.mib-2.system.sysDescr`.
    pub tag: String,
    /// Instance suffix, e.g. `0` for scalars or `3` for a table row.
    /// Empty when the engine did not split one off.
    pub index: String,
    /// The value.
    pub value: Value,
}

impl VarBind {
    /// Create a new VarBind.
    pub fn new(tag: impl Into<String>, index: impl Into<String>, value: Value) -> Self {
        Self {
            tag: tag.into(),
            index: index.into(),
            value,
        }
    }

    /// Create a request VarBind with a NULL value (for GET/GETNEXT/GETBULK).
    ///
    /// The whole name goes into `tag`; the engine splits it on the way back.
    pub fn null(name: impl Into<String>) -> Self {
        Self {
            tag: name.into(),
            index: String::new(),
            value: Value::Null,
        }
    }

    /// The protocol type tag of the value.
    pub fn value_type(&self) -> ValueType {
        self.value.value_type()
    }

    /// Full object name: `tag`, plus `.index` when an index is present.
    pub fn name(&self) -> String {
        if self.index.is_empty() {
            self.tag.clone()
        } else {
            format!("{}.{}", self.tag, self.index)
        }
    }
}

impl std::fmt::Display for VarBind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.index.is_empty() {
            write!(f, "{} = {}", self.tag, self.value)
        } else {
            write!(f, "{}.{} = {}", self.tag, self.index, self.value)
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for VarBind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("VarBind", 4)?;
        state.serialize_field("tag", &self.tag)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("type", &self.value_type())?;
        state.end()
    }
}
