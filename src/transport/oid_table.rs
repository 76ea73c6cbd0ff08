//! Object store backing the mock agent.

/// Agent objects keyed by numeric arcs.
///
/// A `Vec` of `(arcs, value)` in arc order; GETNEXT and GETBULK walk it by
/// binary search.
#[derive(Debug, Clone)]
pub(crate) struct OidTable<V> {
    entries: Vec<(Vec<u32>, V)>,
}

impl<V> OidTable<V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Store `value` at `arcs`, overwriting an existing object.
    pub(crate) fn insert(&mut self, arcs: Vec<u32>, value: V) {
        match self.position(&arcs) {
            Ok(idx) => self.entries[idx].1 = value,
            Err(idx) => self.entries.insert(idx, (arcs, value)),
        }
    }

    /// Object stored exactly at `arcs`.
    pub(crate) fn get(&self, arcs: &[u32]) -> Option<&V> {
        self.position(arcs).ok().map(|idx| &self.entries[idx].1)
    }

    /// First object strictly after `arcs`; `None` past the end of the MIB.
    pub(crate) fn get_next(&self, arcs: &[u32]) -> Option<(&[u32], &V)> {
        let idx = self.position(arcs).map_or_else(|idx| idx, |idx| idx + 1);
        self.entries.get(idx).map(|(o, v)| (o.as_slice(), v))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn position(&self, arcs: &[u32]) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|(stored, _)| stored.as_slice().cmp(arcs))
    }
}

impl<V> Default for OidTable<V> {
    fn default() -> Self {
        Self::new()
    }
}
