use std::collections::HashMap;

/// assigns dense, zero-based integer indices to natural-key strings in
/// first-encounter order. one table exists per entity kind (route, stop,
/// shape, service); a key's index is fixed at first assignment and indices
/// are contiguous over `[0, len)`.
#[derive(Debug, Default)]
pub struct EntityIndexTable {
    indices: HashMap<String, u32>,
}

impl EntityIndexTable {
    pub fn new() -> EntityIndexTable {
        EntityIndexTable {
            indices: HashMap::new(),
        }
    }

    /// returns the index for `key`, allocating the next integer if the key
    /// has not been seen before. idempotent for repeated keys.
    pub fn assign(&mut self, key: &str) -> u32 {
        if let Some(&index) = self.indices.get(key) {
            return index;
        }
        let index = self.indices.len() as u32;
        self.indices.insert(key.to_string(), index);
        index
    }

    /// non-allocating query; unknown keys return None.
    pub fn lookup(&self, key: &str) -> Option<u32> {
        self.indices.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_assign_follows_first_encounter_order() {
        let mut table = EntityIndexTable::new();
        assert_eq!(table.assign("r2"), 0);
        assert_eq!(table.assign("r1"), 1);
        assert_eq!(table.assign("r3"), 2);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_assign_is_idempotent() {
        let mut table = EntityIndexTable::new();
        assert_eq!(table.assign("stop_a"), 0);
        assert_eq!(table.assign("stop_b"), 1);
        assert_eq!(table.assign("stop_a"), 0);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_lookup_does_not_allocate() {
        let mut table = EntityIndexTable::new();
        table.assign("known");
        assert_eq!(table.lookup("known"), Some(0));
        assert_eq!(table.lookup("unknown"), None);
        assert_eq!(table.len(), 1);
    }
}
