use ir2spd_utils::Id;
use linked_hash_map::LinkedHashMap;

/// Delay of every function processed by one walk over the call graph, keyed
/// by function name.
///
/// Entries are written once: presence of a name means that the function's
/// module and delay have been fully computed. Iteration follows insertion
/// order, which is the order in which modules were emitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleMap {
    delays: LinkedHashMap<Id, u64>,
}

impl ModuleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The delay of a processed function.
    pub fn get(&self, name: Id) -> Option<u64> {
        self.delays.get(&name).copied()
    }

    pub fn contains(&self, name: Id) -> bool {
        self.delays.contains_key(&name)
    }

    /// Record the delay of `name`. Returns `false` and keeps the existing
    /// value if the function was already recorded.
    pub fn insert(&mut self, name: Id, delay: u64) -> bool {
        if self.delays.contains_key(&name) {
            return false;
        }
        self.delays.insert(name, delay);
        true
    }

    /// Iterate over `(function, delay)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Id, u64)> + '_ {
        self.delays.iter().map(|(name, delay)| (*name, *delay))
    }

    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_insert_wins() {
        let mut map = ModuleMap::new();
        assert!(map.insert(Id::from("f"), 5));
        assert!(!map.insert(Id::from("f"), 15));
        assert_eq!(map.get(Id::from("f")), Some(5));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn iteration_follows_insertion() {
        let mut map = ModuleMap::new();
        map.insert(Id::from("leaf"), 5);
        map.insert(Id::from("caller"), 15);
        let names: Vec<_> = map.iter().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, ["leaf", "caller"]);
    }
}
