//! Indexed record collections.
//!
//! Decoded families are usually consumed two ways at once: positional
//! iteration (the order on disk is meaningful for tree wiring) and lookup by
//! id or display name. `RecordCollection` keeps the flat order and builds
//! both indices once at construction.

use std::collections::HashMap;

#[derive(Debug)]
pub struct RecordCollection<T> {
    items: Vec<T>,
    by_id: HashMap<u32, usize>,
    by_name: HashMap<String, usize>,
}

impl<T> RecordCollection<T> {
    /// Builds the collection, indexing by the given projections. An empty
    /// name skips the name index; duplicate keys keep the first occurrence.
    pub fn new(
        items: Vec<T>,
        id_of: impl Fn(&T) -> u32,
        name_of: impl Fn(&T) -> &str,
    ) -> RecordCollection<T> {
        let mut by_id = HashMap::with_capacity(items.len());
        let mut by_name = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            by_id.entry(id_of(item)).or_insert(position);
            let name = name_of(item);
            if !name.is_empty() {
                by_name.entry(name.to_string()).or_insert(position);
            }
        }
        RecordCollection {
            items,
            by_id,
            by_name,
        }
    }

    pub fn get_by_id(&self, id: u32) -> Option<&T> {
        self.by_id.get(&id).map(|&position| &self.items[position])
    }

    pub fn get_by_name(&self, name: &str) -> Option<&T> {
        self.by_name.get(name).map(|&position| &self.items[position])
    }

    pub fn get(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a RecordCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
