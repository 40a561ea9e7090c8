//! Keyed record storage
//!
//! Services hold their players and active boss fights behind
//! [`Repository`]; the in-memory implementation is enough for a single
//! session.

use std::collections::HashMap;

/// Storage for records addressed by string id
pub trait Repository<T> {
    fn get(&self, id: &str) -> Option<&T>;
    fn get_mut(&mut self, id: &str) -> Option<&mut T>;
    /// Insert or replace, returning the previous record
    fn put(&mut self, id: String, record: T) -> Option<T>;
    fn delete(&mut self, id: &str) -> Option<T>;
    fn ids(&self) -> Vec<String>;

    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

/// Process-local repository backed by a `HashMap`
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    records: HashMap<String, T>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Repository<T> for InMemoryRepository<T> {
    fn get(&self, id: &str) -> Option<&T> {
        self.records.get(id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.records.get_mut(id)
    }

    fn put(&mut self, id: String, record: T) -> Option<T> {
        self.records.insert(id, record)
    }

    fn delete(&mut self, id: &str) -> Option<T> {
        self.records.remove(id)
    }

    fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.records.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_delete() {
        let mut repo = InMemoryRepository::new();
        assert!(repo.put("b".to_string(), 2).is_none());
        assert_eq!(repo.put("a".to_string(), 1), None);
        assert_eq!(repo.put("a".to_string(), 3), Some(1));

        *repo.get_mut("b").unwrap() += 10;
        assert_eq!(repo.get("b"), Some(&12));
        assert_eq!(repo.ids(), vec!["a".to_string(), "b".to_string()]);

        assert_eq!(repo.delete("a"), Some(3));
        assert!(!repo.contains("a"));
        assert_eq!(repo.len(), 1);
    }
}
