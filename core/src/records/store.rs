use std::collections::HashMap;

/// Keyed put/get/delete boundary the core expects from its storage
/// collaborator. The core itself performs no I/O; persistent backends
/// live outside this crate.
pub trait RecordStore<T> {
    fn put(&mut self, id: &str, record: T);
    fn get(&self, id: &str) -> Option<&T>;
    fn delete(&mut self, id: &str) -> bool;
    fn ids(&self) -> Vec<String>;
}

/// In-memory store used by the driver and tests.
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    records: HashMap<String, T>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }
}

impl<T> RecordStore<T> for MemoryStore<T> {
    fn put(&mut self, id: &str, record: T) {
        self.records.insert(id.to_string(), record);
    }

    fn get(&self, id: &str) -> Option<&T> {
        self.records.get(id)
    }

    fn delete(&mut self, id: &str) -> bool {
        self.records.remove(id).is_some()
    }

    fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.records.keys().cloned().collect();
        ids.sort();
        ids
    }
}
