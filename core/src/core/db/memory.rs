use super::DocumentMedium;
use super::error::DatabaseError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Keeps documents in memory for the lifetime of the value.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    documents: Mutex<HashMap<String, String>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentMedium for MemoryMedium {
    fn load(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let documents = self.documents.lock().map_err(|_| DatabaseError::Poisoned)?;
        Ok(documents.get(key).cloned())
    }

    fn store(&self, key: &str, document: &str) -> Result<(), DatabaseError> {
        let mut documents = self.documents.lock().map_err(|_| DatabaseError::Poisoned)?;
        documents.insert(key.to_string(), document.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DatabaseError> {
        let mut documents = self.documents.lock().map_err(|_| DatabaseError::Poisoned)?;
        documents.remove(key);
        Ok(())
    }
}
