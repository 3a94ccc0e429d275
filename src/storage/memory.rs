//! In-memory backend

use std::collections::HashMap;

use super::{check_quota, StorageBackend, StorageError};

/// Map-backed store, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    items: HashMap<String, String>,
    max_value_bytes: Option<usize>,
    disabled: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes larger than `limit` bytes
    pub fn with_quota(limit: usize) -> Self {
        Self {
            max_value_bytes: Some(limit),
            ..Self::default()
        }
    }

    /// Make every operation fail as if storage were turned off
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Write directly, bypassing quota and the disabled flag
    pub fn seed(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    /// Raw stored value, bypassing the disabled flag
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    fn ensure_enabled(&self) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Unavailable(
                "memory storage is disabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.ensure_enabled()?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_enabled()?;
        check_quota(key, value, self.max_value_bytes)?;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.ensure_enabled()?;
        self.items.remove(key);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_keeps_previous_value() {
        let mut backend = MemoryBackend::with_quota(8);
        backend.set_item("k", "small").unwrap();

        let result = backend.set_item("k", "much too large");
        assert!(matches!(result, Err(StorageError::QuotaExceeded { .. })));
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn test_disabled_backend_fails_every_operation() {
        let mut backend = MemoryBackend::new();
        backend.seed("k", "v");
        backend.set_disabled(true);

        assert!(matches!(backend.get_item("k"), Err(StorageError::Unavailable(_))));
        assert!(backend.set_item("k", "w").is_err());
        assert!(backend.remove_item("k").is_err());
        assert_eq!(backend.peek("k"), Some("v"));

        backend.set_disabled(false);
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
