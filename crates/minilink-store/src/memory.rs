use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use minilink_core::store::Result;
use minilink_core::{MappingStore, ShortCode, StoreError, UrlMapping};

/// In-memory implementation of [`MappingStore`] using DashMap.
///
/// DashMap's sharded locks give the same per-key atomicity the durable
/// backend provides: `put_if_absent` goes through the entry API so the
/// existence check and insert happen under one shard lock, and
/// `increment_hits` mutates the record in place under the same lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMappingStore {
    storage: DashMap<String, UrlMapping>,
}

impl InMemoryMappingStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if the store holds no mappings.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl MappingStore for InMemoryMappingStore {
    async fn put_if_absent(&self, mapping: &UrlMapping) -> Result<()> {
        let key = mapping.short_code.as_str().to_owned();

        match self.storage.entry(key) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(mapping.short_code.to_string())),
            Entry::Vacant(vacant) => {
                vacant.insert(mapping.clone());
                Ok(())
            }
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<UrlMapping>> {
        Ok(self.storage.get(code.as_str()).map(|entry| entry.clone()))
    }

    async fn increment_hits(&self, code: &ShortCode) -> Result<()> {
        match self.storage.get_mut(code.as_str()) {
            Some(mut entry) => {
                entry.hit_count += 1;
                Ok(())
            }
            None => Err(StoreError::Operation(format!(
                "no record to increment for '{code}'"
            ))),
        }
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
