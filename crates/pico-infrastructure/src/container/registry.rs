//! Ordered key → adapter map

use pico_domain::error::{Error, Result};
use pico_domain::ports::ComponentAdapter;
use pico_domain::value_objects::ComponentKey;
use std::collections::HashMap;
use std::sync::Arc;

/// Adapters in registration order with a key index
#[derive(Debug, Default)]
pub(crate) struct Registry {
    adapters: Vec<Arc<dyn ComponentAdapter>>,
    index: HashMap<ComponentKey, usize>,
}

impl Registry {
    pub(crate) fn insert(&mut self, adapter: Arc<dyn ComponentAdapter>, container: &str) -> Result<()> {
        let key = adapter.component_key().clone();
        if self.index.contains_key(&key) {
            return Err(Error::DuplicateKey {
                key,
                container: container.to_string(),
            });
        }
        self.index.insert(key, self.adapters.len());
        self.adapters.push(adapter);
        Ok(())
    }

    pub(crate) fn get(&self, key: &ComponentKey) -> Option<Arc<dyn ComponentAdapter>> {
        self.index.get(key).map(|&pos| Arc::clone(&self.adapters[pos]))
    }

    pub(crate) fn remove(&mut self, key: &ComponentKey) -> Option<Arc<dyn ComponentAdapter>> {
        let pos = self.index.remove(key)?;
        let removed = self.adapters.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub(crate) fn adapters(&self) -> Vec<Arc<dyn ComponentAdapter>> {
        self.adapters.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.adapters.len()
    }
}
