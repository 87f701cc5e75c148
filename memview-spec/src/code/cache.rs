//! Deduplication of the generated utility functions.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::sem::{Order, ViewType};

use super::*;

/// What a utility function does. Two requests with the same key share one definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UtilityKey {
    IndexFull,
    IsContiguous(Order),
    ItemAccessor(ViewType),
    CopyContents(CopyKey),
    CopyNew(CopyKey),
    Assign { ndim: usize },
}

impl UtilityKey {
    pub fn name(&self) -> String {
        match self {
            UtilityKey::IndexFull => INDEX_FULL.to_string(),
            UtilityKey::IsContiguous(order) => is_contiguous_name(*order),
            UtilityKey::ItemAccessor(view) => {
                format!("memview_item_{}", view.specialization_suffix())
            }
            UtilityKey::CopyContents(key) => key.contents_name(),
            UtilityKey::CopyNew(key) => key.new_name(),
            UtilityKey::Assign { ndim } => assign_name(*ndim),
        }
    }

    /// The utilities called by the definition of this one.
    pub fn requires(&self) -> Vec<UtilityKey> {
        match self {
            UtilityKey::ItemAccessor(view) if needs_index_full(view) => vec![UtilityKey::IndexFull],
            UtilityKey::CopyNew(key) => vec![UtilityKey::CopyContents(*key)],
            _ => vec![],
        }
    }

    fn build(&self) -> Result<Function, GenError> {
        Ok(match self {
            UtilityKey::IndexFull => index_full(),
            UtilityKey::IsContiguous(order) => is_contiguous(*order),
            UtilityKey::ItemAccessor(view) => item_accessor(&self.name(), view),
            UtilityKey::CopyContents(key) => copy_contents(key),
            UtilityKey::CopyNew(key) => {
                let order = key.order().ok_or(GenError::DestinationNotContiguous(key.to))?;
                copy_new(key, order)
            }
            UtilityKey::Assign { ndim } => assign(*ndim),
        })
    }
}

#[derive(Debug, Default)]
struct CacheState {
    names: HashMap<UtilityKey, String>,
    functions: Vec<Function>,
}

/// Utility functions generated so far, shared by all the units of a run.
///
/// Requests may come from several threads. Functions are built outside of the lock, so two
/// threads may race to build the same function: the first one to finish wins and the other
/// result is discarded.
#[derive(Debug, Default)]
pub struct UtilityCache {
    state: Mutex<CacheState>,
}

impl UtilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the name of the function for `key`, generating it and its requirements if needed.
    pub fn request(&self, key: &UtilityKey) -> Result<String, GenError> {
        if let Some(name) = self.lock().names.get(key) {
            trace!("utility cache hit: {}", name);
            return Ok(name.clone());
        }

        for required in key.requires() {
            self.request(&required)?;
        }

        let function = key.build()?;
        let name = function.name().to_string();

        let mut state = self.lock();
        if let Some(existing) = state.names.get(key) {
            debug!("utility {} was generated concurrently", existing);
            return Ok(existing.clone());
        }
        debug!("generated utility {}", name);
        state.names.insert(key.clone(), name.clone());
        state.functions.push(function);
        Ok(name)
    }

    /// The generated functions, each after the functions it calls.
    pub fn functions(&self) -> Vec<Function> {
        self.lock().functions.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
