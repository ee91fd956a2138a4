//! Per-call resolution state
//!
//! A [`ResolutionContext`] is created for every top-level lookup and dropped
//! when it returns. It is the only place where "registrations currently
//! being resolved" live, so two independent lookups, even on the same thread, never
//! see each other's state.

use crate::error::{Error, Result};
use crate::ports::Container;
use crate::value_objects::{ComponentKey, DeferredCell, InjectionState, Instance};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Identity of the container owning a registration
///
/// A child may register a key its parent also holds; the two registrations
/// are different components and are tracked separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    /// Identity of `container`, stable while it is alive
    pub fn of(container: &dyn Container) -> Self {
        Self(std::ptr::from_ref(container).cast::<()>().addr())
    }
}

type Frame = (ScopeId, ComponentKey);

fn frame(scope: ScopeId, key: &ComponentKey) -> Frame {
    (scope, key.clone())
}

/// Stack of in-flight registrations plus deferred handles waiting for them
#[derive(Debug, Default)]
pub struct ResolutionContext {
    stack: Vec<Frame>,
    states: HashMap<Frame, InjectionState>,
    pending: HashMap<Frame, Vec<DeferredCell>>,
}

impl ResolutionContext {
    /// A fresh context for one top-level call
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `key` as registered in `scope`, failing if it is already being resolved
    ///
    /// The error names every key from the root of this resolution down to
    /// the repeated key, which closes the cycle.
    pub fn enter(&mut self, scope: ScopeId, key: &ComponentKey) -> Result<()> {
        let current = frame(scope, key);
        if self.stack.contains(&current) {
            let mut cycle: Vec<ComponentKey> = self.path().cloned().collect();
            cycle.push(key.clone());
            return Err(Error::cyclic(cycle));
        }
        self.stack.push(current.clone());
        self.states.insert(current, InjectionState::Resolving);
        Ok(())
    }

    /// Pop `key`, recording whether its resolution succeeded
    pub fn leave(&mut self, scope: ScopeId, key: &ComponentKey, succeeded: bool) {
        let current = frame(scope, key);
        if let Some(pos) = self.stack.iter().rposition(|f| f == &current) {
            self.stack.remove(pos);
        }
        if !succeeded {
            self.pending.remove(&current);
        }
        let state = if succeeded {
            InjectionState::Resolved
        } else {
            InjectionState::Failed
        };
        self.states.insert(current, state);
    }

    /// Whether `key` registered in `scope` is on the stack
    pub fn is_resolving(&self, scope: ScopeId, key: &ComponentKey) -> bool {
        self.stack.iter().any(|(s, k)| *s == scope && k == key)
    }

    /// State of `key` registered in `scope` within this resolution
    pub fn state(&self, scope: ScopeId, key: &ComponentKey) -> InjectionState {
        self.states
            .get(&frame(scope, key))
            .copied()
            .unwrap_or_default()
    }

    /// Keys currently being resolved, root first
    pub fn path(&self) -> impl Iterator<Item = &ComponentKey> {
        self.stack.iter().map(|(_, key)| key)
    }

    /// Nesting depth
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// An empty cell filled when `key` registered in `scope` completes
    pub fn defer(&mut self, scope: ScopeId, key: &ComponentKey) -> DeferredCell {
        let cell: DeferredCell = Arc::new(OnceLock::new());
        self.pending
            .entry(frame(scope, key))
            .or_default()
            .push(Arc::clone(&cell));
        cell
    }

    /// Fill every cell waiting for `key` registered in `scope`
    pub fn complete(&mut self, scope: ScopeId, key: &ComponentKey, instance: &Instance) {
        if let Some(cells) = self.pending.remove(&frame(scope, key)) {
            for cell in cells {
                let _ = cell.set(instance.clone());
            }
        }
    }

    /// Whether any deferred handle is still unfilled
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
