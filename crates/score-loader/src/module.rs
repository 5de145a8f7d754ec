//! Module table: registration, dependency resolution and memoized execution.
//!
//! # Execution model
//!
//! A module moves `registered -> executing -> ready`. The exports container is
//! published when execution starts, before the factory runs. Requiring a module
//! that the current thread is already executing (a dependency cycle) returns
//! that in-progress container instead of recursing. Requiring a module that
//! another thread is executing blocks until it settles, unless waiting would
//! close a cycle across threads, in which case the partial exports are returned
//! as well.
//!
//! The table lock is never held while a factory runs. Factories run
//! synchronously on the requiring thread and must stay short: a thread that
//! waits for another thread's factory is parked until it settles. Async
//! callers go through [`ModuleLoader::require_async`](crate::ModuleLoader::require_async).

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use serde_json::{Map, Value};

use crate::{Exports, LoaderError};

type Factory = dyn Fn(&ModuleTable, &Exports) -> Result<(), LoaderError> + Send + Sync;

/// A module ready to be registered: its dependencies and factory.
#[derive(Clone)]
pub struct ModuleDefinition {
    deps: Vec<String>,
    factory: Arc<Factory>,
}

impl ModuleDefinition {
    /// Create a module from a factory.
    ///
    /// The factory populates the exports container it is given and may
    /// `require` other modules through the table.
    pub fn new<F>(deps: Vec<String>, factory: F) -> Self
    where
        F: Fn(&ModuleTable, &Exports) -> Result<(), LoaderError> + Send + Sync + 'static,
    {
        Self {
            deps,
            factory: Arc::new(factory),
        }
    }

    /// Create a data module: requires each dependency, then exports `exports`.
    #[must_use]
    pub fn data(deps: Vec<String>, exports: Map<String, Value>) -> Self {
        let required = deps.clone();
        Self::new(deps, move |modules, target| {
            for dep in &required {
                modules.require(dep)?;
            }
            for (key, value) in &exports {
                target.set(key.clone(), value.clone());
            }
            Ok(())
        })
    }

    /// Declared dependency ids.
    #[must_use]
    pub fn deps(&self) -> &[String] {
        &self.deps
    }
}

impl std::fmt::Debug for ModuleDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleDefinition")
            .field("deps", &self.deps)
            .finish_non_exhaustive()
    }
}

enum ModuleState {
    Registered,
    Executing {
        owner: ThreadId,
        exports: Arc<Exports>,
    },
    Ready(Arc<Exports>),
}

struct ModuleRecord {
    definition: ModuleDefinition,
    state: ModuleState,
}

#[derive(Default)]
struct TableState {
    records: HashMap<String, ModuleRecord>,
    /// Module each blocked thread is waiting for.
    waiting: HashMap<ThreadId, String>,
}

impl TableState {
    /// Whether `owner` is (transitively) waiting on a module executed by `current`.
    fn waits_on(&self, owner: ThreadId, current: ThreadId) -> bool {
        let mut thread = owner;
        for _ in 0..=self.waiting.len() {
            let Some(module_id) = self.waiting.get(&thread) else {
                return false;
            };
            match self.records.get(module_id).map(|r| &r.state) {
                Some(ModuleState::Executing { owner: next, .. }) if *next == current => {
                    return true;
                }
                Some(ModuleState::Executing { owner: next, .. }) => thread = *next,
                _ => return false,
            }
        }
        false
    }
}

/// Registry of module records.
#[derive(Default)]
pub struct ModuleTable {
    state: Mutex<TableState>,
    settled: Condvar,
}

impl ModuleTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TableState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a module. The first definition of an id wins.
    ///
    /// Returns `true` if the module was newly registered.
    pub fn define(&self, module_id: impl Into<String>, definition: ModuleDefinition) -> bool {
        let module_id = module_id.into();
        let mut state = self.lock();
        if state.records.contains_key(&module_id) {
            tracing::trace!(module_id = %module_id, "Module already defined, keeping first");
            return false;
        }
        state.records.insert(
            module_id,
            ModuleRecord {
                definition,
                state: ModuleState::Registered,
            },
        );
        true
    }

    /// Resolve a module's exports, executing its factory on first use.
    ///
    /// Repeated calls return the same `Arc`. A failed factory leaves the module
    /// registered so a later call runs it again.
    pub fn require(&self, module_id: &str) -> Result<Arc<Exports>, LoaderError> {
        let current = thread::current().id();
        let mut state = self.lock();

        let (factory, exports) = loop {
            let record =
                state
                    .records
                    .get_mut(module_id)
                    .ok_or_else(|| LoaderError::ModuleNotFound {
                        module_id: module_id.to_owned(),
                    })?;

            let (owner, partial) = match record.state {
                ModuleState::Ready(ref exports) => return Ok(Arc::clone(exports)),
                ModuleState::Registered => {
                    let exports = Arc::new(Exports::new());
                    record.state = ModuleState::Executing {
                        owner: current,
                        exports: Arc::clone(&exports),
                    };
                    break (Arc::clone(&record.definition.factory), exports);
                }
                ModuleState::Executing { owner, ref exports } => (owner, Arc::clone(exports)),
            };

            if owner == current || state.waits_on(owner, current) {
                tracing::debug!(module_id, "Circular module dependency, returning partial exports");
                return Ok(partial);
            }

            state.waiting.insert(current, module_id.to_owned());
            state = self
                .settled
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
            state.waiting.remove(&current);
        };
        drop(state);

        tracing::trace!(module_id, "Executing module");
        let result = factory(self, &exports);

        let mut state = self.lock();
        if let Some(record) = state.records.get_mut(module_id) {
            record.state = match result {
                Ok(()) => ModuleState::Ready(Arc::clone(&exports)),
                Err(_) => ModuleState::Registered,
            };
        }
        drop(state);
        self.settled.notify_all();

        match result {
            Ok(()) => Ok(exports),
            Err(e) => {
                tracing::warn!(module_id, error = %e, "Module factory failed");
                Err(LoaderError::ModuleFactory {
                    module_id: module_id.to_owned(),
                    source: Box::new(e),
                })
            }
        }
    }

    /// Whether a module is registered.
    #[must_use]
    pub fn contains(&self, module_id: &str) -> bool {
        self.lock().records.contains_key(module_id)
    }

    /// Whether a module has executed successfully.
    #[must_use]
    pub fn is_ready(&self, module_id: &str) -> bool {
        matches!(
            self.lock().records.get(module_id).map(|r| &r.state),
            Some(ModuleState::Ready(_))
        )
    }

    /// Declared dependencies of a registered module.
    #[must_use]
    pub fn dependencies(&self, module_id: &str) -> Option<Vec<String>> {
        self.lock()
            .records
            .get(module_id)
            .map(|r| r.definition.deps.clone())
    }

    /// Number of registered modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    /// Whether no modules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ModuleTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleTable")
            .field("modules", &self.len())
            .finish()
    }
}
