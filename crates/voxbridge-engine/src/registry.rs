//! Component liveness registry.
//!
//! Routing a command is only useful if the target module is actually
//! running.  [`ComponentRegistry`] tracks the lifecycle state of every
//! component announced on the bus; the interpretation engine consults it
//! through the narrow [`LivenessLookup`] trait so tests and alternative
//! registries can stand in.
//!
//! Internally the registry is backed by [`DashMap`], which provides
//! lock-free concurrent reads and fine-grained write locking, making it
//! safe to share across tasks without a global `RwLock`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Liveness trait
// ---------------------------------------------------------------------------

/// Synchronous liveness query used by the interpretation engine.
pub trait LivenessLookup {
    /// Whether `module` is currently alive and able to receive commands.
    fn is_alive(&self, module: &str) -> bool;
}

/// Plain predicates can stand in for a registry (handy in tests and in the
/// offline CLI, where every module is assumed alive).
impl<F> LivenessLookup for F
where
    F: Fn(&str) -> bool,
{
    fn is_alive(&self, module: &str) -> bool {
        self(module)
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Lifecycle state of a registered component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentState {
    /// The component announced itself and is accepting commands.
    Alive,
    /// The component announced a clean shutdown or missed its heartbeat.
    Stopped,
}

/// A snapshot of one component's registry entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentInfo {
    /// Dot-path module name (e.g. `tux.aptitudes.light`).
    pub module: String,
    /// Current lifecycle state.
    pub state: ComponentState,
    /// When the state was last updated.
    pub last_seen: DateTime<Utc>,
}

/// Concurrent component registry backed by [`DashMap`].
///
/// Cheaply cloneable (`Arc`-backed) and `Send + Sync`.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    inner: Arc<DashMap<String, ComponentInfo>>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `module` is alive.
    pub fn mark_alive(&self, module: impl Into<String>) {
        self.set_state(module.into(), ComponentState::Alive);
    }

    /// Record that `module` stopped.
    pub fn mark_stopped(&self, module: impl Into<String>) {
        self.set_state(module.into(), ComponentState::Stopped);
    }

    fn set_state(&self, module: String, state: ComponentState) {
        tracing::debug!(module = %module, state = ?state, "component state updated");
        self.inner.insert(
            module.clone(),
            ComponentInfo {
                module,
                state,
                last_seen: Utc::now(),
            },
        );
    }

    /// Snapshot of every registered component.
    pub fn snapshot(&self) -> Vec<ComponentInfo> {
        self.inner.iter().map(|e| e.value().clone()).collect()
    }

    /// Number of registered components.
    pub fn count(&self) -> usize {
        self.inner.len()
    }
}

impl LivenessLookup for ComponentRegistry {
    fn is_alive(&self, module: &str) -> bool {
        self.inner
            .get(module)
            .map(|e| e.state == ComponentState::Alive)
            .unwrap_or(false)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
