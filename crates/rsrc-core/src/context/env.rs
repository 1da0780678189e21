//! Environment lookups for show/shot scoped resolution.
//!
//! Values are read on every resolution, never captured at startup.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Show name variable.
pub const SHOW_NAME_VAR: &str = "SHOW_NAME";

/// Shot name variable.
pub const SHOT_NAME_VAR: &str = "SHOT_NAME";

/// Source of environment-scoped configuration values.
pub trait EnvSource: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A mutable, in-memory environment.
#[derive(Debug, Default)]
pub struct MapEnv {
    vars: RwLock<HashMap<String, String>>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.write().insert(name.into(), value.into());
    }

    pub fn remove(&self, name: &str) {
        self.vars.write().remove(name);
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.read().get(name).cloned()
    }
}
