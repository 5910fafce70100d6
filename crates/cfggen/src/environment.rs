/*
 * environment.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Environment variable sources for `$env`.
//!
//! Evaluation never reads the process environment directly. Callers hand the
//! evaluator an [`Environment`]; the default is a [`ProcessEnvironment`]
//! snapshot taken when evaluation starts.

use std::collections::HashMap;

/// Trait for looking up environment variables during evaluation.
pub trait Environment: Send + Sync {
    /// The value of variable `name`, or `None` if it is not set.
    fn get(&self, name: &str) -> Option<&str>;
}

/// A snapshot of the host process environment.
///
/// Variables whose name or value is not valid unicode are skipped.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnvironment {
    vars: HashMap<String, String>,
}

impl ProcessEnvironment {
    /// Capture the current process environment.
    pub fn snapshot() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }
}

impl Environment for ProcessEnvironment {
    fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// An environment backed by an in-memory map.
///
/// Useful for tests and for callers that want full control over what `$env`
/// can see.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnvironment {
    vars: HashMap<String, String>,
}

impl MemoryEnvironment {
    /// Create a new empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Create an environment with the given variables.
    pub fn with_vars(
        vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        let mut env = Self::new();
        for (name, value) in vars {
            env.set(name, value);
        }
        env
    }
}

impl From<ProcessEnvironment> for MemoryEnvironment {
    fn from(process: ProcessEnvironment) -> Self {
        Self { vars: process.vars }
    }
}

impl Environment for MemoryEnvironment {
    fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}
