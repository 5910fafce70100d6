/*
 * context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The evaluation context threaded through resolution.
//!
//! A context binds the original, unevaluated top-level template (the target
//! of `$ref`) and the environment (the source of `$env`). It is never
//! mutated: following a reference produces a child context that additionally
//! records the reference chain, which is how cycles are detected.

use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::value::{Mapping, Value};

/// Read-only state for a single evaluation.
#[derive(Clone)]
pub struct Context<'a> {
    /// The top-level template, if it is a mapping.
    root: Option<&'a Mapping>,

    environment: &'a dyn Environment,

    /// References currently being resolved, outermost first.
    resolving: Vec<&'a str>,
}

impl<'a> Context<'a> {
    /// Create the context for evaluating `template`.
    ///
    /// References resolve against `template` itself when it is a mapping.
    /// Any other top-level shape leaves no keys to reference.
    pub fn new(template: &'a Value, environment: &'a dyn Environment) -> Self {
        Context {
            root: template.as_mapping(),
            environment,
            resolving: Vec::new(),
        }
    }

    /// The environment visible to `$env`.
    pub fn environment(&self) -> &'a dyn Environment {
        self.environment
    }

    /// The chain of references being resolved, outermost first.
    pub fn resolving(&self) -> &[&'a str] {
        &self.resolving
    }

    /// Create a child context for resolving the top-level key `key`.
    ///
    /// Returns the raw value under `key` together with the child context.
    /// Fails with [`Error::UnresolvedReference`] when the key does not exist
    /// and with [`Error::CyclicReference`] when it is already being resolved.
    pub fn enter_reference(&self, key: &str) -> Result<(&'a Value, Context<'a>)> {
        let Some((name, value)) = self.root.and_then(|root| root.get_key_value(key)) else {
            return Err(Error::UnresolvedReference {
                name: key.to_string(),
            });
        };

        if self.resolving.contains(&name.as_str()) {
            return Err(Error::CyclicReference {
                name: name.clone(),
                chain: self.resolving.iter().map(|s| s.to_string()).collect(),
            });
        }

        let mut resolving = self.resolving.clone();
        resolving.push(name.as_str());
        let child = Context {
            root: self.root,
            environment: self.environment,
            resolving,
        };
        Ok((value, child))
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("root_keys", &self.root.map(|r| r.keys().collect::<Vec<_>>()))
            .field("resolving", &self.resolving)
            .finish_non_exhaustive()
    }
}
