/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Configuration generation from declarative templates.
//!
//! A template is an ordinary JSON or YAML document in which some mappings are
//! operator invocations: a mapping with a single `$`-prefixed key. Evaluating
//! the template replaces every invocation with its result:
//!
//! - `{"$range": n}` or `{"$range": [start, stop, step]}`: integer sequences
//! - `{"$ref": "key"}`: the value of another top-level key
//! - `{"$product": [...]}` or `{"$product": {...}}`: cartesian products
//! - `{"$env": "NAME"}` or `{"$env": {"name", "default", "type"}}`: environment variables
//! - `{"$+": [...]}`: concatenation
//! - `{"$zip": [...]}`: positional pairing
//!
//! # Architecture
//!
//! Evaluation is a pure function of the template and an [`Environment`].
//! Loading files ([`loader`]) and merging templates ([`merge`]) happen before
//! evaluation and never evaluate operators themselves.
//!
//! # Example
//!
//! ```rust
//! use cfggen::{MemoryEnvironment, Value, evaluate_with};
//! use serde_json::json;
//!
//! let template = Value::from(json!({
//!     "$product": {"lr": [0.1, 0.01], "batch_size": {"$range": [64, 257, 64]}}
//! }));
//! let configs = evaluate_with(&template, &MemoryEnvironment::new()).unwrap();
//! assert_eq!(configs.as_items().unwrap().len(), 8);
//! ```

pub mod context;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod loader;
pub mod merge;
pub mod operator;
mod ops;
pub mod value;

// Re-export main types at crate root
pub use context::Context;
pub use environment::{Environment, MemoryEnvironment, ProcessEnvironment};
pub use error::{Error, Result};
pub use evaluator::{evaluate, evaluate_with, resolve};
pub use loader::{TemplateFormat, evaluate_file, load_template, parse_template};
pub use merge::{evaluate_merged, merge_templates};
pub use operator::{Invocation, Operator};
pub use ops::env::EnvType;
pub use ops::range::int_range;
pub use value::{Mapping, Value};
