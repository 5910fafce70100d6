/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for template loading, merging and evaluation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or evaluating a template.
///
/// Evaluation is all-or-nothing: the first error aborts the whole call and
/// no partially generated configuration is returned.
#[derive(Debug, Error)]
pub enum Error {
    /// The template text could not be parsed.
    #[error("Syntax error in {origin}: {message}")]
    TemplateSyntax { origin: String, message: String },

    /// The template file extension is not one the loader understands.
    #[error("Unsupported template format '{extension}' (expected .json, .json5, .yml or .yaml)")]
    UnsupportedFormat { extension: String },

    /// Reading a template file failed.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template passed to the merger is not a mapping.
    #[error("Template #{index} cannot be merged: top level must be a mapping")]
    MergeShape { index: usize },

    /// A single `$`-prefixed key that does not name an operator.
    #[error("Unknown operator: {name}")]
    UnknownOperator { name: String },

    /// An operator received arguments of the wrong shape or type.
    #[error("Invalid arguments for '{operator}': {message}")]
    OperatorArgument {
        operator: &'static str,
        message: String,
    },

    /// `$ref` named a key missing from the top-level template.
    #[error("Reference to undefined key: {name}")]
    UnresolvedReference { name: String },

    /// `$ref` reached a key that is already being resolved.
    #[error("Reference cycle detected: {}", format_chain(.chain, .name))]
    CyclicReference { name: String, chain: Vec<String> },

    /// `$env` named a variable that is unset and has no default.
    #[error("Environment variable {name} is not set and no default was provided")]
    MissingEnvironmentVariable { name: String },

    /// An environment variable could not be converted to the requested type.
    #[error("Environment variable {name}={value:?} is not a valid {expected}")]
    EnvironmentType {
        name: String,
        value: String,
        expected: &'static str,
    },
}

impl Error {
    pub(crate) fn argument(operator: &'static str, message: impl Into<String>) -> Self {
        Error::OperatorArgument {
            operator,
            message: message.into(),
        }
    }
}

fn format_chain(chain: &[String], name: &str) -> String {
    let mut parts: Vec<&str> = chain.iter().map(String::as_str).collect();
    parts.push(name);
    parts.join(" -> ")
}

/// Result type for cfggen operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_chain() {
        let err = Error::CyclicReference {
            name: "a".to_string(),
            chain: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(err.to_string(), "Reference cycle detected: a -> b -> a");
    }

    #[test]
    fn test_argument_helper() {
        let err = Error::argument("$range", "step must not be zero");
        assert_eq!(
            err.to_string(),
            "Invalid arguments for '$range': step must not be zero"
        );
    }
}
