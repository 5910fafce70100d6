/*
 * loader.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Loading templates from JSON and YAML text.
//!
//! The format is chosen from the file extension. `.json5` files are read
//! with the strict JSON parser; JSON5-only syntax such as comments or
//! trailing commas is reported as a syntax error.

use std::path::Path;

use tracing::{debug, warn};
use yaml_rust2::{Yaml, YamlLoader};

use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::evaluator::evaluate_with;
use crate::value::{Mapping, Value};

/// Supported template text formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    Json,
    Json5,
    Yaml,
}

impl TemplateFormat {
    /// Choose a format from a file extension.
    pub fn from_path(path: &Path) -> Result<TemplateFormat> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match extension.as_str() {
            "json" => Ok(TemplateFormat::Json),
            "json5" => Ok(TemplateFormat::Json5),
            "yml" | "yaml" => Ok(TemplateFormat::Yaml),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }
}

/// Read and parse a template file.
pub fn load_template(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let format = TemplateFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), ?format, "loading template");
    parse_template(&content, format, &path.display().to_string())
}

/// Parse template text. `origin` names the source in error messages.
pub fn parse_template(content: &str, format: TemplateFormat, origin: &str) -> Result<Value> {
    match format {
        TemplateFormat::Json => parse_json(content, origin),
        TemplateFormat::Json5 => {
            warn!(origin, "JSON5 syntax is not supported, parsing as plain JSON");
            parse_json(content, origin)
        }
        TemplateFormat::Yaml => parse_yaml(content, origin),
    }
}

/// Load a template file and evaluate it.
pub fn evaluate_file(path: impl AsRef<Path>, environment: &dyn Environment) -> Result<Value> {
    let template = load_template(path)?;
    evaluate_with(&template, environment)
}

fn parse_json(content: &str, origin: &str) -> Result<Value> {
    serde_json::from_str::<serde_json::Value>(content)
        .map(Value::from)
        .map_err(|e| syntax_error(origin, e.to_string()))
}

fn parse_yaml(content: &str, origin: &str) -> Result<Value> {
    let documents =
        YamlLoader::load_from_str(content).map_err(|e| syntax_error(origin, e.to_string()))?;
    match documents.into_iter().next() {
        Some(document) => value_from_yaml(document, origin),
        None => Ok(Value::Null),
    }
}

/// Convert a parsed YAML node into a [`Value`].
///
/// Scalar mapping keys are stringified; composite or null keys are rejected.
fn value_from_yaml(yaml: Yaml, origin: &str) -> Result<Value> {
    match yaml {
        Yaml::Null => Ok(Value::Null),
        Yaml::Boolean(b) => Ok(Value::Bool(b)),
        Yaml::Integer(n) => Ok(Value::Int(n)),
        Yaml::Real(ref text) => yaml
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| syntax_error(origin, format!("invalid number '{}'", text))),
        Yaml::String(s) => Ok(Value::String(s)),
        Yaml::Array(items) => items
            .into_iter()
            .map(|item| value_from_yaml(item, origin))
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence),
        Yaml::Hash(entries) => {
            let mut mapping = Mapping::with_capacity(entries.len());
            for (key, value) in entries {
                let key = yaml_key(key, origin)?;
                mapping.insert(key, value_from_yaml(value, origin)?);
            }
            Ok(Value::Mapping(mapping))
        }
        Yaml::Alias(_) => Err(syntax_error(origin, "YAML aliases are not supported")),
        Yaml::BadValue => Err(syntax_error(origin, "invalid YAML value")),
    }
}

fn yaml_key(key: Yaml, origin: &str) -> Result<String> {
    match key {
        Yaml::String(s) | Yaml::Real(s) => Ok(s),
        Yaml::Integer(n) => Ok(n.to_string()),
        Yaml::Boolean(b) => Ok(b.to_string()),
        other => Err(syntax_error(
            origin,
            format!("mapping keys must be scalars, got {:?}", other),
        )),
    }
}

fn syntax_error(origin: &str, message: impl Into<String>) -> Error {
    Error::TemplateSyntax {
        origin: origin.to_string(),
        message: message.into(),
    }
}
