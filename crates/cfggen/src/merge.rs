/*
 * merge.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Combining several raw templates before evaluation.
//!
//! Merging is shallow: later templates replace whole top-level entries of
//! earlier ones. Nothing is evaluated while merging, so a `$ref` in one
//! template sees the final, overridden value of the key it names.

use tracing::debug;

use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::evaluator::evaluate_with;
use crate::value::{Mapping, Value};

/// Merge top-level keys of `templates`, later templates winning.
///
/// A replaced key keeps the position it had in the first template that
/// defined it. Every template must be a mapping.
pub fn merge_templates(templates: impl IntoIterator<Item = Value>) -> Result<Value> {
    let mut merged = Mapping::new();
    for (index, template) in templates.into_iter().enumerate() {
        let Value::Mapping(entries) = template else {
            return Err(Error::MergeShape { index });
        };
        for (key, value) in entries {
            if merged.insert(key.clone(), value).is_some() {
                debug!(key = %key, layer = index, "template key overridden");
            }
        }
    }
    Ok(Value::Mapping(merged))
}

/// Merge `templates` and evaluate the result.
pub fn evaluate_merged(
    templates: impl IntoIterator<Item = Value>,
    environment: &dyn Environment,
) -> Result<Value> {
    let merged = merge_templates(templates)?;
    evaluate_with(&merged, environment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MemoryEnvironment;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_later_wins_and_keeps_position() {
        let merged = merge_templates([
            Value::from(json!({"a": 1, "b": {"x": 1, "y": 2}})),
            Value::from(json!({"c": 3, "b": {"x": 10}})),
        ])
        .unwrap();
        // Shallow: "b" is replaced entirely, not merged field by field
        assert_eq!(merged, Value::from(json!({"a": 1, "b": {"x": 10}, "c": 3})));
        let keys: Vec<&String> = merged.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_operators_are_not_evaluated() {
        let merged = merge_templates([
            Value::from(json!({"a": {"$range": 2}})),
            Value::from(json!({"b": {"$ref": "a"}})),
        ])
        .unwrap();
        assert_eq!(
            merged,
            Value::from(json!({"a": {"$range": 2}, "b": {"$ref": "a"}}))
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(merge_templates(Vec::<Value>::new()).unwrap(), Value::Mapping(Mapping::new()));
    }

    #[test]
    fn test_non_mapping_template() {
        match merge_templates([Value::from(json!({"a": 1})), Value::from(json!([1]))]) {
            Err(Error::MergeShape { index }) => assert_eq!(index, 1),
            other => panic!("expected MergeShape, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_then_evaluate() {
        let inputs_template = json!({
            "inputs": [1, 2],
            "machines": [{"cpus": 32}],
            "experiments": {
                "$product": {
                    "inputs": {"$ref": "inputs"},
                    "machines": {"$ref": "machines"}
                }
            }
        });
        let small_machines_template = json!({"machines": [{"cpus": 4}]});

        let result = evaluate_merged(
            [
                Value::from(inputs_template),
                Value::from(small_machines_template),
            ],
            &MemoryEnvironment::new(),
        )
        .unwrap();

        assert_eq!(
            result,
            Value::from(json!({
                "inputs": [1, 2],
                "machines": [{"cpus": 4}],
                "experiments": [
                    {"inputs": 1, "machines": {"cpus": 4}},
                    {"inputs": 2, "machines": {"cpus": 4}}
                ]
            }))
        );
    }
}
