/*
 * reference.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `$ref`: the value of another top-level key.
//!
//! The referenced entry is looked up in the original template and evaluated
//! fresh at every use, so references do not depend on the order in which
//! top-level keys are evaluated.

use tracing::trace;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::evaluator::resolve;
use crate::value::Value;

const NAME: &str = "$ref";

pub(crate) fn apply(args: &Value, ctx: &Context<'_>) -> Result<Value> {
    let key = match resolve(args, ctx)? {
        Value::String(key) => key,
        other => {
            return Err(Error::argument(
                NAME,
                format!("expected a key name, got {}", other.kind()),
            ));
        }
    };

    let (raw, child) = ctx.enter_reference(&key)?;
    trace!(key = %key, depth = child.resolving().len(), "resolving reference");
    resolve(raw, &child)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MemoryEnvironment;
    use crate::evaluator::evaluate_with;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn eval(template: serde_json::Value) -> Result<Value> {
        evaluate_with(&Value::from(template), &MemoryEnvironment::new())
    }

    #[test]
    fn test_reference_values() {
        let result = eval(json!({
            "a": [{"$ref": "b"}, {"$ref": "c"}],
            "b": "hello",
            "c": ["hello", "world"],
        }))
        .unwrap();
        assert_eq!(
            result.get_path(&["a"]),
            Some(&Value::from(json!(["hello", ["hello", "world"]])))
        );
    }

    #[test]
    fn test_forward_reference_to_operator() {
        let result = eval(json!({
            "a": {"$ref": "b"},
            "b": {"$range": 3},
        }))
        .unwrap();
        let inlined = eval(json!({"$range": 3})).unwrap();
        assert_eq!(result.get_path(&["a"]), Some(&inlined));
        assert_eq!(result.get_path(&["b"]), Some(&inlined));
    }

    #[test]
    fn test_chained_references() {
        let result = eval(json!({
            "a": {"$ref": "b"},
            "b": {"$ref": "c"},
            "c": 42,
        }))
        .unwrap();
        assert_eq!(result, Value::from(json!({"a": 42, "b": 42, "c": 42})));
    }

    #[test]
    fn test_repeated_reference_to_same_key() {
        let result = eval(json!({
            "x": [1, 2],
            "pair": [{"$ref": "x"}, {"$ref": "x"}],
        }))
        .unwrap();
        assert_eq!(
            result.get_path(&["pair"]),
            Some(&Value::from(json!([[1, 2], [1, 2]])))
        );
    }

    #[test]
    fn test_undefined_key() {
        match eval(json!({"a": {"$ref": "missing"}})) {
            Err(Error::UnresolvedReference { name }) => assert_eq!(name, "missing"),
            other => panic!("expected UnresolvedReference, got {:?}", other),
        }
    }

    #[test]
    fn test_cycle() {
        let err = eval(json!({
            "a": [{"$ref": "b"}, {"$ref": "c"}],
            "b": {"$ref": "a"},
            "c": ["hello", "world"],
        }))
        .unwrap_err();
        assert!(matches!(err, Error::CyclicReference { .. }));
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_self_reference() {
        match eval(json!({"a": {"$ref": "a"}})) {
            Err(Error::CyclicReference { name, chain }) => {
                assert_eq!(name, "a");
                assert_eq!(chain, vec!["a".to_string()]);
            }
            other => panic!("expected CyclicReference, got {:?}", other),
        }
    }

    #[test]
    fn test_non_string_key() {
        assert!(matches!(
            eval(json!({"a": {"$ref": 1}})),
            Err(Error::OperatorArgument { operator: "$ref", .. })
        ));
    }
}
