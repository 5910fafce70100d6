/*
 * env.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `$env`: environment variable interpolation.
//!
//! Arguments are either a variable name or a mapping
//! `{name, default?, type?}`. Arguments are taken literally and never
//! evaluated; in particular a `default` is returned exactly as written.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::value::Value;

const NAME: &str = "$env";

/// Conversion applied to a variable's raw string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvType {
    #[default]
    Str,
    Int,
    /// Finite floating point numbers only; `nan` and `inf` are rejected
    /// since JSON output has no representation for them.
    Float,
    /// Truthy: `1`, `true`, `yes`, `on`. Falsy: `0`, `false`, `no`, `off`
    /// and the empty string. Case-insensitive, surrounding whitespace ignored.
    Bool,
}

impl EnvType {
    pub fn from_name(name: &str) -> Option<EnvType> {
        match name {
            "str" => Some(EnvType::Str),
            "int" => Some(EnvType::Int),
            "float" => Some(EnvType::Float),
            "bool" => Some(EnvType::Bool),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EnvType::Str => "str",
            EnvType::Int => "int",
            EnvType::Float => "float",
            EnvType::Bool => "bool",
        }
    }

    /// Convert the raw value of variable `var`.
    pub fn convert(self, var: &str, raw: &str) -> Result<Value> {
        let converted = match self {
            EnvType::Str => Some(Value::String(raw.to_string())),
            EnvType::Int => raw.trim().parse::<i64>().ok().map(Value::Int),
            EnvType::Float => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::Float),
            EnvType::Bool => parse_bool(raw).map(Value::Bool),
        };
        converted.ok_or_else(|| Error::EnvironmentType {
            name: var.to_string(),
            value: raw.to_string(),
            expected: self.name(),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
struct Request<'a> {
    name: &'a str,
    default: Option<&'a Value>,
    ty: EnvType,
}

fn parse_request(args: &Value) -> Result<Request<'_>> {
    match args {
        Value::String(name) => Ok(Request {
            name,
            default: None,
            ty: EnvType::Str,
        }),
        Value::Mapping(entries) => {
            if let Some(key) = entries
                .keys()
                .find(|k| !matches!(k.as_str(), "name" | "default" | "type"))
            {
                return Err(Error::argument(NAME, format!("unexpected key '{}'", key)));
            }

            let name = entries
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::argument(NAME, "'name' must be a string"))?;

            let ty = match entries.get("type") {
                None => EnvType::Str,
                Some(value) => value
                    .as_str()
                    .and_then(EnvType::from_name)
                    .ok_or_else(|| {
                        Error::argument(
                            NAME,
                            format!("'type' must be one of str, int, float, bool, got {:?}", value),
                        )
                    })?,
            };

            Ok(Request {
                name,
                default: entries.get("default"),
                ty,
            })
        }
        other => Err(Error::argument(
            NAME,
            format!("expected a variable name or a mapping, got {}", other.kind()),
        )),
    }
}

pub(crate) fn apply(args: &Value, ctx: &Context<'_>) -> Result<Value> {
    let request = parse_request(args)?;
    match ctx.environment().get(request.name) {
        Some(raw) => request.ty.convert(request.name, raw),
        None => match request.default {
            Some(default) => Ok(default.clone()),
            None => Err(Error::MissingEnvironmentVariable {
                name: request.name.to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MemoryEnvironment;
    use crate::evaluator::evaluate_with;
    use serde_json::json;

    fn eval_with(template: serde_json::Value, vars: &[(&str, &str)]) -> Result<Value> {
        let env = MemoryEnvironment::with_vars(vars.iter().copied());
        evaluate_with(&Value::from(template), &env)
    }

    #[test]
    fn test_missing_without_default() {
        match eval_with(json!({"$env": {"name": "FOO"}}), &[]) {
            Err(Error::MissingEnvironmentVariable { name }) => assert_eq!(name, "FOO"),
            other => panic!("expected MissingEnvironmentVariable, got {:?}", other),
        }
    }

    #[test]
    fn test_default_used_when_missing() {
        assert_eq!(
            eval_with(json!({"$env": {"name": "FOO", "default": 2}}), &[]).unwrap(),
            Value::Int(2)
        );
        assert_eq!(
            eval_with(json!({"$env": {"name": "X", "default": 7, "type": "str"}}), &[]).unwrap(),
            Value::Int(7)
        );
    }

    #[test]
    fn test_default_is_not_evaluated() {
        assert_eq!(
            eval_with(json!({"$env": {"name": "FOO", "default": {"$range": 2}}}), &[]).unwrap(),
            Value::from(json!({"$range": 2}))
        );
    }

    #[test]
    fn test_null_default_counts_as_provided() {
        assert_eq!(
            eval_with(json!({"$env": {"name": "FOO", "default": null}}), &[]).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_present_value_wins_over_default() {
        assert_eq!(
            eval_with(
                json!({"$env": {"name": "FOO", "default": 2, "type": "int"}}),
                &[("FOO", "5")]
            )
            .unwrap(),
            Value::Int(5)
        );
    }

    #[test]
    fn test_string_shorthand() {
        assert_eq!(
            eval_with(json!({"$env": "FOO"}), &[("FOO", "bar")]).unwrap(),
            Value::from("bar")
        );
    }

    #[test]
    fn test_type_conversions() {
        let vars = [("I", " 123 "), ("F", "2.5"), ("S", " raw "), ("B", "Yes")];
        let cases = [
            (json!({"$env": {"name": "I", "type": "int"}}), Value::Int(123)),
            (json!({"$env": {"name": "F", "type": "float"}}), Value::Float(2.5)),
            (json!({"$env": {"name": "I", "type": "float"}}), Value::Float(123.0)),
            (json!({"$env": {"name": "S", "type": "str"}}), Value::from(" raw ")),
            (json!({"$env": {"name": "S"}}), Value::from(" raw ")),
            (json!({"$env": {"name": "B", "type": "bool"}}), Value::Bool(true)),
        ];
        for (template, expected) in cases {
            assert_eq!(eval_with(template, &vars).unwrap(), expected);
        }
    }

    #[test]
    fn test_bool_vocabulary() {
        for raw in ["1", "true", "TRUE", "yes", "on", " On "] {
            assert_eq!(parse_bool(raw), Some(true), "{raw:?}");
        }
        for raw in ["0", "false", "False", "no", "off", "", "  "] {
            assert_eq!(parse_bool(raw), Some(false), "{raw:?}");
        }
        for raw in ["2", "truthy", "y", "-1", "null"] {
            assert_eq!(parse_bool(raw), None, "{raw:?}");
        }
    }

    #[test]
    fn test_conversion_failure() {
        match eval_with(json!({"$env": {"name": "X", "type": "int"}}), &[("X", "abc")]) {
            Err(Error::EnvironmentType {
                name,
                value,
                expected,
            }) => {
                assert_eq!(name, "X");
                assert_eq!(value, "abc");
                assert_eq!(expected, "int");
            }
            other => panic!("expected EnvironmentType, got {:?}", other),
        }
        assert!(matches!(
            eval_with(json!({"$env": {"name": "X", "type": "bool"}}), &[("X", "maybe")]),
            Err(Error::EnvironmentType { .. })
        ));
        assert!(matches!(
            eval_with(json!({"$env": {"name": "X", "type": "float"}}), &[("X", "1.2.3")]),
            Err(Error::EnvironmentType { .. })
        ));
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        for raw in ["nan", "NaN", "inf", "-inf", "infinity", "1e400"] {
            assert!(
                matches!(
                    eval_with(json!({"$env": {"name": "X", "type": "float"}}), &[("X", raw)]),
                    Err(Error::EnvironmentType { expected: "float", .. })
                ),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_arguments() {
        for args in [
            json!(5),
            json!(["FOO"]),
            json!({"default": 1}),
            json!({"name": 3}),
            json!({"name": "FOO", "type": "list"}),
            json!({"name": "FOO", "fallback": 1}),
        ] {
            assert!(
                matches!(
                    eval_with(json!({"$env": args.clone()}), &[("FOO", "1")]),
                    Err(Error::OperatorArgument { operator: "$env", .. })
                ),
                "{args} should be rejected"
            );
        }
    }
}
