/*
 * operator.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Operator registry and structural detection of operator invocations.
//!
//! An invocation is a mapping with exactly one key whose name starts with
//! [`SIGIL`]. The set of operators is closed: an unrecognized `$` key is an
//! error rather than an ordinary mapping.

use crate::error::{Error, Result};
use crate::value::Value;

/// Prefix reserved for operator names.
pub const SIGIL: char = '$';

/// The operators a template may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `$range`: integer sequences.
    Range,
    /// `$ref`: the value of another top-level key.
    Ref,
    /// `$product`: cartesian product.
    Product,
    /// `$env`: environment variable lookup.
    Env,
    /// `$+`: concatenation.
    Concat,
    /// `$zip`: positional pairing.
    Zip,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Range,
        Operator::Ref,
        Operator::Product,
        Operator::Env,
        Operator::Concat,
        Operator::Zip,
    ];

    /// The key that invokes this operator, including the sigil.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Range => "$range",
            Operator::Ref => "$ref",
            Operator::Product => "$product",
            Operator::Env => "$env",
            Operator::Concat => "$+",
            Operator::Zip => "$zip",
        }
    }

    /// Look up an operator by its key.
    pub fn from_name(name: &str) -> Option<Operator> {
        Operator::ALL.into_iter().find(|op| op.name() == name)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An operator applied to its (unevaluated) arguments.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub operator: Operator,
    pub args: &'a Value,
}

impl<'a> Invocation<'a> {
    /// Recognize `node` as an operator invocation.
    ///
    /// Returns `Ok(None)` for anything that is not shaped like one (including
    /// mappings with several keys), and [`Error::UnknownOperator`] for a lone
    /// `$` key that names no operator.
    pub fn detect(node: &'a Value) -> Result<Option<Invocation<'a>>> {
        let Some((key, args)) = sole_entry(node) else {
            return Ok(None);
        };
        if !key.starts_with(SIGIL) {
            return Ok(None);
        }
        match Operator::from_name(key) {
            Some(operator) => Ok(Some(Invocation { operator, args })),
            None => Err(Error::UnknownOperator {
                name: key.to_string(),
            }),
        }
    }
}

/// Whether `node` has the shape of an invocation, known operator or not.
pub fn is_invocation(node: &Value) -> bool {
    sole_entry(node).is_some_and(|(key, _)| key.starts_with(SIGIL))
}

fn sole_entry(node: &Value) -> Option<(&str, &Value)> {
    match node {
        Value::Mapping(m) if m.len() == 1 => m.first().map(|(k, v)| (k.as_str(), v)),
        _ => None,
    }
}
