/*
 * product.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `$product`: cartesian products.
//!
//! Two argument shapes are supported:
//!
//! - a list of sequences, producing one tuple per combination;
//! - a mapping from keys to candidate sets, producing one mapping per
//!   combination with the input key order.
//!
//! In both cases combinations are enumerated with the last dimension varying
//! fastest.
//!
//! # Candidate sets in the mapping form
//!
//! How a key's value becomes a set of candidates depends on its shape:
//!
//! | value                              | candidates                              |
//! |------------------------------------|-----------------------------------------|
//! | `{"$op": ...}`                     | the elements of the operator's result   |
//! | `[{"$op": ...}]`                   | the operator's whole result, once       |
//! | `[a, b, ...]` (anything else)      | each resolved element                   |
//!
//! The wrapped form only applies when the single element is itself an
//! invocation; `[5]` is an ordinary one-element candidate set. A nested
//! `{"$product": {...}}` used directly therefore varies over every
//! combination of the inner product, while `[{"$product": {...}}]` keeps the
//! whole inner list as one constant value.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::evaluator::{apply as apply_invocation, resolve, resolve_all};
use crate::operator::{Invocation, is_invocation};
use crate::ops::expect_items;
use crate::value::{Mapping, Value};

const NAME: &str = "$product";

pub(crate) fn apply(args: &Value, ctx: &Context<'_>) -> Result<Value> {
    match args {
        // Computed argument: evaluate it first, then treat the result as the
        // list or mapping form with every value already resolved.
        _ if is_invocation(args) => match resolve(args, ctx)? {
            Value::Mapping(entries) => {
                let dimensions = entries
                    .into_iter()
                    .map(|(key, value)| {
                        let candidates = expect_items(NAME, &format!("value of '{}'", key), value)?;
                        Ok((key, candidates))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(mapping_product(dimensions))
            }
            other => {
                let inputs = expect_items(NAME, "argument", other)?;
                list_product(inputs)
            }
        },
        Value::Sequence(items) | Value::Tuple(items) => list_product(resolve_all(items, ctx)?),
        Value::Mapping(entries) => {
            let dimensions = entries
                .iter()
                .map(|(key, child)| Ok((key.clone(), candidates(key, child, ctx)?)))
                .collect::<Result<Vec<_>>>()?;
            Ok(mapping_product(dimensions))
        }
        other => Err(Error::argument(
            NAME,
            format!("expected a list or a mapping, got {}", other.kind()),
        )),
    }
}

/// The candidate set for one key of the mapping form.
fn candidates(key: &str, child: &Value, ctx: &Context<'_>) -> Result<Vec<Value>> {
    if let Some(invocation) = Invocation::detect(child)? {
        let result = apply_invocation(invocation, ctx)?;
        return expect_items(NAME, &format!("result for '{}'", key), result);
    }

    match child {
        Value::Sequence(items) if items.len() == 1 && is_invocation(&items[0]) => {
            Ok(vec![resolve(&items[0], ctx)?])
        }
        Value::Sequence(items) | Value::Tuple(items) => resolve_all(items, ctx),
        other => Err(Error::argument(
            NAME,
            format!(
                "value of '{}' must be a sequence or an operator, got {}",
                key,
                other.kind()
            ),
        )),
    }
}

fn list_product(inputs: Vec<Value>) -> Result<Value> {
    let dimensions = inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| expect_items(NAME, &format!("argument {}", i), input))
        .collect::<Result<Vec<_>>>()?;

    Ok(Value::Sequence(
        cartesian(&dimensions).into_iter().map(Value::Tuple).collect(),
    ))
}

fn mapping_product(dimensions: Vec<(String, Vec<Value>)>) -> Value {
    let (keys, candidates): (Vec<String>, Vec<Vec<Value>>) = dimensions.into_iter().unzip();
    let combinations = cartesian(&candidates)
        .into_iter()
        .map(|combination| {
            let entries: Mapping = keys.iter().cloned().zip(combination).collect();
            Value::Mapping(entries)
        })
        .collect();
    Value::Sequence(combinations)
}

/// Every combination picking one element per dimension, last dimension fastest.
///
/// No dimensions yields a single empty combination; any empty dimension
/// yields none.
fn cartesian(dimensions: &[Vec<Value>]) -> Vec<Vec<Value>> {
    let mut combinations: Vec<Vec<Value>> = vec![Vec::with_capacity(dimensions.len())];
    for dimension in dimensions {
        combinations = combinations
            .into_iter()
            .flat_map(|prefix| {
                dimension.iter().map(move |candidate| {
                    let mut next = prefix.clone();
                    next.push(candidate.clone());
                    next
                })
            })
            .collect();
    }
    combinations
}
